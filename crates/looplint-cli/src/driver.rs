use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use looplint_checker::{LintOptions, lint_source};
use looplint_common::Diagnostic;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::args::CliArgs;
use crate::config::{ResolvedOptions, config_path, load_config, resolve_options};

/// Worker stack size. The parser recurses once per nesting level.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Directories the Go tool never treats as part of a package tree.
const SKIPPED_DIR_NAMES: [&str; 2] = ["vendor", "testdata"];

#[derive(Debug, Default)]
pub struct LintRun {
    /// Findings sorted by file, offset, then code.
    pub diagnostics: Vec<Diagnostic>,
    /// Source text of every checked file, keyed by the name used in diagnostics.
    pub sources: FxHashMap<String, String>,
    pub files_checked: usize,
}

impl LintRun {
    pub fn has_findings(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<LintRun> {
    let config = match config_path(args, cwd) {
        Some(path) => Some(load_config(&path)?),
        None => None,
    };
    let options = resolve_options(args, config.as_ref());
    let roots: Vec<PathBuf> = args
        .paths
        .iter()
        .map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                cwd.join(path)
            }
        })
        .collect();
    run_with_options(&roots, cwd, &options)
}

pub fn run_with_options(roots: &[PathBuf], cwd: &Path, options: &ResolvedOptions) -> Result<LintRun> {
    let exclude = build_exclude_set(&options.exclude)?;
    let files = discover_go_files(roots, cwd, &exclude)?;
    tracing::debug!(files = files.len(), "discovered go files");

    let pool = rayon::ThreadPoolBuilder::new()
        .stack_size(WORKER_STACK_SIZE)
        .build()
        .context("failed to start worker pool")?;
    let results: Vec<(String, String, Vec<Diagnostic>)> = pool.install(|| {
        files
            .par_iter()
            .map(|path| lint_file(path, cwd, &options.lint))
            .collect::<Result<Vec<_>>>()
    })?;

    let mut run = LintRun {
        files_checked: results.len(),
        ..LintRun::default()
    };
    for (name, source, diagnostics) in results {
        run.diagnostics.extend(diagnostics);
        run.sources.insert(name, source);
    }
    run.diagnostics
        .sort_by(|a, b| (&a.file, a.start, a.code).cmp(&(&b.file, b.start, b.code)));
    Ok(run)
}

fn lint_file(path: &Path, cwd: &Path, options: &LintOptions) -> Result<(String, String, Vec<Diagnostic>)> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = display_name(path, cwd);
    let _span = tracing::debug_span!("lint_file", file = %name).entered();
    let diagnostics = lint_source(&name, &source, options);
    tracing::debug!(diagnostics = diagnostics.len(), "linted file");
    Ok((name, source, diagnostics))
}

/// Paths under `cwd` are reported relative to it.
pub fn display_name(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid exclude pattern '{pattern}'"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build exclude patterns")
}

/// Explicit files are kept whatever their extension; directories contribute
/// their `*.go` files. Results are sorted and deduplicated.
pub fn discover_go_files(roots: &[PathBuf], cwd: &Path, exclude: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        let metadata = std::fs::metadata(root)
            .with_context(|| format!("failed to access {}", root.display()))?;
        if metadata.is_file() {
            if !is_excluded(root, cwd, exclude) {
                files.push(root.clone());
            }
            continue;
        }

        let walker = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));
        for entry in walker {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "go") {
                continue;
            }
            if is_excluded(path, cwd, exclude) {
                tracing::trace!(path = %path.display(), "excluded");
                continue;
            }
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('_') || SKIPPED_DIR_NAMES.contains(&name.as_ref())
}

/// Patterns match either the cwd-relative path or the path as given.
fn is_excluded(path: &Path, cwd: &Path, exclude: &GlobSet) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let relative = path.strip_prefix(cwd).unwrap_or(path);
    exclude.is_match(relative) || exclude.is_match(path)
}
