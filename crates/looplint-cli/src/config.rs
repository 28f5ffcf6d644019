use anyhow::{Context, Result};
use looplint_checker::LintOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = ".gotestlooplint.json";

/// Contents of `.gotestlooplint.json`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LooplintConfig {
    #[serde(default)]
    pub test_functions_only: Option<bool>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

/// Options after merging the config file with command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub lint: LintOptions,
    pub exclude: Vec<String>,
}

pub fn load_config(path: &Path) -> Result<LooplintConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&source).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn parse_config(source: &str) -> Result<LooplintConfig> {
    if source.trim().is_empty() {
        return Ok(LooplintConfig::default());
    }
    Ok(serde_json::from_str(source)?)
}

/// An explicit `--config` must exist; the default file is optional.
pub fn config_path(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = args.config.as_ref() {
        return Some(if path.is_absolute() {
            path.clone()
        } else {
            cwd.join(path)
        });
    }
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Flags win over the config file; exclude patterns from both are kept.
pub fn resolve_options(args: &CliArgs, config: Option<&LooplintConfig>) -> ResolvedOptions {
    let config_test_functions_only = config
        .and_then(|config| config.test_functions_only)
        .unwrap_or(false);
    let mut exclude: Vec<String> = config
        .and_then(|config| config.exclude.clone())
        .unwrap_or_default();
    exclude.extend(args.exclude.iter().cloned());

    ResolvedOptions {
        lint: LintOptions {
            test_functions_only: args.test_functions_only || config_test_functions_only,
        },
        exclude,
    }
}
