#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use looplint_cli::args::CliArgs;
use looplint_cli::driver;
use looplint_cli::reporter::Reporter;

const EXIT_SUCCESS: i32 = 0;
/// Go analysis drivers exit with 3 when diagnostics were reported.
const EXIT_FINDINGS: i32 = 3;

fn main() -> Result<()> {
    // LOOPLINT_LOG / RUST_LOG, LOOPLINT_LOG_FORMAT=tree|json|text.
    looplint_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let run = driver::run(&args, &cwd)?;
    tracing::debug!(
        files = run.files_checked,
        diagnostics = run.diagnostics.len(),
        "lint finished"
    );

    let has_findings = run.has_findings();
    if args.json {
        let mut reporter = Reporter::with_sources(false, run.sources);
        println!("{}", reporter.render_json(&run.diagnostics)?);
    } else if has_findings {
        let pretty = args
            .pretty
            .unwrap_or_else(|| std::io::stderr().is_terminal());
        let mut reporter = Reporter::with_sources(pretty, run.sources);
        eprint!("{}", reporter.render(&run.diagnostics));
    }

    if has_findings {
        std::process::exit(EXIT_FINDINGS);
    }
    std::process::exit(EXIT_SUCCESS);
}
