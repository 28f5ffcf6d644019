use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the gotestlooplint binary.
#[derive(Parser, Debug)]
#[command(
    name = "gotestlooplint",
    version,
    about = "Reports loop variables captured by parallel subtests and Ginkgo specs"
)]
pub struct CliArgs {
    /// Go files or directories to check. Directories are walked recursively.
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Skip paths matching this glob. May be given more than once.
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Print findings as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Enable color and source snippets in text output.
    #[arg(long)]
    pub pretty: Option<bool>,

    /// Only check loops inside top-level `Test...` functions.
    #[arg(long = "test-functions-only", alias = "testFunctionsOnly")]
    pub test_functions_only: bool,

    /// Path to a `.gotestlooplint.json` config file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
