use std::path::PathBuf;

use clap::Parser;

mod common;

#[derive(Parser)]
#[command(
    name = "count_symbols",
    about = "Count how often each symbol is referenced by the identifiers of a source file",
    version
)]
struct Cli {
    /// Config file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Source file to analyze
    file: PathBuf,

    /// Compiler arguments passed through to libclang
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    compiler_args: Vec<String>,
}

fn main() {
    let cli: Cli = common::parse_cli();
    clangtok::logging::init();
    common::finish(run(cli));
}

fn run(cli: Cli) -> Result<(), clangtok::error::ToolError> {
    let config = common::load_config(cli.config.as_deref())?;
    let report = clangtok::count_symbols(&cli.file, &cli.compiler_args, &config)?;
    print!("{}", clangtok::output::render_json(&report)?);
    Ok(())
}
