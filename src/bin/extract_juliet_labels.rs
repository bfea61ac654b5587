use std::path::PathBuf;

use clap::Parser;

mod common;

#[derive(Parser)]
#[command(
    name = "extract_juliet_labels",
    about = "Print Juliet labels found in comment blocks with their enclosing declaration",
    version
)]
struct Cli {
    /// Config file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Source file to scan
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
    let records = clangtok::extract_labels(&cli.file, &cli.compiler_args, &config)?;
    print!("{}", clangtok::output::render_labels(&records));
    Ok(())
}
