use std::path::PathBuf;

use clap::Parser;

mod common;

#[derive(Parser)]
#[command(
    name = "tokenize",
    about = "Write an annotated token stream for each source file to <basename>.tok",
    version
)]
struct Cli {
    /// Config file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Directory the .tok files are written to
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// Source files to tokenize, processed in order
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    let cli: Cli = common::parse_cli();
    clangtok::logging::init();
    common::finish(run(cli));
}

fn run(cli: Cli) -> Result<(), clangtok::error::ToolError> {
    let config = common::load_config(cli.config.as_deref())?;
    for file in &cli.files {
        clangtok::write_token_file(file, &cli.output_dir, &config)?;
    }
    Ok(())
}
