use std::path::Path;
use std::process;

use clap::Parser;

use clangtok::config::Config;
use clangtok::error::ToolError;

/// Parse the command line. Usage errors exit with status 1; `--help` and
/// `--version` exit normally.
pub fn parse_cli<C: Parser>() -> C {
    C::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            process::exit(1);
        }
        e.exit()
    })
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ToolError> {
    Config::resolve(path)
}

/// Report the outcome and terminate the process.
pub fn finish(result: Result<(), ToolError>) -> ! {
    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}
