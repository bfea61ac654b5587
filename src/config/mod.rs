use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};
use crate::frontend::ParseOptions;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".clangtok.toml";

/// Top-level configuration from `.clangtok.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parse: ParseSettings,
    #[serde(default)]
    pub symbols: SymbolSettings,
    #[serde(default)]
    pub tokenize: TokenizeSettings,
}

/// How translation units are built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseSettings {
    /// Record macro definitions, expansions and inclusion directives.
    #[serde(default = "default_true")]
    pub detailed_preprocessing: bool,
    /// Let libclang print diagnostics to stderr while parsing.
    #[serde(default = "default_true")]
    pub display_diagnostics: bool,
    /// Compiler arguments appended after the ones given on the command line.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            detailed_preprocessing: true,
            display_diagnostics: true,
            extra_args: Vec::new(),
        }
    }
}

impl ParseSettings {
    pub fn options(&self) -> ParseOptions {
        ParseOptions {
            detailed_preprocessing: self.detailed_preprocessing,
        }
    }

    /// Command-line compiler arguments followed by the configured extras.
    pub fn compiler_args(&self, cli_args: &[String]) -> Vec<String> {
        cli_args
            .iter()
            .chain(self.extra_args.iter())
            .cloned()
            .collect()
    }
}

/// Symbol map filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolSettings {
    /// Spelling prefix that marks compiler intrinsics.
    #[serde(default = "default_builtin_prefix")]
    pub builtin_prefix: String,
    /// Names dropped from the symbol map output. libclang models these
    /// library functions and macros in ways that only add noise.
    #[serde(default = "default_ignored_names")]
    pub ignored_names: Vec<String>,
}

impl Default for SymbolSettings {
    fn default() -> Self {
        Self {
            builtin_prefix: default_builtin_prefix(),
            ignored_names: default_ignored_names(),
        }
    }
}

/// Tokenizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizeSettings {
    /// Include directories passed as `-I<dir>` to every tokenized file.
    #[serde(default = "default_include_dirs")]
    pub include_dirs: Vec<String>,
}

impl Default for TokenizeSettings {
    fn default() -> Self {
        Self {
            include_dirs: default_include_dirs(),
        }
    }
}

impl TokenizeSettings {
    pub fn include_args(&self) -> Vec<String> {
        self.include_dirs
            .iter()
            .map(|dir| format!("-I{dir}"))
            .collect()
    }
}

fn default_true() -> bool {
    true
}

fn default_builtin_prefix() -> String {
    "__builtin".into()
}

fn default_ignored_names() -> Vec<String> {
    ["fun", "strcpy", "memset", "memcpy", "malloc"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_include_dirs() -> Vec<String> {
    vec!["/usr/lib/llvm-3.8/bin/../lib/clang/3.8.1/include".into()]
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load an explicitly requested config file, which must exist, or fall
    /// back to [`DEFAULT_CONFIG_FILE`] in the working directory.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) if !path.exists() => Err(ToolError::Config(format!(
                "config file not found: {}",
                path.display()
            ))),
            Some(path) => Self::load(path),
            None => Self::load(Path::new(DEFAULT_CONFIG_FILE)),
        }
    }
}
