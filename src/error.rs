use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolError>;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Failed to parse translation unit: {file}")]
    Parse { file: String },

    #[error("Failed to tokenize file: {file}")]
    Tokenize { file: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}
