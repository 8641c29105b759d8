use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown diagnostic category: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
