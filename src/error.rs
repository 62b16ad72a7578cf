use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("`{command}` failed with status {code}{}", .stderr.as_deref().map(|s| format!(": {s}")).unwrap_or_default())]
    Process {
        command: String,
        code: i32,
        stderr: Option<String>,
    },

    #[error("Invalid JSON from `{command}`: {source}")]
    Parse {
        command: String,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn environment(message: impl Into<String>) -> Self {
        Error::Environment(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn process(args: &[String], code: i32, stderr: Option<String>) -> Self {
        Error::Process {
            command: args.join(" "),
            code,
            stderr: stderr.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn parse(args: &[String], source: serde_json::Error) -> Self {
        Error::Parse {
            command: args.join(" "),
            source,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::Environment(_) => "ENVIRONMENT_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Process { .. } => "PROCESS_ERROR",
            Error::Parse { .. } => "PARSE_ERROR",
            Error::Io(_) => "IO_ERROR",
        }
    }
}
