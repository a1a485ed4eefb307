#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Environment {
    /// Development gets colored, target-annotated logs; other environments
    /// log plain lines for collectors and test capture.
    #[must_use]
    pub fn is_development(self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// How command output is rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact single-line JSON, suitable for piping into `jq`.
    Json,
    /// Indented JSON for reading in a terminal.
    Pretty,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Pretty => write!(f, "pretty"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub output: OutputFormat,
    /// Inputs larger than this are rejected before any parsing happens.
    pub max_input_bytes: usize,
}
