use thiserror::Error;

/// Result type for telesync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for telesync operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Directory watching errors (bad roots, failed scans)
    #[error("Watch error: {0}")]
    Watch(String),

    /// Telegram Bot API errors
    #[error("Telegram error: {0}")]
    Telegram(String),

    /// A file failed to dispatch to the remote endpoint
    #[error("failed to send {file} as {category}: {source}")]
    Dispatch {
        file: String,
        category: String,
        #[source]
        source: Box<Error>,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a watch error
    pub fn watch(msg: impl Into<String>) -> Self {
        Self::Watch(msg.into())
    }

    /// Creates a Telegram API error
    pub fn telegram(msg: impl Into<String>) -> Self {
        Self::Telegram(msg.into())
    }

    /// Creates a dispatch error wrapping the uploader failure
    pub fn dispatch(file: impl Into<String>, category: impl Into<String>, source: Error) -> Self {
        Self::Dispatch {
            file: file.into(),
            category: category.into(),
            source: Box::new(source),
        }
    }

    /// Creates an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}
