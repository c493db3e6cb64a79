use thiserror::Error;

/// Raised while building the startup configuration. Any of these stops the
/// process before the listener is bound.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not configured. Create a .env file with your API key.")]
    MissingApiKey,

    #[error("REQUEST_TIMEOUT_SECS must be at least 1 second")]
    InvalidTimeout,

    #[error("TLS is enabled but {0} is not set")]
    MissingTlsPath(&'static str),

    #[error("Failed to read {kind} file '{path}': {source}")]
    Io {
        kind: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} file '{path}' is empty")]
    EmptyFile { kind: &'static str, path: String },
}

/// Failure of a single chat turn. The display text is what the browser sees
/// in the `error` field.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid chat client configuration: {0}")]
    ClientSetup(String),

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("Request to chat completion API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat completion API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode chat completion response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No choices returned by chat completion API")]
    EmptyChoices,

    #[error("Chat completion API returned a choice without content")]
    MissingContent,
}
