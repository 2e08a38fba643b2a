//! Error types for sf-client.
//!
//! Every terminal failure of an exchange is delivered to the completion
//! callback as an [`Error`]; nothing is raised across the async boundary.

/// Result type alias for sf-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used for transport causes.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for sf-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<BoxError>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new error with the given kind and an already boxed source.
    pub fn with_boxed_source(kind: ErrorKind, source: BoxError) -> Self {
        Self {
            kind,
            source: Some(source),
        }
    }

    /// HTTP status code, set only for non-2xx responses.
    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            ErrorKind::HttpStatus { status, .. } => Some(status),
            _ => None,
        }
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication(_))
    }

    /// The structured API error parsed from a failed response body, if any.
    pub fn api_error(&self) -> Option<&crate::ApiError> {
        self.source.as_deref()?.downcast_ref::<crate::ApiError>()
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The transport could not establish or keep the connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The transport raised an error while the exchange was in flight.
    #[error("Unexpected exception: {0}")]
    UnexpectedException(String),

    /// The transport timed the exchange out.
    #[error("Request expired")]
    RequestExpired,

    /// The response completed with a status outside `200..300`.
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    /// The transport refused the request before dispatching it.
    #[error("Unexpected Error: {0}")]
    Send(String),

    /// Login failed while constructing a client.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}
