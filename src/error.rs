use reqwest::StatusCode;
use thiserror::Error;

/// Underlying cause of a failed API call.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Error fetching {resource}")]
    Fetch {
        resource: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("Error creating post")]
    Create {
        #[source]
        source: TransportError,
    },

    #[error("Error updating post {id}")]
    Update {
        id: u32,
        #[source]
        source: TransportError,
    },

    #[error("Error deleting post {id}")]
    Delete {
        id: u32,
        #[source]
        source: TransportError,
    },

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ApiError {
    /// The wrapped transport cause, if this error came from a request.
    pub fn cause(&self) -> Option<&TransportError> {
        match self {
            ApiError::Fetch { source, .. }
            | ApiError::Create { source }
            | ApiError::Update { source, .. }
            | ApiError::Delete { source, .. } => Some(source),
            ApiError::InvalidBaseUrl { .. } | ApiError::ClientBuild(_) => None,
        }
    }

    /// HTTP status of a non-success response.
    pub fn status(&self) -> Option<StatusCode> {
        match self.cause() {
            Some(TransportError::Status { status, .. }) => Some(*status),
            Some(TransportError::Http(err)) => err.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
