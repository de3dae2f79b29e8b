/// Client-side error taxonomy
///
/// Three kinds: the transport failed, the server answered with a failure
/// body, or a client-side precondition was violated before any network
/// traffic happened.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Application(String),

    #[error("{0}")]
    Validation(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Message shown when a group submission is attempted with nothing selected.
pub const EMPTY_GROUP_SELECTION: &str = "Please select at least one movie first.";

/// Message shown when a group fetch succeeds but matches nothing.
pub const NO_GROUP_MATCHES: &str =
    "No group recommendations found. Try adding different movies.";

/// The catalog operation an error originated from. Keys the default-message
/// table so every call site reports failures the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    Recommend,
    GroupRecommend,
}

impl Operation {
    /// Fallback when a non-2xx body carries no usable `error` field.
    pub fn default_message(self) -> &'static str {
        match self {
            Operation::Search => "Search failed",
            Operation::Recommend => "Failed to get recommendations",
            Operation::GroupRecommend => "Failed to get group recommendations",
        }
    }

    /// Message shown when the request itself never completed.
    pub fn transport_message(self) -> &'static str {
        match self {
            Operation::Search => "Failed to search movies. Please try again.",
            Operation::Recommend => "Failed to get recommendations. Please try again.",
            Operation::GroupRecommend => {
                "Failed to get group recommendations. Please try again."
            }
        }
    }
}

impl ClientError {
    /// Text for the error region: server-supplied detail when available, a
    /// per-operation fallback otherwise. Raw transport detail never reaches
    /// the user.
    pub fn user_message(&self, operation: Operation) -> String {
        match self {
            ClientError::Application(message) | ClientError::Validation(message) => {
                message.clone()
            }
            ClientError::Transport(_) => operation.transport_message().to_string(),
        }
    }
}
