use crate::{FetchError, Response, Result, TransportError};

/// What the final attempt produced when every retry was used up.
#[derive(Debug)]
pub enum LastFailure {
    /// The server answered with a 5xx status.
    Response(Response),
    /// The server could not be reached.
    Transport(TransportError),
}

/// Result of a retried fetch, with both failure classes in one place.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A non-retriable response arrived. This includes 4xx.
    Completed { response: Response, attempts: u32 },
    /// The last allowed attempt still failed transiently.
    RetriesExhausted { attempts: u32, last: LastFailure },
}

impl FetchOutcome {
    /// Number of requests actually sent.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Completed { attempts, .. } | Self::RetriesExhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Maps back to the plain response contract: an exhausted 5xx is still
    /// returned as a response, an exhausted network failure becomes an error.
    pub fn into_result(self) -> Result<Response> {
        match self {
            Self::Completed { response, .. } => Ok(response),
            Self::RetriesExhausted {
                last: LastFailure::Response(response),
                ..
            } => Ok(response),
            Self::RetriesExhausted {
                last: LastFailure::Transport(err),
                ..
            } => Err(FetchError::Transport(err)),
        }
    }
}
