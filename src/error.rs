/// Failures of a proofreading check
///
/// None of these leave the problem registry partially updated: a check only
/// commits when the whole response has been delivered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The proofreading service could not be reached
    #[error("error, unable to connect to the proofreading service: {0}")]
    Transport(String),

    /// The service answered with something that is not a valid response
    #[error("could not parse server response: {0}")]
    ResponseParse(String),

    /// A newer check was started before this response arrived
    #[error("discarded stale response for check {ticket} (latest is {latest})")]
    StaleResponse { ticket: u64, latest: u64 },
}

impl CheckError {
    /// Whether the failure should be shown to the user
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, CheckError::StaleResponse { .. })
    }
}
