use thiserror::Error;

/// Error taxonomy for the progress store and handlers.
///
/// Handlers convert every variant into a user-visible reply at the
/// boundary; none of these terminate the process.
#[derive(Debug, Error)]
pub enum BotError {
    /// I/O failure against the persistence layer. Surfaced to the user
    /// as a generic "try again later" message.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// User-supplied input outside the accepted range. Recovered by
    /// re-prompting.
    #[error("{0}")]
    Validation(String),

    /// Operation referencing a user with no enrollment. Recovered by
    /// instructing the user to enroll.
    #[error("user {0} is not enrolled")]
    NotFound(i64),
}
