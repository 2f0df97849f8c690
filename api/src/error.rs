use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("enter a valid email address")]
    InvalidEmail,
    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },
    #[error("an account already exists for {0}")]
    EmailTaken(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("`{0}` is not a calendar date (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("an entry for {0} already exists")]
    DuplicateDate(String),
    #[error("entry store unavailable")]
    Unavailable,
}
