use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitcalError>;

#[derive(Error, Debug)]
pub enum GitcalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

/// Failure confined to a single commit event; the event is skipped and the
/// run carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(i64),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::reference::find::existing::Error> for GitcalError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        GitcalError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for GitcalError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        GitcalError::HeadPeel(Box::new(err))
    }
}

impl From<gix::discover::Error> for GitcalError {
    fn from(err: gix::discover::Error) -> Self {
        GitcalError::GitDiscover(Box::new(err))
    }
}
