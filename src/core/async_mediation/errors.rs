use std::error::Error;
use std::fmt;

pub type TaskFailure = Box<dyn Error + Send + Sync + 'static>;

#[derive(Debug)]
pub enum AsyncError {
    /// The task or continuation returned an error.
    Failed(TaskFailure),
    /// The task panicked; carries the panic message when it had one.
    Panicked(String),
    /// The task was dropped without ever producing a result.
    Abandoned,
    PoolBuild(String),
}

impl fmt::Display for AsyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(err) => write!(f, "{}", err),
            Self::Panicked(message) => write!(f, "task panicked: {}", message),
            Self::Abandoned => write!(f, "task was abandoned before completing"),
            Self::PoolBuild(message) => write!(f, "could not start worker pool: {}", message),
        }
    }
}

impl Error for AsyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Failed(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
