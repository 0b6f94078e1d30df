use std::error::Error as StdError;

#[derive(Debug)]
pub enum Error {
    /// The display sink could not accept a finished frame.
    Presentation(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> core::result::Result<(), std::fmt::Error> {
        match self {
            Error::Presentation(msg) => write!(f, "PresentationError: {}", msg),
        }
    }
}

impl StdError for Error {}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn from_presentation(msg: String) -> Self {
        Error::Presentation(msg)
    }
}
