use std::{error, fmt, io};

#[derive(Debug)]
pub enum WriteError {
    IoError(io::Error),
    SerializationError(String),
}

impl From<io::Error> for WriteError {
    fn from(error: io::Error) -> Self {
        WriteError::IoError(error)
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            WriteError::IoError(ref err) => {
                write!(f, "Could not write KeePass XML file: {}", err)
            }
            WriteError::SerializationError(ref msg) => {
                write!(f, "Serialization error: {}", msg)
            }
        }
    }
}

impl error::Error for WriteError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            WriteError::IoError(err) => Some(err),
            WriteError::SerializationError(_) => None,
        }
    }
}
