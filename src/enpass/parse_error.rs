use std::{error, fmt, io};

#[derive(Debug)]
pub enum ParseError {
    Format { line_number: usize, line: String },
    IoError(io::Error),
}

impl From<io::Error> for ParseError {
    fn from(error: io::Error) -> Self {
        ParseError::IoError(error)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParseError::Format {
                line_number,
                ref line,
            } => {
                write!(
                    f,
                    "Could not parse Enpass text file at line {}: {:?}. Please check the exported Enpass text file.",
                    line_number, line
                )
            }
            ParseError::IoError(ref err) => {
                write!(f, "Could not read Enpass text file: {}", err)
            }
        }
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseError::IoError(err) => Some(err),
            ParseError::Format { .. } => None,
        }
    }
}
