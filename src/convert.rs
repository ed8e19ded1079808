use std::{
    error, fmt,
    path::{Path, PathBuf},
};

use chrono::Local;
use log::{debug, info};

use crate::enpass::{parse_error::ParseError, parser};
use crate::keepass::{
    entry_id::{IdSource, RandomIds, SeededIds},
    write_error::WriteError,
    xml_writer::{self, GroupNames},
};

const ROOT_FILENAME: &str = "Enpass2KeePass";
const FILENAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub names: GroupNames,
    /// Replaces the generated timestamped file name.
    pub file_name: Option<String>,
    /// Makes the generated UUIDs reproducible.
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub enum ConvertError {
    InvalidInput(String),
    ParseError(ParseError),
    WriteError(WriteError),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::InvalidInput(msg) => write!(f, "{}", msg),
            ConvertError::ParseError(err) => write!(f, "{}", err),
            ConvertError::WriteError(err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ConvertError::InvalidInput(_) => None,
            ConvertError::ParseError(err) => Some(err),
            ConvertError::WriteError(err) => Some(err),
        }
    }
}

impl From<ParseError> for ConvertError {
    fn from(err: ParseError) -> Self {
        ConvertError::ParseError(err)
    }
}

impl From<WriteError> for ConvertError {
    fn from(err: WriteError) -> Self {
        ConvertError::WriteError(err)
    }
}

/// Converts the Enpass export at `input` into a KeePass XML file inside
/// `output_dir` and returns the path of the written file.
///
/// Nothing is written when the export cannot be parsed. Two conversions writing
/// the same output path at the same time race; the last write wins.
pub fn convert(
    input: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
) -> Result<PathBuf, ConvertError> {
    if !input.is_file() {
        return Err(ConvertError::InvalidInput(
            "Must specify a valid input Enpass exported .txt file".to_string(),
        ));
    }
    if !output_dir.is_dir() {
        return Err(ConvertError::InvalidInput(
            "Must specify a valid output directory".to_string(),
        ));
    }

    let file_name = options
        .file_name
        .clone()
        .unwrap_or_else(generate_file_name);
    let output_path = output_dir.join(file_name);

    debug!("Parsing Enpass export {}", input.display());
    let records = parser::parse_file(input)?;
    info!("Parsed {} entries from {}", records.len(), input.display());

    let mut ids: Box<dyn IdSource> = match options.seed {
        Some(seed) => {
            debug!("Using seeded UUIDs (seed {})", seed);
            Box::new(SeededIds::new(seed))
        }
        None => Box::new(RandomIds),
    };

    xml_writer::write_file(&output_path, &records, &options.names, ids.as_mut())?;
    info!("KeePass XML written to {}", output_path.display());

    Ok(output_path)
}

/// `Enpass2KeePass_<yyyy-MM-dd_HH-mm-ss>.xml` in local time.
pub fn generate_file_name() -> String {
    let date = Local::now().format(FILENAME_TIMESTAMP_FORMAT);
    format!("{}_{}.xml", ROOT_FILENAME, date)
}
