//! Parser for Enpass `.txt` exports.
//!
//! An export is a flat list of `Key : Value` lines. Assumptions about the format:
//! - every entry starts with a `Title : ` line, and an entry holds only one title
//!   (the "Identity Card" entry type has two and is not supported)
//! - entries are not reliably separated by blank lines: an entry with an empty note
//!   runs straight into the next `Title : ` line, so the title is the only delimiter
//! - any line that is not a known field and follows a `Note : ` line continues that note
//! - anything else must be a custom field of the form `Key : Value`

use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use super::{model::Record, parse_error::ParseError};

const TITLE_DELIM: &str = "Title : ";
const USERNAME_DELIM: &str = "Username : ";
const PASSWORD_DELIM: &str = "Password : ";
const URL_DELIM: &str = "Url : ";
const NOTE_DELIM: &str = "Note : ";

const CUSTOM_FIELD_SEPARATOR: &str = " : ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Username,
    Password,
    Url,
    Note,
    Custom,
}

/// Fields collected for the entry currently being read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingRecord {
    title: Option<String>,
    username: String,
    password: String,
    url: String,
    note: String,
    custom_fields: BTreeMap<String, String>,
}

impl PendingRecord {
    fn finish(self) -> Record {
        Record::new(
            self.title.unwrap_or_default(),
            self.username,
            self.password,
            self.url,
            self.note,
            self.custom_fields,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserState {
    Idle,
    Open {
        record: PendingRecord,
        last_field: Field,
    },
}

/// Feeds one line into the parser. Returns the next state and, when the line
/// starts a new entry, the entry it closed.
pub fn step(
    state: ParserState,
    line: &str,
    line_number: usize,
) -> Result<(ParserState, Option<Record>), ParseError> {
    if let Some(title) = value_after(line, TITLE_DELIM) {
        let (mut record, closed) = match state {
            ParserState::Open { record, .. } if record.title.is_some() => {
                (PendingRecord::default(), Some(record.finish()))
            }
            ParserState::Open { record, .. } => (record, None),
            ParserState::Idle => (PendingRecord::default(), None),
        };
        record.title = Some(title.to_string());

        let state = ParserState::Open {
            record,
            last_field: Field::Title,
        };
        return Ok((state, closed));
    }

    let (mut record, last_field) = match state {
        ParserState::Idle => (PendingRecord::default(), None),
        ParserState::Open { record, last_field } => (record, Some(last_field)),
    };

    let field = if let Some(username) = line.strip_prefix(USERNAME_DELIM) {
        record.username = username.to_string();
        Field::Username
    } else if let Some(password) = value_after(line, PASSWORD_DELIM) {
        record.password = password.to_string();
        Field::Password
    } else if let Some(url) = value_after(line, URL_DELIM) {
        record.url = url.to_string();
        Field::Url
    } else if let Some(note) = value_after(line, NOTE_DELIM) {
        record.note = note.to_string();
        Field::Note
    } else if last_field == Some(Field::Note) {
        record.note.push('\n');
        record.note.push_str(line);
        Field::Note
    } else {
        match split_custom_field(line) {
            Some((key, value)) => {
                record
                    .custom_fields
                    .insert(key.to_string(), value.to_string());
                Field::Custom
            }
            None => {
                return Err(ParseError::Format {
                    line_number,
                    line: line.to_string(),
                })
            }
        }
    };

    let state = ParserState::Open {
        record,
        last_field: field,
    };
    Ok((state, None))
}

/// Closes the entry still open when input runs out.
pub fn finish(state: ParserState) -> Option<Record> {
    match state {
        ParserState::Idle => None,
        ParserState::Open { record, .. } => Some(record.finish()),
    }
}

pub fn parse_lines<I, S>(lines: I) -> Result<Vec<Record>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    collect_records(lines.into_iter().map(Ok::<S, io::Error>))
}

pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Record>, ParseError> {
    collect_records(reader.lines())
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, ParseError> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

fn collect_records<I, S>(lines: I) -> Result<Vec<Record>, ParseError>
where
    I: Iterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    let mut state = ParserState::Idle;

    for (index, line) in lines.enumerate() {
        let line = line?;
        let (next, closed) = step(state, line.as_ref(), index + 1)?;
        records.extend(closed);
        state = next;
    }

    // The last entry has no following title to close it.
    records.extend(finish(state));
    Ok(records)
}

fn value_after<'a>(line: &'a str, delim: &str) -> Option<&'a str> {
    line.split_once(delim).map(|(_, value)| value)
}

fn split_custom_field(line: &str) -> Option<(&str, &str)> {
    line.split_once(CUSTOM_FIELD_SEPARATOR)
}
