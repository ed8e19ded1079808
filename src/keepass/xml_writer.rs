//! Writer for KeePass 2.x XML import files.
//!
//! Every record becomes an `<Entry>` inside a single container group, which itself
//! sits in the group holding the database information. Passwords never expire and
//! auto-type is left enabled.

use std::{
    fs,
    io::{Cursor, Write},
    path::Path,
};

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{
    entry_id::{encode_uuid, IdSource},
    write_error::WriteError,
};
use crate::enpass::model::Record;

pub const DEFAULT_DATABASE_NAME: &str = "Enpass2KeePassXML";
pub const DEFAULT_GROUP_NAME: &str = "Enpass2KeePassImports";

const KEEPASS_FILE_TAG: &str = "KeePassFile";
const ROOT_TAG: &str = "Root";
const GROUP_TAG: &str = "Group";
const UUID_TAG: &str = "UUID";
const NAME_TAG: &str = "Name";
const NOTES_TAG: &str = "Notes";
const ENTRY_TAG: &str = "Entry";
const STRING_TAG: &str = "String";
const KEY_TAG: &str = "Key";
const VALUE_TAG: &str = "Value";
const AUTOTYPE_TAG: &str = "AutoType";
const ENABLED_TAG: &str = "Enabled";
const DATA_TRANSFER_OBFUSCATION_TAG: &str = "DataTransferObfuscation";
const HISTORY_TAG: &str = "History";

const NOTES_KEY: &str = "Notes";
const PASSWORD_KEY: &str = "Password";
const TITLE_KEY: &str = "Title";
const URL_KEY: &str = "URL";
const USERNAME_KEY: &str = "UserName";

/// Names given to the two generated groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNames {
    pub database: String,
    pub container: String,
}

impl Default for GroupNames {
    fn default() -> Self {
        GroupNames {
            database: DEFAULT_DATABASE_NAME.to_string(),
            container: DEFAULT_GROUP_NAME.to_string(),
        }
    }
}

/// Serializes records into a complete KeePass 2.x XML document.
pub fn write_xml(
    records: &[Record],
    names: &GroupNames,
    ids: &mut dyn IdSource,
) -> Result<String, WriteError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b'\t', 1);

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
    )?;
    start(&mut writer, KEEPASS_FILE_TAG)?;
    start(&mut writer, ROOT_TAG)?;

    // Database information group
    start(&mut writer, GROUP_TAG)?;
    text_element(&mut writer, UUID_TAG, &encode_uuid(&ids.next_id()))?;
    text_element(&mut writer, NAME_TAG, &names.database)?;
    empty_element(&mut writer, NOTES_TAG)?;

    // Container group holding the entries
    start(&mut writer, GROUP_TAG)?;
    text_element(&mut writer, UUID_TAG, &encode_uuid(&ids.next_id()))?;
    text_element(&mut writer, NAME_TAG, &names.container)?;
    for record in records {
        write_entry(&mut writer, record, ids)?;
    }
    end(&mut writer, GROUP_TAG)?;

    end(&mut writer, GROUP_TAG)?;
    end(&mut writer, ROOT_TAG)?;
    end(&mut writer, KEEPASS_FILE_TAG)?;

    let result = writer.into_inner().into_inner();
    String::from_utf8(result).map_err(|e| WriteError::SerializationError(e.to_string()))
}

/// Serializes records and writes the document to `path` in one call.
pub fn write_file<P: AsRef<Path>>(
    path: P,
    records: &[Record],
    names: &GroupNames,
    ids: &mut dyn IdSource,
) -> Result<(), WriteError> {
    let xml = write_xml(records, names, ids)?;
    fs::write(path, xml)?;
    Ok(())
}

fn write_entry<W: Write>(
    writer: &mut Writer<W>,
    record: &Record,
    ids: &mut dyn IdSource,
) -> Result<(), WriteError> {
    start(writer, ENTRY_TAG)?;
    text_element(writer, UUID_TAG, &encode_uuid(&ids.next_id()))?;

    string_field(writer, NOTES_KEY, &record.note)?;
    string_field(writer, PASSWORD_KEY, &record.password)?;
    string_field(writer, TITLE_KEY, &record.title)?;
    string_field(writer, URL_KEY, &record.url)?;
    string_field(writer, USERNAME_KEY, &record.username)?;

    for (key, value) in &record.custom_fields {
        string_field(writer, key, value)?;
    }

    start(writer, AUTOTYPE_TAG)?;
    text_element(writer, ENABLED_TAG, "true")?;
    text_element(writer, DATA_TRANSFER_OBFUSCATION_TAG, "0")?;
    end(writer, AUTOTYPE_TAG)?;

    empty_element(writer, HISTORY_TAG)?;
    end(writer, ENTRY_TAG)
}

// ─── Helpers ────────────────────────────────────────────────────────

/// `<String><Key>key</Key><Value>value</Value></String>`
fn string_field<W: Write>(
    writer: &mut Writer<W>,
    key: &str,
    value: &str,
) -> Result<(), WriteError> {
    start(writer, STRING_TAG)?;
    text_element(writer, KEY_TAG, key)?;
    text_element(writer, VALUE_TAG, value)?;
    end(writer, STRING_TAG)
}

fn text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), WriteError> {
    start(writer, tag)?;
    write(writer, Event::Text(BytesText::from_escaped(escape(text))))?;
    end(writer, tag)
}

fn empty_element<W: Write>(writer: &mut Writer<W>, tag: &str) -> Result<(), WriteError> {
    write(writer, Event::Empty(BytesStart::new(tag)))
}

fn start<W: Write>(writer: &mut Writer<W>, tag: &str) -> Result<(), WriteError> {
    write(writer, Event::Start(BytesStart::new(tag)))
}

fn end<W: Write>(writer: &mut Writer<W>, tag: &str) -> Result<(), WriteError> {
    write(writer, Event::End(BytesEnd::new(tag)))
}

fn write<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), WriteError> {
    writer
        .write_event(event)
        .map_err(|e| WriteError::SerializationError(e.to_string()))
}
