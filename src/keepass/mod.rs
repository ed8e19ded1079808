pub mod entry_id;
pub mod write_error;
pub mod xml_writer;
