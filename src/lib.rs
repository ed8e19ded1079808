//! Converts Enpass `.txt` exports into KeePass 2.x XML import files.

pub mod convert;
pub mod enpass;
pub mod keepass;
