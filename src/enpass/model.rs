use std::collections::BTreeMap;

/// One password entry recovered from an Enpass text export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub note: String,
    pub custom_fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new(
        title: String,
        username: String,
        password: String,
        url: String,
        note: String,
        custom_fields: BTreeMap<String, String>,
    ) -> Self {
        Record {
            title,
            username,
            password,
            url,
            note,
            custom_fields,
        }
    }
}
