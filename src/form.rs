//! `application/x-www-form-urlencoded` field access.

use std::collections::HashMap;

/// Decoded form fields, as submitted by an HTML `<form method="post">`.
///
/// Mirrors what a browser sends: every value is a string, absent fields are
/// `None`, and the first occurrence of a repeated field wins.
#[derive(Clone, Debug, Default)]
pub struct Form {
    fields: HashMap<String, String>,
}

impl Form {
    /// Decodes a urlencoded body or query string. Invalid UTF-8 is replaced
    /// lossily rather than rejected.
    pub fn parse(input: &[u8]) -> Self {
        let mut fields = HashMap::new();
        for (k, v) in url::form_urlencoded::parse(input) {
            fields.entry(k.into_owned()).or_insert_with(|| v.into_owned());
        }
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field `name` parsed as an integer. `None` when absent or not a number.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name)?.trim().parse().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
