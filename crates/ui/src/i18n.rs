//! Label lookup for user-facing text.

use std::collections::HashMap;

const ENGLISH: &[(&str, &str)] = &[
    ("done", "done"),
    ("inProgress", "In Progress"),
    ("skipped", "Skipped"),
    ("total", "Total"),
    ("clearProgress", "Clear Progress"),
    ("areYouSure", "Are you sure?"),
    ("yes", "Yes"),
    ("no", "No"),
    ("processing", "Processing..."),
];

/// A flat key -> label table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    #[must_use]
    pub fn english() -> Self {
        Self {
            entries: ENGLISH
                .iter()
                .map(|(key, label)| ((*key).to_owned(), (*label).to_owned()))
                .collect(),
        }
    }

    /// English labels overlaid with the entries of a flat JSON object.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if `json` is not an object of strings.
    pub fn english_with_overrides(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        let mut translations = Self::english();
        translations.entries.extend(overrides);
        Ok(translations)
    }

    #[must_use]
    pub fn t(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Lower-cased label, as used inside count lines.
    #[must_use]
    pub fn t_lower(&self, key: &str) -> Option<String> {
        self.t(key).map(str::to_lowercase)
    }
}
