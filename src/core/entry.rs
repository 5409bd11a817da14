//! Registry entries and the rules for drafting new ones

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest abbreviation the registry accepts
pub const MAX_ABBREVIATION_LEN: usize = 10;
/// Shortest abbreviation the registry accepts
pub const MIN_ABBREVIATION_LEN: usize = 2;
pub const MAX_TITLE_LEN: usize = 100;
pub const MIN_TITLE_LEN: usize = 3;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MIN_DESCRIPTION_LEN: usize = 3;

/// A registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Uppercase key, e.g. `DOT`
    pub abbreviation: String,
    pub title: String,
    /// Free-form text; may reference other entries as `#ABBR`
    pub description: String,
}

/// Why a draft cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Abbreviation must be at least 2 characters")]
    AbbreviationTooShort,
    #[error("Title must be at least 3 characters")]
    TitleTooShort,
    #[error("Description must be at least 3 characters")]
    DescriptionTooShort,
    #[error("Description must be at most 1000 characters")]
    DescriptionTooLong,
}

/// User input for a new entry, normalized on construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub abbreviation: String,
    pub title: String,
    pub description: String,
}

impl EntryDraft {
    /// Create a draft, normalizing abbreviation and title
    pub fn new(abbreviation: &str, title: &str, description: impl Into<String>) -> Self {
        Self {
            abbreviation: normalize_abbreviation(abbreviation),
            title: normalize_title(title),
            description: description.into(),
        }
    }

    /// Check the draft and turn it into an entry
    pub fn validate(&self) -> Result<Entry, EntryError> {
        if self.abbreviation.trim().is_empty()
            || self.title.trim().is_empty()
            || self.description.trim().is_empty()
        {
            return Err(EntryError::MissingFields);
        }

        if self.abbreviation.chars().count() < MIN_ABBREVIATION_LEN {
            return Err(EntryError::AbbreviationTooShort);
        }

        if self.title.chars().count() < MIN_TITLE_LEN {
            return Err(EntryError::TitleTooShort);
        }

        let description_len = self.description.chars().count();
        if description_len < MIN_DESCRIPTION_LEN {
            return Err(EntryError::DescriptionTooShort);
        }
        if description_len > MAX_DESCRIPTION_LEN {
            return Err(EntryError::DescriptionTooLong);
        }

        Ok(Entry {
            abbreviation: self.abbreviation.to_uppercase(),
            title: self.title.clone(),
            description: self.description.clone(),
        })
    }
}

/// Keep only `A`-`Z` after uppercasing, at most ten letters
pub fn normalize_abbreviation(input: &str) -> String {
    input
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .take(MAX_ABBREVIATION_LEN)
        .collect()
}

/// Capitalize each space-separated word and lowercase the rest
pub fn normalize_title(input: &str) -> String {
    let title = input
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ");

    title.chars().take(MAX_TITLE_LEN).collect()
}

/// Registry key for a lookup, e.g. from a `/dot` path
pub fn lookup_key(abbreviation: &str) -> String {
    abbreviation.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_abbreviation() {
        assert_eq!(normalize_abbreviation("dot"), "DOT");
        assert_eq!(normalize_abbreviation("d-o t1"), "DOT");
        assert_eq!(normalize_abbreviation("abcdefghijklmn"), "ABCDEFGHIJ");
        assert_eq!(normalize_abbreviation("ünï"), "N");
        assert_eq!(normalize_abbreviation(""), "");
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("polkadot NATIVE token"), "Polkadot Native Token");
        assert_eq!(normalize_title("double  space"), "Double  Space");
        assert_eq!(normalize_title("élan vital"), "Élan Vital");
        assert_eq!(normalize_title(&"a".repeat(150)).chars().count(), MAX_TITLE_LEN);
    }

    #[test]
    fn test_validate_ok() {
        let draft = EntryDraft::new("dot", "polkadot", "Relay chain token, see #KSM");
        let entry = draft.validate().unwrap();
        assert_eq!(entry.abbreviation, "DOT");
        assert_eq!(entry.title, "Polkadot");
        assert_eq!(entry.description, "Relay chain token, see #KSM");
    }

    #[test]
    fn test_validate_missing_fields() {
        assert_eq!(
            EntryDraft::new("", "Title", "Description").validate(),
            Err(EntryError::MissingFields)
        );
        assert_eq!(
            EntryDraft::new("DOT", "   ", "Description").validate(),
            Err(EntryError::MissingFields)
        );
        assert_eq!(
            EntryDraft::new("DOT", "Title", "\n\t").validate(),
            Err(EntryError::MissingFields)
        );
    }

    #[test]
    fn test_validate_lengths() {
        assert_eq!(
            EntryDraft::new("D", "Title", "Description").validate(),
            Err(EntryError::AbbreviationTooShort)
        );
        assert_eq!(
            EntryDraft::new("DOT", "Ab", "Description").validate(),
            Err(EntryError::TitleTooShort)
        );
        assert_eq!(
            EntryDraft::new("DOT", "Title", "ab").validate(),
            Err(EntryError::DescriptionTooShort)
        );
        assert_eq!(
            EntryDraft::new("DOT", "Title", "x".repeat(MAX_DESCRIPTION_LEN + 1)).validate(),
            Err(EntryError::DescriptionTooLong)
        );
        assert!(EntryDraft::new("DOT", "Title", "x".repeat(MAX_DESCRIPTION_LEN))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(EntryError::MissingFields.to_string(), "Please fill in all fields");
        assert_eq!(
            EntryError::AbbreviationTooShort.to_string(),
            "Abbreviation must be at least 2 characters"
        );
    }

    #[test]
    fn test_lookup_key() {
        assert_eq!(lookup_key("dot"), "DOT");
        assert_eq!(lookup_key(" Ksm "), "KSM");
    }
}
