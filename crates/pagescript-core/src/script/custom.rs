//! Custom script catalog domain models.

use serde::{Deserialize, Serialize};

use crate::error::{PageScriptError, Result};

/// A user-named reusable script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomScript {
    /// Display name chosen by the user. May be empty or duplicated.
    pub name: String,
    /// Script text, stored verbatim.
    pub script: String,
}

impl CustomScript {
    pub fn new(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
        }
    }
}

/// Ordered collection of custom scripts.
///
/// Entries are identified by position. The catalog only grows by appending;
/// existing entries are never reordered or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomScriptCatalog {
    pub scripts: Vec<CustomScript>,
}

impl CustomScriptCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new entry at the end and returns it.
    ///
    /// Name and script are taken as-is without trimming or validation.
    pub fn append(&mut self, name: impl Into<String>, script: impl Into<String>) -> &CustomScript {
        self.scripts.push(CustomScript::new(name, script));
        &self.scripts[self.scripts.len() - 1]
    }

    /// Returns the entry at `index`.
    ///
    /// Callers obtain indices by enumerating this same catalog, so an
    /// out-of-range index is a caller bug reported as
    /// [`PageScriptError::OutOfRange`].
    pub fn item_at(&self, index: usize) -> Result<&CustomScript> {
        self.scripts
            .get(index)
            .ok_or_else(|| PageScriptError::out_of_range(index, self.scripts.len()))
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CustomScript> {
        self.scripts.iter()
    }
}

impl From<Vec<CustomScript>> for CustomScriptCatalog {
    fn from(scripts: Vec<CustomScript>) -> Self {
        Self { scripts }
    }
}

impl<'a> IntoIterator for &'a CustomScriptCatalog {
    type Item = &'a CustomScript;
    type IntoIter = std::slice::Iter<'a, CustomScript>;

    fn into_iter(self) -> Self::IntoIter {
        self.scripts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> CustomScriptCatalog {
        let mut catalog = CustomScriptCatalog::new();
        catalog.append("Title", "alert(document.title)");
        catalog.append("Url", "alert(document.URL)");
        catalog
    }

    #[test]
    fn test_append_is_monotonic() {
        let mut catalog = sample_catalog();
        let before = catalog.clone();

        let added = catalog.append("Highlight", "document.body.style.background='yellow'");
        assert_eq!(added.name, "Highlight");

        assert_eq!(catalog.len(), before.len() + 1);
        assert_eq!(&catalog.scripts[..before.len()], &before.scripts[..]);
        assert_eq!(
            catalog.scripts.last().unwrap(),
            &CustomScript::new("Highlight", "document.body.style.background='yellow'")
        );
    }

    #[test]
    fn test_append_allows_duplicates_and_empty_values() {
        let mut catalog = CustomScriptCatalog::new();
        catalog.append("same", "one");
        catalog.append("same", "two");
        catalog.append("", "");

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.item_at(0).unwrap().script, "one");
        assert_eq!(catalog.item_at(1).unwrap().script, "two");
        assert_eq!(catalog.item_at(2).unwrap(), &CustomScript::new("", ""));
    }

    #[test]
    fn test_append_keeps_whitespace() {
        let mut catalog = CustomScriptCatalog::new();
        catalog.append("  padded  ", "\n x \n");

        let entry = catalog.item_at(0).unwrap();
        assert_eq!(entry.name, "  padded  ");
        assert_eq!(entry.script, "\n x \n");
    }

    #[test]
    fn test_item_at_valid_positions() {
        let catalog = sample_catalog();
        for (i, expected) in catalog.iter().enumerate() {
            assert_eq!(catalog.item_at(i).unwrap(), expected);
        }
    }

    #[test]
    fn test_item_at_out_of_range() {
        let catalog = sample_catalog();
        let err = catalog.item_at(2).unwrap_err();
        assert_eq!(err, PageScriptError::OutOfRange { index: 2, len: 2 });

        let empty = CustomScriptCatalog::new();
        assert!(empty.item_at(0).unwrap_err().is_out_of_range());
        assert!(empty.item_at(usize::MAX).unwrap_err().is_out_of_range());
    }
}
