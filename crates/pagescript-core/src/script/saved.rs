//! Per-site saved scripts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::host::HostKey;

/// Mapping of host name to the script saved for that site.
///
/// At most one entry exists per host; a later [`put`](Self::put) replaces the
/// earlier value. The whole mapping is persisted at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedScripts {
    entries: BTreeMap<String, String>,
}

impl SavedScripts {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the script saved for `host`, if any.
    pub fn get(&self, host: &HostKey) -> Option<&str> {
        self.entries.get(host.as_str()).map(String::as_str)
    }

    /// Sets the script for `host`, returning the value it replaced.
    pub fn put(&mut self, host: &HostKey, script: impl Into<String>) -> Option<String> {
        self.entries.insert(host.as_str().to_string(), script.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(host, script)` pairs in host order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, s)| (h.as_str(), s.as_str()))
    }
}

impl From<BTreeMap<String, String>> for SavedScripts {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl From<SavedScripts> for BTreeMap<String, String> {
    fn from(scripts: SavedScripts) -> Self {
        scripts.entries
    }
}
