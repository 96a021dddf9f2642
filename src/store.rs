//! In-memory reading store backed by a JSON file.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::{
    prelude::*,
    reading::{MeterId, Reading, ReadingSource},
};

/// All recorded readings, keyed by meter identifier.
///
/// Timestamps are RFC 3339 and reading values are decimal strings, so nothing
/// round-trips through binary floating point.
#[must_use]
#[derive(Default, Deserialize)]
#[serde(transparent)]
pub struct InMemoryReadingStore(HashMap<MeterId, Vec<Reading>>);

impl InMemoryReadingStore {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read the reading store from `{}`", path.display())
        })?;
        let store: Self = serde_json::from_str(&contents).with_context(|| {
            format!("failed to parse the reading store from `{}`", path.display())
        })?;
        info!(n_meters = store.0.len(), "loaded the reading store");
        Ok(store)
    }
}

impl FromIterator<(MeterId, Vec<Reading>)> for InMemoryReadingStore {
    fn from_iter<T: IntoIterator<Item = (MeterId, Vec<Reading>)>>(iterator: T) -> Self {
        Self(iterator.into_iter().collect())
    }
}

impl ReadingSource for InMemoryReadingStore {
    fn readings(&self, meter_id: &MeterId) -> Option<Vec<Reading>> {
        self.0.get(meter_id).cloned()
    }
}
