use core::convert::Infallible;
use core::fmt;
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};

/// Campaign progress that survives restarts.
///
/// Every field is optional: a missing value means "first run" and the
/// campaign falls back to its default. Fields are decoded independently, a
/// value that does not fit its type is dropped without losing the others.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedProgress {
    #[serde(deserialize_with = "lenient")]
    pub current_level_index: Option<usize>,
    #[serde(deserialize_with = "lenient")]
    pub global_free_undos_remaining: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub purchased_hammers: Option<u32>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Other(IgnoredAny),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(value)) => {
            let converted = T::try_from(value).ok();
            if converted.is_none() {
                log::warn!("discarding out-of-range saved value {}", value);
            }
            Ok(converted)
        }
        Some(Raw::Other(_)) => {
            log::warn!("discarding saved value that is not an integer");
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Load/save capability injected by the host.
pub trait ProgressStore {
    type Error: fmt::Debug;

    fn load(&self) -> Result<SavedProgress, Self::Error>;

    fn save(&mut self, progress: &SavedProgress) -> Result<(), Self::Error>;
}

/// Keeps progress in memory, for tests and hosts without storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    saved: Option<SavedProgress>,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(progress: SavedProgress) -> Self {
        Self {
            saved: Some(progress),
            save_count: 0,
        }
    }

    pub fn saved(&self) -> Option<&SavedProgress> {
        self.saved.as_ref()
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl ProgressStore for MemoryStore {
    type Error = Infallible;

    fn load(&self) -> Result<SavedProgress, Self::Error> {
        Ok(self.saved.unwrap_or_default())
    }

    fn save(&mut self, progress: &SavedProgress) -> Result<(), Self::Error> {
        self.saved = Some(*progress);
        self.save_count += 1;
        Ok(())
    }
}
