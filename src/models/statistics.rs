//! Histogram types shared by user profiles and problemsets

use serde::{Serialize, Serializer};

use crate::constants::UNKNOWN_DIFFICULTY;

/// Ordered `key -> count` pairs, serialized as a JSON object in entry order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram<K> {
    entries: Vec<(K, u32)>,
}

impl<K> Histogram<K> {
    pub fn from_entries(entries: Vec<(K, u32)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(K, u32)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }
}

impl<K: PartialEq> Histogram<K> {
    pub fn get(&self, key: &K) -> Option<u32> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }
}

impl<K> Default for Histogram<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: std::fmt::Display> Serialize for Histogram<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(key, count)| (key.to_string(), count)))
    }
}

/// Difficulty bucket; rated buckets sort numerically before `Unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DifficultyKey {
    Rated(i32),
    Unknown,
}

impl From<Option<i32>> for DifficultyKey {
    fn from(difficulty: Option<i32>) -> Self {
        difficulty.map_or(Self::Unknown, Self::Rated)
    }
}

impl std::fmt::Display for DifficultyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rated(rating) => write!(f, "{}", rating),
            Self::Unknown => f.write_str(UNKNOWN_DIFFICULTY),
        }
    }
}

/// Level, difficulty and tag histograms over a set of problems
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub levels: Histogram<String>,
    pub difficulties: Histogram<DifficultyKey>,
    pub tags: Histogram<String>,
}
