//! Letter counting, fractional distributions and the squared-error score
//! used to compare them.

use std::collections::BTreeMap;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CipherError;

/// Mutable character counter.
///
/// Tables built with [`FrequencyTable::new`] are seeded with the 26 lowercase
/// letters and only ever accumulate those keys; [`FrequencyTable::tally`]
/// builds a raw table of every character seen, meant to be merged into a
/// seeded one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    name: String,
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counts: ('a'..='z').map(|c| (c, 0)).collect(),
        }
    }

    pub fn tally(name: impl Into<String>, text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for c in text.chars() {
            *counts.entry(c).or_insert(0) += 1;
        }
        Self {
            name: name.into(),
            counts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn counts(&self) -> &BTreeMap<char, u64> {
        &self.counts
    }

    pub fn get(&self, c: char) -> u64 {
        self.counts.get(&c).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Adds `other`'s counts for keys this table already has; anything else
    /// is dropped.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (c, count) in &other.counts {
            if let Some(slot) = self.counts.get_mut(c) {
                *slot += count;
            }
        }
    }

    /// Converts counts into fractions of the total. An empty table yields
    /// zero for every key instead of NaN.
    pub fn to_fractions(&self) -> FrequencyProfile {
        let total = self.total();
        let values = self
            .counts
            .iter()
            .map(|(&c, &count)| {
                let fraction = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                };
                (c, fraction)
            })
            .collect();
        FrequencyProfile::new(self.name.clone(), values)
    }
}

/// Which keys contribute to [`ErrorSummation::score`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorSummation {
    /// Only keys of the candidate distribution; the reference defaults to 0.
    #[default]
    Candidate,
    /// Keys of either distribution; the missing side defaults to 0.
    Union,
}

impl ErrorSummation {
    pub fn score(self, candidate: &FrequencyProfile, reference: &FrequencyProfile) -> f64 {
        match self {
            ErrorSummation::Candidate => candidate.sum_squared_error(reference),
            ErrorSummation::Union => candidate.sum_squared_error_union(reference),
        }
    }
}

/// Immutable named distribution of characters to fractions.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyProfile {
    name: String,
    values: BTreeMap<char, f64>,
}

impl FrequencyProfile {
    pub fn new(name: impl Into<String>, values: BTreeMap<char, f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &BTreeMap<char, f64> {
        &self.values
    }

    pub fn get(&self, c: char) -> f64 {
        self.values.get(&c).copied().unwrap_or(0.0)
    }

    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: self.values,
        }
    }

    /// Sum of `(self[k] - other[k])^2` over the keys of `self` only.
    pub fn sum_squared_error(&self, other: &FrequencyProfile) -> f64 {
        self.values
            .iter()
            .map(|(&c, &v)| (v - other.get(c)).powi(2))
            .sum()
    }

    pub fn sum_squared_error_union(&self, other: &FrequencyProfile) -> f64 {
        let missing: f64 = other
            .values
            .iter()
            .filter(|(c, _)| !self.values.contains_key(c))
            .map(|(_, &v)| v.powi(2))
            .sum();
        self.sum_squared_error(other) + missing
    }
}

/// Persisted shape of a profile: string keys, as stored in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Values")]
    pub values: BTreeMap<String, f64>,
}

impl From<&FrequencyProfile> for ProfileRecord {
    fn from(profile: &FrequencyProfile) -> Self {
        Self {
            name: profile.name.clone(),
            values: profile
                .values
                .iter()
                .map(|(c, v)| (c.to_string(), *v))
                .collect(),
        }
    }
}

impl TryFrom<ProfileRecord> for FrequencyProfile {
    type Error = CipherError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        let mut values = BTreeMap::new();
        for (key, value) in record.values {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    values.insert(c, value);
                }
                _ => return Err(CipherError::InvalidProfileKey { key }),
            }
        }
        Ok(Self::new(record.name, values))
    }
}

impl Serialize for FrequencyProfile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ProfileRecord::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FrequencyProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = ProfileRecord::deserialize(deserializer)?;
        FrequencyProfile::try_from(record).map_err(D::Error::custom)
    }
}
