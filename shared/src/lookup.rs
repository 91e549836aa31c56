//! Keyed reference tables with ordered fallback lookups
//!
//! A lookup is a chain of strategies tried in sequence. The first strategy that
//! produces a match wins; when none does, the table's default entry is used, so
//! every lookup is total.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single way of matching a query against table keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// Key equals the query byte for byte
    Exact,
    /// Key equals the query ignoring case and surrounding whitespace
    CaseInsensitive,
    /// Key contains the query, or the query contains the key (case-insensitive)
    Substring,
}

/// Exact, then case-insensitive
pub const NAME_CHAIN: &[LookupStrategy] = &[LookupStrategy::Exact, LookupStrategy::CaseInsensitive];

/// Exact, then case-insensitive, then substring
pub const REGION_CHAIN: &[LookupStrategy] = &[
    LookupStrategy::Exact,
    LookupStrategy::CaseInsensitive,
    LookupStrategy::Substring,
];

impl LookupStrategy {
    /// Try this strategy against the entries. Keys are visited in sorted order,
    /// so the first match is deterministic.
    pub fn find<'a, V>(
        &self,
        entries: &'a BTreeMap<String, V>,
        query: &str,
    ) -> Option<(&'a str, &'a V)> {
        match self {
            LookupStrategy::Exact => entries.get_key_value(query).map(|(k, v)| (k.as_str(), v)),
            LookupStrategy::CaseInsensitive => {
                let needle = query.trim().to_lowercase();
                entries
                    .iter()
                    .find(|(k, _)| k.to_lowercase() == needle)
                    .map(|(k, v)| (k.as_str(), v))
            }
            LookupStrategy::Substring => {
                let needle = query.trim().to_lowercase();
                if needle.is_empty() {
                    return None;
                }
                entries
                    .iter()
                    .find(|(k, _)| {
                        let key = k.to_lowercase();
                        key.contains(&needle) || needle.contains(&key)
                    })
                    .map(|(k, v)| (k.as_str(), v))
            }
        }
    }
}

/// Outcome of a lookup, recording which key (if any) matched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a, V> {
    pub key: Option<&'a str>,
    pub value: &'a V,
}

impl<V> Resolved<'_, V> {
    pub fn is_default(&self) -> bool {
        self.key.is_none()
    }
}

/// String-keyed table with a guaranteed default entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyedTable<V> {
    pub entries: BTreeMap<String, V>,
    pub default: V,
}

impl<V> KeyedTable<V> {
    pub fn new(default: V) -> Self {
        Self {
            entries: BTreeMap::new(),
            default,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) -> &mut Self {
        self.entries.insert(key.into(), value);
        self
    }

    /// Run the chain and fall back to the default entry
    pub fn resolve(&self, query: &str, chain: &[LookupStrategy]) -> Resolved<'_, V> {
        chain
            .iter()
            .find_map(|strategy| strategy.find(&self.entries, query))
            .map(|(key, value)| Resolved {
                key: Some(key),
                value,
            })
            .unwrap_or(Resolved {
                key: None,
                value: &self.default,
            })
    }

    pub fn lookup(&self, query: &str, chain: &[LookupStrategy]) -> &V {
        self.resolve(query, chain).value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
