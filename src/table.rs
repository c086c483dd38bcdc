//! The compiled route table and best-match resolution.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{Pattern, RouteConfig};

/// An immutable, ordered pattern-to-config table.
///
/// Entries keep the order they appear in the source document; that order is
/// the deterministic tie-break when two matching patterns score the same
/// specificity (earliest entry wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    entries: Vec<(Pattern, RouteConfig)>,
}

impl RouteTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Pattern, &RouteConfig)> {
        self.entries.iter().map(|(p, c)| (p, c))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.entries.iter().map(|(p, _)| p)
    }

    /// Look up a config by its exact pattern string.
    pub fn get(&self, pattern: &str) -> Option<&RouteConfig> {
        self.entries
            .iter()
            .find(|(p, _)| p.raw() == pattern)
            .map(|(_, c)| c)
    }

    /// Find the best-matching config for `path`.
    ///
    /// Among all patterns that match, the highest specificity score wins;
    /// residual ties go to the earliest table entry. `None` means no pattern
    /// matched at all, which callers treat as "no restriction".
    pub fn resolve(&self, path: &str) -> Option<&RouteConfig> {
        self.resolve_entry(path).map(|(_, config)| config)
    }

    /// Like [`resolve`](Self::resolve), but also returns the winning pattern.
    pub fn resolve_entry(&self, path: &str) -> Option<(&Pattern, &RouteConfig)> {
        let mut best: Option<(u32, &Pattern, &RouteConfig)> = None;
        for (pattern, config) in &self.entries {
            if !pattern.matches(path) {
                continue;
            }
            let score = pattern.specificity();
            // Strictly greater keeps the earliest entry on a tie.
            if best.is_none_or(|(current, _, _)| score > current) {
                best = Some((score, pattern, config));
            }
        }
        best.map(|(_, pattern, config)| (pattern, config))
    }
}

impl Serialize for RouteTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (pattern, config) in &self.entries {
            map.serialize_entry(pattern, config)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RouteTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RouteTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of route patterns to route configs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(Pattern, RouteConfig)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((pattern, config)) =
                    access.next_entry::<Pattern, RouteConfig>()?
                {
                    if entries.iter().any(|(p, _)| p.raw() == pattern.raw()) {
                        return Err(serde::de::Error::custom(
                            crate::error::RouteError::DuplicatePattern(pattern.raw().to_string()),
                        ));
                    }
                    entries.push((pattern, config));
                }
                Ok(RouteTable { entries })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
