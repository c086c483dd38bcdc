//! Route patterns and their specificity scoring.
//!
//! A pattern is a `/`-delimited template over URL paths:
//! - `/contacts` — exact path
//! - `/contacts/:id` — named parameter, matches any single segment
//! - `/admin/*` — single-level wildcard, matches one segment below the prefix
//! - `/admin/**/*` — tree wildcard, matches anything below the prefix

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{Display as StrumDisplay, EnumString};

use crate::error::RouteError;

const TREE_WILDCARD_SUFFIX: &str = "/**/*";
const CHILD_WILDCARD_SUFFIX: &str = "/*";

/// How a pattern matches, which also fixes its base specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PatternKind {
    Exact,
    Parameterized,
    WildcardChild,
    WildcardTree,
}

impl PatternKind {
    /// Base score per match class: exact beats parameterized beats wildcard.
    fn base_score(self) -> u32 {
        match self {
            PatternKind::Exact => 1000,
            PatternKind::Parameterized => 100,
            PatternKind::WildcardChild | PatternKind::WildcardTree => 1,
        }
    }
}

/// A validated route pattern.
///
/// Parsing rejects malformed templates up front so that matching itself can
/// never fail: a `Pattern` either matches a path or it does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    raw: String,
    segments: Vec<String>,
    kind: PatternKind,
}

impl Pattern {
    /// The pattern string as written in the route table.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Number of `/`-delimited segments, counting the empty leading segment.
    ///
    /// `/` has two segments, `/contacts/:id` has three. Longer patterns are
    /// more specific than shorter ones within the same match class.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Specificity score: the match-class base (1000 exact, 100 parameterized,
    /// 1 wildcard) plus the segment count. Higher wins during resolution.
    pub fn specificity(&self) -> u32 {
        self.kind.base_score() + self.segments.len() as u32
    }

    /// The fixed prefix of a wildcard pattern (`/admin` for `/admin/*`).
    fn wildcard_prefix(&self) -> &str {
        match self.kind {
            PatternKind::WildcardTree => &self.raw[..self.raw.len() - TREE_WILDCARD_SUFFIX.len()],
            PatternKind::WildcardChild => &self.raw[..self.raw.len() - CHILD_WILDCARD_SUFFIX.len()],
            _ => &self.raw,
        }
    }

    /// Check whether `path` matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match self.kind {
            PatternKind::Exact => self.raw == path,
            PatternKind::Parameterized => {
                let parts: Vec<&str> = path.split('/').collect();
                if parts.len() != self.segments.len() {
                    return false;
                }
                self.segments
                    .iter()
                    .zip(parts)
                    .all(|(segment, part)| segment.starts_with(':') || segment == part)
            }
            PatternKind::WildcardTree => match path.strip_prefix(self.wildcard_prefix()) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            },
            PatternKind::WildcardChild => match path.strip_prefix(self.wildcard_prefix()) {
                // Exactly one segment below the prefix, and non-empty.
                Some(rest) => rest.len() > 1 && rest.starts_with('/') && !rest[1..].contains('/'),
                None => false,
            },
        }
    }
}

impl FromStr for Pattern {
    type Err = RouteError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(RouteError::invalid_pattern(raw, "pattern is empty"));
        }
        if !raw.starts_with('/') {
            return Err(RouteError::invalid_pattern(raw, "pattern must start with `/`"));
        }

        let kind = if let Some(prefix) = raw.strip_suffix(TREE_WILDCARD_SUFFIX) {
            validate_wildcard_prefix(raw, prefix)?;
            PatternKind::WildcardTree
        } else if let Some(prefix) = raw.strip_suffix(CHILD_WILDCARD_SUFFIX) {
            validate_wildcard_prefix(raw, prefix)?;
            PatternKind::WildcardChild
        } else if raw.contains(':') {
            validate_parameters(raw)?;
            PatternKind::Parameterized
        } else if raw.contains('*') {
            return Err(RouteError::invalid_pattern(
                raw,
                "wildcards are only allowed as a trailing `/*` or `/**/*`",
            ));
        } else {
            PatternKind::Exact
        };

        Ok(Pattern {
            raw: raw.to_string(),
            segments: raw.split('/').map(str::to_string).collect(),
            kind,
        })
    }
}

fn validate_wildcard_prefix(raw: &str, prefix: &str) -> Result<(), RouteError> {
    if prefix.contains('*') {
        return Err(RouteError::invalid_pattern(
            raw,
            "wildcards are only allowed as a trailing `/*` or `/**/*`",
        ));
    }
    if prefix.contains(':') {
        return Err(RouteError::invalid_pattern(
            raw,
            "a pattern may use parameters or a wildcard suffix, not both",
        ));
    }
    Ok(())
}

fn validate_parameters(raw: &str) -> Result<(), RouteError> {
    for segment in raw.split('/') {
        if segment == ":" {
            return Err(RouteError::invalid_pattern(raw, "parameter name is empty"));
        }
        if !segment.starts_with(':') && segment.contains(':') {
            return Err(RouteError::invalid_pattern(
                raw,
                "`:` is only allowed at the start of a segment",
            ));
        }
    }
    Ok(())
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
