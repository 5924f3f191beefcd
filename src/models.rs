//! Artifact types persisted in the term cache.
//!
//! Every identifier and weight is kept as the string the dump carried. The
//! resolved `type`/`term` of a [`RelationEntry`] may be missing when the dump
//! references an id it never declared; such fields are left out of the JSON
//! rather than failing the whole artifact.

use serde::{Deserialize, Serialize};

pub const NO_DEFINITION: &str = "no definition found";
pub const NO_OUTGOING: &str = "no outgoing relation";
pub const NO_INCOMING: &str = "no incoming relation";

/// Identifying record of the queried term (`infos.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermInfo {
    pub word: String,
    pub id: String,
    pub weight: String,
}

impl TermInfo {
    /// Record used when the dump carried no entries section.
    pub fn fallback(term: &str) -> Self {
        Self {
            word: term.to_string(),
            id: "0".to_string(),
            weight: "0".to_string(),
        }
    }
}

/// One numbered definition (`definitions.json` holds an ordered list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub def: String,
}

impl Definition {
    pub fn new(def: impl Into<String>) -> Self {
        Self { def: def.into() }
    }

    pub fn none() -> Self {
        Self::new(NO_DEFINITION)
    }
}

/// Relation type catalog entry (`types.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationType {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl RelationType {
    pub fn blank() -> Self {
        Self {
            id: "0".to_string(),
            name: String::new(),
            description: String::new(),
        }
    }
}

/// Which edge list of the dump an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
}

impl Direction {
    fn sentinel(self) -> &'static str {
        match self {
            Direction::Outgoing => NO_OUTGOING,
            Direction::Incoming => NO_INCOMING,
        }
    }
}

/// One edge touching the queried term (`outgoings.json` / `incomings.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationEntry {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub weight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

impl RelationEntry {
    /// Single entry standing in for an absent edge section.
    pub fn placeholder(direction: Direction) -> Self {
        Self {
            id: "0".to_string(),
            kind: Some(String::new()),
            weight: "0".to_string(),
            term: Some(direction.sentinel().to_string()),
        }
    }
}

/// Everything one dump resolves to; each field becomes one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermGraph {
    pub info: TermInfo,
    pub definitions: Vec<Definition>,
    pub relation_types: Vec<RelationType>,
    pub outgoing: Vec<RelationEntry>,
    pub incoming: Vec<RelationEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_fields_are_omitted() {
        let entry = RelationEntry {
            id: "7".into(),
            kind: None,
            weight: "12".into(),
            term: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"id":"7","weight":"12"}"#);

        let back: RelationEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_type_field_is_renamed() {
        let json = serde_json::to_string(&RelationEntry::placeholder(Direction::Incoming)).unwrap();
        assert_eq!(
            json,
            r#"{"id":"0","type":"","weight":"0","term":"no incoming relation"}"#
        );
    }

    #[test]
    fn test_fallback_info_keeps_queried_term() {
        let info = TermInfo::fallback("pomme de terre");
        assert_eq!(info.word, "pomme de terre");
        assert_eq!(info.id, "0");
        assert_eq!(info.weight, "0");
    }
}
