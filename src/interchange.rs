//! The `FamilyTreeData` wire shape.
//!
//! This is the one interchange format the engine consumes: the same JSON is
//! produced by the storage endpoint and by AI-based record extraction.
//! Fields are deliberately loose (`Option`, defaulted collections); raw
//! payloads are heterogeneous and cleanup happens in [`crate::normalize`],
//! not here.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read family data: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse family data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawName {
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub given_name: String,
}

/// Birth/death record: raw text, normalized partial ISO date, place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawEvent {
    #[serde(default)]
    pub original_date: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
}

/// Marriage/divorce record: as [`RawEvent`] but without a place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawDate {
    #[serde(default)]
    pub original_date: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawPerson {
    pub id: String,
    #[serde(default)]
    pub generation: Option<i32>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub name: RawName,
    #[serde(default)]
    pub birth: RawEvent,
    #[serde(default)]
    pub death: RawEvent,
    /// Set by low-confidence extraction; absent on manually entered records.
    #[serde(default)]
    pub is_uncertain: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawFamily {
    pub id: String,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub marriage_date: RawDate,
    #[serde(default)]
    pub divorce_date: RawDate,
    #[serde(default)]
    pub relation_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FamilyTreeData {
    #[serde(default)]
    pub people: Vec<RawPerson>,
    #[serde(default)]
    pub families: Vec<RawFamily>,
}

impl FamilyTreeData {
    pub fn from_json(input: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
