use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A single fabricated credential record.
///
/// Field order matters: `username` is declared before `email` so every
/// serialized form carries the fields in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FakeRecord {
    /// Fabricated account identifier
    pub username: String,

    /// Fabricated contact address
    pub email: String,
}

/// On-disk and on-wire document shape.
#[derive(Debug, Deserialize)]
struct BaitFile {
    employees: Vec<FakeRecord>,
}

#[derive(Serialize)]
struct BaitFileRef<'a> {
    employees: &'a [FakeRecord],
}

/// Why a bait source could not be turned into a usable store.
///
/// All variants are fatal to startup: the process must not listen without
/// a complete payload.
#[derive(Debug)]
pub enum LoadError {
    /// The source file could not be read at all
    Unreadable(std::io::Error),
    /// The source was read but is not a well-formed record list
    Malformed(serde_json::Error),
    /// The source parsed cleanly but contains zero records
    Empty,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Unreadable(e) => write!(f, "bait source unreadable: {}", e),
            LoadError::Malformed(e) => write!(f, "bait source malformed: {}", e),
            LoadError::Empty => write!(f, "bait source contains no records"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Immutable, ordered set of fabricated records shared by all sessions.
///
/// Constructed once before the listener starts; cloning is an `Arc` clone,
/// so handing a store to each session is cheap and lock-free.
#[derive(Debug, Clone)]
pub struct BaitStore {
    records: Arc<Vec<FakeRecord>>,
}

impl BaitStore {
    /// Loads the store from a JSON file of the form
    /// `{ "employees": [ {"username": ..., "email": ...}, ... ] }`.
    ///
    /// An empty record list is rejected: a decoy with nothing to hand out
    /// is a misconfiguration, not a degraded mode.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let raw = std::fs::read(path).map_err(LoadError::Unreadable)?;
        let parsed: BaitFile = serde_json::from_slice(&raw).map_err(LoadError::Malformed)?;

        if parsed.employees.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(Self {
            records: Arc::new(parsed.employees),
        })
    }

    /// Builds a store directly from records already in memory.
    pub fn from_records(records: Vec<FakeRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// The records, in load order.
    pub fn records(&self) -> &[FakeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serializes the full store to the pretty-printed wire document.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&BaitFileRef {
            employees: &self.records,
        })
    }
}
