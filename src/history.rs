use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

pub type History = BTreeMap<String, DayRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub enum Quality {
    Poor = 1,
    Okay = 2,
    #[default]
    Good = 3,
    Great = 4,
    Amazing = 5,
}

impl Quality {
    pub fn new(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Poor),
            2 => Some(Self::Okay),
            3 => Some(Self::Good),
            4 => Some(Self::Great),
            5 => Some(Self::Amazing),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Okay => "Okay",
            Self::Good => "Good",
            Self::Great => "Great",
            Self::Amazing => "Amazing",
        }
    }
}

// Stored ratings outside 1..=5 are clamped so one bad value never drops a day's notes.
impl From<i64> for Quality {
    fn from(value: i64) -> Self {
        match value {
            i64::MIN..=1 => Self::Poor,
            2 => Self::Okay,
            3 => Self::Good,
            4 => Self::Great,
            _ => Self::Amazing,
        }
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.value()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEntry {
    pub quality: Quality,
    pub note: String,
    pub timestamp: DateTime<Utc>,
}

// On-disk day record, any schema revision. V3 entries are decoded one by one
// so a single bad entry doesn't push the whole day down to V2.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredDay {
    V1(u64),
    V3 {
        count: u64,
        entries: Vec<serde_json::Value>,
    },
    V2 {
        count: u64,
        #[serde(default)]
        qualities: Vec<i64>,
    },
    Unrecognized(serde_json::Value),
}

impl StoredDay {
    pub fn count(&self) -> u64 {
        match self {
            Self::V1(count) => *count,
            Self::V2 { count, .. } | Self::V3 { count, .. } => *count,
            Self::Unrecognized(_) => 0,
        }
    }
}

pub fn normalize_count(record: Option<&StoredDay>) -> u64 {
    record.map_or(0, StoredDay::count)
}

// Always written back in the V3 shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredDay")]
pub struct DayRecord {
    pub count: u64,
    pub entries: Vec<InteractionEntry>,
}

impl From<StoredDay> for DayRecord {
    fn from(stored: StoredDay) -> Self {
        match stored {
            StoredDay::V3 { count, entries } => Self {
                count,
                entries: entries.into_iter().filter_map(decode_entry).collect(),
            },
            // legacy ratings carry no note text and are not kept
            other => Self {
                count: other.count(),
                entries: Vec::new(),
            },
        }
    }
}

fn decode_entry(value: serde_json::Value) -> Option<InteractionEntry> {
    match serde_json::from_value(value) {
        Ok(entry) => Some(entry),
        Err(err) => {
            warn!("skipping malformed note entry: {err}");
            None
        }
    }
}

impl DayRecord {
    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

pub fn day_count(history: &History, date: &str) -> u64 {
    history.get(date).map_or(0, |record| record.count)
}
