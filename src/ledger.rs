use crate::history::{History, InteractionEntry, Quality};
use chrono::{DateTime, Duration, SubsecRound, Utc};

pub const MAX_NOTE_CHARS: usize = 200;

pub fn log_interaction(
    mut history: History,
    date: &str,
    quality: Quality,
    note_text: &str,
    timestamp: DateTime<Utc>,
) -> History {
    let entry = prepare_note(note_text).map(|note| InteractionEntry {
        quality,
        note,
        timestamp,
    });

    let record = history.entry(date.to_string()).or_default();
    record.count = record.count.saturating_add(1);
    if let Some(entry) = entry {
        record.entries.push(entry);
    }

    history
}

pub fn prepare_note(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.chars().count() <= MAX_NOTE_CHARS {
        return Some(trimmed.to_string());
    }

    let capped: String = trimmed.chars().take(MAX_NOTE_CHARS).collect();
    Some(capped.trim_end().to_string())
}

// Strictly later than every stored entry, so timestamps stay usable as note ids.
pub fn unique_timestamp(history: &History, candidate: DateTime<Utc>) -> DateTime<Utc> {
    let candidate = candidate.trunc_subsecs(3);
    let latest = history
        .values()
        .flat_map(|record| record.entries.iter())
        .map(|entry| entry.timestamp)
        .max();

    match latest {
        Some(latest) if candidate <= latest => latest + Duration::milliseconds(1),
        _ => candidate,
    }
}
