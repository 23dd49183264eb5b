use crate::history::{History, InteractionEntry};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct DatedEntry {
    pub date: String,
    pub entry: InteractionEntry,
}

pub fn flatten_notes(history: &History) -> Vec<DatedEntry> {
    let mut notes: Vec<DatedEntry> = history
        .iter()
        .flat_map(|(date, record)| {
            record.entries.iter().map(move |entry| DatedEntry {
                date: date.clone(),
                entry: entry.clone(),
            })
        })
        .collect();
    notes.sort_by(|a, b| b.entry.timestamp.cmp(&a.entry.timestamp));
    notes
}

pub fn delete_note(mut history: History, timestamp: DateTime<Utc>) -> History {
    remove_note(&mut history, timestamp);
    history
}

// A day left without entries is dropped entirely, count included.
pub fn remove_note(history: &mut History, timestamp: DateTime<Utc>) -> Option<String> {
    let (date, index) = history.iter().find_map(|(date, record)| {
        record
            .entries
            .iter()
            .position(|entry| entry.timestamp == timestamp)
            .map(|index| (date.clone(), index))
    })?;

    let now_empty = match history.get_mut(&date) {
        Some(record) => {
            record.entries.remove(index);
            record.entries.is_empty()
        }
        None => false,
    };
    if now_empty {
        history.remove(&date);
    }

    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{DayRecord, Quality};
    use crate::ledger::log_interaction;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn logged_note_round_trips() {
        let history = log_interaction(
            History::new(),
            "2026-01-05",
            Quality::Good,
            "hello",
            at(5, 9),
        );
        let notes = flatten_notes(&history);

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].entry.note, "hello");
        assert_eq!(notes[0].date, "2026-01-05");

        let history = log_interaction(history, "2026-01-05", Quality::Good, "   ", at(5, 10));
        assert_eq!(flatten_notes(&history).len(), 1);
        assert_eq!(history["2026-01-05"].count, 2);
    }

    #[test]
    fn notes_sorted_most_recent_first() {
        let history = log_interaction(History::new(), "2026-01-07", Quality::Good, "t2", at(7, 8));
        let history = log_interaction(history, "2026-01-03", Quality::Good, "t1", at(3, 20));
        let history = log_interaction(history, "2026-01-07", Quality::Good, "t3", at(7, 21));

        let order: Vec<_> = flatten_notes(&history)
            .into_iter()
            .map(|dated| dated.entry.note)
            .collect();
        assert_eq!(order, ["t3", "t2", "t1"]);
    }

    #[test]
    fn legacy_days_contribute_no_notes() {
        let history: History = serde_json::from_value(json!({
            "2026-01-01": 3,
            "2026-01-02": { "count": 2, "qualities": [4, 4] }
        }))
        .unwrap();
        assert!(flatten_notes(&history).is_empty());
    }

    #[test]
    fn deleting_last_note_drops_the_whole_day() {
        let history = log_interaction(History::new(), "2026-01-05", Quality::Good, "", at(5, 8));
        let history = log_interaction(history, "2026-01-05", Quality::Good, "only note", at(5, 9));
        let history = log_interaction(history, "2026-01-05", Quality::Good, "", at(5, 10));
        assert_eq!(history["2026-01-05"].count, 3);

        let history = delete_note(history, at(5, 9));
        assert!(!history.contains_key("2026-01-05"));
    }

    #[test]
    fn deleting_one_of_many_keeps_count() {
        let history = log_interaction(History::new(), "2026-01-05", Quality::Good, "a", at(5, 8));
        let history = log_interaction(history, "2026-01-05", Quality::Good, "b", at(5, 9));

        let history = delete_note(history, at(5, 8));
        assert_eq!(history["2026-01-05"].count, 2);
        assert_eq!(history["2026-01-05"].entries.len(), 1);
        assert_eq!(history["2026-01-05"].entries[0].note, "b");
    }

    #[test]
    fn unknown_timestamp_is_a_no_op() {
        let mut history = log_interaction(
            History::new(),
            "2026-01-05",
            Quality::Good,
            "a",
            at(5, 8),
        );
        history.insert(
            "2026-01-04".to_string(),
            DayRecord {
                count: 2,
                entries: Vec::new(),
            },
        );
        let before = history.clone();

        assert_eq!(remove_note(&mut history, at(6, 1)), None);
        assert_eq!(delete_note(history, at(6, 1)), before);
    }
}
