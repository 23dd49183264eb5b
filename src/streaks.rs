use crate::history::{day_count, History};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::warn;

pub const MILESTONES: [u32; 5] = [7, 30, 90, 180, 365];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StreakState {
    pub current: u32,
    pub longest: u32,
}

pub fn compute_streaks(history: &History, today: NaiveDate) -> StreakState {
    StreakState {
        current: current_streak(history, today),
        longest: longest_streak(history),
    }
}

pub fn longest_streak(history: &History) -> u32 {
    let mut active_days: Vec<NaiveDate> = history
        .iter()
        .filter(|(_, record)| record.is_active())
        .filter_map(|(key, _)| parse_day(key))
        .collect();
    active_days.sort_unstable();

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut last_active: Option<NaiveDate> = None;

    for day in active_days {
        run = match last_active {
            Some(last) if (day - last).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        last_active = Some(day);
    }

    longest
}

// Today may still be empty without breaking a streak that runs through yesterday.
pub fn current_streak(history: &History, today: NaiveDate) -> u32 {
    let mut streak = 0u32;
    let mut day = today;

    if is_active(history, today) {
        streak += 1;
    }

    // Every step back past today either counts an active day or stops, so the
    // walk is bounded by the number of recorded days.
    for _ in 0..=history.len() {
        day -= Duration::days(1);
        if !is_active(history, day) {
            break;
        }
        streak += 1;
    }

    streak
}

pub fn milestone_for(current: u32) -> Option<u32> {
    MILESTONES.iter().copied().find(|&milestone| milestone == current)
}

fn is_active(history: &History, day: NaiveDate) -> bool {
    day_count(history, &date_key(day)) > 0
}

pub(crate) fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_day(key: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
        Ok(day) => Some(day),
        Err(err) => {
            warn!("skipping history key {key:?}: {err}");
            None
        }
    }
}
