use crate::history::day_count;
use crate::models::{ActivityCell, ActivityWeek, AppData, StatsResponse, TodayResponse};
use crate::streaks::{compute_streaks, date_key};
use chrono::{Datelike, Duration, Local, NaiveDate};

const ACTIVITY_WEEKS: usize = 13;
const CONSISTENCY_WINDOW_DAYS: i64 = 90;

pub fn build_today_at(today: NaiveDate, data: &AppData) -> TodayResponse {
    let streaks = compute_streaks(&data.history, today);
    let goal = u64::from(data.daily_goal);

    TodayResponse {
        date: date_key(today),
        today_count: data.today_count,
        total_count: data.total_count,
        daily_goal: data.daily_goal,
        goal_progress: goal_progress(data.today_count, data.daily_goal),
        remaining_to_goal: goal.saturating_sub(data.today_count),
        current_streak: streaks.current,
        longest_streak: streaks.longest,
    }
}

// A goal of 0 counts as met.
pub fn goal_progress(today_count: u64, daily_goal: u32) -> f64 {
    if daily_goal == 0 {
        return 100.0;
    }
    (today_count as f64 * 100.0 / f64::from(daily_goal)).min(100.0)
}

pub fn build_stats(data: &AppData) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), data)
}

pub fn build_stats_at(today: NaiveDate, data: &AppData) -> StatsResponse {
    let streaks = compute_streaks(&data.history, today);

    let days_tracked = data.history.values().filter(|record| record.is_active()).count();
    let best_day = data
        .history
        .values()
        .map(|record| record.count)
        .max()
        .unwrap_or(0);
    let average_per_day = if days_tracked == 0 {
        0.0
    } else {
        data.total_count as f64 / days_tracked as f64
    };

    let active_in_window = (0..CONSISTENCY_WINDOW_DAYS)
        .filter(|offset| day_count(&data.history, &date_key(today - Duration::days(*offset))) > 0)
        .count();
    let consistency_percent = active_in_window as f64 / CONSISTENCY_WINDOW_DAYS as f64 * 100.0;

    StatsResponse {
        days_tracked,
        total_count: data.total_count,
        average_per_day,
        best_day,
        consistency_percent,
        current_streak: streaks.current,
        longest_streak: streaks.longest,
        max_streak_seen: data.max_streak_seen.max(streaks.current),
        activity: activity_weeks(today, data),
    }
}

fn activity_weeks(today: NaiveDate, data: &AppData) -> Vec<ActivityWeek> {
    let total_days = (ACTIVITY_WEEKS * 7) as i64;
    let first = today - Duration::days(total_days - 1);

    let mut weeks = Vec::with_capacity(ACTIVITY_WEEKS);
    for week_offset in 0..ACTIVITY_WEEKS as i64 {
        let start = first + Duration::weeks(week_offset);
        let days = (0..7)
            .map(|day_offset| {
                let date = start + Duration::days(day_offset);
                let count = day_count(&data.history, &date_key(date));
                ActivityCell {
                    date: date.to_string(),
                    count,
                    level: activity_level(count),
                }
            })
            .collect();

        weeks.push(ActivityWeek {
            week: week_label(start),
            days,
        });
    }

    weeks
}

fn activity_level(count: u64) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        _ => 3,
    }
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
