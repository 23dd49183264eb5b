use crate::history::{day_count, Quality};
use crate::ledger::{log_interaction, unique_timestamp};
use crate::models::{AppData, Celebrations, InteractionOutcome, MAX_DAILY_GOAL, MIN_DAILY_GOAL};
use crate::notes::remove_note;
use crate::streaks::{compute_streaks, date_key, milestone_for};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

impl AppData {
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        let key = date_key(today);
        if self.last_seen_date.as_deref() == Some(key.as_str()) {
            return false;
        }

        debug!(previous = ?self.last_seen_date, today = %key, "day rollover");
        self.today_count = 0;
        self.last_seen_date = Some(key);
        true
    }

    pub fn record_interaction(
        &mut self,
        today: NaiveDate,
        quality: Quality,
        note: &str,
        timestamp: DateTime<Utc>,
    ) -> InteractionOutcome {
        self.roll_over(today);
        let date = date_key(today);
        let was_active = day_count(&self.history, &date) > 0;
        let timestamp = unique_timestamp(&self.history, timestamp);

        let history = std::mem::take(&mut self.history);
        self.history = log_interaction(history, &date, quality, note, timestamp);
        self.today_count = self.today_count.saturating_add(1);
        self.total_count = self.total_count.saturating_add(1);

        let streaks = compute_streaks(&self.history, today);
        let mut celebrations = Celebrations {
            goal_reached: self.today_count == u64::from(self.daily_goal),
            ..Celebrations::default()
        };

        if streaks.current > self.max_streak_seen {
            info!(streak = streaks.current, "new best streak");
            self.max_streak_seen = streaks.current;
            celebrations.new_best_streak = Some(streaks.current);
        }

        if !was_active {
            celebrations.milestone = milestone_for(streaks.current);
            if let Some(milestone) = celebrations.milestone {
                info!(milestone, "streak milestone reached");
            }
        }

        debug!(
            %date,
            today_count = self.today_count,
            total_count = self.total_count,
            "interaction logged"
        );

        InteractionOutcome {
            date,
            streaks,
            celebrations,
        }
    }

    pub fn remove_note(&mut self, timestamp: DateTime<Utc>) -> Option<String> {
        let removed = remove_note(&mut self.history, timestamp);
        match &removed {
            Some(date) => debug!(%date, %timestamp, "note deleted"),
            None => debug!(%timestamp, "no note with that timestamp"),
        }
        removed
    }

    pub fn set_daily_goal(&mut self, goal: i64) -> u32 {
        let clamped = goal.clamp(i64::from(MIN_DAILY_GOAL), i64::from(MAX_DAILY_GOAL));
        self.daily_goal = u32::try_from(clamped).unwrap_or(MIN_DAILY_GOAL);
        self.daily_goal
    }
}
