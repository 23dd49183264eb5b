use crate::history::History;
use crate::notes::DatedEntry;
use crate::streaks::StreakState;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DAILY_GOAL: u32 = 10;
pub const MIN_DAILY_GOAL: u32 = 1;
pub const MAX_DAILY_GOAL: u32 = 50;
pub const GOAL_PRESETS: [u32; 4] = [5, 10, 15, 20];

// Missing keys fall back to first-run defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub today_count: u64,
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
    #[serde(default)]
    pub last_seen_date: Option<String>,
    #[serde(default)]
    pub max_streak_seen: u32,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            history: History::new(),
            total_count: 0,
            today_count: 0,
            daily_goal: DEFAULT_DAILY_GOAL,
            last_seen_date: None,
            max_streak_seen: 0,
        }
    }
}

fn default_daily_goal() -> u32 {
    DEFAULT_DAILY_GOAL
}

#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    pub quality: u8,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteNoteRequest {
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub daily_goal: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub daily_goal: u32,
    pub presets: Vec<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub today_count: u64,
    pub total_count: u64,
    pub daily_goal: u32,
    pub goal_progress: f64,
    pub remaining_to_goal: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebrations {
    pub goal_reached: bool,
    pub new_best_streak: Option<u32>,
    pub milestone: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionOutcome {
    pub date: String,
    pub streaks: StreakState,
    pub celebrations: Celebrations,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InteractionResponse {
    #[serde(flatten)]
    pub today: TodayResponse,
    pub celebrations: Celebrations,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub date: String,
    pub quality: u8,
    pub quality_label: String,
    pub note: String,
    pub timestamp: String,
}

impl From<DatedEntry> for NoteResponse {
    fn from(dated: DatedEntry) -> Self {
        Self {
            date: dated.date,
            quality: dated.entry.quality.value(),
            quality_label: dated.entry.quality.label().to_string(),
            note: dated.entry.note,
            timestamp: dated
                .entry
                .timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivityCell {
    pub date: String,
    pub count: u64,
    pub level: u8,
}

#[derive(Debug, Serialize)]
pub struct ActivityWeek {
    pub week: String,
    pub days: Vec<ActivityCell>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub days_tracked: usize,
    pub total_count: u64,
    pub average_per_day: f64,
    pub best_day: u64,
    pub consistency_percent: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub max_streak_seen: u32,
    pub activity: Vec<ActivityWeek>,
}
