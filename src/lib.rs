pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod ledger;
pub mod models;
pub mod notes;
pub mod state;
pub mod stats;
pub mod storage;
pub mod streaks;
pub mod tracker;

pub use app::router;
pub use config::Config;
pub use history::{normalize_count, DayRecord, History, InteractionEntry, Quality, StoredDay};
pub use ledger::log_interaction;
pub use notes::{delete_note, flatten_notes};
pub use state::AppState;
pub use storage::load_data;
pub use streaks::{compute_streaks, StreakState};
