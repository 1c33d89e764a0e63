pub mod app;
pub mod calendar;
pub mod client;
pub mod config;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod models;
pub mod navigator;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use calendar::{render, CalendarCell, DayCounts, IntensityScale, MonthQuery};
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
