use crate::calendar::{CalendarCell, DayCounts, MonthQuery};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionEvent {
    pub date: NaiveDate,
    pub habit_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub events: Vec<CompletionEvent>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MonthParams {
    pub month: Option<i64>,
    pub year: Option<i32>,
    pub user: Option<String>,
    pub habit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordEventRequest {
    pub habit_name: String,
    pub date: Option<NaiveDate>,
    pub user_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteForm {
    pub habit_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordEventResponse {
    pub date: NaiveDate,
    pub day_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MonthData {
    #[serde(default)]
    pub counts: DayCounts,
    #[serde(default)]
    pub max: u32,
}

#[derive(Debug, Serialize)]
pub struct CalendarViewResponse {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub prev: MonthQuery,
    pub next: MonthQuery,
    pub max: u32,
    pub cells: Vec<CalendarCell>,
}
