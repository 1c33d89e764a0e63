use crate::calendar::{DayCounts, MonthQuery};
use crate::models::{AppData, CompletionEvent, MonthData};
use chrono::{Datelike, NaiveDate};

/// `"me"` and the empty string mean "no user filter".
pub fn user_filter(user: Option<&str>) -> Option<&str> {
    user.map(str::trim).filter(|name| !name.is_empty() && *name != "me")
}

pub fn record_event(
    data: &mut AppData,
    habit_name: &str,
    date: NaiveDate,
    user_name: Option<&str>,
) -> CompletionEvent {
    let event = CompletionEvent {
        date,
        habit_name: habit_name.to_string(),
        user_name: user_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
    };
    data.events.push(event.clone());
    event
}

pub fn calendar_counts(
    data: &AppData,
    query: MonthQuery,
    user: Option<&str>,
    habit: Option<&str>,
) -> DayCounts {
    let mut counts = DayCounts::new();
    for event in &data.events {
        if !query.contains(event.date)
            || user.is_some_and(|user| event.user_name.as_deref() != Some(user))
            || habit.is_some_and(|habit| event.habit_name != habit)
        {
            continue;
        }
        let entry = counts.entry(event.date.day()).or_insert(0);
        *entry = entry.saturating_add(1);
    }
    counts
}

pub fn month_data(
    data: &AppData,
    query: MonthQuery,
    user: Option<&str>,
    habit: Option<&str>,
) -> MonthData {
    let counts = calendar_counts(data, query, user, habit);
    let max = counts.values().copied().max().unwrap_or(0);
    MonthData { counts, max }
}

pub fn count_on(data: &AppData, date: NaiveDate, user: Option<&str>) -> u32 {
    data.events
        .iter()
        .filter(|event| event.date == date)
        .filter(|event| user.is_none() || event.user_name.as_deref() == user)
        .count() as u32
}
