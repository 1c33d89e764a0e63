use crate::calendar::{render_with, MonthQuery};
use crate::errors::AppError;
use crate::events::{count_on, month_data, record_event as append_event, user_filter};
use crate::models::{
    CalendarViewResponse, CompleteForm, MonthData, MonthParams, RecordEventRequest,
    RecordEventResponse,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use tracing::{error, info};

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Html<String>, AppError> {
    let view = build_view(&state, &params).await?;
    Ok(Html(render_index(&view, &params)))
}

pub async fn calendar_data(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Json<MonthData>, AppError> {
    let query = resolve_query(&params)?;
    let data = state.data.lock().await;
    Ok(Json(month_data(
        &data,
        query,
        user_filter(params.user.as_deref()),
        params.habit.as_deref(),
    )))
}

pub async fn calendar_view(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Json<CalendarViewResponse>, AppError> {
    Ok(Json(build_view(&state, &params).await?))
}

pub async fn record_event(
    State(state): State<AppState>,
    Json(payload): Json<RecordEventRequest>,
) -> Result<Json<RecordEventResponse>, AppError> {
    let date = payload.date.unwrap_or_else(today);
    let response = apply_event(
        &state,
        &payload.habit_name,
        date,
        payload.user_name.as_deref(),
    )
    .await?;
    Ok(Json(response))
}

pub async fn complete(
    State(state): State<AppState>,
    Form(form): Form<CompleteForm>,
) -> Result<Redirect, AppError> {
    apply_event(&state, &form.habit_name, today(), None).await?;
    Ok(Redirect::to("/"))
}

async fn apply_event(
    state: &AppState,
    habit_name: &str,
    date: NaiveDate,
    user_name: Option<&str>,
) -> Result<RecordEventResponse, AppError> {
    let habit_name = habit_name.trim();
    if habit_name.is_empty() {
        return Err(AppError::bad_request("habit_name must not be empty"));
    }

    let mut data = state.data.lock().await;
    let event = append_event(&mut data, habit_name, date, user_name);
    if let Err(err) = persist_data(&state.data_path, &data).await {
        data.events.pop();
        error!("failed to save '{}' on {}: {}", event.habit_name, event.date, err.message);
        return Err(err);
    }
    info!("recorded '{}' on {}", event.habit_name, event.date);

    Ok(RecordEventResponse {
        date,
        day_count: count_on(&data, date, None),
    })
}

async fn build_view(
    state: &AppState,
    params: &MonthParams,
) -> Result<CalendarViewResponse, AppError> {
    let query = resolve_query(params)?;
    let month = {
        let data = state.data.lock().await;
        month_data(
            &data,
            query,
            user_filter(params.user.as_deref()),
            params.habit.as_deref(),
        )
    };

    Ok(CalendarViewResponse {
        label: query.label(),
        year: query.year(),
        month: query.month(),
        prev: query.prev(),
        next: query.next(),
        max: month.max,
        cells: render_with(query, &month.counts, month.max, &state.scale),
    })
}

/// Missing parts of the month fall back to the current local month.
fn resolve_query(params: &MonthParams) -> Result<MonthQuery, AppError> {
    let current = MonthQuery::current();
    let year = params.year.unwrap_or(current.year());
    let month = params.month.unwrap_or(i64::from(current.month()));
    Ok(MonthQuery::new(year, month)?)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::IntensityScale;
    use crate::models::AppData;

    fn may_2024() -> MonthParams {
        MonthParams {
            month: Some(5),
            year: Some(2024),
            ..MonthParams::default()
        }
    }

    fn unwritable_state() -> AppState {
        // A directory path can never be written as a file.
        AppState::new(std::env::temp_dir(), AppData::default(), IntensityScale::default())
    }

    #[tokio::test]
    async fn failed_save_leaves_counts_unchanged() {
        let state = unwritable_state();
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();

        let result = apply_event(&state, "read", date, None).await;
        assert!(result.is_err());

        assert!(state.data.lock().await.events.is_empty());
        let Json(month) = calendar_data(State(state.clone()), Query(may_2024()))
            .await
            .unwrap();
        assert!(month.counts.is_empty());
        assert_eq!(month.max, 0);
    }

    #[tokio::test]
    async fn blank_habit_is_rejected() {
        let state = unwritable_state();
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let err = apply_event(&state, "  ", date, None).await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
