use crate::calendar::{CalendarCell, MonthQuery};
use crate::models::{CalendarViewResponse, MonthParams};
use serde::Serialize;
use std::fmt::Write;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Serialize)]
struct MonthLink<'a> {
    year: i32,
    month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    habit: Option<&'a str>,
}

pub fn render_index(view: &CalendarViewResponse, params: &MonthParams) -> String {
    INDEX_HTML
        .replace("{{LABEL}}", &view.label)
        .replace("{{PREV}}", &month_href(view.prev, params))
        .replace("{{NEXT}}", &month_href(view.next, params))
        .replace("{{GRID}}", &render_grid(&view.cells))
}

/// Link to `query` that keeps the page's user and habit filters.
pub fn month_href(query: MonthQuery, params: &MonthParams) -> String {
    let link = MonthLink {
        year: query.year(),
        month: query.month(),
        user: params.user.as_deref().filter(|user| !user.is_empty()),
        habit: params.habit.as_deref().filter(|habit| !habit.is_empty()),
    };
    match serde_urlencoded::to_string(&link) {
        Ok(encoded) => format!("/?{encoded}"),
        Err(_) => format!("/?year={}&month={}", query.year(), query.month()),
    }
}

pub fn render_grid(cells: &[CalendarCell]) -> String {
    let mut html = String::new();
    for name in WEEKDAYS {
        let _ = write!(html, r#"<div class="cal-head">{name}</div>"#);
    }
    for cell in cells {
        match cell.day {
            None => html.push_str(r#"<div class="cal-day blank"></div>"#),
            Some(day) => {
                let badge = if cell.count > 0 {
                    format!("{} &#10003;", cell.count)
                } else {
                    String::new()
                };
                let op = cell.intensity;
                let heat = format!(
                    "linear-gradient(180deg, rgba(209,114,87,{op:.2}), rgba(155,125,95,{op:.2}))"
                );
                let _ = write!(
                    html,
                    r#"<div class="cal-day" data-day="{day}" data-count="{}">"#,
                    cell.count
                );
                let _ = write!(html, r#"<div class="num">{day}</div>"#);
                let _ = write!(html, r#"<div class="cal-heat" style="background: {heat}">"#);
                let _ = write!(html, "<span>{badge}</span></div></div>");
            }
        }
    }
    html
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Heatmap</title>
  <style>
    :root {
      --bg: #f7f1e8;
      --ink: #3d2817;
      --accent: #d17257;
      --card: rgba(255, 255, 255, 0.9);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: 0 20px 50px rgba(61, 40, 23, 0.15);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    .cal-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .cal-nav a {
      color: var(--accent);
      text-decoration: none;
      font-weight: 600;
    }

    .cal-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .cal-head {
      font-weight: 700;
      text-align: center;
      background: rgba(139, 111, 71, 0.1);
      border-radius: 8px;
      padding: 4px 0;
    }

    .cal-day.blank {
      opacity: 0.3;
    }

    .cal-day .num {
      font-size: 12px;
    }

    .cal-heat {
      min-height: 50px;
      border-radius: 8px;
      display: flex;
      align-items: flex-end;
      justify-content: flex-end;
      padding: 4px;
      font-size: 11px;
      font-weight: 600;
      color: rgba(61, 40, 23, 0.7);
    }

    form {
      display: flex;
      gap: 8px;
    }

    input {
      flex: 1;
      padding: 8px 12px;
      border-radius: 10px;
      border: 1px solid rgba(61, 40, 23, 0.2);
    }

    button {
      border: none;
      border-radius: 10px;
      padding: 8px 16px;
      background: var(--accent);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <main class="app">
    <div class="cal-nav">
      <a id="calPrev" href="{{PREV}}">&larr; Prev</a>
      <h1 id="calLabel">{{LABEL}}</h1>
      <a id="calNext" href="{{NEXT}}">Next &rarr;</a>
    </div>
    <div class="cal-grid" id="calendarGrid">{{GRID}}</div>
    <form method="post" action="/complete">
      <input name="habit_name" placeholder="Habit completed today" required />
      <button type="submit">Mark done</button>
    </form>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{render, DayCounts};

    fn view_for(query: MonthQuery, counts: &DayCounts, max: u32) -> CalendarViewResponse {
        CalendarViewResponse {
            label: query.label(),
            year: query.year(),
            month: query.month(),
            prev: query.prev(),
            next: query.next(),
            max,
            cells: render(query, counts, max),
        }
    }

    #[test]
    fn grid_has_headers_blanks_and_days() {
        let query = MonthQuery::new(2024, 6).unwrap();
        let html = render_grid(&render(query, &DayCounts::new(), 0));
        assert_eq!(html.matches("cal-head").count(), 7);
        assert_eq!(html.matches("cal-day blank").count(), 6);
        assert_eq!(html.matches("data-day=").count(), 30);
        assert!(html.contains("rgba(209,114,87,0.08)"));
    }

    #[test]
    fn index_links_neighbouring_months() {
        let query = MonthQuery::new(2024, 1).unwrap();
        let mut counts = DayCounts::new();
        counts.insert(15, 4);
        let html = render_index(&view_for(query, &counts, 4), &MonthParams::default());
        assert!(html.contains("January 2024"));
        assert!(html.contains(r#"href="/?year=2023&month=12""#));
        assert!(html.contains(r#"href="/?year=2024&month=2""#));
        assert!(html.contains(r#"data-day="15" data-count="4""#));
        assert!(html.contains("rgba(209,114,87,0.90)"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn month_links_keep_filters() {
        let query = MonthQuery::new(2024, 1).unwrap();
        let params = MonthParams {
            user: Some("ana lee".into()),
            habit: Some("run&jump".into()),
            ..MonthParams::default()
        };
        let html = render_index(&view_for(query, &DayCounts::new(), 0), &params);
        assert!(html.contains(r#"href="/?year=2023&month=12&user=ana+lee&habit=run%26jump""#));
        assert!(html.contains(r#"href="/?year=2024&month=2&user=ana+lee&habit=run%26jump""#));
    }

    #[test]
    fn month_links_skip_empty_filters() {
        let query = MonthQuery::new(2024, 5).unwrap();
        let params = MonthParams {
            user: Some(String::new()),
            ..MonthParams::default()
        };
        assert_eq!(month_href(query, &params), "/?year=2024&month=5");
    }
}
