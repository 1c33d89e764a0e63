use crate::calendar::{render_with, CalendarCell, IntensityScale, MonthQuery};
use crate::client::{fetch_month_or_empty, CalendarSource};
use crate::models::MonthData;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub query: MonthQuery,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMonth {
    pub query: MonthQuery,
    pub label: String,
    pub max: u32,
    pub cells: Vec<CalendarCell>,
}

#[derive(Debug)]
struct NavState {
    query: MonthQuery,
    generation: u64,
}

#[derive(Debug)]
pub struct CalendarNavigator {
    state: Mutex<NavState>,
    scale: IntensityScale,
}

impl CalendarNavigator {
    pub fn new(start: MonthQuery, scale: IntensityScale) -> Self {
        Self {
            state: Mutex::new(NavState {
                query: start,
                generation: 0,
            }),
            scale,
        }
    }

    fn lock(&self) -> MutexGuard<'_, NavState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> MonthQuery {
        self.lock().query
    }

    pub fn reload(&self) -> Ticket {
        let query = self.current();
        self.go_to(query)
    }

    pub fn go_to(&self, query: MonthQuery) -> Ticket {
        let mut state = self.lock();
        state.query = query;
        state.generation += 1;
        Ticket {
            query,
            generation: state.generation,
        }
    }

    pub fn prev(&self) -> Ticket {
        self.step(-1)
    }

    pub fn next(&self) -> Ticket {
        self.step(1)
    }

    fn step(&self, delta: i32) -> Ticket {
        let mut state = self.lock();
        state.query = state.query.shift(delta);
        state.generation += 1;
        Ticket {
            query: state.query,
            generation: state.generation,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.lock().generation == ticket.generation
    }

    /// `None` when a newer ticket has been issued.
    pub fn apply(&self, ticket: &Ticket, data: &MonthData) -> Option<RenderedMonth> {
        if !self.is_current(ticket) {
            debug!("dropping stale response for {}", ticket.query.label());
            return None;
        }
        Some(RenderedMonth {
            query: ticket.query,
            label: ticket.query.label(),
            max: data.max,
            cells: render_with(ticket.query, &data.counts, data.max, &self.scale),
        })
    }

    pub async fn load<S: CalendarSource>(
        &self,
        source: &S,
        ticket: Ticket,
    ) -> Option<RenderedMonth> {
        let data = fetch_month_or_empty(source, ticket.query).await;
        self.apply(&ticket, &data)
    }
}
