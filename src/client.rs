use crate::calendar::MonthQuery;
use crate::models::MonthData;
use reqwest::Client;
use std::future::Future;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("calendar data unavailable: {0}")]
    DataUnavailable(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::DataUnavailable(err.to_string())
    }
}

pub trait CalendarSource {
    fn fetch_month(
        &self,
        query: MonthQuery,
    ) -> impl Future<Output = Result<MonthData, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct CalendarClient {
    http: Client,
    base_url: String,
    user: String,
}

impl CalendarClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user: "me".to_string(),
        }
    }

    pub fn for_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }
}

impl CalendarSource for CalendarClient {
    async fn fetch_month(&self, query: MonthQuery) -> Result<MonthData, FetchError> {
        let month = query.month().to_string();
        let year = query.year().to_string();
        let data = self
            .http
            .get(format!("{}/calendar_data", self.base_url))
            .query(&[
                ("month", month.as_str()),
                ("year", year.as_str()),
                ("user", self.user.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<MonthData>()
            .await?;
        Ok(data)
    }
}

pub async fn fetch_month_or_empty<S: CalendarSource>(source: &S, query: MonthQuery) -> MonthData {
    match source.fetch_month(query).await {
        Ok(data) => data,
        Err(err) => {
            warn!("calendar load failed for {}: {err}", query.label());
            MonthData::default()
        }
    }
}
