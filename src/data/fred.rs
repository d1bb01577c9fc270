//! FRED API integration for observation series (e.g. real GDP).

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::data::SeriesProvider;
use crate::domain::TimeSeries;
use crate::error::AppError;

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const API_KEY_VAR: &str = "FRED_API_KEY";

pub struct FredClient {
    client: Client,
    api_key: String,
}

impl FredClient {
    /// Build a client from `FRED_API_KEY` (environment or `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| AppError::new(2, format!("Missing {API_KEY_VAR} in environment (.env).")))?;
        if api_key.trim().is_empty() {
            return Err(AppError::new(2, format!("{API_KEY_VAR} is empty.")));
        }
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    fn fetch_observations(&self, series_id: &str) -> Result<ObservationsResponse, AppError> {
        log::info!("fetching FRED series {series_id}");
        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("series_id", series_id),
                ("api_key", &self.api_key),
                ("file_type", "json"),
                ("sort_order", "asc"),
            ])
            .send()
            .map_err(|e| AppError::new(4, format!("FRED request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("FRED request for {series_id} failed with status {}.", resp.status()),
            ));
        }

        resp.json()
            .map_err(|e| AppError::new(4, format!("Failed to parse FRED response: {e}")))
    }
}

impl SeriesProvider for FredClient {
    fn fetch(&self, series_id: &str) -> Result<TimeSeries, AppError> {
        let body = self.fetch_observations(series_id)?;
        let series = observations_to_series(series_id, body)?;
        log::info!(
            "{series_id}: {} observations ({} .. {})",
            series.len(),
            series.first_date().map(|d| d.to_string()).unwrap_or_default(),
            series.last_date().map(|d| d.to_string()).unwrap_or_default(),
        );
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

fn observations_to_series(series_id: &str, body: ObservationsResponse) -> Result<TimeSeries, AppError> {
    let mut raw = Vec::with_capacity(body.observations.len());
    for obs in body.observations {
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
            .map_err(|e| AppError::new(4, format!("Invalid FRED date '{}': {e}", obs.date)))?;
        raw.push((date, parse_value(&obs.value)));
    }

    let series = TimeSeries::from_raw(series_id, raw)?;
    if series.is_empty() {
        return Err(AppError::new(
            4,
            format!("No observations returned for series {series_id}."),
        ));
    }
    Ok(series)
}

/// FRED marks missing values with `"."`.
pub(crate) fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}
