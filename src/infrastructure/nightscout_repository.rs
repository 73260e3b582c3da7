// Nightscout repository implementation
use crate::application::remote_repository::RemoteDataRepository;
use crate::domain::events::{BolusEntry, CarbEntry, GlucoseSample, PredictedGlucose};
use crate::domain::units::GlucoseQuantity;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Predicted glucose values arrive as a bare array stepped at the CGM
/// sampling cadence from the curve's start date.
const PREDICTION_STEP_MINUTES: i64 = 5;

/// Upper bound on treatment rows per fetch; the window filter does the real
/// narrowing.
const MAX_TREATMENT_ROWS: usize = 500;

#[derive(Debug, Error)]
pub enum NightscoutError {
    #[error("Failed to reach Nightscout: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Nightscout request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Clone)]
pub struct NightscoutRepository {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

// Wire rows. Nightscout documents are loosely schemed, so every field is
// optional and rows missing what we need are skipped.

#[derive(Debug, Deserialize)]
struct EntryRow {
    /// Epoch milliseconds.
    #[serde(default)]
    date: Option<i64>,
    #[serde(default, rename = "dateString")]
    date_string: Option<String>,
    /// Sensor glucose value in mg/dL.
    #[serde(default)]
    sgv: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TreatmentRow {
    #[serde(default, rename = "eventType")]
    event_type: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    /// Insulin units for bolus treatments.
    #[serde(default)]
    insulin: Option<f64>,
    /// Carbohydrate grams for carb treatments.
    #[serde(default)]
    carbs: Option<f64>,
    /// Delivery duration in minutes.
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DeviceStatusRow {
    #[serde(default, rename = "loop")]
    loop_status: Option<LoopStatus>,
}

#[derive(Debug, Deserialize)]
struct LoopStatus {
    #[serde(default)]
    predicted: Option<PredictedCurve>,
}

#[derive(Debug, Deserialize)]
struct PredictedCurve {
    #[serde(default, rename = "startDate")]
    start_date: Option<String>,
    #[serde(default)]
    values: Option<Vec<f64>>,
}

impl NightscoutRepository {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    fn build_url(&self, path_and_query: &str) -> String {
        let mut url = format!("{}{}", self.base_url, path_and_query);
        if let Some(token) = &self.token {
            url.push_str(&format!("&token={}", urlencoding::encode(token)));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<T, NightscoutError> {
        let url = self.build_url(path_and_query);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NightscoutError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }

    fn window_start(hours: i32) -> DateTime<Utc> {
        Utc::now() - Duration::hours(i64::from(hours.max(1)))
    }

    async fn fetch_treatments(&self, hours: i32) -> Result<Vec<TreatmentRow>, NightscoutError> {
        let since = Self::window_start(hours);
        let query = format!(
            "/api/v1/treatments.json?count={}&find[created_at][$gte]={}",
            MAX_TREATMENT_ROWS,
            urlencoding::encode(&since.to_rfc3339())
        );
        self.get_json(&query).await
    }
}

#[async_trait]
impl RemoteDataRepository for NightscoutRepository {
    async fn fetch_glucose_samples(&self, hours: i32) -> Result<Vec<GlucoseSample>> {
        // Entries arrive newest-first at roughly one per five minutes.
        let count = i64::from(hours.max(1)) * (60 / PREDICTION_STEP_MINUTES);
        let query = format!("/api/v1/entries/sgv.json?count={}", count);
        let rows: Vec<EntryRow> = self.get_json(&query).await?;

        let since = Self::window_start(hours);
        let mut samples = entries_to_samples(rows);
        samples.retain(|s| s.timestamp >= since);

        tracing::debug!("Fetched {} glucose samples", samples.len());
        Ok(samples)
    }

    async fn fetch_predicted_glucose(&self) -> Result<Vec<PredictedGlucose>> {
        let rows: Vec<DeviceStatusRow> = self
            .get_json("/api/v1/devicestatus.json?count=10")
            .await?;
        Ok(device_status_to_predictions(rows))
    }

    async fn fetch_bolus_entries(&self, hours: i32) -> Result<Vec<BolusEntry>> {
        let rows = self.fetch_treatments(hours).await?;
        Ok(treatments_to_boluses(rows))
    }

    async fn fetch_carb_entries(&self, hours: i32) -> Result<Vec<CarbEntry>> {
        let rows = self.fetch_treatments(hours).await?;
        Ok(treatments_to_carbs(rows))
    }
}

fn entry_timestamp(row: &EntryRow) -> Option<DateTime<Utc>> {
    if let Some(ms) = row.date {
        return Utc.timestamp_millis_opt(ms).single();
    }
    row.date_string
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

fn treatment_timestamp(row: &TreatmentRow) -> Option<DateTime<Utc>> {
    row.timestamp
        .as_deref()
        .or(row.created_at.as_deref())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// Convert entry rows to domain samples, sorted ascending by timestamp.
/// Sorting here upholds the interpolator's ordering precondition.
fn entries_to_samples(rows: Vec<EntryRow>) -> Vec<GlucoseSample> {
    let mut samples: Vec<GlucoseSample> = rows
        .iter()
        .filter_map(|row| {
            let timestamp = entry_timestamp(row)?;
            let sgv = row.sgv?;
            Some(GlucoseSample::new(
                timestamp,
                GlucoseQuantity::from_mg_dl(sgv),
            ))
        })
        .collect();
    samples.sort_by_key(|s| s.timestamp);
    samples
}

fn treatments_to_boluses(rows: Vec<TreatmentRow>) -> Vec<BolusEntry> {
    let mut boluses: Vec<BolusEntry> = rows
        .iter()
        .filter(|row| {
            row.event_type
                .as_deref()
                .is_some_and(|t| t.contains("Bolus"))
        })
        .filter_map(|row| {
            let timestamp = treatment_timestamp(row)?;
            let amount = row.insulin?;
            Some(BolusEntry::new(
                timestamp,
                amount,
                row.duration.unwrap_or(0.0),
            ))
        })
        .collect();
    boluses.sort_by_key(|b| b.timestamp);
    boluses
}

fn treatments_to_carbs(rows: Vec<TreatmentRow>) -> Vec<CarbEntry> {
    let mut carbs: Vec<CarbEntry> = rows
        .iter()
        .filter_map(|row| {
            let timestamp = treatment_timestamp(row)?;
            let grams = row.carbs?;
            if grams <= 0.0 {
                return None;
            }
            Some(CarbEntry::new(timestamp, grams.round() as i32))
        })
        .collect();
    carbs.sort_by_key(|c| c.timestamp);
    carbs
}

/// Take the most recent device status carrying a predicted curve and step
/// its values forward from the start date.
fn device_status_to_predictions(rows: Vec<DeviceStatusRow>) -> Vec<PredictedGlucose> {
    for row in rows {
        let Some(curve) = row.loop_status.and_then(|l| l.predicted) else {
            continue;
        };
        let Some(start) = curve
            .start_date
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc))
        else {
            continue;
        };
        let values = curve.values.unwrap_or_default();

        return values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                PredictedGlucose::new(
                    start + Duration::minutes(i as i64 * PREDICTION_STEP_MINUTES),
                    GlucoseQuantity::from_mg_dl(value),
                )
            })
            .collect();
    }
    Vec::new()
}
