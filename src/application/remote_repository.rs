// Repository trait for remote diabetes-management data access
use crate::domain::events::{BolusEntry, CarbEntry, GlucoseSample, PredictedGlucose};
use async_trait::async_trait;

/// Abstracts the remote data source (a Nightscout instance in production).
///
/// Implementations return events sorted ascending by timestamp; the
/// interpolator depends on that ordering.
#[async_trait]
pub trait RemoteDataRepository: Send + Sync {
    /// Glucose samples within the trailing window.
    async fn fetch_glucose_samples(&self, hours: i32) -> anyhow::Result<Vec<GlucoseSample>>;

    /// The most recent forward-projected glucose curve.
    async fn fetch_predicted_glucose(&self) -> anyhow::Result<Vec<PredictedGlucose>>;

    /// Insulin bolus treatments within the trailing window.
    async fn fetch_bolus_entries(&self, hours: i32) -> anyhow::Result<Vec<BolusEntry>>;

    /// Carbohydrate treatments within the trailing window.
    async fn fetch_carb_entries(&self, hours: i32) -> anyhow::Result<Vec<CarbEntry>>;
}
