// Graph data service - Use case for building one dashboard render pass
use crate::application::remote_repository::RemoteDataRepository;
use crate::domain::events::{BolusEntry, CarbEntry, GlucoseSample, PredictedGlucose};
use crate::domain::graph::GraphItem;
use crate::domain::graph_data::GraphData;
use crate::domain::units::DisplayUnit;
use std::sync::Arc;

/// Options for one synthesis pass, resolved from config defaults and
/// per-request query parameters by the caller.
#[derive(Debug, Clone, Copy)]
pub struct GraphRequest {
    pub hours: i32,
    pub unit: DisplayUnit,
    pub include_prediction: bool,
}

#[derive(Clone)]
pub struct GraphDataService {
    repository: Arc<dyn RemoteDataRepository>,
}

impl GraphDataService {
    pub fn new(repository: Arc<dyn RemoteDataRepository>) -> Self {
        Self { repository }
    }

    /// Fetch the four event arrays and synthesize graph data. A failed
    /// category fetch degrades to an empty category rather than failing the
    /// whole dashboard.
    pub async fn get_graph_data(&self, request: GraphRequest) -> GraphData {
        let samples = self
            .repository
            .fetch_glucose_samples(request.hours)
            .await
            .unwrap_or_else(|e| {
                eprintln!("Error fetching glucose samples: {}", e);
                Vec::new()
            });

        let predictions = if request.include_prediction {
            self.repository
                .fetch_predicted_glucose()
                .await
                .unwrap_or_else(|e| {
                    eprintln!("Error fetching predicted glucose: {}", e);
                    Vec::new()
                })
        } else {
            Vec::new()
        };

        let boluses = self
            .repository
            .fetch_bolus_entries(request.hours)
            .await
            .unwrap_or_else(|e| {
                eprintln!("Error fetching bolus entries: {}", e);
                Vec::new()
            });

        let carbs = self
            .repository
            .fetch_carb_entries(request.hours)
            .await
            .unwrap_or_else(|e| {
                eprintln!("Error fetching carb entries: {}", e);
                Vec::new()
            });

        tracing::debug!(
            "Synthesizing graph data: {} samples, {} predictions, {} boluses, {} carbs",
            samples.len(),
            predictions.len(),
            boluses.len(),
            carbs.len()
        );

        build_graph_data(&samples, &predictions, &boluses, &carbs, request.unit)
    }
}

/// Pure synthesis of plottable items from raw events. Glucose items are
/// built first because treatment markers interpolate against them.
pub fn build_graph_data(
    samples: &[GlucoseSample],
    predictions: &[PredictedGlucose],
    boluses: &[BolusEntry],
    carbs: &[CarbEntry],
    unit: DisplayUnit,
) -> GraphData {
    let glucose: Vec<GraphItem> = samples.iter().map(|s| GraphItem::glucose(s, unit)).collect();

    let prediction: Vec<GraphItem> = predictions
        .iter()
        .map(|p| GraphItem::prediction(p, unit))
        .collect();

    let bolus: Vec<GraphItem> = boluses
        .iter()
        .map(|b| GraphItem::bolus(b, &glucose, unit))
        .collect();

    let carb: Vec<GraphItem> = carbs
        .iter()
        .map(|c| GraphItem::carb(c, &glucose, unit))
        .collect();

    GraphData::new(unit, glucose, prediction, bolus, carb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::graph::GraphItemKind;
    use crate::domain::units::GlucoseQuantity;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};

    struct StubRepository {
        samples: Vec<GlucoseSample>,
        predictions: Vec<PredictedGlucose>,
        boluses: Vec<BolusEntry>,
        carbs: Vec<CarbEntry>,
        fail_samples: bool,
    }

    #[async_trait]
    impl RemoteDataRepository for StubRepository {
        async fn fetch_glucose_samples(&self, _hours: i32) -> anyhow::Result<Vec<GlucoseSample>> {
            if self.fail_samples {
                anyhow::bail!("remote source unavailable");
            }
            Ok(self.samples.clone())
        }

        async fn fetch_predicted_glucose(&self) -> anyhow::Result<Vec<PredictedGlucose>> {
            Ok(self.predictions.clone())
        }

        async fn fetch_bolus_entries(&self, _hours: i32) -> anyhow::Result<Vec<BolusEntry>> {
            Ok(self.boluses.clone())
        }

        async fn fetch_carb_entries(&self, _hours: i32) -> anyhow::Result<Vec<CarbEntry>> {
            Ok(self.carbs.clone())
        }
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 4, 12, hour, minute, 0).unwrap()
    }

    fn stub() -> StubRepository {
        StubRepository {
            samples: vec![
                GlucoseSample::new(at(10, 0), GlucoseQuantity::from_mg_dl(100.0)),
                GlucoseSample::new(at(11, 0), GlucoseQuantity::from_mg_dl(120.0)),
            ],
            predictions: vec![PredictedGlucose::new(
                at(11, 5),
                GlucoseQuantity::from_mg_dl(125.0),
            )],
            boluses: vec![BolusEntry::new(at(10, 30), 2.0, 0.0)],
            carbs: vec![CarbEntry::new(at(10, 45), 30)],
            fail_samples: false,
        }
    }

    fn request() -> GraphRequest {
        GraphRequest {
            hours: 6,
            unit: DisplayUnit::MilligramsPerDeciliter,
            include_prediction: true,
        }
    }

    #[tokio::test]
    async fn test_builds_all_four_categories() {
        let service = GraphDataService::new(Arc::new(stub()));
        let data = service.get_graph_data(request()).await;

        assert_eq!(data.glucose.len(), 2);
        assert_eq!(data.prediction.len(), 1);
        assert_eq!(data.bolus.len(), 1);
        assert_eq!(data.carb.len(), 1);
    }

    #[tokio::test]
    async fn test_treatments_sit_on_the_interpolated_glucose_line() {
        let service = GraphDataService::new(Arc::new(stub()));
        let data = service.get_graph_data(request()).await;

        // 10:30 is halfway between the 100 and 120 samples.
        assert_eq!(data.bolus[0].value(), 110.0);
        assert!(matches!(data.bolus[0].kind(), GraphItemKind::Bolus(_)));
        // 10:45 is three quarters of the way.
        assert_eq!(data.carb[0].value(), 115.0);
    }

    #[tokio::test]
    async fn test_prediction_toggle_excludes_prediction_items() {
        let service = GraphDataService::new(Arc::new(stub()));
        let data = service
            .get_graph_data(GraphRequest {
                include_prediction: false,
                ..request()
            })
            .await;

        assert!(data.prediction.is_empty());
        assert_eq!(data.glucose.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_glucose_fetch_degrades_to_empty_category() {
        let mut repo = stub();
        repo.fail_samples = true;
        let service = GraphDataService::new(Arc::new(repo));
        let data = service.get_graph_data(request()).await;

        assert!(data.glucose.is_empty());
        // Treatments lose their glucose context and fall to the sentinel.
        assert_eq!(data.bolus[0].value(), 0.0);
    }
}
