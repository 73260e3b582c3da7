// Raw medical events as delivered by the remote data source
use crate::domain::units::GlucoseQuantity;
use chrono::{DateTime, Utc};

/// An estimated glucose value sample from a continuous monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct GlucoseSample {
    pub timestamp: DateTime<Utc>,
    pub quantity: GlucoseQuantity,
}

impl GlucoseSample {
    pub fn new(timestamp: DateTime<Utc>, quantity: GlucoseQuantity) -> Self {
        Self {
            timestamp,
            quantity,
        }
    }
}

/// A forward-projected glucose estimate, not a direct measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedGlucose {
    pub timestamp: DateTime<Utc>,
    pub quantity: GlucoseQuantity,
}

impl PredictedGlucose {
    pub fn new(timestamp: DateTime<Utc>, quantity: GlucoseQuantity) -> Self {
        Self {
            timestamp,
            quantity,
        }
    }
}

/// A recorded insulin delivery event.
#[derive(Debug, Clone, PartialEq)]
pub struct BolusEntry {
    pub timestamp: DateTime<Utc>,
    /// Insulin units delivered.
    pub amount: f64,
    /// Delivery duration in minutes; zero for an immediate bolus.
    pub duration_minutes: f64,
}

impl BolusEntry {
    pub fn new(timestamp: DateTime<Utc>, amount: f64, duration_minutes: f64) -> Self {
        Self {
            timestamp,
            amount,
            duration_minutes,
        }
    }
}

/// A recorded carbohydrate intake event.
#[derive(Debug, Clone, PartialEq)]
pub struct CarbEntry {
    pub timestamp: DateTime<Utc>,
    /// Grams of carbohydrate.
    pub amount: i32,
}

impl CarbEntry {
    pub fn new(timestamp: DateTime<Utc>, amount: i32) -> Self {
        Self { timestamp, amount }
    }
}
