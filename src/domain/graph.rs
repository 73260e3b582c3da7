// GraphItem - the normalized plot record handed to the rendering layer
use crate::domain::events::{BolusEntry, CarbEntry, GlucoseSample, PredictedGlucose};
use crate::domain::interpolate::interpolate_glucose_value;
use crate::domain::severity::SeverityBand;
use crate::domain::units::{DisplayUnit, GlucoseQuantity};
use chrono::{DateTime, Utc};

const MIN_MARKER_SIZE: f64 = 8.0;
const MAX_MARKER_SIZE: f64 = 50.0;
const MIN_FONT_SIZE: f64 = 8.0;
const MAX_FONT_SIZE: f64 = 12.0;

/// What a graph item represents. Treatment variants carry their source event
/// so presentation hints can be derived from the recorded amounts.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphItemKind {
    Glucose,
    Prediction,
    Bolus(BolusEntry),
    Carb(CarbEntry),
}

/// How a treatment annotation marker is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStyle {
    FullFill,
    TopFill,
    BottomFill,
}

/// Where a treatment annotation label sits relative to its marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    Top,
    Bottom,
}

/// A timestamped, valued, classified plotting record.
///
/// Immutable once built: the display value and severity band are derived
/// from the underlying quantity at construction and never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphItem {
    kind: GraphItemKind,
    timestamp: DateTime<Utc>,
    display_unit: DisplayUnit,
    quantity: GlucoseQuantity,
    value: f64,
    severity: SeverityBand,
}

impl GraphItem {
    pub fn new(
        kind: GraphItemKind,
        timestamp: DateTime<Utc>,
        quantity: GlucoseQuantity,
        display_unit: DisplayUnit,
    ) -> Self {
        Self {
            kind,
            timestamp,
            display_unit,
            quantity,
            value: quantity.value_in(display_unit),
            severity: SeverityBand::from_quantity(quantity),
        }
    }

    pub fn glucose(sample: &GlucoseSample, display_unit: DisplayUnit) -> Self {
        Self::new(
            GraphItemKind::Glucose,
            sample.timestamp,
            sample.quantity,
            display_unit,
        )
    }

    pub fn prediction(prediction: &PredictedGlucose, display_unit: DisplayUnit) -> Self {
        Self::new(
            GraphItemKind::Prediction,
            prediction.timestamp,
            prediction.quantity,
            display_unit,
        )
    }

    /// Build a bolus marker. The y-position is not a measured value; it is
    /// interpolated from the surrounding glucose items so the marker lands
    /// on the glucose line.
    pub fn bolus(
        entry: &BolusEntry,
        glucose_items: &[GraphItem],
        display_unit: DisplayUnit,
    ) -> Self {
        let relative_value = interpolate_glucose_value(glucose_items, entry.timestamp);
        Self::new(
            GraphItemKind::Bolus(entry.clone()),
            entry.timestamp,
            GlucoseQuantity::from_value(relative_value, display_unit),
            display_unit,
        )
    }

    /// Build a carb marker; y-position interpolated like [`GraphItem::bolus`].
    pub fn carb(
        entry: &CarbEntry,
        glucose_items: &[GraphItem],
        display_unit: DisplayUnit,
    ) -> Self {
        let relative_value = interpolate_glucose_value(glucose_items, entry.timestamp);
        Self::new(
            GraphItemKind::Carb(entry.clone()),
            entry.timestamp,
            GlucoseQuantity::from_value(relative_value, display_unit),
            display_unit,
        )
    }

    pub fn kind(&self) -> &GraphItemKind {
        &self.kind
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn display_unit(&self) -> DisplayUnit {
        self.display_unit
    }

    /// Value in the display unit chosen at construction.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn severity(&self) -> SeverityBand {
        self.severity
    }

    /// Marker width/height for treatment annotations, scaled by event
    /// magnitude and bounded to [8, 50].
    pub fn marker_size(&self) -> f64 {
        let size = match &self.kind {
            GraphItemKind::Bolus(entry) => entry.amount * 5.0,
            GraphItemKind::Carb(entry) => f64::from(entry.amount) * 0.5,
            _ => 0.5,
        };
        size.clamp(MIN_MARKER_SIZE, MAX_MARKER_SIZE)
    }

    /// Label font size, scaled by event magnitude and bounded to [8, 12].
    pub fn label_font_size(&self) -> f64 {
        let size = match &self.kind {
            GraphItemKind::Bolus(entry) => 3.0 * entry.amount,
            GraphItemKind::Carb(entry) => f64::from(entry.amount) / 2.0,
            _ => 10.0,
        };
        size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }

    pub fn fill_style(&self) -> FillStyle {
        match &self.kind {
            GraphItemKind::Bolus(_) => FillStyle::BottomFill,
            GraphItemKind::Carb(_) => FillStyle::TopFill,
            _ => FillStyle::FullFill,
        }
    }

    pub fn fill_color(&self) -> &'static str {
        match &self.kind {
            GraphItemKind::Bolus(_) => "blue",
            GraphItemKind::Carb(_) => "brown",
            _ => "black",
        }
    }

    pub fn label(&self) -> String {
        match &self.kind {
            GraphItemKind::Bolus(entry) => format!("{}u", format_bolus_amount(entry.amount)),
            GraphItemKind::Carb(entry) => format!("{}g", entry.amount),
            GraphItemKind::Glucose | GraphItemKind::Prediction => format!("{}", self.value),
        }
    }

    pub fn label_position(&self) -> LabelPosition {
        match &self.kind {
            GraphItemKind::Bolus(_) => LabelPosition::Bottom,
            _ => LabelPosition::Top,
        }
    }
}

/// Format an insulin amount with at most one fraction digit above 1u and two
/// at or below, trailing zeros trimmed.
fn format_bolus_amount(amount: f64) -> String {
    let max_fraction_digits: usize = if amount > 1.0 { 1 } else { 2 };
    let formatted = format!("{:.*}", max_fraction_digits, amount);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 4, 12, hour, minute, 0).unwrap()
    }

    fn glucose_item(hour: u32, minute: u32, mg_dl: f64) -> GraphItem {
        GraphItem::glucose(
            &GlucoseSample::new(at(hour, minute), GlucoseQuantity::from_mg_dl(mg_dl)),
            DisplayUnit::MilligramsPerDeciliter,
        )
    }

    #[test]
    fn test_glucose_item_value_and_severity() {
        let item = glucose_item(10, 0, 100.0);
        assert_eq!(item.value(), 100.0);
        assert_eq!(item.severity(), SeverityBand::Normal);
    }

    #[test]
    fn test_glucose_item_value_in_mmol() {
        let sample = GlucoseSample::new(at(10, 0), GlucoseQuantity::from_mg_dl(180.0));
        let item = GraphItem::glucose(&sample, DisplayUnit::MillimolesPerLiter);
        assert!((item.value() - 9.99).abs() < 0.01);
        // Severity is classified from the canonical quantity, not the
        // display value.
        assert_eq!(item.severity(), SeverityBand::HighWarning);
    }

    #[test]
    fn test_item_is_stable_across_reads() {
        let item = glucose_item(10, 0, 142.0);
        let first = (item.value(), item.severity());
        for _ in 0..3 {
            assert_eq!((item.value(), item.severity()), first);
        }
    }

    #[test]
    fn test_bolus_item_interpolates_against_glucose_line() {
        let series = vec![glucose_item(10, 0, 100.0), glucose_item(11, 0, 120.0)];
        let entry = BolusEntry::new(at(10, 30), 2.0, 0.0);
        let item = GraphItem::bolus(&entry, &series, DisplayUnit::MilligramsPerDeciliter);
        assert_eq!(item.value(), 110.0);
        assert_eq!(item.severity(), SeverityBand::Normal);
    }

    #[test]
    fn test_bolus_item_without_glucose_context_sits_at_zero() {
        let entry = BolusEntry::new(at(10, 30), 2.0, 0.0);
        let item = GraphItem::bolus(&entry, &[], DisplayUnit::MilligramsPerDeciliter);
        assert_eq!(item.value(), 0.0);
    }

    #[test]
    fn test_marker_size_scaling_and_clamping() {
        let series = vec![glucose_item(10, 0, 100.0)];
        let unit = DisplayUnit::MilligramsPerDeciliter;

        let small_bolus = GraphItem::bolus(&BolusEntry::new(at(10, 5), 0.5, 0.0), &series, unit);
        assert_eq!(small_bolus.marker_size(), 8.0);

        let bolus = GraphItem::bolus(&BolusEntry::new(at(10, 5), 4.0, 0.0), &series, unit);
        assert_eq!(bolus.marker_size(), 20.0);

        let huge_bolus = GraphItem::bolus(&BolusEntry::new(at(10, 5), 30.0, 0.0), &series, unit);
        assert_eq!(huge_bolus.marker_size(), 50.0);

        let carb = GraphItem::carb(&CarbEntry::new(at(10, 5), 40), &series, unit);
        assert_eq!(carb.marker_size(), 20.0);

        let glucose = glucose_item(10, 0, 100.0);
        assert_eq!(glucose.marker_size(), 8.0);
    }

    #[test]
    fn test_label_font_size_clamping() {
        let series = vec![glucose_item(10, 0, 100.0)];
        let unit = DisplayUnit::MilligramsPerDeciliter;

        let bolus = GraphItem::bolus(&BolusEntry::new(at(10, 5), 3.5, 0.0), &series, unit);
        assert_eq!(bolus.label_font_size(), 10.5);

        let big_bolus = GraphItem::bolus(&BolusEntry::new(at(10, 5), 10.0, 0.0), &series, unit);
        assert_eq!(big_bolus.label_font_size(), 12.0);

        let carb = GraphItem::carb(&CarbEntry::new(at(10, 5), 10), &series, unit);
        assert_eq!(carb.label_font_size(), 8.0);
    }

    #[test]
    fn test_bolus_labels() {
        let series = vec![glucose_item(10, 0, 100.0)];
        let unit = DisplayUnit::MilligramsPerDeciliter;

        let cases = [
            (2.0, "2u"),
            (1.5, "1.5u"),
            (1.55, "1.6u"),
            (0.25, "0.25u"),
            (0.3, "0.3u"),
            (1.0, "1u"),
        ];
        for (amount, expected) in cases {
            let item = GraphItem::bolus(&BolusEntry::new(at(10, 5), amount, 0.0), &series, unit);
            assert_eq!(item.label(), expected, "amount {}", amount);
        }
    }

    #[test]
    fn test_carb_label_and_positions() {
        let series = vec![glucose_item(10, 0, 100.0)];
        let unit = DisplayUnit::MilligramsPerDeciliter;

        let carb = GraphItem::carb(&CarbEntry::new(at(10, 5), 45), &series, unit);
        assert_eq!(carb.label(), "45g");
        assert_eq!(carb.label_position(), LabelPosition::Top);
        assert_eq!(carb.fill_style(), FillStyle::TopFill);
        assert_eq!(carb.fill_color(), "brown");

        let bolus = GraphItem::bolus(&BolusEntry::new(at(10, 5), 2.0, 0.0), &series, unit);
        assert_eq!(bolus.label_position(), LabelPosition::Bottom);
        assert_eq!(bolus.fill_style(), FillStyle::BottomFill);
        assert_eq!(bolus.fill_color(), "blue");

        let glucose = glucose_item(10, 0, 100.0);
        assert_eq!(glucose.fill_style(), FillStyle::FullFill);
        assert_eq!(glucose.fill_color(), "black");
    }
}
