// Mapper to convert domain models to JSON wire types
use crate::domain::graph::{FillStyle, GraphItem, GraphItemKind, LabelPosition};
use crate::domain::graph_data::GraphData;
use crate::domain::severity::SeverityBand;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GraphPayload {
    pub unit: String,
    pub y_min: f64,
    pub y_max: f64,
    pub glucose: Vec<PointPayload>,
    pub prediction: Vec<PointPayload>,
    pub bolus: Vec<TreatmentPayload>,
    pub carb: Vec<TreatmentPayload>,
}

/// A plain plotted point (glucose reading or prediction).
#[derive(Debug, Serialize)]
pub struct PointPayload {
    pub time_ms: i64,
    pub value: f64,
    pub severity: &'static str,
    pub color: &'static str,
}

/// An annotated treatment marker with its presentation hints.
#[derive(Debug, Serialize)]
pub struct TreatmentPayload {
    pub time_ms: i64,
    pub value: f64,
    pub severity: &'static str,
    pub amount: f64,
    pub marker_size: f64,
    pub font_size: f64,
    pub fill_style: &'static str,
    pub fill_color: &'static str,
    pub label: String,
    pub label_position: &'static str,
}

pub fn graph_data_to_payload(data: GraphData) -> GraphPayload {
    GraphPayload {
        unit: data.unit.label().to_string(),
        y_min: data.y_min,
        y_max: data.y_max,
        glucose: data.glucose.iter().map(item_to_point).collect(),
        prediction: data.prediction.iter().map(item_to_point).collect(),
        bolus: data.bolus.iter().map(item_to_treatment).collect(),
        carb: data.carb.iter().map(item_to_treatment).collect(),
    }
}

fn item_to_point(item: &GraphItem) -> PointPayload {
    PointPayload {
        time_ms: item.timestamp().timestamp_millis(),
        value: item.value(),
        severity: severity_name(item.severity()),
        color: item.severity().color_name(),
    }
}

fn item_to_treatment(item: &GraphItem) -> TreatmentPayload {
    let amount = match item.kind() {
        GraphItemKind::Bolus(entry) => entry.amount,
        GraphItemKind::Carb(entry) => f64::from(entry.amount),
        _ => 0.0,
    };

    TreatmentPayload {
        time_ms: item.timestamp().timestamp_millis(),
        value: item.value(),
        severity: severity_name(item.severity()),
        amount,
        marker_size: item.marker_size(),
        font_size: item.label_font_size(),
        fill_style: fill_style_name(item.fill_style()),
        fill_color: item.fill_color(),
        label: item.label(),
        label_position: label_position_name(item.label_position()),
    }
}

fn severity_name(band: SeverityBand) -> &'static str {
    match band {
        SeverityBand::LowCritical => "low-critical",
        SeverityBand::LowWarning => "low-warning",
        SeverityBand::Normal => "normal",
        SeverityBand::HighWarning => "high-warning",
        SeverityBand::HighCritical => "high-critical",
        SeverityBand::Unknown => "unknown",
    }
}

fn fill_style_name(style: FillStyle) -> &'static str {
    match style {
        FillStyle::FullFill => "full",
        FillStyle::TopFill => "top",
        FillStyle::BottomFill => "bottom",
    }
}

fn label_position_name(position: LabelPosition) -> &'static str {
    match position {
        LabelPosition::Top => "top",
        LabelPosition::Bottom => "bottom",
    }
}
