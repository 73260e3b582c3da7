// Assembled graph data for one dashboard render pass
use crate::domain::graph::GraphItem;
use crate::domain::units::{DisplayUnit, GlucoseQuantity};

/// Fixed y-axis ceiling in the canonical unit; the floor is zero.
const Y_AXIS_MAX_MG_DL: f64 = 300.0;

/// Everything the rendering layer needs for one chart window, expressed in
/// one display unit. Rebuilt wholesale on every refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphData {
    pub unit: DisplayUnit,
    pub glucose: Vec<GraphItem>,
    pub prediction: Vec<GraphItem>,
    pub bolus: Vec<GraphItem>,
    pub carb: Vec<GraphItem>,
    pub y_min: f64,
    pub y_max: f64,
}

impl GraphData {
    pub fn new(
        unit: DisplayUnit,
        glucose: Vec<GraphItem>,
        prediction: Vec<GraphItem>,
        bolus: Vec<GraphItem>,
        carb: Vec<GraphItem>,
    ) -> Self {
        Self {
            unit,
            glucose,
            prediction,
            bolus,
            carb,
            y_min: GlucoseQuantity::from_mg_dl(0.0).value_in(unit),
            y_max: GlucoseQuantity::from_mg_dl(Y_AXIS_MAX_MG_DL).value_in(unit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_range_in_mg_dl() {
        let data = GraphData::new(
            DisplayUnit::MilligramsPerDeciliter,
            vec![],
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(data.y_min, 0.0);
        assert_eq!(data.y_max, 300.0);
    }

    #[test]
    fn test_y_range_in_mmol() {
        let data = GraphData::new(DisplayUnit::MillimolesPerLiter, vec![], vec![], vec![], vec![]);
        assert_eq!(data.y_min, 0.0);
        assert!((data.y_max - 16.65).abs() < 0.01);
    }
}
