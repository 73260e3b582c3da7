// Glucose quantities and display units

/// Conversion factor between the two supported glucose concentration units.
pub const MGDL_PER_MMOLL: f64 = 18.0182;

/// The unit a caller wants graph values expressed in.
///
/// Classification always happens in mg/dL regardless of this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayUnit {
    #[default]
    MilligramsPerDeciliter,
    MillimolesPerLiter,
}

impl DisplayUnit {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayUnit::MilligramsPerDeciliter => "mg/dL",
            DisplayUnit::MillimolesPerLiter => "mmol/L",
        }
    }

    /// Parse a unit selector as it appears in query strings and config files.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mgdl" | "mg/dl" => Some(DisplayUnit::MilligramsPerDeciliter),
            "mmol" | "mmoll" | "mmol/l" => Some(DisplayUnit::MillimolesPerLiter),
            _ => None,
        }
    }
}

/// A glucose concentration, stored canonically in mg/dL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlucoseQuantity {
    mg_dl: f64,
}

impl GlucoseQuantity {
    pub fn from_mg_dl(mg_dl: f64) -> Self {
        Self { mg_dl }
    }

    pub fn from_value(value: f64, unit: DisplayUnit) -> Self {
        match unit {
            DisplayUnit::MilligramsPerDeciliter => Self { mg_dl: value },
            DisplayUnit::MillimolesPerLiter => Self {
                mg_dl: value * MGDL_PER_MMOLL,
            },
        }
    }

    pub fn mg_dl(&self) -> f64 {
        self.mg_dl
    }

    pub fn value_in(&self, unit: DisplayUnit) -> f64 {
        match unit {
            DisplayUnit::MilligramsPerDeciliter => self.mg_dl,
            DisplayUnit::MillimolesPerLiter => self.mg_dl / MGDL_PER_MMOLL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit() {
        assert_eq!(
            DisplayUnit::parse("mg/dL"),
            Some(DisplayUnit::MilligramsPerDeciliter)
        );
        assert_eq!(
            DisplayUnit::parse("mmol"),
            Some(DisplayUnit::MillimolesPerLiter)
        );
        assert_eq!(DisplayUnit::parse("furlongs"), None);
    }

    #[test]
    fn test_round_trip_conversion() {
        let quantity = GlucoseQuantity::from_mg_dl(100.0);
        let mmol = quantity.value_in(DisplayUnit::MillimolesPerLiter);
        assert!((mmol - 5.5499).abs() < 0.001);

        let back = GlucoseQuantity::from_value(mmol, DisplayUnit::MillimolesPerLiter);
        assert!((back.mg_dl() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_in_same_unit_is_identity() {
        let quantity = GlucoseQuantity::from_mg_dl(180.0);
        assert_eq!(quantity.value_in(DisplayUnit::MilligramsPerDeciliter), 180.0);
    }
}
