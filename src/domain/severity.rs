// Severity band classification for glucose values
use crate::domain::units::GlucoseQuantity;

/// Clinical risk tier of a glucose value, used for chart coloring.
///
/// Ordered by rank so color-scale domains stay stable: LowCritical <
/// LowWarning < Normal < HighWarning < HighCritical. The two critical bands
/// share a color name but are distinct ranks. `Unknown` marks out-of-domain
/// input and sorts last; it never comes from a legitimate reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityBand {
    LowCritical,
    LowWarning,
    Normal,
    HighWarning,
    HighCritical,
    Unknown,
}

impl SeverityBand {
    /// Classify a quantity against the canonical mg/dL thresholds.
    ///
    /// Negative or non-finite input is a programming error upstream; it
    /// asserts in debug builds and falls back to `Unknown` in release.
    pub fn from_quantity(quantity: GlucoseQuantity) -> Self {
        let glucose = quantity.mg_dl();
        match glucose {
            v if (0.0..55.0).contains(&v) => SeverityBand::LowCritical,
            v if (55.0..70.0).contains(&v) => SeverityBand::LowWarning,
            v if (70.0..180.0).contains(&v) => SeverityBand::Normal,
            v if (180.0..250.0).contains(&v) => SeverityBand::HighWarning,
            v if v >= 250.0 => SeverityBand::HighCritical,
            _ => {
                debug_assert!(false, "unexpected glucose quantity: {}", glucose);
                SeverityBand::Unknown
            }
        }
    }

    /// Color name used by the rendering layer's foreground-style scale.
    pub fn color_name(&self) -> &'static str {
        match self {
            SeverityBand::LowCritical | SeverityBand::HighCritical => "red",
            SeverityBand::LowWarning | SeverityBand::HighWarning => "yellow",
            SeverityBand::Normal => "green",
            SeverityBand::Unknown => "gray",
        }
    }
}
