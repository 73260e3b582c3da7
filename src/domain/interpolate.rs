// Temporal interpolation of glucose values at arbitrary timestamps
use crate::domain::graph::GraphItem;
use chrono::{DateTime, Utc};

/// Estimate the glucose value at `at` from a chronologically ordered slice
/// of glucose graph items.
///
/// Precondition: `items` is sorted ascending by timestamp. This is not
/// enforced here; the repository layer sorts before items cross into the
/// domain. Total over its input: an empty slice yields the 0.0 sentinel, a
/// single item yields its value, and query times outside the known range
/// clamp to the nearest endpoint.
///
/// An item whose timestamp equals `at` exactly belongs to neither the
/// strictly-before nor the strictly-after partition; its neighbors are used
/// instead.
pub fn interpolate_glucose_value(items: &[GraphItem], at: DateTime<Utc>) -> f64 {
    match items.len() {
        0 => 0.0,
        1 => items[0].value(),
        _ => {
            let Some(greatest_prior) = items.iter().filter(|i| i.timestamp() < at).last() else {
                // All samples follow the query, use the first.
                return items[0].value();
            };

            let Some(least_following) = items.iter().find(|i| i.timestamp() > at) else {
                // All samples precede the query, use the last.
                return items[items.len() - 1].value();
            };

            interpolate_in_range(
                (greatest_prior.value(), least_following.value()),
                (greatest_prior.timestamp(), least_following.timestamp()),
                at,
            )
        }
    }
}

/// Given a known x in the range (x1, x2), interpolate y in the range
/// (y1, y2).
///
/// Note the magnitude-based formula: the absolute difference of the
/// endpoint values is scaled and added to y1 unconditionally, so for a
/// descending pair (y1 > y2) the result leaves the [y2, y1] envelope. This
/// reproduces the upstream behavior exactly; see DESIGN.md before changing
/// it to a signed blend.
pub fn interpolate_in_range(
    y_range: (f64, f64),
    x_range: (DateTime<Utc>, DateTime<Utc>),
    x: DateTime<Utc>,
) -> f64 {
    let (y1, y2) = y_range;
    let (x1, x2) = x_range;

    let range_distance = (x2 - x1).num_milliseconds() as f64;
    let lower_to_value = (x - x1).num_milliseconds() as f64;
    let scale_factor = lower_to_value / range_distance;

    let range_difference = (y1 - y2).abs();
    y1 + range_difference * scale_factor
}
