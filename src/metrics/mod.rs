//! Score calculations over already-extracted page data.
//!
//! Every scorer is a pure function returning the display string of its
//! score. Weight tables are module-level constants.

pub mod best_practices;
pub mod performance;
pub mod seo;

pub use best_practices::{
    best_practices_percentage, calculate_best_practices_percentage, BEST_PRACTICE_WEIGHTS,
};
pub use performance::{
    calculate_performance, calculate_performance_with, performance_percentage, PerformanceBudgets,
    PerformanceModel, PerformanceWeights,
};
pub use seo::{calculate_seo, seo_points, SEO_POINTS};

use crate::types::ChecksMap;

/// A check counts only when present and `true`.
pub(crate) fn check_passed(checks: &ChecksMap, key: &str) -> bool {
    checks.get(key).copied().unwrap_or(false)
}

/// Clamp a percentage for display; non-finite values show as 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.min(100.0)
    } else {
        0.0
    }
}
