use serde::{Deserialize, Serialize};

use crate::display::format_fixed;
use crate::types::TimingMetrics;

/// Relative weight of each timing metric in the performance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceWeights {
    pub time_to_interactive: f64,
    pub largest_contentful_paint: f64,
    pub first_input_delay: f64,
    pub duration_time: f64,
}

impl Default for PerformanceWeights {
    fn default() -> Self {
        Self {
            time_to_interactive: 0.2,
            largest_contentful_paint: 0.2,
            first_input_delay: 0.3,
            duration_time: 0.3,
        }
    }
}

impl PerformanceWeights {
    pub fn sum(&self) -> f64 {
        self.time_to_interactive
            + self.largest_contentful_paint
            + self.first_input_delay
            + self.duration_time
    }
}

/// Normalization denominators in milliseconds: a metric equal to its budget
/// scores 0, a metric of 0 ms scores 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceBudgets {
    pub time_to_interactive: f64,
    pub largest_contentful_paint: f64,
    pub first_input_delay: f64,
    pub duration_time: f64,
}

impl Default for PerformanceBudgets {
    fn default() -> Self {
        Self {
            time_to_interactive: 5000.0,
            largest_contentful_paint: 5000.0,
            first_input_delay: 1000.0,
            duration_time: 10000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceModel {
    pub weights: PerformanceWeights,
    pub budgets: PerformanceBudgets,
}

/// Weighted performance percentage. Per-metric scores are not clamped, so a
/// metric over its budget pulls the total below 0 and the result may leave
/// [0, 100].
pub fn performance_percentage(metrics: &TimingMetrics, model: &PerformanceModel) -> f64 {
    let weights = &model.weights;
    let budgets = &model.budgets;

    let terms = [
        (
            weights.time_to_interactive,
            metrics.time_to_interactive,
            budgets.time_to_interactive,
        ),
        (
            weights.largest_contentful_paint,
            metrics.largest_contentful_paint,
            budgets.largest_contentful_paint,
        ),
        (
            weights.first_input_delay,
            metrics.first_input_delay,
            budgets.first_input_delay,
        ),
        (
            weights.duration_time,
            metrics.duration_time,
            budgets.duration_time,
        ),
    ];

    let weighted_sum: f64 = terms
        .iter()
        .map(|(weight, value, budget)| weight * (1.0 - value / budget))
        .sum();
    let total_weight = weights.sum();

    if total_weight > 0.0 {
        weighted_sum / total_weight * 100.0
    } else {
        0.0
    }
}

/// Performance score with the default weights, two decimals ("100.00").
pub fn calculate_performance(metrics: &TimingMetrics) -> String {
    calculate_performance_with(metrics, &PerformanceModel::default())
}

pub fn calculate_performance_with(metrics: &TimingMetrics, model: &PerformanceModel) -> String {
    format_fixed(performance_percentage(metrics, model), 2)
}
