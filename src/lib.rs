pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod metrics;
pub mod output;
pub mod session;
pub mod shaper;
pub mod types;

pub use client::{validate_target_url, Credentials, InstantPagesClient};
pub use config::Config;
pub use display::{convert_to_title_case, format_fixed, format_number, round_to_decimal_places};
pub use error::{ErrorCategory, ErrorPayload, Result, SeoError};
pub use metrics::{
    calculate_best_practices_percentage, calculate_performance, calculate_performance_with,
    calculate_seo, clamp_percent, PerformanceBudgets, PerformanceModel, PerformanceWeights,
};
pub use output::{AnalysisReport, ErrorOutput, ScoreCard, Scorecard, SeoOutput};
pub use session::{AnalysisSession, LoadState};
pub use shaper::{shape_response, ShapedPage};
pub use types::{ChecksMap, EntryValue, InstantPagesResponse, KeyValueEntry, TimingMetrics};
