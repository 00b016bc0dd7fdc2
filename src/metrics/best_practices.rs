use crate::display::format_fixed;
use crate::metrics::check_passed;
use crate::types::ChecksMap;

/// Signed weight per check. Negative weights are penalties that still add
/// their magnitude to the denominator when triggered.
pub const BEST_PRACTICE_WEIGHTS: [(&str, i32); 14] = [
    ("high_loading_time", 10),
    ("is_https", 10),
    ("has_html_doctype", 5),
    ("canonical", 5),
    ("meta_charset_consistency", 5),
    ("has_render_blocking_resources", 10),
    ("low_content_rate", -5),
    ("seo_friendly_url", 10),
    ("seo_friendly_url_characters_check", 5),
    ("seo_friendly_url_dynamic_check", 5),
    ("seo_friendly_url_keywords_check", 5),
    ("seo_friendly_url_relative_length_check", 5),
    ("no_image_alt", -5),
    ("no_image_title", -5),
];

/// Unclamped percentage over the triggered checks only, or `None` when no
/// weighted check is triggered.
///
/// The denominator is the absolute weight of the triggered checks, not the
/// maximum attainable score, so it changes with the set of passing checks.
pub fn best_practices_percentage(checks: &ChecksMap) -> Option<f64> {
    let (total_score, total_weight) = BEST_PRACTICE_WEIGHTS
        .iter()
        .filter(|(key, _)| check_passed(checks, key))
        .fold((0i32, 0i32), |(score, weight), (_, w)| {
            (score + w, weight + w.abs())
        });

    if total_weight == 0 {
        return None;
    }
    Some(f64::from(total_score) / f64::from(total_weight) * 100.0)
}

/// Best-practices score: "0" when nothing is triggered or the penalties win,
/// "100" above the top, otherwise two decimals.
pub fn calculate_best_practices_percentage(checks: &ChecksMap) -> String {
    match best_practices_percentage(checks) {
        None => "0".to_string(),
        Some(pct) if pct < 0.0 => "0".to_string(),
        Some(pct) if pct > 100.0 => "100".to_string(),
        Some(pct) => format_fixed(pct, 2),
    }
}
