use crate::metrics::check_passed;
use crate::types::ChecksMap;

/// Points awarded per passing URL check. `seo_friendly_url` is listed but
/// carries no points.
pub const SEO_POINTS: [(&str, u32); 5] = [
    ("seo_friendly_url", 0),
    ("seo_friendly_url_characters_check", 20),
    ("seo_friendly_url_dynamic_check", 20),
    ("seo_friendly_url_keywords_check", 20),
    ("seo_friendly_url_relative_length_check", 20),
];

pub fn seo_points(checks: &ChecksMap) -> u32 {
    SEO_POINTS
        .iter()
        .filter(|(key, _)| check_passed(checks, key))
        .map(|(_, points)| points)
        .sum()
}

/// SEO score as an integer string ("0".."80").
pub fn calculate_seo(checks: &ChecksMap) -> String {
    seo_points(checks).to_string()
}
