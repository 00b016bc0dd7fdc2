//! Reshapes a raw analysis response into flat display lists and scorer inputs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SeoError};
use crate::types::payload::API_STATUS_OK;
use crate::types::{
    ChecksMap, EntryValue, InstantPagesResponse, KeyValueEntry, PageItem, PageTiming,
    TimingMetrics,
};

/// Everything the report needs from one analysed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapedPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onpage_score: Option<f64>,
    /// Non-null content metrics followed by the non-null link/resource counters
    pub on_page_results: Vec<KeyValueEntry>,
    /// Every boolean check, in payload order
    pub checks: Vec<KeyValueEntry>,
    pub checks_map: ChecksMap,
    pub timing: TimingMetrics,
}

/// Navigate to the first analysed page, surfacing API status failures.
pub fn first_page_item(response: &InstantPagesResponse) -> Result<&PageItem> {
    if let Some(code) = response.status_code {
        if code != API_STATUS_OK {
            return Err(SeoError::api(
                None,
                format!(
                    "status {}: {}",
                    code,
                    response.status_message.as_deref().unwrap_or("unknown error")
                ),
            ));
        }
    }

    let task = response
        .tasks
        .as_ref()
        .and_then(|tasks| tasks.first())
        .ok_or_else(|| SeoError::payload("tasks[0] is missing"))?;

    if let Some(code) = task.status_code {
        if code != API_STATUS_OK {
            return Err(SeoError::api(
                None,
                format!(
                    "task status {}: {}",
                    code,
                    task.status_message.as_deref().unwrap_or("unknown error")
                ),
            ));
        }
    }

    let result = task
        .result
        .as_ref()
        .and_then(|results| results.first())
        .ok_or_else(|| SeoError::payload("tasks[0].result[0] is missing"))?;

    result
        .items
        .as_ref()
        .and_then(|items| items.first())
        .ok_or_else(|| SeoError::payload("tasks[0].result[0].items[0] is missing"))
}

/// Flatten the first page of `response` into display lists and scorer inputs.
pub fn shape_response(response: &InstantPagesResponse) -> Result<ShapedPage> {
    let item = first_page_item(response)?;
    let meta = item
        .meta
        .as_ref()
        .ok_or_else(|| SeoError::payload("tasks[0].result[0].items[0].meta is missing"))?;

    let mut on_page_results: Vec<KeyValueEntry> = meta
        .content
        .iter()
        .flatten()
        .filter_map(|(key, value)| {
            EntryValue::from_json(value).map(|v| KeyValueEntry::new(key.as_str(), v))
        })
        .collect();
    on_page_results.extend(meta.counters().into_iter().filter_map(|(key, value)| {
        value
            .and_then(EntryValue::from_json)
            .map(|v| KeyValueEntry::new(key, v))
    }));

    let mut checks = Vec::new();
    let mut checks_map = ChecksMap::new();
    for (key, value) in item.checks.iter().flatten() {
        match value.as_bool() {
            Some(flag) => {
                checks.push(KeyValueEntry::new(key.as_str(), EntryValue::Flag(flag)));
                checks_map.insert(key.clone(), flag);
            }
            None => debug!(check = %key, "dropping non-boolean check"),
        }
    }

    let timing = item
        .page_timing
        .as_ref()
        .map(PageTiming::to_metrics)
        .unwrap_or_else(|| PageTiming::default().to_metrics());

    debug!(
        on_page = on_page_results.len(),
        checks = checks.len(),
        "shaped analysis response"
    );

    Ok(ShapedPage {
        url: item.url.clone(),
        onpage_score: item.onpage_score,
        on_page_results,
        checks,
        checks_map,
        timing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(item: serde_json::Value) -> InstantPagesResponse {
        serde_json::from_value(json!({
            "status_code": 20000,
            "status_message": "Ok.",
            "tasks": [{
                "status_code": 20000,
                "status_message": "Ok.",
                "result": [{ "crawl_progress": "finished", "items": [item] }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn drops_null_content_fields_and_counters() {
        let resp = response(json!({
            "url": "https://example.com/",
            "onpage_score": 91.5,
            "meta": {
                "content": {
                    "plain_text_size": 2400,
                    "plain_text_rate": 0.12,
                    "automated_readability_index": null,
                    "flesch_kincaid_readability_index": 61.3
                },
                "internal_links_count": 12,
                "external_links_count": null,
                "inbound_links_count": 0,
                "images_count": 4,
                "images_size": 52000,
                "scripts_count": 3,
                "scripts_size": null,
                "stylesheets_count": 1,
                "stylesheets_size": 800
            },
            "checks": {}
        }));

        let shaped = shape_response(&resp).unwrap();
        let keys: Vec<_> = shaped
            .on_page_results
            .iter()
            .map(|e| e.key.as_str())
            .collect();
        assert_eq!(
            keys,
            vec![
                "plain_text_size",
                "plain_text_rate",
                "flesch_kincaid_readability_index",
                "internal_links_count",
                "inbound_links_count",
                "images_count",
                "images_size",
                "scripts_count",
                "stylesheets_count",
                "stylesheets_size",
            ]
        );
        assert_eq!(shaped.onpage_score, Some(91.5));
        assert_eq!(shaped.url.as_deref(), Some("https://example.com/"));
    }

    #[test]
    fn checks_keep_order_and_feed_the_map() {
        let resp = response(json!({
            "meta": {},
            "checks": {
                "no_content_encoding": false,
                "is_https": true,
                "canonical": true,
                "has_meta_refresh_redirect": null
            }
        }));

        let shaped = shape_response(&resp).unwrap();
        let keys: Vec<_> = shaped.checks.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["no_content_encoding", "is_https", "canonical"]);
        assert_eq!(shaped.checks_map.get("is_https"), Some(&true));
        assert_eq!(shaped.checks_map.get("no_content_encoding"), Some(&false));
        assert!(!shaped.checks_map.contains_key("has_meta_refresh_redirect"));
    }

    #[test]
    fn timing_is_extracted_from_page_timing() {
        let resp = response(json!({
            "meta": {},
            "page_timing": {
                "time_to_interactive": 1200,
                "largest_contentful_paint": 1100.5,
                "first_input_delay": 3.2,
                "duration_time": 1500
            }
        }));
        let shaped = shape_response(&resp).unwrap();
        assert_eq!(shaped.timing.time_to_interactive, 1200.0);
        assert_eq!(shaped.timing.first_input_delay, 3.2);
    }

    #[test]
    fn missing_page_timing_yields_nan_metrics() {
        let shaped = shape_response(&response(json!({ "meta": {} }))).unwrap();
        assert!(shaped.timing.duration_time.is_nan());
    }

    #[test]
    fn missing_items_is_a_payload_error() {
        let resp: InstantPagesResponse = serde_json::from_value(json!({
            "status_code": 20000,
            "tasks": [{ "status_code": 20000, "result": [{ "items": [] }] }]
        }))
        .unwrap();
        let err = shape_response(&resp).unwrap_err();
        assert!(matches!(err, SeoError::Payload(ref msg) if msg.contains("items[0]")));
    }

    #[test]
    fn missing_meta_is_a_payload_error() {
        let err = shape_response(&response(json!({ "checks": {} }))).unwrap_err();
        assert!(matches!(err, SeoError::Payload(ref msg) if msg.contains("meta")));
    }

    #[test]
    fn failed_task_status_is_an_api_error() {
        let resp: InstantPagesResponse = serde_json::from_value(json!({
            "status_code": 20000,
            "tasks": [{
                "status_code": 40501,
                "status_message": "Invalid Field: 'url'.",
                "result": null
            }]
        }))
        .unwrap();
        let err = shape_response(&resp).unwrap_err();
        match err {
            SeoError::Api { message, .. } => assert!(message.contains("40501")),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn failed_envelope_status_is_an_api_error() {
        let resp: InstantPagesResponse = serde_json::from_value(json!({
            "status_code": 40100,
            "status_message": "You are not authorized to access this resource."
        }))
        .unwrap();
        assert!(matches!(
            shape_response(&resp).unwrap_err(),
            SeoError::Api { .. }
        ));
    }
}
