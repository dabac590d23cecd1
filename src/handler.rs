use serde_json::{json, Value};
use tracing::{info, warn};

use crate::slack::SlackNotifier;
use crate::types::{GatewayResponse, ResponseBody};

#[derive(Clone)]
pub struct Config {
    /// Slack incoming-webhook destination. `None` runs the relay in degraded
    /// mode where notifications are skipped but requests still succeed.
    pub slack_url: Option<String>,
}

/// Relays a GitHub "issues" event to Slack.
///
/// The contract is unconditional success: malformed JSON, missing issue URL,
/// missing configuration, and Slack delivery failures are all logged and
/// absorbed. GitHub (via the gateway) always gets the same 200-shaped
/// envelope back, so it never retries delivery over a downstream hiccup.
pub async fn handle_event(
    config: &Config,
    notifier: &SlackNotifier,
    raw_body: &str,
) -> GatewayResponse {
    let payload = resolve_payload(raw_body);
    let issue_url = extract_issue_url(&payload);

    match (&issue_url, &config.slack_url) {
        (Some(url), Some(slack_url)) => {
            let text = format!(":tada: New GitHub Issue created: {}", url);
            match notifier.post_message(slack_url, &text).await {
                Ok(status) => info!("Message posted to Slack. Status: {}", status),
                Err(e) => warn!("Failed to post to Slack: {}", e),
            }
        }
        (Some(_), None) => warn!("Issue URL detected but SLACK_URL not configured"),
        (None, _) => info!("No issue URL found in payload"),
    }

    let body = ResponseBody {
        message: "success".to_string(),
        issue_url,
        connected_to_slack: config.slack_url.is_some(),
    };

    GatewayResponse {
        status_code: 200,
        body: serde_json::to_string(&body).unwrap_or_else(|e| {
            warn!("Failed to serialize response body: {}", e);
            r#"{"message":"success","issueUrl":null,"connectedToSlack":false}"#.to_string()
        }),
    }
}

/// Resolves the event payload from the raw request body.
///
/// Gateway proxy integration wraps the real payload in a `"body"` field as a
/// JSON-encoded string; direct delivery sends the payload bare. Anything that
/// fails to parse is wrapped as `{"raw": ...}` so extraction below can never
/// fail on malformed input.
fn resolve_payload(raw_body: &str) -> Value {
    let event: Value = match serde_json::from_str(raw_body) {
        Ok(v) => v,
        Err(_) => return json!({ "raw": raw_body }),
    };

    match event.get("body") {
        Some(Value::String(inner)) => {
            serde_json::from_str(inner).unwrap_or_else(|_| json!({ "raw": inner }))
        }
        // A non-string body is not parseable as JSON text; wrap it like any
        // other parse failure.
        Some(other) => json!({ "raw": other }),
        None => event,
    }
}

/// Extracts `issue.html_url` when `issue` is an object and `html_url` is a
/// string. Every other payload shape yields `None`, never an error.
fn extract_issue_url(payload: &Value) -> Option<String> {
    let issue = payload.get("issue")?.as_object()?;
    issue
        .get("html_url")
        .and_then(Value::as_str)
        .map(str::to_string)
}
