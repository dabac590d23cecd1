use axum::http::StatusCode;
use serde::Serialize;

pub struct SlackNotifier {
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct SlackMessage {
    text: String,
}

impl SlackNotifier {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Posts a message to an incoming-webhook URL. Returns the HTTP status on
    /// success; any transport or non-2xx outcome comes back as an error string
    /// for the caller to log.
    pub async fn post_message(&self, webhook_url: &str, text: &str) -> Result<StatusCode, String> {
        let payload = SlackMessage {
            text: text.to_string(),
        };

        let response = self
            .client
            .post(webhook_url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Slack webhook returned {}", status));
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn post_message_sends_json_text_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/services/T000/B000/XXXX")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(json!({ "text": "hello" })))
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let notifier = SlackNotifier::new();
        let url = format!("{}/services/T000/B000/XXXX", server.url());
        let status = notifier.post_message(&url, "hello").await.unwrap();

        mock.assert_async().await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn post_message_maps_non_2xx_to_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/hook")
            .with_status(500)
            .create_async()
            .await;

        let notifier = SlackNotifier::new();
        let url = format!("{}/hook", server.url());
        let err = notifier.post_message(&url, "hello").await.unwrap_err();

        assert!(err.contains("500"), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn post_message_maps_transport_failure_to_error() {
        let notifier = SlackNotifier::new();
        let err = notifier
            .post_message("http://127.0.0.1:9/hook", "hello")
            .await
            .unwrap_err();

        assert!(err.starts_with("Request failed"), "unexpected error: {}", err);
    }
}
