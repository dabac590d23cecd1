use serde::{Deserialize, Serialize};

/// API Gateway proxy-integration response envelope: the body travels as a
/// JSON-encoded string, not a nested object.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub message: String,
    pub issue_url: Option<String>,
    pub connected_to_slack: bool,
}
