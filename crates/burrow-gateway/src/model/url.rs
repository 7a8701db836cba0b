use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SaveUrlRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alias: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

/// Body shared by every `/url` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
            error: None,
            alias: None,
        }
    }

    pub fn saved(alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..Self::ok()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            error: Some(message.into()),
            alias: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_body_omits_empty_fields() {
        let body = serde_json::to_value(ApiResponse::ok()).unwrap();
        assert_eq!(body, json!({ "status": "OK" }));
    }

    #[test]
    fn saved_body_carries_alias() {
        let body = serde_json::to_value(ApiResponse::saved("ex1")).unwrap();
        assert_eq!(body, json!({ "status": "OK", "alias": "ex1" }));
    }

    #[test]
    fn error_body() {
        let body = serde_json::to_value(ApiResponse::error("not found")).unwrap();
        assert_eq!(body, json!({ "status": "Error", "error": "not found" }));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let request: SaveUrlRequest = serde_json::from_str("{}").unwrap();
        assert!(request.url.is_empty());
        assert!(request.alias.is_empty());
    }
}
