use crate::errors::FormError;
use std::collections::HashMap;

/// Outgoing request of the network delivery strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpRequest {
    pub fn post_json(path: impl Into<String>, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            method: "POST".to_string(),
            path: path.into(),
            headers,
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status_code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Text shown to the user when the server rejected the payload.
    ///
    /// A JSON string body is shown as the string, other JSON as its text, and
    /// an empty, `null` or non-JSON body as a generic status message.
    pub fn failure_message(&self) -> String {
        match serde_json::from_slice::<serde_json::Value>(&self.body) {
            Ok(serde_json::Value::Null) | Err(_) => status_message(self.status_code),
            Ok(serde_json::Value::String(text)) => text,
            Ok(other) => other.to_string(),
        }
    }
}

pub fn status_message(status: u16) -> String {
    format!("Server response with status {}!", status)
}

/// **HTTP CLIENT TRAIT** - Transport used by `NetworkDelivery`
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FormError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_json_headers() {
        let request = HttpRequest::post_json("/api/feedback", "{}".to_string());
        assert_eq!(request.method, "POST");
        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(422, "").is_success());
    }

    #[test]
    fn test_failure_message_variants() {
        assert_eq!(
            HttpResponse::new(500, "").failure_message(),
            "Server response with status 500!"
        );
        assert_eq!(
            HttpResponse::new(502, "null").failure_message(),
            "Server response with status 502!"
        );
        assert_eq!(
            HttpResponse::new(502, "<html>bad gateway</html>").failure_message(),
            "Server response with status 502!"
        );
        assert_eq!(
            HttpResponse::new(400, r#""Некорректный email""#).failure_message(),
            "Некорректный email"
        );
        assert_eq!(
            HttpResponse::new(422, r#"{"detail":"bad"}"#).failure_message(),
            r#"{"detail":"bad"}"#
        );
    }
}
