//! Helpers shared by HTTP job API implementations.

/// Describes a transport-level failure in plain words.
///
/// Connection and timeout failures get a dedicated message; anything else
/// falls back to the underlying error text.
pub fn describe_transport_error(provider_name: &str, action: &str, err: &reqwest::Error) -> String {
    if err.is_connect() {
        format!(
            "Failed to connect to {provider_name} API server while {action}. Check your internet connection."
        )
    } else if err.is_timeout() {
        format!("{provider_name} request timed out while {action}. The API server is not responding.")
    } else {
        format!("{provider_name} network error while {action}: {err}")
    }
}

/// Formats a non-success reply for error messages.
pub fn describe_status(provider_name: &str, status: u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("{provider_name} API error (status {status})")
    } else {
        format!("{provider_name} API error (status {status}): {}", body.trim())
    }
}

/// Reads the body of a failed response without failing on unreadable bodies.
pub async fn error_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string())
}
