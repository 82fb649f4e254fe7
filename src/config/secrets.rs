//! API credential lookup.

use crate::transcription::Credential;

/// Environment variable holding the transcription API key.
pub const API_KEY_ENV: &str = "SPEECHMATICS_API_KEY";

/// Loads a `.env` file from the working directory, if present.
///
/// Variables already set in the environment take precedence.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to load .env file: {e}"),
    }
}

/// Returns the API key from the environment, or `None` if unset or blank.
pub fn get_api_key() -> Option<Credential> {
    credential_from(std::env::var(API_KEY_ENV).ok())
}

fn credential_from(value: Option<String>) -> Option<Credential> {
    value
        .map(Credential::new)
        .filter(|credential| !credential.is_blank())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_treated_as_missing() {
        assert!(credential_from(None).is_none());
        assert!(credential_from(Some(String::new())).is_none());
        assert!(credential_from(Some("  ".to_string())).is_none());
        assert_eq!(
            credential_from(Some("abc".to_string())).map(|c| c.expose().to_string()),
            Some("abc".to_string())
        );
    }
}
