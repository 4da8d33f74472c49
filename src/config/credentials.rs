//! Datastore Credential Management
//!
//! Secure handling of the hosted-datastore service key loaded from environment
//! variables. The key is never logged at INFO/WARN levels and is masked when
//! displayed.

use std::fmt;

/// Secure string wrapper that masks sensitive data in logs
///
/// This type wraps sensitive strings (service keys) and ensures they are never
/// accidentally exposed in logs or error messages. Debug output shows only
/// `SecretString(***)` and Display shows truncated form `first4...last4`.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new SecretString from a String
    pub fn new(value: String) -> Self {
        SecretString(value)
    }

    /// Returns a reference to the inner string
    ///
    /// **Security Warning**: Only use this when actually needed for RPC calls.
    /// Never log or display the returned value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns a masked version of the secret for safe logging
    ///
    /// Format: `first4...last4` (e.g., "abcd...wxyz")
    pub fn masked(&self) -> String {
        let s = &self.0;
        if s.len() <= 8 {
            return "***".to_string();
        }
        format!("{}...{}", &s[..4], &s[s.len() - 4..])
    }
}

// Debug implementation masks the value completely
impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString(***)")
    }
}

// Display implementation shows truncated form
impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

/// Hosted-datastore credentials loaded from environment variables
///
/// The service key is stored as SecretString to prevent accidental logging.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// Base URL of the hosted datastore REST API
    pub base_url: String,
    /// Service key used as bearer token on every RPC call
    pub service_key: SecretString,
}

impl Credentials {
    /// Loads credentials from environment variables
    ///
    /// Reads `DATASTORE_URL` and `DATASTORE_SERVICE_KEY` from environment.
    /// Trims whitespace and validates non-empty.
    ///
    /// Returns `Ok(Credentials)` if both variables are set and valid.
    /// Returns `Err` with descriptive message if variables are missing or invalid.
    pub fn from_env() -> Result<Self, String> {
        let base_url = std::env::var("DATASTORE_URL")
            .map_err(|_| "DATASTORE_URL not set. Point it at the hosted datastore REST root, e.g. https://project.example.co".to_string())?;

        let service_key = std::env::var("DATASTORE_SERVICE_KEY").map_err(|_| {
            "DATASTORE_SERVICE_KEY not set. Use the service-role key issued for server-side access."
                .to_string()
        })?;

        // Trim whitespace
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let service_key = service_key.trim().to_string();

        // Validate non-empty
        if base_url.is_empty() {
            return Err("DATASTORE_URL is empty after trimming whitespace".to_string());
        }
        if service_key.is_empty() {
            return Err("DATASTORE_SERVICE_KEY is empty after trimming whitespace".to_string());
        }

        Ok(Self {
            base_url,
            service_key: SecretString::new(service_key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_masking() {
        let secret = SecretString::new("service-role-key-0123456789".to_string());
        assert_eq!(secret.masked(), "serv...6789");
        assert_eq!(format!("{:?}", secret), "SecretString(***)");
    }

    #[test]
    fn test_short_secret_fully_masked() {
        let secret = SecretString::new("tiny".to_string());
        assert_eq!(secret.masked(), "***");
    }
}
