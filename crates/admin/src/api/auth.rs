//! Commerce API authentication.
//!
//! Exchanges email/password credentials for a JWT pair and refreshes access
//! tokens before they lapse. Used both for the client's service identity and
//! for verifying operator logins.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cordwain_core::{AdminRole, AdminUserId, Email};

use super::ApiError;

/// JWT pair obtained from commerce API authentication.
#[derive(Debug, Clone)]
pub struct ApiToken {
    /// JWT access token for API requests.
    pub access_token: SecretString,
    /// Optional refresh token for obtaining new access tokens.
    pub refresh_token: Option<SecretString>,
    /// Unix timestamp when the access token expires.
    pub access_token_expires_at: i64,
    /// Unix timestamp when the refresh token expires (if applicable).
    pub refresh_token_expires_at: Option<i64>,
}

/// Operator profile returned alongside a token pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
}

/// Request body for authentication.
#[derive(Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Token payload from the auth endpoints.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Token lifetime in seconds.
    expires_in: i64,
    /// Refresh token lifetime in seconds (if applicable).
    #[serde(default)]
    refresh_expires_in: Option<i64>,
    admin: AdminProfile,
}

/// Error payload from the auth endpoints.
#[derive(Deserialize)]
struct AuthErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl AuthResponse {
    fn into_parts(self, now: i64) -> (ApiToken, AdminProfile) {
        (
            ApiToken {
                access_token: SecretString::from(self.access_token),
                refresh_token: self.refresh_token.map(SecretString::from),
                access_token_expires_at: now + self.expires_in,
                refresh_token_expires_at: self.refresh_expires_in.map(|secs| now + secs),
            },
            self.admin,
        )
    }
}

/// Authenticate with the commerce API using email and password.
///
/// Returns the token pair plus the authenticated operator's profile.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if credentials are invalid.
#[instrument(skip(client, password), fields(email = %email))]
pub async fn authenticate(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    password: &SecretString,
) -> Result<(ApiToken, AdminProfile), ApiError> {
    let now = chrono::Utc::now().timestamp();

    let response = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&AuthRequest {
            email,
            password: password.expose_secret(),
        })
        .send()
        .await?;

    let status = response.status();

    if status.is_success() {
        let auth_response: AuthResponse = response.json().await?;
        Ok(auth_response.into_parts(now))
    } else if status == reqwest::StatusCode::UNAUTHORIZED
        || status == reqwest::StatusCode::FORBIDDEN
    {
        let error_response: AuthErrorResponse =
            response.json().await.unwrap_or_else(|_| AuthErrorResponse {
                error: None,
                message: Some("Invalid credentials".to_string()),
            });

        let message = error_response
            .message
            .or(error_response.error)
            .unwrap_or_else(|| "Invalid credentials".to_string());

        Err(ApiError::AuthenticationFailed(message))
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(ApiError::AuthenticationFailed(format!(
            "HTTP {status}: {error_text}"
        )))
    }
}

/// Refresh an access token using a refresh token.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the refresh token is invalid
/// or expired.
#[instrument(skip(client, refresh_token))]
pub async fn refresh_access_token(
    client: &reqwest::Client,
    base_url: &str,
    refresh_token: &SecretString,
) -> Result<ApiToken, ApiError> {
    let now = chrono::Utc::now().timestamp();

    let response = client
        .post(format!("{base_url}/api/auth/refresh"))
        .json(&serde_json::json!({
            "refreshToken": refresh_token.expose_secret()
        }))
        .send()
        .await?;

    let status = response.status();

    if status.is_success() {
        let auth_response: AuthResponse = response.json().await?;
        let (token, _) = auth_response.into_parts(now);
        Ok(token)
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(ApiError::AuthenticationFailed(format!(
            "Token refresh failed: {error_text}"
        )))
    }
}

impl ApiToken {
    /// Check if the access token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        // Consider expired if less than 60 seconds remaining
        now >= self.access_token_expires_at - 60
    }

    /// Check if the access token will expire within the given number of seconds.
    #[must_use]
    pub fn expires_within(&self, seconds: i64) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.access_token_expires_at - seconds
    }

    /// Check if a refresh token is available and not expired.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
            && self.refresh_token_expires_at.is_none_or(|expires_at| {
                let now = chrono::Utc::now().timestamp();
                now < expires_at - 60
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_expired() {
        let now = chrono::Utc::now().timestamp();

        // Token that expired an hour ago
        let expired_token = ApiToken {
            access_token: SecretString::from("test"),
            refresh_token: None,
            access_token_expires_at: now - 3600,
            refresh_token_expires_at: None,
        };
        assert!(expired_token.is_expired());

        // Token that expires in an hour
        let valid_token = ApiToken {
            access_token: SecretString::from("test"),
            refresh_token: None,
            access_token_expires_at: now + 3600,
            refresh_token_expires_at: None,
        };
        assert!(!valid_token.is_expired());

        // Token that expires in 30 seconds (considered expired due to 60s buffer)
        let almost_expired_token = ApiToken {
            access_token: SecretString::from("test"),
            refresh_token: None,
            access_token_expires_at: now + 30,
            refresh_token_expires_at: None,
        };
        assert!(almost_expired_token.is_expired());
    }

    #[test]
    fn test_can_refresh() {
        let now = chrono::Utc::now().timestamp();

        // Token with valid refresh token
        let with_refresh = ApiToken {
            access_token: SecretString::from("test"),
            refresh_token: Some(SecretString::from("refresh")),
            access_token_expires_at: now - 3600, // expired
            refresh_token_expires_at: Some(now + 86400), // refresh valid for a day
        };
        assert!(with_refresh.can_refresh());

        // Token without refresh token
        let without_refresh = ApiToken {
            access_token: SecretString::from("test"),
            refresh_token: None,
            access_token_expires_at: now - 3600,
            refresh_token_expires_at: None,
        };
        assert!(!without_refresh.can_refresh());

        // Token with expired refresh token
        let expired_refresh = ApiToken {
            access_token: SecretString::from("test"),
            refresh_token: Some(SecretString::from("refresh")),
            access_token_expires_at: now - 3600,
            refresh_token_expires_at: Some(now - 1800), // expired
        };
        assert!(!expired_refresh.can_refresh());
    }

    #[test]
    fn test_auth_response_wire_format() {
        let response: AuthResponse = serde_json::from_str(
            r#"{
                "accessToken": "jwt",
                "refreshToken": "refresh-jwt",
                "expiresIn": 900,
                "refreshExpiresIn": 86400,
                "admin": {"id": 1, "email": "ops@cordwain.shop", "name": "Ops", "role": "admin"}
            }"#,
        )
        .unwrap();

        let (token, profile) = response.into_parts(1_000);
        assert_eq!(token.access_token_expires_at, 1_900);
        assert_eq!(token.refresh_token_expires_at, Some(87_400));
        assert_eq!(profile.role, AdminRole::Admin);
        assert_eq!(profile.email.as_str(), "ops@cordwain.shop");
    }
}
