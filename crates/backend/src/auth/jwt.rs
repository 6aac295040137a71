//! Session tokens: HS256 JWTs signed with `JWT_SECRET`.
//!
//! `sub` holds the account id and `username` rides along so requests do not
//! need a user lookup. Lifetime is `TOKEN_DURATION_DAYS`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::types::{AuthConfig, AuthUser, Claims};

fn claims_for(account: &AuthUser, issued_at: DateTime<Utc>, lifetime_days: i64) -> Claims {
    Claims {
        sub: account.id.to_string(),
        username: account.username.clone(),
        iat: issued_at.timestamp(),
        exp: (issued_at + Duration::days(lifetime_days)).timestamp(),
    }
}

pub fn issue_token(
    config: &AuthConfig,
    account: &AuthUser,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = claims_for(account, Utc::now(), config.token_duration_days);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// The account a token was issued to. `None` for a bad signature, an
/// expired token or a `sub` that is not an account id.
pub fn verify_token(config: &AuthConfig, token: &str) -> Option<AuthUser> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| tracing::debug!("Rejected session token: {}", e))
    .ok()?;

    let id = Uuid::parse_str(&data.claims.sub).ok()?;
    Some(AuthUser {
        id,
        username: data.claims.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config(days: i64) -> AuthConfig {
        AuthConfig {
            jwt_secret: "calendar-session-secret".to_string(),
            token_duration_days: days,
            cookie_name: "calendar_session".to_string(),
            secure_cookies: false,
        }
    }

    fn account(username: &str) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            username: username.to_string(),
        }
    }

    fn sign(config: &AuthConfig, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_claims_span_configured_lifetime() {
        let ada = account("ada");
        let issued = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let claims = claims_for(&ada, issued, 7);

        assert_eq!(claims.sub, ada.id.to_string());
        assert_eq!(claims.username, "ada");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_names_its_account() {
        let config = config(7);
        let ada = account("ada");
        let token = issue_token(&config, &ada).unwrap();

        assert_eq!(verify_token(&config, &token), Some(ada));
    }

    #[test]
    fn test_token_from_other_deployment_is_rejected() {
        let token = issue_token(&config(7), &account("ada")).unwrap();

        let mut other = config(7);
        other.jwt_secret = "another-calendar-secret".to_string();
        assert_eq!(verify_token(&other, &token), None);
        assert_eq!(verify_token(&other, "not.a.token"), None);
    }

    #[test]
    fn test_lapsed_session_is_rejected() {
        let config = config(-2);
        let token = issue_token(&config, &account("ada")).unwrap();
        assert_eq!(verify_token(&config, &token), None);
    }

    #[test]
    fn test_subject_must_be_account_id() {
        let config = config(7);
        let mut claims = claims_for(&account("ada"), Utc::now(), 1);
        claims.sub = "ada".to_string();

        assert_eq!(verify_token(&config, &sign(&config, &claims)), None);
    }
}
