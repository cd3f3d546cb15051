//! JWT token generation and validation.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use entities::{User, UserRole};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AuthError, AuthResult, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_JWT_ISSUER};

/// JWT claims for Rollcall access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Teacher or student.
    pub role: UserRole,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Issuer.
    pub iss: String,
    /// JWT ID.
    pub jti: String,
}

impl Claims {
    /// Creates new claims for a user.
    ///
    /// Fails with [`AuthError::Configuration`] if the expiration does not fit
    /// in a timestamp.
    pub fn new(user: &User, expiration_hours: u64, issuer: &str) -> AuthResult<Self> {
        let now = Utc::now();
        let exp = i64::try_from(expiration_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AuthError::Configuration(format!(
                    "JWT expiration of {expiration_hours} hours is out of range"
                ))
            })?;

        Ok(Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Returns the user ID.
    pub fn user_id(&self) -> AuthResult<Uuid> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }

    /// Returns the expiration as a timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token expiration in hours.
    pub expiration_hours: u64,
    /// Token issuer.
    pub issuer: String,
}

impl JwtConfig {
    /// Creates a new JWT configuration.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            issuer: DEFAULT_JWT_ISSUER.to_string(),
        }
    }

    /// Sets the expiration time in hours.
    pub fn with_expiration_hours(mut self, hours: u64) -> Self {
        self.expiration_hours = hours;
        self
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }
}

/// Generates a random signing secret for processes started without one.
pub fn generate_secret() -> String {
    let mut rng = rand::rng();
    let bytes: Vec<u8> = (0..48).map(|_| rng.random::<u8>()).collect();
    URL_SAFE_NO_PAD.encode(&bytes)
}

/// JWT token manager.
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}

impl JwtManager {
    /// Creates a new JWT manager.
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generates an access token for a user.
    pub fn generate_token(&self, user: &User) -> AuthResult<String> {
        let claims = Claims::new(user, self.config.expiration_hours, &self.config.issuer)?;

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::JwtEncoding(e.to_string()))
    }

    /// Validates and decodes a token.
    pub fn validate_token(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }

    /// Returns the expiration time in seconds.
    pub fn expiration_seconds(&self) -> AuthResult<u64> {
        self.config.expiration_hours.checked_mul(3600).ok_or_else(|| {
            AuthError::Configuration(format!(
                "JWT expiration of {} hours is out of range",
                self.config.expiration_hours
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher() -> User {
        User::new("John Smith", "teacher@example.com", UserRole::Teacher)
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let config = JwtConfig::new("test-secret-key-must-be-long-enough-for-security");
        let manager = JwtManager::new(config);
        let user = teacher();

        let token = manager.generate_token(&user).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.name, user.name);
        assert_eq!(claims.role, UserRole::Teacher);
        assert!(claims.expires_at() > Utc::now());
        assert_eq!(manager.expiration_seconds().unwrap(), 24 * 3600);
    }

    #[test]
    fn test_invalid_token() {
        let config = JwtConfig::new("test-secret-key-must-be-long-enough-for-security");
        let manager = JwtManager::new(config);

        let result = manager.validate_token("invalid-token");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let manager1 = JwtManager::new(JwtConfig::new("secret-one-must-be-long-enough"));
        let manager2 = JwtManager::new(JwtConfig::new("secret-two-must-be-long-enough"));

        let token = manager1.generate_token(&teacher()).unwrap();

        let result = manager2.validate_token(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let secret = "shared-secret-must-be-long-enough";
        let issuer_a = JwtManager::new(JwtConfig::new(secret).with_issuer("a"));
        let issuer_b = JwtManager::new(JwtConfig::new(secret).with_issuer("b"));

        let token = issuer_a.generate_token(&teacher()).unwrap();
        assert!(issuer_b.validate_token(&token).is_err());
    }

    #[test]
    fn test_claims_role_serialized_lowercase() {
        let claims = Claims::new(&teacher(), 1, DEFAULT_JWT_ISSUER).unwrap();
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "teacher");
    }

    #[test]
    fn test_out_of_range_expiration_is_an_error() {
        let manager = JwtManager::new(
            JwtConfig::new("test-secret-key-must-be-long-enough-for-security")
                .with_expiration_hours(3_000_000_000),
        );
        assert!(matches!(
            manager.generate_token(&teacher()),
            Err(AuthError::Configuration(_))
        ));

        assert!(matches!(
            Claims::new(&teacher(), u64::MAX, DEFAULT_JWT_ISSUER),
            Err(AuthError::Configuration(_))
        ));

        let manager = JwtManager::new(JwtConfig::new("s").with_expiration_hours(u64::MAX));
        assert!(manager.expiration_seconds().is_err());
    }

    #[test]
    fn test_generated_secrets_differ() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
