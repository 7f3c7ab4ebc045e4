use axum::http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use std::{error::Error as StdError, fmt};

use crate::config::AuthSettings;
use crate::services::auth::jwt::TokenClaims;
use crate::services::auth::role::Role;

// Errors returned by bearer extraction + access-token verification.
#[derive(Debug)]
pub enum AccessJwtError {
    /// No `Authorization` header at all.
    MissingCredentials,
    /// Header present but not `Bearer <token>`.
    MalformedCredentials,
    Expired,
    InvalidSignature,
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => write!(f, "missing authorization header"),
            Self::MalformedCredentials => write!(f, "malformed bearer credentials"),
            Self::Expired => write!(f, "token expired"),
            Self::InvalidSignature => write!(f, "invalid token signature"),
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Jwt(e),
        }
    }
}

/// What the verifier hands to the identity attacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub subject_id: String,
    pub email: String,
    pub role: Role,
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AccessJwtError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .ok_or(AccessJwtError::MissingCredentials)?
        .to_str()
        .map_err(|_| AccessJwtError::MalformedCredentials)?;

    let (scheme, token) = raw
        .trim()
        .split_once(' ')
        .ok_or(AccessJwtError::MalformedCredentials)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() || token.contains(' ') {
        return Err(AccessJwtError::MalformedCredentials);
    }

    Ok(token)
}

/// HS256 access-token verifier.
///
/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
    dev_bypass: bool,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("leeway", &self.validation.leeway)
            .field("dev_bypass", &self.dev_bypass)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(settings: &AuthSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = settings.leeway_seconds;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
            validation,
            dev_bypass: settings.dev_bypass,
        }
    }

    pub fn dev_bypass(&self) -> bool {
        self.dev_bypass
    }

    /// Check signature + expiry and decode the claim set.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AccessJwtError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// `verify` plus non-empty `sub`/`email`, converted for the rest of the app.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify(token)?;

        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }
        if claims.email.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("email"));
        }

        Ok(VerifiedAccessToken {
            subject_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }

    /// Header extraction followed by verification.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<VerifiedAccessToken, AccessJwtError> {
        let token = bearer_token(headers)?;
        self.verify_verified(token)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use serde_json::json;

    use super::*;
    use crate::services::auth::jwt::JwtIssuer;

    const SECRET: &str = "unit-test-secret";

    fn settings(secret: &str) -> AuthSettings {
        AuthSettings::new(secret)
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn claims(sub: &str, email: &str, role: Role, exp_offset: i64) -> TokenClaims {
        let now = chrono::Utc::now().timestamp();
        TokenClaims {
            sub: sub.to_string(),
            email: email.to_string(),
            role,
            iat: Some(now),
            exp: now + exp_offset,
        }
    }

    #[test]
    fn valid_token_decodes_all_three_claims() {
        let issuer = JwtIssuer::new(&settings(SECRET));
        let verifier = AuthService::new(&settings(SECRET));

        let token = issuer.issue("u1", "a@b.com", &Role::Admin).unwrap();
        let verified = verifier.verify_verified(&token).unwrap();

        assert_eq!(
            verified,
            VerifiedAccessToken {
                subject_id: "u1".to_string(),
                email: "a@b.com".to_string(),
                role: Role::Admin,
            }
        );
    }

    #[test]
    fn unknown_role_survives_verification() {
        let issuer = JwtIssuer::new(&settings(SECRET));
        let verifier = AuthService::new(&settings(SECRET));

        let token = issuer
            .issue("u9", "x@y.com", &Role::from("coordinateur"))
            .unwrap();
        let verified = verifier.verify_verified(&token).unwrap();
        assert_eq!(verified.role.as_str(), "coordinateur");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = JwtIssuer::new(&settings("some-other-secret"));
        let verifier = AuthService::new(&settings(SECRET));

        let token = issuer.issue("u1", "a@b.com", &Role::Admin).unwrap();
        let err = verifier.verify_verified(&token).unwrap_err();
        assert!(matches!(err, AccessJwtError::InvalidSignature), "{err:?}");
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = JwtIssuer::new(&settings(SECRET));
        let verifier = AuthService::new(&settings(SECRET));

        let token = issuer
            .sign(&claims("u1", "a@b.com", Role::Admin, -3600))
            .unwrap();
        let err = verifier.verify_verified(&token).unwrap_err();
        assert!(matches!(err, AccessJwtError::Expired), "{err:?}");
    }

    #[test]
    fn recently_expired_token_is_rejected_without_leeway() {
        let issuer = JwtIssuer::new(&settings(SECRET));
        let verifier = AuthService::new(&settings(SECRET));

        let token = issuer.sign(&claims("u1", "a@b.com", Role::Admin, -5)).unwrap();
        assert!(matches!(
            verifier.verify_verified(&token),
            Err(AccessJwtError::Expired)
        ));
    }

    #[test]
    fn leeway_tolerates_small_clock_skew() {
        let issuer = JwtIssuer::new(&settings(SECRET));
        let mut lenient = settings(SECRET);
        lenient.leeway_seconds = 120;
        let verifier = AuthService::new(&lenient);

        let token = issuer.sign(&claims("u1", "a@b.com", Role::Admin, -5)).unwrap();
        assert!(verifier.verify_verified(&token).is_ok());
    }

    #[test]
    fn missing_role_claim_is_rejected() {
        let issuer = JwtIssuer::new(&settings(SECRET));
        let verifier = AuthService::new(&settings(SECRET));

        let exp = chrono::Utc::now().timestamp() + 600;
        let token = issuer
            .sign(&json!({ "sub": "u1", "email": "a@b.com", "exp": exp }))
            .unwrap();
        assert!(matches!(
            verifier.verify_verified(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn empty_subject_is_rejected() {
        let issuer = JwtIssuer::new(&settings(SECRET));
        let verifier = AuthService::new(&settings(SECRET));

        let token = issuer.sign(&claims("  ", "a@b.com", Role::Admin, 600)).unwrap();
        assert!(matches!(
            verifier.verify_verified(&token),
            Err(AccessJwtError::EmptyClaim("sub"))
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let verifier = AuthService::new(&settings(SECRET));
        assert!(matches!(
            verifier.verify_verified("not.a.jwt"),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn only_hs256_is_accepted() {
        let verifier = AuthService::new(&settings(SECRET));

        let hs512 = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(Algorithm::HS512),
            &claims("u1", "a@b.com", Role::Admin, 600),
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            verifier.verify_verified(&hs512),
            Err(AccessJwtError::Jwt(_))
        ));

        // {"alg":"none"} header, admin claims, empty signature
        let unsigned = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
            eyJzdWIiOiJ1MSIsImVtYWlsIjoiYUBiLmNvbSIsInJvbGUiOiJhZG1pbiIsImV4cCI6NDEwMjQ0NDgwMH0.";
        assert!(matches!(
            verifier.verify_verified(unsigned),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn missing_header_differs_from_malformed_header() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AccessJwtError::MissingCredentials)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Basic dXNlcjpwYXNz")),
            Err(AccessJwtError::MalformedCredentials)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Bearer")),
            Err(AccessJwtError::MalformedCredentials)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Bearer a b")),
            Err(AccessJwtError::MalformedCredentials)
        ));
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&headers_with("bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn authenticate_reads_header_then_verifies() {
        let issuer = JwtIssuer::new(&settings(SECRET));
        let verifier = AuthService::new(&settings(SECRET));

        let token = issuer.issue("u2", "c@d.com", &Role::Intervenant).unwrap();
        let verified = verifier
            .authenticate(&headers_with(&format!("Bearer {token}")))
            .unwrap();
        assert_eq!(verified.subject_id, "u2");
        assert_eq!(verified.role, Role::Intervenant);
    }
}
