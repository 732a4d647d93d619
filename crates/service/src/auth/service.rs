use std::fmt;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use super::domain::{Claims, IssuedToken, LoginInput, Subject, TOKEN_TTL_HOURS};
use super::errors::AuthError;

/// The one admin identity. The password is only ever held as an Argon2 hash.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl AdminCredentials {
    /// Hash `password` with default Argon2 parameters and a random salt.
    pub fn from_plaintext(username: impl Into<String>, password: &str) -> Result<Self, AuthError> {
        Self::hash_with(&Argon2::default(), username, password)
    }

    /// Hash with caller-chosen Argon2 parameters.
    pub fn hash_with(argon: &Argon2<'_>, username: impl Into<String>, password: &str) -> Result<Self, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = argon
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();
        Ok(Self { username: username.into(), password_hash })
    }

    /// Use a precomputed PHC string (`$argon2id$v=19$...`).
    pub fn from_hash(username: impl Into<String>, phc: impl Into<String>) -> Result<Self, AuthError> {
        let password_hash = phc.into();
        PasswordHash::new(&password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        Ok(Self { username: username.into(), password_hash })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    // Password is verified even for a wrong username so both failures cost the same.
    fn matches(&self, username: &str, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            return false;
        };
        let password_ok = Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok();
        password_ok && username == self.username
    }
}

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub admin: AdminCredentials,
}

/// Login and bearer-token checks for the single admin, independent of web framework.
pub struct AuthService {
    admin: AdminCredentials,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl AuthService {
    pub fn new(cfg: AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            admin: cfg.admin,
            encoding: EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn admin_username(&self) -> &str {
        self.admin.username()
    }

    /// Check the admin credentials and issue an 8 hour token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AdminCredentials, AuthConfig, AuthService, domain::LoginInput};
    /// let admin = AdminCredentials::from_plaintext("admin", "Passw0rd").unwrap();
    /// let svc = AuthService::new(AuthConfig { jwt_secret: "secret".into(), admin });
    /// let token = tokio_test::block_on(svc.login(LoginInput { username: "admin".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(token.token_type, "bearer");
    /// let header = format!("Bearer {}", token.access_token);
    /// assert!(svc.require_admin(Some(&header)).is_ok());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<IssuedToken, AuthError> {
        let admin = self.admin.clone();
        let LoginInput { username, password } = input;
        let candidate = username.clone();
        let ok = tokio::task::spawn_blocking(move || admin.matches(&candidate, &password))
            .await
            .map_err(|e| AuthError::HashError(e.to_string()))?;
        if !ok {
            warn!("login_rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let issued_at = Utc::now();
        let access_token = self.issue_token_at(&username, issued_at)?;
        info!("admin_logged_in");
        Ok(IssuedToken {
            access_token,
            token_type: "bearer",
            expires_at: issued_at + Duration::hours(TOKEN_TTL_HOURS),
        })
    }

    /// Sign a token for `subject` as if issued at `issued_at`.
    pub fn issue_token_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        encode(&JwtHeader::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Resolve the subject of an `Authorization` header value.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Subject, AuthError> {
        let token = bearer_token(authorization)?;
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Ok(Subject(data.claims.sub)),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => Err(AuthError::TokenExpired),
            Err(e) => {
                debug!(err = %e, "token validation failed");
                Err(AuthError::InvalidToken)
            }
        }
    }

    /// Pass only for a valid token whose subject is the configured admin.
    pub fn require_admin(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let Subject(sub) = self.authenticate(authorization)?;
        if sub != self.admin.username {
            return Err(AuthError::Forbidden);
        }
        Ok(())
    }
}

/// Extract `<token>` from `Bearer <token>`; the scheme is case-insensitive.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    let value = authorization.ok_or(AuthError::MissingToken)?.trim();
    let (scheme, token) = value.split_once(char::is_whitespace).ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingToken);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{Algorithm as ArgonAlgorithm, Params, Version};

    fn cheap_admin(username: &str, password: &str) -> AdminCredentials {
        let argon = Argon2::new(ArgonAlgorithm::Argon2id, Version::V0x13, Params::new(1024, 1, 1, None).unwrap());
        AdminCredentials::hash_with(&argon, username, password).unwrap()
    }

    fn service(secret: &str) -> AuthService {
        AuthService::new(AuthConfig { jwt_secret: secret.into(), admin: cheap_admin("admin", "Sup3rSecret") })
    }

    fn login(username: &str, password: &str) -> LoginInput {
        LoginInput { username: username.into(), password: password.into() }
    }

    #[tokio::test]
    async fn login_issues_token_with_eight_hour_ttl() {
        let svc = service("secret");
        let before = Utc::now();
        let issued = svc.login(login("admin", "Sup3rSecret")).await.unwrap();
        let ttl = issued.expires_at - before;
        assert!(ttl <= Duration::hours(8) + Duration::seconds(5) && ttl >= Duration::hours(8) - Duration::seconds(5));

        let header = format!("Bearer {}", issued.access_token);
        assert_eq!(svc.authenticate(Some(&header)), Ok(Subject("admin".into())));
        assert_eq!(svc.require_admin(Some(&header)), Ok(()));
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let svc = service("secret");
        let wrong_pw = svc.login(login("admin", "nope")).await.unwrap_err();
        let wrong_user = svc.login(login("root", "Sup3rSecret")).await.unwrap_err();
        assert_eq!(wrong_pw, AuthError::InvalidCredentials);
        assert_eq!(wrong_user, AuthError::InvalidCredentials);
        assert_eq!(wrong_pw.to_string(), wrong_user.to_string());
    }

    #[test]
    fn bearer_header_parsing() {
        assert_eq!(bearer_token(None), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("Bearer")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("Bearer   ")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("Basic abc")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(Some("BEARER  abc ")), Ok("abc"));
    }

    #[test]
    fn expired_token_rejected_even_with_valid_signature() {
        let svc = service("secret");
        let stale = svc.issue_token_at("admin", Utc::now() - Duration::hours(9)).unwrap();
        let header = format!("Bearer {stale}");
        assert_eq!(svc.authenticate(Some(&header)), Err(AuthError::TokenExpired));
        assert_eq!(svc.require_admin(Some(&header)), Err(AuthError::TokenExpired));

        let aging = svc.issue_token_at("admin", Utc::now() - Duration::hours(7)).unwrap();
        assert!(svc.require_admin(Some(&format!("Bearer {aging}"))).is_ok());
    }

    #[test]
    fn foreign_signature_and_garbage_are_invalid() {
        let svc = service("secret");
        let other = service("another-secret");
        let forged = other.issue_token_at("admin", Utc::now()).unwrap();
        assert_eq!(svc.authenticate(Some(&format!("Bearer {forged}"))), Err(AuthError::InvalidToken));
        assert_eq!(svc.authenticate(Some("Bearer not.a.jwt")), Err(AuthError::InvalidToken));
    }

    #[test]
    fn non_admin_subject_is_forbidden() {
        let svc = service("secret");
        let token = svc.issue_token_at("editor", Utc::now()).unwrap();
        let header = format!("Bearer {token}");
        assert_eq!(svc.authenticate(Some(&header)), Ok(Subject("editor".into())));
        assert_eq!(svc.require_admin(Some(&header)), Err(AuthError::Forbidden));
    }

    #[test]
    fn from_hash_rejects_non_phc_strings() {
        assert!(AdminCredentials::from_hash("admin", "plaintext").is_err());
        let phc = cheap_admin("x", "pw").password_hash;
        let creds = AdminCredentials::from_hash("admin", phc).unwrap();
        assert!(creds.matches("admin", "pw"));
        assert!(!format!("{creds:?}").contains("argon2"));
    }
}
