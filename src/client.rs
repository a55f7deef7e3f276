use std::fmt;

use reqwest::header::{self, HeaderValue};

use crate::{
    wire::{SignInRequest, SignInResponse},
    ClientOptions, DormHttpError, Request, Result, RetryExecutor, Role, Session,
};

/// Path of the sign-in endpoint relative to the API base URL.
pub const SIGN_IN_PATH: &str = "/api/auth/signin";

/// Formats an API base URL into the sign-in endpoint URL.
///
/// Example: `"https://dorm.example/"` → `"https://dorm.example/api/auth/signin"`
pub fn sign_in_url(base_url: &str) -> String {
    format!("{}{SIGN_IN_PATH}", base_url.trim().trim_end_matches('/'))
}

/// Client for the dormitory backend's authentication endpoint.
#[derive(Clone)]
pub struct AuthClient {
    executor: RetryExecutor,
    sign_in_url: String,
    options: ClientOptions,
}

impl fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthClient")
            .field("sign_in_url", &self.sign_in_url)
            .field("options", &self.options)
            .finish()
    }
}

impl AuthClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            executor: RetryExecutor::default(),
            sign_in_url: sign_in_url(base_url.as_ref()),
            options: ClientOptions::default(),
        }
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `DORM_API_BASE_URL` (required) plus the optional overrides
    /// documented on [`ClientOptions::from_env`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dorm_http::AuthClient;
    ///
    /// let auth = AuthClient::from_env().expect("missing DORM_API_BASE_URL");
    /// ```
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("DORM_API_BASE_URL").map_err(|_| {
            DormHttpError::Config("missing DORM_API_BASE_URL environment variable".to_owned())
        })?;
        if base_url.trim().is_empty() {
            return Err(DormHttpError::Config(
                "DORM_API_BASE_URL is set but empty".to_owned(),
            ));
        }
        Ok(Self::new(base_url).with_options(ClientOptions::from_env()?))
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Replaces the executor, e.g. to inject a custom transport or sink.
    pub fn with_executor(mut self, executor: RetryExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn sign_in_url(&self) -> &str {
        &self.sign_in_url
    }

    /// Exchanges credentials for a [`Session`].
    ///
    /// Blank credentials are rejected without contacting the backend.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DormHttpError::InvalidRequest("email is empty".to_owned()));
        }
        if password.is_empty() {
            return Err(DormHttpError::InvalidRequest("password is empty".to_owned()));
        }

        let request = Request::post(&self.sign_in_url)
            .header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .json(&SignInRequest { email, password })?
            .timeout(self.options.timeout());

        let response = self
            .executor
            .execute(&request, &self.options.retry_policy())
            .await?;

        if !response.is_success() {
            return Err(DormHttpError::Http {
                status: response.status(),
                body: response.text(),
            });
        }

        let wire: SignInResponse = response.json().map_err(|err| {
            DormHttpError::Decode(format!("invalid sign-in response JSON: {err}"))
        })?;
        decode_session(wire)
    }
}

fn decode_session(wire: SignInResponse) -> Result<Session> {
    if wire.access_token.trim().is_empty() {
        return Err(DormHttpError::Decode(
            "sign-in response has an empty access token".to_owned(),
        ));
    }

    let token_type = wire
        .token_type
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "Bearer".to_owned());
    let roles = wire
        .roles
        .iter()
        .filter_map(|role| role.parse::<Role>().ok())
        .collect();

    Ok(Session {
        access_token: wire.access_token,
        token_type,
        id: wire.id.to_string(),
        username: wire.username,
        email: wire.email,
        roles,
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_session, sign_in_url, AuthClient};
    use crate::{wire::SignInResponse, DormHttpError, Role};

    #[test]
    fn sign_in_url_strips_trailing_slash() {
        assert_eq!(
            sign_in_url("https://dorm.example/"),
            "https://dorm.example/api/auth/signin"
        );
        assert_eq!(
            sign_in_url(" http://localhost:8080 "),
            "http://localhost:8080/api/auth/signin"
        );
    }

    #[test]
    fn decode_defaults_token_type_and_parses_roles() {
        let wire: SignInResponse = serde_json::from_str(
            r#"{"accessToken":"abc","id":3,"username":"kit","email":"k@d.t","roles":["ROLE_PROVOST"]}"#,
        )
        .unwrap();
        let session = decode_session(wire).unwrap();
        assert_eq!(session.token_type, "Bearer");
        assert_eq!(session.id, "3");
        assert_eq!(session.roles, vec![Role::Provost]);
    }

    #[test]
    fn decode_accepts_string_id_and_token_alias() {
        let wire: SignInResponse = serde_json::from_str(
            r#"{"token":"abc","type":"JWT","id":"u-1","username":"kit","email":"k@d.t"}"#,
        )
        .unwrap();
        let session = decode_session(wire).unwrap();
        assert_eq!(session.token_type, "JWT");
        assert_eq!(session.id, "u-1");
        assert!(session.roles.is_empty());
    }

    #[test]
    fn decode_rejects_empty_token() {
        let wire: SignInResponse = serde_json::from_str(
            r#"{"accessToken":" ","id":1,"username":"kit","email":"k@d.t"}"#,
        )
        .unwrap();
        assert!(matches!(decode_session(wire), Err(DormHttpError::Decode(_))));
    }

    #[tokio::test]
    async fn blank_credentials_fail_before_sending() {
        let client = AuthClient::new("http://127.0.0.1:9");
        assert!(matches!(
            client.sign_in("  ", "pw").await,
            Err(DormHttpError::InvalidRequest(_))
        ));
        assert!(matches!(
            client.sign_in("kit@dorm.test", "").await,
            Err(DormHttpError::InvalidRequest(_))
        ));
    }

    #[test]
    fn from_env_rejects_empty_base_url() {
        std::env::set_var("DORM_API_BASE_URL", "  ");
        let result = AuthClient::from_env();
        std::env::remove_var("DORM_API_BASE_URL");

        match result {
            Err(DormHttpError::Config(message)) => assert!(message.contains("empty")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn debug_omits_executor_and_credentials() {
        let client = AuthClient::new("https://dorm.example");
        let debug = format!("{client:?}");
        assert!(debug.contains("https://dorm.example/api/auth/signin"));
        assert!(!debug.contains("executor"));
    }
}
