//! HTTP client, error types, and response classification for the CLI.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use argip_api_models::{
    ErrorBody, LoginRequest, Nut, NutCreate, NutListQuery, NutUpdate, ProblemDetails, Range,
    RangeCreate, RangeUpdate, RegisterRequest, ScrewLength, ScrewLengthCreate, TokenResponse,
    User, ValidationError,
};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::OutputFormat;
use crate::prompt::Confirm;
use crate::session::TokenStore;

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";
pub(crate) const GENERIC_FAILURE: &str =
    "The server could not complete the request; please try again later";
const LOGIN_REQUIRED: &str = "Not logged in or session expired; run `argip login` first";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
    LoginRequired,
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) | Self::LoginRequired => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
            Self::LoginRequired => LOGIN_REQUIRED.to_string(),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ValidationError> for CliError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error.to_string())
    }
}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) api: ApiClient,
    pub(crate) output: OutputFormat,
    pub(crate) confirm: Box<dyn Confirm>,
}

/// Build the shared HTTP client, tagging every request with the invocation's trace id.
pub(crate) fn build_http_client(timeout: Duration, trace_id: &str) -> CliResult<Client> {
    let mut default_headers = HeaderMap::new();
    let request_id = HeaderValue::from_str(trace_id)
        .map_err(|_| CliError::failure(anyhow!("trace identifier contains invalid characters")))?;
    default_headers.insert(HEADER_REQUEST_ID, request_id);

    Client::builder()
        .timeout(timeout)
        .default_headers(default_headers)
        .build()
        .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))
}

/// Typed wrapper over the Argip REST API.
///
/// The token store is read on every request; a 401 from a protected endpoint
/// clears it so the next invocation starts logged out.
pub(crate) struct ApiClient {
    http: Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub(crate) fn new(http: Client, base_url: Url, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http,
            base_url,
            tokens,
        }
    }

    pub(crate) fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    pub(crate) async fn register(&self, request: &RegisterRequest) -> CliResult<User> {
        let builder = self.request(Method::POST, "/register")?.json(request);
        let response = self.send(builder, "/register", false).await?;
        read_json(response, "registered user").await
    }

    /// Exchange credentials for a bearer token. Storing it is the caller's job.
    pub(crate) async fn login(&self, request: &LoginRequest) -> CliResult<String> {
        let builder = self.request(Method::POST, "/login")?.json(request);
        let response = self.send(builder, "/login", false).await?;
        let token: TokenResponse = read_json(response, "login response").await?;
        Ok(token.access_token)
    }

    pub(crate) async fn logout(&self) -> CliResult<()> {
        let builder = self.request(Method::POST, "/logout")?;
        self.send(builder, "/logout", false).await?;
        Ok(())
    }

    pub(crate) async fn current_user(&self) -> CliResult<User> {
        self.get_json("/me", "user profile").await
    }

    pub(crate) async fn list_ranges(&self) -> CliResult<Vec<Range>> {
        self.get_json("/api/ranges", "range list").await
    }

    pub(crate) async fn get_range(&self, id: i64) -> CliResult<Range> {
        self.get_json(&format!("/api/ranges/{id}"), "range").await
    }

    pub(crate) async fn create_range(&self, range: &RangeCreate) -> CliResult<Range> {
        self.send_json(Method::POST, "/api/ranges", range, "range").await
    }

    pub(crate) async fn update_range(&self, id: i64, update: &RangeUpdate) -> CliResult<Range> {
        self.send_json(Method::PUT, &format!("/api/ranges/{id}"), update, "range")
            .await
    }

    pub(crate) async fn delete_range(&self, id: i64) -> CliResult<()> {
        self.delete(&format!("/api/ranges/{id}")).await
    }

    pub(crate) async fn list_nuts(&self, range_id: Option<i64>) -> CliResult<Vec<Nut>> {
        let builder = self
            .request(Method::GET, "/api/nuts")?
            .query(&NutListQuery { range_id });
        let response = self.send(builder, "/api/nuts", true).await?;
        read_json(response, "nut list").await
    }

    pub(crate) async fn get_nut(&self, id: i64) -> CliResult<Nut> {
        self.get_json(&format!("/api/nuts/{id}"), "nut").await
    }

    pub(crate) async fn create_nut(&self, nut: &NutCreate) -> CliResult<Nut> {
        self.send_json(Method::POST, "/api/nuts", nut, "nut").await
    }

    pub(crate) async fn update_nut(&self, id: i64, update: &NutUpdate) -> CliResult<Nut> {
        self.send_json(Method::PUT, &format!("/api/nuts/{id}"), update, "nut")
            .await
    }

    pub(crate) async fn delete_nut(&self, id: i64) -> CliResult<()> {
        self.delete(&format!("/api/nuts/{id}")).await
    }

    pub(crate) async fn list_screw_lengths(&self) -> CliResult<Vec<ScrewLength>> {
        self.get_json("/api/screw-lengths", "screw length list").await
    }

    pub(crate) async fn create_screw_length(
        &self,
        screw: &ScrewLengthCreate,
    ) -> CliResult<ScrewLength> {
        self.send_json(Method::POST, "/api/screw-lengths", screw, "screw length")
            .await
    }

    pub(crate) async fn delete_screw_length(&self, id: i64) -> CliResult<()> {
        self.delete(&format!("/api/screw-lengths/{id}")).await
    }

    fn request(&self, method: Method, path: &str) -> CliResult<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| CliError::failure(anyhow!("invalid base URL: {err}")))?;
        let builder = self.http.request(method, url);
        Ok(match self.tokens.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        path: &str,
        protected: bool,
    ) -> CliResult<Response> {
        let response = builder.send().await.map_err(|err| {
            tracing::debug!(error = %err, path, "request failed before a response arrived");
            CliError::failure(anyhow!(err).context(GENERIC_FAILURE))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if protected && status == StatusCode::UNAUTHORIZED {
            if let Err(err) = self.tokens.remove() {
                tracing::warn!(error = %err, "failed to clear the stored token");
            }
            return Err(CliError::LoginRequired);
        }
        Err(classify_problem(response).await)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> CliResult<T> {
        let builder = self.request(Method::GET, path)?;
        let response = self.send(builder, path, true).await?;
        read_json(response, what).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B, what: &str) -> CliResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path)?.json(body);
        let response = self.send(builder, path, true).await?;
        read_json(response, what).await
    }

    async fn delete(&self, path: &str) -> CliResult<()> {
        let builder = self.request(Method::DELETE, path)?;
        self.send(builder, path, true).await?;
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> CliResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| CliError::failure(anyhow!("failed to parse {what}: {err}")))
}

/// Parse the API URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Classify a non-success response into a CLI error.
///
/// 4xx responses surface the server's `detail` verbatim; 5xx responses get the
/// generic message.
pub(crate) async fn classify_problem(response: Response) -> CliError {
    let status = response.status();
    let bytes = response.bytes().await.unwrap_or_default();

    if status.is_server_error() {
        return CliError::failure(anyhow!("{GENERIC_FAILURE} (status {status})"));
    }

    let message = serde_json::from_slice::<ErrorBody>(&bytes)
        .ok()
        .and_then(|body| body.detail)
        .or_else(|| {
            serde_json::from_slice::<ProblemDetails>(&bytes)
                .ok()
                .map(|problem| problem.title)
        })
        .unwrap_or_else(|| format!("request rejected with status {status}"));

    if matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
    ) {
        CliError::validation(message)
    } else {
        CliError::failure(anyhow!(message))
    }
}
