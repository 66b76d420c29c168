//! HTTP client helpers (REST).
//!
//! # Design
//! - One client per app boot; the token is read from the injected store on every request.
//! - Failures are classified into [`ApiFailure`] here so views only pick a message.

use argip_api_models::{
    LoginRequest, Nut, NutCreate, NutUpdate, Range, RangeCreate, RangeUpdate, RegisterRequest,
    ScrewLength, ScrewLengthCreate, TokenResponse, User,
};
use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::failure::ApiFailure;
use crate::core::session::SharedTokenStore;

pub(crate) struct ApiClient {
    base_url: String,
    tokens: SharedTokenStore,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>, tokens: SharedTokenStore) -> Self {
        Self {
            base_url: base_url.into(),
            tokens,
        }
    }

    pub(crate) fn tokens(&self) -> &SharedTokenStore {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: Request) -> Request {
        match self.tokens.get() {
            Some(token) => request.header("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    /// `protected` marks calls where a 401 means the session is gone rather than
    /// a credential rejection (login).
    async fn send(&self, request: Request, protected: bool) -> Result<Response, ApiFailure> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| ApiFailure::Network(err.to_string()))?;
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        if protected && status == 401 {
            return Err(ApiFailure::Unauthorized);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiFailure::from_status(status, &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiFailure> {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiFailure::Decode(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiFailure> {
        let response = self.send(Request::get(&self.url(path)), true).await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        protected: bool,
    ) -> Result<T, ApiFailure> {
        let request = Request::post(&self.url(path))
            .json(body)
            .map_err(|err| ApiFailure::Network(err.to_string()))?;
        let response = self.send(request, protected).await?;
        Self::decode(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiFailure> {
        let request = Request::put(&self.url(path))
            .json(body)
            .map_err(|err| ApiFailure::Network(err.to_string()))?;
        let response = self.send(request, true).await?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiFailure> {
        self.send(Request::delete(&self.url(path)), true).await?;
        Ok(())
    }

    pub(crate) async fn register(&self, payload: &RegisterRequest) -> Result<User, ApiFailure> {
        self.post_json("/register", payload, false).await
    }

    pub(crate) async fn login(&self, payload: &LoginRequest) -> Result<String, ApiFailure> {
        let token: TokenResponse = self.post_json("/login", payload, false).await?;
        Ok(token.access_token)
    }

    /// Revokes the session server-side; callers clear the local token regardless.
    pub(crate) async fn logout(&self) -> Result<(), ApiFailure> {
        self.send(Request::post(&self.url("/logout")), true).await?;
        Ok(())
    }

    pub(crate) async fn current_user(&self) -> Result<User, ApiFailure> {
        self.get_json("/me").await
    }

    pub(crate) async fn list_ranges(&self) -> Result<Vec<Range>, ApiFailure> {
        self.get_json("/api/ranges").await
    }

    pub(crate) async fn get_range(&self, id: i64) -> Result<Range, ApiFailure> {
        self.get_json(&format!("/api/ranges/{id}")).await
    }

    pub(crate) async fn create_range(&self, payload: &RangeCreate) -> Result<Range, ApiFailure> {
        self.post_json("/api/ranges", payload, true).await
    }

    pub(crate) async fn update_range(
        &self,
        id: i64,
        payload: &RangeUpdate,
    ) -> Result<Range, ApiFailure> {
        self.put_json(&format!("/api/ranges/{id}"), payload).await
    }

    pub(crate) async fn delete_range(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&format!("/api/ranges/{id}")).await
    }

    pub(crate) async fn list_nuts(&self, range_id: Option<i64>) -> Result<Vec<Nut>, ApiFailure> {
        match range_id {
            Some(id) => self.get_json(&format!("/api/nuts?range_id={id}")).await,
            None => self.get_json("/api/nuts").await,
        }
    }

    pub(crate) async fn get_nut(&self, id: i64) -> Result<Nut, ApiFailure> {
        self.get_json(&format!("/api/nuts/{id}")).await
    }

    pub(crate) async fn create_nut(&self, payload: &NutCreate) -> Result<Nut, ApiFailure> {
        self.post_json("/api/nuts", payload, true).await
    }

    pub(crate) async fn update_nut(&self, id: i64, payload: &NutUpdate) -> Result<Nut, ApiFailure> {
        self.put_json(&format!("/api/nuts/{id}"), payload).await
    }

    pub(crate) async fn delete_nut(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&format!("/api/nuts/{id}")).await
    }

    pub(crate) async fn list_screw_lengths(&self) -> Result<Vec<ScrewLength>, ApiFailure> {
        self.get_json("/api/screw-lengths").await
    }

    pub(crate) async fn create_screw_length(
        &self,
        payload: &ScrewLengthCreate,
    ) -> Result<ScrewLength, ApiFailure> {
        self.post_json("/api/screw-lengths", payload, true).await
    }

    pub(crate) async fn delete_screw_length(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&format!("/api/screw-lengths/{id}")).await
    }
}
