//! `reqwest` implementation of [`ThoughtCacheApi`].

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thoughtcache_core::theme::Theme;
use thoughtcache_core::types::DbId;

use crate::api::ThoughtCacheApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ErrorBody};
use crate::types::{
    AuthSession, DataEnvelope, Item, ItemChanges, NewItem, Profile, ProfileChanges, Tag,
    TagChanges, ThemeSetting,
};

/// HTTP client for the ThoughtCache API.
pub struct HttpClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `POST /auth/signup`; stores the returned token.
    pub async fn signup(&mut self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        self.authenticate("auth/signup", email, password).await
    }

    /// `POST /auth/login`; stores the returned token.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        self.authenticate("auth/login", email, password).await
    }

    /// `GET /shared/{slug}`. Needs no token.
    pub async fn get_shared_item(&self, slug: &str) -> Result<Item, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("shared/{slug}")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // ---- private helpers ----

    async fn authenticate(
        &mut self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self.client.post(self.url(path)).json(&body).send().await?;
        let session: AuthSession = Self::parse_data(response).await?;
        self.token = Some(session.access_token.clone());
        Ok(session)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Self::parse_data(response).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.request(method, path).json(body).send().await?;
        Self::parse_data(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        Self::ensure_success(response).await.map(|_| ())
    }

    /// Turn a non-2xx response into [`ClientError::Api`], reading the
    /// `{error, code, message}` body when there is one.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let (error, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.error, body.message),
            Err(_) if text.is_empty() => (
                status.canonical_reason().unwrap_or("Request failed").to_string(),
                None,
            ),
            Err(_) => (text, None),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            error,
            message,
        })
    }

    /// Unwrap the `{ "data": ... }` envelope of a successful response.
    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice::<DataEnvelope<T>>(&bytes)
            .map(|envelope| envelope.data)
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ThoughtCacheApi for HttpClient {
    async fn get_profile(&self) -> Result<Profile, ClientError> {
        self.get("profile").await
    }

    async fn update_profile(&self, changes: &ProfileChanges) -> Result<Profile, ClientError> {
        self.send_json(reqwest::Method::PUT, "profile", changes).await
    }

    async fn get_theme(&self) -> Result<Theme, ClientError> {
        let setting: ThemeSetting = self.get("profile/theme").await?;
        Ok(setting.theme)
    }

    async fn update_theme(&self, theme: Theme) -> Result<Theme, ClientError> {
        let setting: ThemeSetting = self
            .send_json(reqwest::Method::PUT, "profile/theme", &ThemeSetting { theme })
            .await?;
        Ok(setting.theme)
    }

    async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        self.get("items").await
    }

    async fn get_item(&self, id: DbId) -> Result<Item, ClientError> {
        self.get(&format!("items/{id}")).await
    }

    async fn create_item(&self, item: &NewItem) -> Result<Item, ClientError> {
        self.send_json(reqwest::Method::POST, "items", item).await
    }

    async fn update_item(&self, id: DbId, changes: &ItemChanges) -> Result<Item, ClientError> {
        self.send_json(reqwest::Method::PUT, &format!("items/{id}"), changes)
            .await
    }

    async fn delete_item(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("items/{id}")).await
    }

    async fn toggle_star(&self, id: DbId) -> Result<Item, ClientError> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("items/{id}/star"))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn share_item(&self, id: DbId, is_public: Option<bool>) -> Result<Item, ClientError> {
        let body = match is_public {
            Some(is_public) => serde_json::json!({ "is_public": is_public }),
            None => serde_json::json!({}),
        };
        self.send_json(reqwest::Method::PUT, &format!("items/{id}/share"), &body)
            .await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ClientError> {
        self.get("tags").await
    }

    async fn create_tag(&self, name: &str, color: Option<&str>) -> Result<Tag, ClientError> {
        let body = serde_json::json!({ "name": name, "color": color });
        self.send_json(reqwest::Method::POST, "tags", &body).await
    }

    async fn update_tag(&self, id: DbId, changes: &TagChanges) -> Result<Tag, ClientError> {
        self.send_json(reqwest::Method::PUT, &format!("tags/{id}"), changes)
            .await
    }

    async fn delete_tag(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("tags/{id}")).await
    }
}
