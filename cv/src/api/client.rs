//! Checkvist REST client
//!
//! Implements [`CheckvistApi`] over reqwest. Every call except `login` sends HTTP basic
//! credentials; each call is a single request with no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiError, Checklist, CheckvistApi, NewTask, Note, Task, TaskRef, User};
use crate::config::{ApiConfig, Credentials};

/// HTTP client for the Checkvist API
pub struct CheckvistClient {
    base_url: String,
    credentials: Credentials,
    http: Client,
}

impl CheckvistClient {
    /// Create a new client from API configuration and loaded credentials
    pub fn new(config: &ApiConfig, credentials: Credentials) -> Result<Self, ApiError> {
        debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "CheckvistClient::new: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("checkvist-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Start an authenticated request
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .basic_auth(&self.credentials.username, Some(&self.credentials.api_key))
    }

    /// Send a request and return the body of a successful response
    async fn send_raw(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, body_len = body.len(), "send_raw: response received");

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(body)
    }

    /// Send a request and decode a JSON response
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send_raw(request).await?;
        if body.trim().is_empty() {
            return Err(ApiError::InvalidResponse("empty response body".to_string()));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CheckvistApi for CheckvistClient {
    async fn login(&self) -> Result<String, ApiError> {
        debug!(username = %self.credentials.username, "login: called");
        let request = self.http.post(self.url("auth/login.json")).query(&[
            ("username", self.credentials.username.as_str()),
            ("remote_key", self.credentials.api_key.as_str()),
        ]);
        let body = self.send_raw(request).await?;

        // The token comes back as a JSON string literal
        let token = serde_json::from_str::<String>(&body).unwrap_or_else(|_| body.trim().to_string());
        if token.is_empty() {
            return Err(ApiError::InvalidResponse("empty login token".to_string()));
        }
        Ok(token)
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        debug!("current_user: called");
        self.send(self.request(Method::GET, "auth/curr_user.json")).await
    }

    async fn lists(&self) -> Result<Vec<Checklist>, ApiError> {
        debug!("lists: called");
        self.send(self.request(Method::GET, "checklists.json")).await
    }

    async fn list(&self, list_id: u64) -> Result<Checklist, ApiError> {
        debug!(list_id, "list: called");
        self.send(self.request(Method::GET, &format!("checklists/{list_id}.json")))
            .await
    }

    async fn tasks(&self, list_id: u64) -> Result<Vec<Task>, ApiError> {
        debug!(list_id, "tasks: called");
        self.send(self.request(Method::GET, &format!("checklists/{list_id}/tasks.json")))
            .await
    }

    async fn create_task(&self, task: &NewTask, list_id: u64) -> Result<Task, ApiError> {
        debug!(list_id, ?task, "create_task: called");
        let request = self
            .request(Method::POST, &format!("checklists/{list_id}/tasks.json"))
            .json(task);
        self.send(request).await
    }

    async fn delete_task(&self, task_id: u64, list_id: u64) -> Result<(), ApiError> {
        debug!(task_id, list_id, "delete_task: called");
        let request = self.request(Method::DELETE, &format!("checklists/{list_id}/tasks/{task_id}.json"));
        self.send_raw(request).await.map(|_| ())
    }

    async fn notes(&self, task: TaskRef) -> Result<Vec<Note>, ApiError> {
        debug!(?task, "notes: called");
        let path = format!("checklists/{}/tasks/{}/comments.json", task.checklist_id, task.id);
        self.send(self.request(Method::GET, &path)).await
    }

    async fn create_note(&self, comment: &str, task: TaskRef) -> Result<Note, ApiError> {
        debug!(?task, comment_len = comment.len(), "create_note: called");
        let path = format!("checklists/{}/tasks/{}/comments.json", task.checklist_id, task.id);
        let request = self
            .request(Method::POST, &path)
            .json(&serde_json::json!({ "comment": comment }));
        self.send(request).await
    }
}
