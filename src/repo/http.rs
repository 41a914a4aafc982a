//! HTTP repository over the hosted JSON document-store API.
//!
//! Documents live under `{base_url}/{collection}`:
//!
//! - `GET    {base_url}/{collection}` -> JSON array of task documents
//! - `POST   {base_url}/{collection}` -> `{"id": "<assigned key>"}`
//! - `PATCH  {base_url}/{collection}/{id}` -> merges fields into a document
//! - `DELETE {base_url}/{collection}/{id}`
//!
//! Blobs are stored with `PUT {blob_base}/{path}` returning `{"url": ...}`.
//! A bearer token from the config is attached to every request when set.

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::repo::{attachment_path, TaskRepository};
use crate::task::{Task, TaskDraft, TaskPatch};

/// Task repository backed by the remote document and blob stores
#[derive(Debug, Clone)]
pub struct HttpTaskRepository {
    client: Client,
    config: StoreConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewDocument<'a> {
    #[serde(flatten)]
    draft: &'a TaskDraft,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CreatedResponse {
    id: String,
}

#[derive(Serialize)]
struct IdField<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

impl HttpTaskRepository {
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.collection
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    fn blob_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.blob_base().trim_end_matches('/'), path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map a non-success status to the operation's error class, carrying the
    /// response body in the message. 404 becomes `NotFound` when an id is in
    /// play.
    async fn check_status(
        response: Response,
        id: Option<&str>,
        wrap: fn(String) -> Error,
    ) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(Error::NotFound(id.to_string()));
            }
        }
        let body = response.text().await.unwrap_or_default();
        Err(wrap(format!("{status}: {body}")))
    }
}

#[async_trait::async_trait]
impl TaskRepository for HttpTaskRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let url = self.collection_url();
        debug!(%url, "listing tasks");
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|err| Error::Fetch(err.to_string()))?;
        let response = Self::check_status(response, None, Error::Fetch).await?;
        let tasks = response
            .json::<Vec<Task>>()
            .await
            .map_err(|err| Error::Fetch(err.to_string()))?;
        debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<String> {
        draft.validate()?;
        let url = self.collection_url();
        let document = NewDocument {
            draft,
            created_at: Utc::now(),
        };
        let response = self
            .authorized(self.client.post(&url))
            .json(&document)
            .send()
            .await
            .map_err(|err| Error::Write(err.to_string()))?;
        let response = Self::check_status(response, None, Error::Write).await?;
        let created: CreatedResponse = response
            .json()
            .await
            .map_err(|err| Error::Write(err.to_string()))?;

        // The stored document carries a self-referential id field duplicating
        // the document key, written with a follow-up patch once the key is
        // assigned.
        let id_url = self.document_url(&created.id);
        let response = self
            .authorized(self.client.patch(&id_url))
            .json(&IdField { id: &created.id })
            .send()
            .await
            .map_err(|err| Error::Write(err.to_string()))?;
        Self::check_status(response, Some(&created.id), Error::Write).await?;

        debug!(id = %created.id, "created task");
        Ok(created.id)
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<()> {
        let url = self.document_url(id);
        let response = self
            .authorized(self.client.patch(&url))
            .json(patch)
            .send()
            .await
            .map_err(|err| Error::Write(err.to_string()))?;
        Self::check_status(response, Some(id), Error::Write).await?;
        debug!(%id, "updated task");
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        let url = self.document_url(id);
        let response = self
            .authorized(self.client.delete(&url))
            .send()
            .await
            .map_err(|err| Error::Write(err.to_string()))?;
        Self::check_status(response, Some(id), Error::Write).await?;
        debug!(%id, "deleted task");
        Ok(())
    }

    async fn upload_attachment(&self, name: &str, bytes: Vec<u8>) -> Result<String> {
        let path = attachment_path(name);
        let url = self.blob_url(&path);
        debug!(%path, size = bytes.len(), "uploading attachment");
        let response = self
            .authorized(self.client.put(&url))
            .body(bytes)
            .send()
            .await
            .map_err(|err| Error::Upload(err.to_string()))?;
        let response = Self::check_status(response, None, Error::Upload).await?;
        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|err| Error::Upload(err.to_string()))?;
        Ok(uploaded.url)
    }
}
