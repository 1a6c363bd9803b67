use thiserror::Error;
use tracing::{debug, instrument};

use crate::filter::TaskFilters;
use crate::task::Task;

pub const API_BASE_PATH: &str = "/api/v1/tasks";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed without a response: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("task {id} not found")]
    NotFound { id: u64 },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// The five CRUD calls against the task backend. Stateless: pure
/// request/response translation, no caching, no retries; failures are
/// surfaced to the caller unchanged.
#[allow(async_fn_in_trait)]
pub trait TaskApi {
    async fn list_tasks(&self, filters: &TaskFilters) -> ApiResult<Vec<Task>>;
    async fn get_task(&self, id: u64) -> ApiResult<Task>;
    async fn create_task(&self, draft: &Task) -> ApiResult<Task>;
    async fn update_task(&self, id: u64, task: &Task) -> ApiResult<Task>;
    async fn delete_task(&self, id: u64) -> ApiResult<()>;
}

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, API_BASE_PATH)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}{}/{id}", self.base_url, API_BASE_PATH)
    }
}

async fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), body_len = body.len(), "request rejected by server");
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

impl TaskApi for HttpTaskApi {
    #[instrument(skip(self, filters))]
    async fn list_tasks(&self, filters: &TaskFilters) -> ApiResult<Vec<Task>> {
        let pairs = filters.to_query_pairs();
        debug!(params = pairs.len(), "listing tasks");
        let response = self
            .client
            .get(self.collection_url())
            .query(&pairs)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    async fn get_task(&self, id: u64) -> ApiResult<Task> {
        let response = self.client.get(self.item_url(id)).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound { id });
        }
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, draft), fields(title_len = draft.title.len()))]
    async fn create_task(&self, draft: &Task) -> ApiResult<Task> {
        let response = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, task))]
    async fn update_task(&self, id: u64, task: &Task) -> ApiResult<Task> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(task)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    async fn delete_task(&self, id: u64) -> ApiResult<()> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::HttpTaskApi;

    #[test]
    fn urls_join_base_path_without_doubled_slashes() {
        let api = HttpTaskApi::new("http://localhost:8080/");
        assert_eq!(api.collection_url(), "http://localhost:8080/api/v1/tasks");
        assert_eq!(api.item_url(42), "http://localhost:8080/api/v1/tasks/42");
    }
}
