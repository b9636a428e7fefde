//! Reqwest-backed implementation of [`CatalogService`] with connection pooling.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

use super::models::{
    DatabaseDetails, NameCheck, RawField, SyncModelDetail, SyncModelPayload, TypeMapRequest,
    TypeMapResponse,
};
use super::service::CatalogService;

/// Governance platform API client
#[derive(Clone)]
pub struct GovernanceClient {
    base_url: String,
    http_client: reqwest::Client,
    access_token: String,
}

impl GovernanceClient {
    pub fn new(base_url: String, access_token: String) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("sync-mapper/0.1")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            access_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed with status {}: {}", status, body);
        }
        response
            .json::<T>()
            .await
            .context("Failed to deserialize API response")
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        log::debug!("GET {}", path);
        let response = self
            .http_client
            .get(self.url(path))
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {} failed", path))?;
        Self::parse_response(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        log::debug!("POST {}", path);
        let response = self
            .http_client
            .post(self.url(path))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {} failed", path))?;
        Self::parse_response(response).await
    }

    async fn expect_no_content(response: reqwest::Response, what: &str) -> Result<()> {
        let status = response.status();
        if status.is_success() || status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("{} failed with status {}: {}", what, status, body);
    }
}

#[async_trait]
impl CatalogService for GovernanceClient {
    async fn get_forms_from_datasource(&self, datasource_id: &str) -> Result<Vec<String>> {
        self.get_json(&format!("/datasource/{}/forms", datasource_id), &[])
            .await
    }

    async fn get_data_form_fields(
        &self,
        table_name: &str,
        datasource_id: &str,
    ) -> Result<Vec<RawField>> {
        let fields: Vec<RawField> = self
            .get_json(
                &format!("/datasource/{}/fields", datasource_id),
                &[("table", table_name)],
            )
            .await?;
        log::info!(
            "Fetched {} fields for table {} on datasource {}",
            fields.len(),
            table_name,
            datasource_id
        );
        Ok(fields)
    }

    async fn get_database_details(&self, datasource_id: &str) -> Result<DatabaseDetails> {
        self.get_json(&format!("/datasource/{}", datasource_id), &[])
            .await
    }

    async fn get_connector_type_map(&self, request: TypeMapRequest) -> Result<TypeMapResponse> {
        let body = serde_json::to_value(&request).context("Failed to serialize type map request")?;
        let response: TypeMapResponse = self.post_json("/connector/type-map", &body).await?;
        log::debug!(
            "Type map {} -> {}: {} of {} fields translated",
            request.source_engine,
            request.target_engine,
            response.entries.len(),
            request.fields.len()
        );
        Ok(response)
    }

    async fn check_table_name(&self, name: &str, datasource_id: &str) -> Result<NameCheck> {
        self.post_json(
            "/table/check-name",
            &json!({ "name": name, "datasource_id": datasource_id }),
        )
        .await
    }

    async fn check_model_name(&self, name: &str) -> Result<NameCheck> {
        self.post_json("/sync-model/check-name", &json!({ "name": name }))
            .await
    }

    async fn get_sync_model_detail(&self, id: &str) -> Result<SyncModelDetail> {
        self.get_json(&format!("/sync-model/{}", id), &[]).await
    }

    async fn create_sync_model(&self, payload: &SyncModelPayload) -> Result<String> {
        #[derive(serde::Deserialize)]
        struct Created {
            id: String,
        }
        let body = serde_json::to_value(payload).context("Failed to serialize sync model")?;
        let created: Created = self.post_json("/sync-model", &body).await?;
        log::info!("Created sync model {}", created.id);
        Ok(created.id)
    }

    async fn update_sync_model(&self, id: &str, payload: &SyncModelPayload) -> Result<()> {
        let response = self
            .http_client
            .put(self.url(&format!("/sync-model/{}", id)))
            .bearer_auth(&self.access_token)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("PUT /sync-model/{} failed", id))?;
        Self::expect_no_content(response, "Sync model update").await
    }

    async fn execute_sync_model(&self, id: &str) -> Result<()> {
        let response = self
            .http_client
            .post(self.url(&format!("/sync-model/{}/execute", id)))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .with_context(|| format!("POST /sync-model/{}/execute failed", id))?;
        log::info!("Triggered sync run for model {}", id);
        Self::expect_no_content(response, "Sync execution").await
    }
}
