//! Service contracts consumed by the mapping editor.
//!
//! Every external call the editor makes goes through [`CatalogService`], so
//! the model container never depends on a concrete transport. The production
//! implementation is [`crate::api::GovernanceClient`]; tests substitute an
//! in-memory stub.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{
    DatabaseDetails, NameCheck, RawField, SyncModelDetail, SyncModelPayload, TypeMapRequest,
    TypeMapResponse,
};

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Table names available on a data source
    async fn get_forms_from_datasource(&self, datasource_id: &str) -> Result<Vec<String>>;

    /// Raw column list for one table, with type descriptors
    async fn get_data_form_fields(
        &self,
        table_name: &str,
        datasource_id: &str,
    ) -> Result<Vec<RawField>>;

    /// Data-source identity for display
    async fn get_database_details(&self, datasource_id: &str) -> Result<DatabaseDetails>;

    /// Per-field type translation between two engine type systems
    async fn get_connector_type_map(&self, request: TypeMapRequest) -> Result<TypeMapResponse>;

    /// Uniqueness check for a target table name within a data source
    async fn check_table_name(&self, name: &str, datasource_id: &str) -> Result<NameCheck>;

    /// Uniqueness check for a sync model name
    async fn check_model_name(&self, name: &str) -> Result<NameCheck>;

    async fn get_sync_model_detail(&self, id: &str) -> Result<SyncModelDetail>;

    async fn create_sync_model(&self, payload: &SyncModelPayload) -> Result<String>;

    async fn update_sync_model(&self, id: &str, payload: &SyncModelPayload) -> Result<()>;

    /// Trigger an immediate synchronization run for a persisted model
    async fn execute_sync_model(&self, id: &str) -> Result<()>;
}
