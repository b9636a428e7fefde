//! Async preparation of table configurations and name checks.
//!
//! These helpers do the awaiting so the container never holds state across a
//! suspension point: the caller takes an epoch from
//! [`State::begin_configure`](super::State::begin_configure), runs a prepare
//! function, and feeds the resulting [`Msg`] back through the update loop,
//! where stale epochs are dropped.

use anyhow::Result;

use crate::api::CatalogService;

use super::models::{Field, FormInfo};
use super::typemap::translate_fields;
use super::Msg;

/// Fetch the field list for a newly selected source table.
///
/// When a target table is already configured its field list is re-derived by
/// translating the fresh source fields into the target engine, so previously
/// mapped target fields keep valid types.
pub async fn prepare_source(
    service: &dyn CatalogService,
    info: FormInfo,
    target_engine: Option<String>,
    epoch: u64,
) -> Msg {
    match load_source(service, &info, target_engine.as_deref()).await {
        Ok((fields, translated_target)) => Msg::SourceTableConfigured {
            info,
            fields,
            translated_target,
            epoch,
        },
        Err(e) => {
            log::error!("Failed to configure source table {}: {:#}", info.name, e);
            Msg::ConfigureFailed {
                error: format!("{:#}", e),
                epoch,
            }
        }
    }
}

async fn load_source(
    service: &dyn CatalogService,
    info: &FormInfo,
    target_engine: Option<&str>,
) -> Result<(Vec<Field>, Option<Vec<Field>>)> {
    let raw = service
        .get_data_form_fields(&info.name, &info.datasource_id)
        .await?;
    let fields: Vec<Field> = raw
        .iter()
        .enumerate()
        .map(|(i, r)| Field::from_raw(i as u32, r))
        .collect();

    let translated = match target_engine {
        Some(engine) => {
            Some(translate_fields(service, &fields, &info.database_type, engine).await?)
        }
        None => None,
    };

    Ok((fields, translated))
}

/// Configure the target table: it inherits the current source fields
/// translated into the new target engine's type system.
pub async fn prepare_target(
    service: &dyn CatalogService,
    info: FormInfo,
    source_fields: Vec<Field>,
    source_engine: String,
    epoch: u64,
) -> Msg {
    match translate_fields(service, &source_fields, &source_engine, &info.database_type).await {
        Ok(fields) => Msg::TargetTableConfigured { info, fields, epoch },
        Err(e) => {
            log::error!("Failed to configure target table {}: {:#}", info.name, e);
            Msg::ConfigureFailed {
                error: format!("{:#}", e),
                epoch,
            }
        }
    }
}

/// Async form validator for target table names. Fails open: a broken check
/// endpoint must not block editing.
pub async fn table_name_available(
    service: &dyn CatalogService,
    name: &str,
    datasource_id: &str,
) -> bool {
    match service.check_table_name(name, datasource_id).await {
        Ok(check) => !check.repeat,
        Err(e) => {
            log::warn!("Table name check failed, treating \"{}\" as available: {}", name, e);
            true
        }
    }
}

/// Async form validator for sync model names, same fail-open behavior
pub async fn model_name_available(service: &dyn CatalogService, name: &str) -> bool {
    match service.check_model_name(name).await {
        Ok(check) => !check.repeat,
        Err(e) => {
            log::warn!("Model name check failed, treating \"{}\" as available: {}", name, e);
            true
        }
    }
}
