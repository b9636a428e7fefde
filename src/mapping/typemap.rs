//! Column type parsing and cross-engine type translation.
//!
//! Raw column descriptors (`"varchar(255)"`, `"decimal(10,2)"`) are parsed
//! into a semantic type with optional length/precision. Translation asks the
//! connector type-map service for the target engine's equivalent of every
//! field, and in parallel for the virtual query engine's equivalent, which is
//! kept alongside the real type for search and display.

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::api::models::{TypeMapEntry, TypeMapField, TypeMapRequest};
use crate::api::CatalogService;

use super::models::{Field, UNDEFINED_TYPE};

/// Engine identifier of the virtual query layer every model is also
/// translated into
pub const VIRTUAL_ENGINE: &str = "presto";

/// Parsed form of a raw column type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedType {
    pub type_name: String,
    pub length: Option<u32>,
    pub precision: Option<u32>,
}

/// Split a raw descriptor into `{type, length, precision}`.
///
/// Anything after the first space is dropped (`"int unsigned"` -> `"int"`).
/// A single bracketed number is a length; two comma-separated numbers are
/// length and precision. Unparseable refinements leave both as `None`.
pub fn parse_type_descriptor(raw: &str) -> ParsedType {
    let (before, refinement) = match raw.split_once('(') {
        Some((before, rest)) => {
            let inner = rest.split_once(')').map(|(inner, _)| inner).unwrap_or(rest);
            (before, inner.trim())
        }
        None => (raw, ""),
    };

    let type_name = before.split_whitespace().next().unwrap_or("");
    if type_name.is_empty() {
        return ParsedType::default();
    }

    let mut parsed = ParsedType {
        type_name: type_name.to_string(),
        length: None,
        precision: None,
    };

    if refinement.is_empty() {
        return parsed;
    }

    match refinement.split_once(',') {
        Some((len, prec)) => {
            parsed.length = len.trim().parse().ok();
            parsed.precision = prec.trim().parse().ok();
        }
        None => {
            parsed.length = refinement.trim().parse().ok();
        }
    }

    parsed
}

fn build_request(fields: &[Field], source_engine: &str, target_engine: &str) -> TypeMapRequest {
    TypeMapRequest {
        source_engine: source_engine.to_string(),
        target_engine: target_engine.to_string(),
        fields: fields
            .iter()
            .map(|field| TypeMapField {
                index: field.index_id,
                source_type_name: field.type_name.clone(),
                precision: field.length,
                decimal_digits: field.precision,
            })
            .collect(),
    }
}

fn entries_by_index(entries: Vec<TypeMapEntry>) -> HashMap<u32, TypeMapEntry> {
    entries.into_iter().map(|e| (e.index, e)).collect()
}

/// Translate `fields` from `source_engine` into `target_engine`.
///
/// Issues the real-engine and virtual-engine requests together and awaits
/// both; if either fails the whole translation fails and the caller's field
/// list stays untouched. A field without a real-engine translation comes back
/// as `unmapped` with type `"undefined"`, which is a terminal state the user
/// must acknowledge, not an error.
pub async fn translate_fields(
    service: &dyn CatalogService,
    fields: &[Field],
    source_engine: &str,
    target_engine: &str,
) -> Result<Vec<Field>> {
    if fields.is_empty() {
        return Ok(Vec::new());
    }

    let real_request = build_request(fields, source_engine, target_engine);
    let virtual_request = build_request(fields, source_engine, VIRTUAL_ENGINE);

    let (real, vql) = tokio::try_join!(
        service.get_connector_type_map(real_request),
        service.get_connector_type_map(virtual_request)
    )
    .with_context(|| format!("Type translation {} -> {} failed", source_engine, target_engine))?;

    let real = entries_by_index(real.entries);
    let vql = entries_by_index(vql.entries);

    let translated = fields
        .iter()
        .map(|field| {
            let mut out = field.clone();
            out.virtual_type = vql
                .get(&field.index_id)
                .and_then(|e| e.target_type_name.clone());

            match real.get(&field.index_id).and_then(|e| {
                e.target_type_name
                    .as_ref()
                    .filter(|name| !name.is_empty())
                    .map(|name| (name.clone(), e.precision, e.decimal_digits))
            }) {
                Some((type_name, length, precision)) => {
                    out.type_name = type_name;
                    out.length = length;
                    out.precision = precision;
                    out.unmapped = false;
                }
                None => {
                    out.type_name = UNDEFINED_TYPE.to_string();
                    out.length = None;
                    out.precision = None;
                    out.unmapped = true;
                }
            }
            out
        })
        .collect::<Vec<_>>();

    let unmapped = translated.iter().filter(|f| f.unmapped).count();
    if unmapped > 0 {
        log::info!(
            "Type translation {} -> {}: {} of {} fields have no valid target type",
            source_engine,
            target_engine,
            unmapped,
            translated.len()
        );
    }

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_length_refinement() {
        assert_eq!(
            parse_type_descriptor("varchar(255)"),
            ParsedType {
                type_name: "varchar".to_string(),
                length: Some(255),
                precision: None,
            }
        );
    }

    #[test]
    fn parses_length_and_precision() {
        assert_eq!(
            parse_type_descriptor("decimal(10,2)"),
            ParsedType {
                type_name: "decimal".to_string(),
                length: Some(10),
                precision: Some(2),
            }
        );
    }

    #[test]
    fn empty_descriptor_yields_empty_type() {
        assert_eq!(
            parse_type_descriptor(""),
            ParsedType {
                type_name: String::new(),
                length: None,
                precision: None,
            }
        );
    }

    #[test]
    fn drops_trailing_modifiers() {
        assert_eq!(
            parse_type_descriptor("int unsigned"),
            ParsedType {
                type_name: "int".to_string(),
                length: None,
                precision: None,
            }
        );
        assert_eq!(
            parse_type_descriptor("decimal(8, 3) zerofill"),
            ParsedType {
                type_name: "decimal".to_string(),
                length: Some(8),
                precision: Some(3),
            }
        );
    }

    #[test]
    fn unparseable_refinement_is_ignored() {
        assert_eq!(
            parse_type_descriptor("enum(a,b)"),
            ParsedType {
                type_name: "enum".to_string(),
                length: None,
                precision: None,
            }
        );
    }
}
