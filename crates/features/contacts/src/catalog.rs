//! Tag and list catalogs offered when creating a contact.

use crate::error::{FetchError, FetchErrorExt};
use csync_api::{ApiClient, ApiRequest};
use csync_domain::constants::endpoints;
use csync_domain::EntityRef;
use csync_domain::record::entity_ref;
use serde_json::Value;
use tracing::{debug, instrument};

#[instrument(skip_all)]
pub fn fetch_tags(client: &ApiClient) -> Result<Vec<EntityRef>, FetchError> {
    fetch_catalog(client, endpoints::TAGS)
}

#[instrument(skip_all)]
pub fn fetch_lists(client: &ApiClient) -> Result<Vec<EntityRef>, FetchError> {
    fetch_catalog(client, endpoints::LISTS)
}

fn fetch_catalog(client: &ApiClient, endpoint: &'static str) -> Result<Vec<EntityRef>, FetchError> {
    let response = client.send(ApiRequest::get(endpoint)).context(endpoint)?;
    if !response.is_success() {
        return Err(FetchError::Status {
            status: response.status,
            body: response.snippet(500),
            context: Some(endpoint.into()),
        });
    }

    let body = response.json().map_err(|e| FetchError::Malformed {
        message: format!("body is not JSON: {e}").into(),
        context: Some(endpoint.into()),
    })?;

    let entities = parse_entities(body, endpoint)?;
    debug!(endpoint, count = entities.len(), "catalog loaded");
    Ok(entities)
}

/// Accepts a bare array, `{data: [...]}` or `{<key>: [...]}` (e.g. `{tags: [...]}`).
///
/// Entries without a usable id are dropped; missing titles read as `"Unknown"`.
pub fn parse_entities(body: Value, key: &str) -> Result<Vec<EntityRef>, FetchError> {
    let entries = match body {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("data").or_else(|| object.remove(key)) {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(FetchError::malformed(format!(
                    "object body has neither `data` nor `{key}` array"
                )));
            },
        },
        _ => return Err(FetchError::malformed("expected an array or an object")),
    };

    Ok(entries.iter().filter_map(entity_ref).collect())
}
