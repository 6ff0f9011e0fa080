//! Point-lookup routes
//!
//! Three lookups over the live dataset: tail number, hexadecimal ICAO
//! aircraft address, integer ICAO aircraft address. Each key is
//! validated against its shape pattern before the store is queried.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use regex::Regex;
use serde_json::Value;

use crate::store::{CollectionStore, Document};

use super::errors::{ApiError, ApiResult};

/// Shared state for the lookup handlers.
pub struct LookupState {
    store: Arc<dyn CollectionStore>,
    collection: String,
    tail_number: Regex,
    icao_hex: Regex,
    icao_int: Regex,
}

impl LookupState {
    pub fn new(
        store: Arc<dyn CollectionStore>,
        collection: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            store,
            collection: collection.into(),
            tail_number: Regex::new("^N[0-9A-Z]+$")?,
            icao_hex: Regex::new("^[0-9A-F]{6}$")?,
            icao_int: Regex::new("^[0-9]+$")?,
        })
    }

    fn find(&self, field: &str, value: &Value) -> ApiResult<Vec<Document>> {
        Ok(self.store.find_eq(&self.collection, field, value)?)
    }
}

/// Build the lookup router.
pub fn lookup_routes(state: Arc<LookupState>) -> Router {
    Router::new()
        .route("/tail-number/:tail", get(search_by_tail_number))
        .route("/icao-hex/:addr", get(search_by_icao_hex))
        .route("/icao-int/:addr", get(search_by_icao_int))
        .with_state(state)
}

async fn search_by_tail_number(
    State(state): State<Arc<LookupState>>,
    Path(tail): Path<String>,
) -> ApiResult<Json<Vec<Document>>> {
    let tail = tail.to_uppercase();
    if !state.tail_number.is_match(&tail) {
        return Err(ApiError::InvalidFormat(
            "US aircraft tail numbers begin with N followed by digits and uppercase letters"
                .to_string(),
        ));
    }

    let records = state.find("n-number", &Value::String(tail))?;
    if records.is_empty() {
        return Err(ApiError::NotFound(
            "the tail number was not found in the aircraft registry".to_string(),
        ));
    }
    Ok(Json(records))
}

async fn search_by_icao_hex(
    State(state): State<Arc<LookupState>>,
    Path(addr): Path<String>,
) -> ApiResult<Json<Vec<Document>>> {
    let addr = addr.to_uppercase();
    if !state.icao_hex.is_match(&addr) {
        return Err(ApiError::InvalidFormat(
            "hexadecimal ICAO aircraft addresses are exactly 6 characters of 0-9 and A-F"
                .to_string(),
        ));
    }

    let records = state.find("mode-s-code-hex", &Value::String(addr))?;
    if records.is_empty() {
        return Err(ApiError::NotFound(
            "the ICAO address was not found in the aircraft registry".to_string(),
        ));
    }
    Ok(Json(records))
}

async fn search_by_icao_int(
    State(state): State<Arc<LookupState>>,
    Path(addr): Path<String>,
) -> ApiResult<Json<Vec<Document>>> {
    let parsed: u64 = match addr.parse() {
        Ok(n) if state.icao_int.is_match(&addr) => n,
        _ => {
            return Err(ApiError::InvalidFormat(
                "integer ICAO aircraft addresses are a non-negative decimal number".to_string(),
            ))
        }
    };

    let records = state.find("mode-s-code", &Value::Number(parsed.into()))?;
    if records.is_empty() {
        return Err(ApiError::NotFound(
            "the ICAO address was not found in the aircraft registry".to_string(),
        ));
    }
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn state_with(store: Arc<MemoryStore>) -> Arc<LookupState> {
        Arc::new(LookupState::new(store, "aircraft-registered").unwrap())
    }

    fn doc(field: &str, value: Value) -> Document {
        let mut d = Document::new();
        d.insert(field.to_string(), value);
        d
    }

    #[test]
    fn test_tail_number_pattern() {
        let state = state_with(Arc::new(MemoryStore::new()));
        assert!(state.tail_number.is_match("N12345"));
        assert!(state.tail_number.is_match("N1A"));
        assert!(!state.tail_number.is_match("12345"));
        assert!(!state.tail_number.is_match("N"));
        assert!(!state.tail_number.is_match("N-123"));
    }

    #[test]
    fn test_icao_hex_pattern() {
        let state = state_with(Arc::new(MemoryStore::new()));
        assert!(state.icao_hex.is_match("A1B2C3"));
        assert!(state.icao_hex.is_match("000001"));
        assert!(!state.icao_hex.is_match("A1B2C"));
        assert!(!state.icao_hex.is_match("A1B2C3D"));
        // Not hex: G through Z are rejected even though uppercase.
        assert!(!state.icao_hex.is_match("A1B2GZ"));
    }

    #[test]
    fn test_icao_int_pattern() {
        let state = state_with(Arc::new(MemoryStore::new()));
        assert!(state.icao_int.is_match("52017985"));
        assert!(state.icao_int.is_match("0"));
        assert!(!state.icao_int.is_match("-1"));
        assert!(!state.icao_int.is_match("A1B2C3"));
    }

    #[tokio::test]
    async fn test_tail_number_lookup_found() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert("aircraft-registered", doc("n-number", json!("N12345")))
            .unwrap();

        let result = search_by_tail_number(
            State(state_with(store)),
            Path("n12345".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(result.0.len(), 1);
        assert_eq!(result.0[0].get("n-number"), Some(&json!("N12345")));
    }

    #[tokio::test]
    async fn test_tail_number_lookup_not_found() {
        let store = Arc::new(MemoryStore::new());
        let err = search_by_tail_number(
            State(state_with(store)),
            Path("N99999".to_string()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_tail_number_rejected() {
        let store = Arc::new(MemoryStore::new());
        let err = search_by_tail_number(
            State(state_with(store)),
            Path("12345".to_string()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::InvalidFormat(_)));
    }

    #[tokio::test]
    async fn test_icao_int_lookup_matches_number_field() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert("aircraft-registered", doc("mode-s-code", json!(52017985)))
            .unwrap();

        let result = search_by_icao_int(
            State(state_with(store)),
            Path("52017985".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(result.0.len(), 1);
    }

    #[tokio::test]
    async fn test_icao_hex_lowercase_input_accepted() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(
                "aircraft-registered",
                doc("mode-s-code-hex", json!("A1B2C3")),
            )
            .unwrap();

        let result = search_by_icao_hex(
            State(state_with(store)),
            Path("a1b2c3".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(result.0.len(), 1);
    }
}
