use std::sync::OnceLock;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::registry::ProtocolRegistry;

static REGISTRY: OnceLock<Result<ProtocolRegistry, String>> = OnceLock::new();

fn registry() -> Result<&'static ProtocolRegistry, &'static str> {
    REGISTRY
        .get_or_init(|| ProtocolRegistry::build().map_err(|e| e.to_string()))
        .as_ref()
        .map_err(String::as_str)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

fn error_result(msg: &str) -> JsValue {
    to_js(&serde_json::json!({"error": msg}))
}

/// Resolve a program error code. Returns `null` when neither tier knows it.
#[wasm_bindgen]
pub fn resolve_error(program_id: &str, code: u32) -> JsValue {
    match registry() {
        Ok(registry) => registry
            .resolve(program_id, code)
            .map_or(JsValue::NULL, |resolved| to_js(&resolved)),
        Err(e) => error_result(e),
    }
}

/// Resolve the first custom program error found in transaction logs.
#[wasm_bindgen]
pub fn resolve_logs(logs: Vec<String>) -> JsValue {
    match registry() {
        Ok(registry) => registry
            .resolve_log_failure(logs.as_slice())
            .map_or(JsValue::NULL, |resolved| to_js(&resolved)),
        Err(e) => error_result(e),
    }
}

/// Free-text search across every protocol: `[{protocol, error}]`.
#[wasm_bindgen]
pub fn search_errors(query: &str) -> JsValue {
    let registry = match registry() {
        Ok(registry) => registry,
        Err(e) => return error_result(e),
    };
    let hits: Vec<serde_json::Value> = registry
        .search(query)
        .into_iter()
        .map(|hit| {
            serde_json::json!({
                "protocol": hit.protocol.name(),
                "programId": hit.protocol.program_id(),
                "error": hit.error,
            })
        })
        .collect();
    to_js(&hits)
}

/// Metadata of every registered protocol.
#[wasm_bindgen]
pub fn list_protocols() -> JsValue {
    match registry() {
        Ok(registry) => to_js(&registry.list_metadata()),
        Err(e) => error_result(e),
    }
}

#[wasm_bindgen]
pub fn total_error_count() -> usize {
    registry().map_or(0, ProtocolRegistry::total_error_count)
}
