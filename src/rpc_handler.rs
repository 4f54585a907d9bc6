//! RPC method handler for the LinkStash JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method call to the list handle held by the
//! `App`.

use serde_json::{json, Value};

use crate::app::App;
use crate::services::url_validator::is_valid_url;

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Items ───
        "item.add" => {
            let text = params.get("text").and_then(|v| v.as_str()).ok_or("missing text")?;
            let item = app.list.add(text).await.map_err(|e| e.to_string())?;
            serde_json::to_value(item).map_err(|e| e.to_string())
        }
        "item.list" => {
            let items = app.list.items().await;
            serde_json::to_value(items).map_err(|e| e.to_string())
        }
        "item.delete" => {
            let id = params.get("id").and_then(|v| v.as_i64()).ok_or("missing id")?;
            let removed = app.list.remove(id).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "removed": removed}))
        }

        // ─── Quota ───
        "quota.get" => {
            let quota = app.list.quota().await;
            serde_json::to_value(quota).map_err(|e| e.to_string())
        }

        // ─── Helpers ───
        "url.check" => {
            let text = params.get("text").and_then(|v| v.as_str()).ok_or("missing text")?;
            Ok(json!({"valid": is_valid_url(text)}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
