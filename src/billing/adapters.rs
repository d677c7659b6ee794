use serde_json::{json, Value};

/// key: billing-adapter -> stubbed ledger surface
///
/// There is no billing ledger behind these; they keep the routes answering with
/// a stable shape until one exists.
pub fn billing_history_stub() -> Value {
    json!({
        "invoices": [],
        "integration": "stubbed",
    })
}

pub fn billing_sync_stub(metadata: Value) -> Value {
    let mut stub = json_stub("billing_sync", metadata);
    stub["synced"] = json!(false);
    stub
}

fn json_stub(kind: &str, metadata: Value) -> Value {
    json!({
        "kind": kind,
        "metadata": metadata,
        "integration": "stubbed",
    })
}
