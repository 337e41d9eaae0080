//! Canonical serialization and digest of blocks.
//!
//! The canonical form is compact JSON with object keys sorted
//! lexicographically at every level. Key order is imposed here rather than
//! inherited from whatever map type `serde_json` happens to be built with.

use serde_json::Value;
use sha2::{Digest, Sha256};

use super::Block;

/// SHA-256 of the block's canonical form, as 64 lowercase hex chars.
pub fn digest(block: &Block) -> String {
    sha256_hex(canonical_json(block).as_bytes())
}

/// Canonical JSON text of a block.
pub fn canonical_json(block: &Block) -> String {
    let value = serde_json::to_value(block).expect("block is plain JSON data");
    let mut out = String::new();
    write_canonical(&value, &mut out);
    out
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, val)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(val, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        // Scalars: serde_json handles escaping and number formatting.
        scalar => out.push_str(&scalar.to_string()),
    }
}
