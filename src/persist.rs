//! Writing fetched payloads to disk

use crate::error::Result;
use crate::types::{Payload, PersistedArtifact};
use crate::utils::{sha256_hex, write_atomic};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Serialize a JSON tree with four-space indentation
pub fn to_pretty_json(value: &serde_json::Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Write `payload` to `folder/filename`
///
/// The folder is created if it does not exist yet. Text is written as-is, bytes are written
/// unchanged and JSON is re-serialized with stable indentation. The file only appears under
/// its final name once completely written.
pub async fn persist(
    folder: &Path,
    filename: &str,
    payload: &Payload,
) -> Result<PersistedArtifact> {
    tokio::fs::create_dir_all(folder).await.map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("failed to create folder '{}': {}", folder.display(), e),
        )
    })?;

    let path = folder.join(filename);

    let json;
    let contents: &[u8] = match payload {
        Payload::Text(text) => text.as_bytes(),
        Payload::Bytes(bytes) => bytes,
        Payload::Json(value) => {
            json = to_pretty_json(value)?;
            &json
        }
    };

    write_atomic(&path, contents).await?;

    let artifact = PersistedArtifact {
        path,
        size_bytes: contents.len() as u64,
        sha256: sha256_hex(contents),
    };

    info!(
        path = %artifact.path.display(),
        size_bytes = artifact.size_bytes,
        kind = payload.kind(),
        "artifact saved"
    );

    Ok(artifact)
}
