//! Writes generation payloads to disk.

use std::path::Path;

use bytes::Bytes;

use crate::errors::ProbeError;

/// Writes the response body to `path` verbatim. The file on disk is
/// byte-for-byte the payload the service returned.
pub async fn persist(path: &Path, body: &Bytes) -> Result<(), ProbeError> {
    tokio::fs::write(path, body)
        .await
        .map_err(|source| ProbeError::Persistence {
            path: path.to_path_buf(),
            source,
        })
}
