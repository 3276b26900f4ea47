//! Content publication to NFT.Storage

use std::{fs, path::Path};

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{MinterError, MinterResult};

pub const NFT_STORAGE_UPLOAD_URL: &str = "https://api.nft.storage/upload";
pub const IPFS_GATEWAY_URL: &str = "https://nftstorage.link/ipfs";

/// Store raw bytes and return the service's response envelope
pub trait ContentStore {
    fn store(&self, bytes: Vec<u8>) -> MinterResult<Value>;
}

pub struct NftStorageClient {
    api_key: String,
    endpoint: String,
    agent: ureq::Agent,
}

impl NftStorageClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            endpoint: NFT_STORAGE_UPLOAD_URL.to_string(),
            agent: ureq::Agent::new(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

impl ContentStore for NftStorageClient {
    fn store(&self, bytes: Vec<u8>) -> MinterResult<Value> {
        debug!(endpoint = %self.endpoint, bytes = bytes.len(), "uploading");

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/octet-stream")
            .send_bytes(&bytes)
            .map_err(|e| match e {
                ureq::Error::Status(code, response) => MinterError::storage(format!(
                    "upload rejected with status {}: {}",
                    code,
                    response.into_string().unwrap_or_default()
                )),
                other => MinterError::storage(format!("upload failed: {}", other)),
            })?;

        response
            .into_json()
            .map_err(|e| MinterError::storage(format!("unreadable upload response: {}", e)))
    }
}

/// Pull `value.cid` out of a store response
pub fn extract_cid(envelope: &Value) -> MinterResult<String> {
    envelope["value"]["cid"]
        .as_str()
        .filter(|cid| !cid.is_empty())
        .map(str::to_string)
        .ok_or_else(|| MinterError::storage(format!("response has no value.cid: {}", envelope)))
}

/// Public gateway URL for a CID
pub fn gateway_url(cid: &str) -> String {
    format!("{}/{}", IPFS_GATEWAY_URL, cid)
}

/// Upload the image at `path`; the file is left in place
pub fn upload_image(store: &dyn ContentStore, path: &Path) -> MinterResult<String> {
    let cid = upload_file(store, path)?;
    info!(%cid, path = %path.display(), "image uploaded");
    Ok(cid)
}

/// Upload the metadata file at `path` and delete it once the upload succeeded.
///
/// On failure the file stays behind for inspection.
pub fn upload_metadata(store: &dyn ContentStore, path: &Path) -> MinterResult<String> {
    let cid = upload_file(store, path)?;
    fs::remove_file(path)?;
    info!(%cid, "metadata uploaded");
    Ok(cid)
}

fn upload_file(store: &dyn ContentStore, path: &Path) -> MinterResult<String> {
    let bytes = fs::read(path)?;
    let envelope = store.store(bytes)?;
    extract_cid(&envelope)
}
