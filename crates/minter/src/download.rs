//! Image retrieval

use std::{fs, path::Path};

use tracing::debug;

use crate::error::{MinterError, MinterResult};
use crate::http::ByteFetcher;

/// Download `url` into `path`. The whole body is buffered before writing.
pub fn download_image(fetcher: &dyn ByteFetcher, url: &str, path: &Path) -> MinterResult<()> {
    let response = fetcher
        .fetch_bytes(url)
        .map_err(|e| MinterError::DownloadError {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if !response.is_success() {
        return Err(MinterError::DownloadError {
            url: url.to_string(),
            reason: format!("status {}", response.status),
        });
    }

    fs::write(path, &response.body)?;
    debug!(url, path = %path.display(), bytes = response.body.len(), "image saved");
    Ok(())
}
