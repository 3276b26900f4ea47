//! Off-chain metadata document

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveredPost;
use crate::error::MinterResult;
use crate::storage::gateway_url;

/// Fixed name of the temporary metadata file, overwritten on every post
pub const METADATA_FILE_NAME: &str = "temp_metadata.json";

pub const SOURCE_TRAIT: &str = "source";
pub const SOURCE_VALUE: &str = "tweet";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

/// JSON document the on-chain URI points at
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub name: String,
    pub description: String,
    pub image: String,
    pub external_url: String,
    pub attributes: Vec<Attribute>,
}

impl MetadataDocument {
    pub fn new(name: &str, description: &str, image_cid: &str, external_url: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            image: gateway_url(image_cid),
            external_url: external_url.to_string(),
            attributes: vec![Attribute {
                trait_type: SOURCE_TRAIT.to_string(),
                value: SOURCE_VALUE.to_string(),
            }],
        }
    }
}

/// Description shown for a minted post
pub fn describe_post(post: &DiscoveredPost) -> String {
    format!("{}\nMinted from tweet: {}", post.caption_text, post.post_url)
}

/// Write the metadata document to `dir/temp_metadata.json` and return its path.
///
/// The file name is fixed, so only one pipeline may use a directory at a time.
pub fn create_metadata_json(
    dir: &Path,
    name: &str,
    description: &str,
    image_cid: &str,
    external_url: &str,
) -> MinterResult<PathBuf> {
    let document = MetadataDocument::new(name, description, image_cid, external_url);
    let path = dir.join(METADATA_FILE_NAME);
    fs::write(&path, serde_json::to_vec(&document)?)?;
    Ok(path)
}
