pub mod config;
pub mod discovery;
pub mod download;
pub mod error;
pub mod http;
pub mod metadata;
pub mod pipeline;
pub mod report;
pub mod storage;

pub use config::MinterConfig;
pub use discovery::DiscoveredPost;
pub use error::{MinterError, MinterResult};
pub use http::{ByteFetcher, HttpResponse, PageFetcher, TransportError, UreqHttp};
pub use metadata::MetadataDocument;
pub use pipeline::{MintedPost, Pipeline, MAX_POSTS};
pub use storage::{ContentStore, NftStorageClient};
