use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use nft_sdk::DEFAULT_RPC_URL;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};

use crate::error::{MinterError, MinterResult};

/// API key for the storage service
pub const NFT_STORAGE_KEY_VAR: &str = "NFT_STORAGE_KEY";
/// Path to the payer's keypair file
pub const SOLANA_KEYPAIR_VAR: &str = "SOLANA_KEYPAIR";
/// Optional RPC endpoint override
pub const SOLANA_RPC_VAR: &str = "SOLANA_RPC";

/// Process configuration, built once at startup and passed down by reference
#[derive(Clone)]
pub struct MinterConfig {
    /// Storage service API key
    pub nft_storage_key: String,

    /// Payer, mint authority and sole creator of every minted token
    pub payer: Arc<Keypair>,

    /// RPC endpoint URL
    pub rpc_url: String,

    /// Directory for temporary image and metadata files
    pub work_dir: PathBuf,
}

impl MinterConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> MinterResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    ///
    /// Only the keypair file is touched; nothing here goes over the network.
    pub fn from_lookup<F>(lookup: F) -> MinterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let nft_storage_key = get(NFT_STORAGE_KEY_VAR).ok_or_else(|| {
            MinterError::config(format!("{} environment variable not set", NFT_STORAGE_KEY_VAR))
        })?;

        let keypair_path = get(SOLANA_KEYPAIR_VAR).ok_or_else(|| {
            MinterError::config(format!("{} environment variable not set", SOLANA_KEYPAIR_VAR))
        })?;

        let rpc_url = get(SOLANA_RPC_VAR).unwrap_or_else(|| DEFAULT_RPC_URL.to_string());

        let payer = load_keypair(&keypair_path, lookup("HOME").as_deref())?;

        Ok(Self {
            nft_storage_key,
            payer: Arc::new(payer),
            rpc_url,
            work_dir: PathBuf::from("."),
        })
    }

    pub fn with_rpc_url(mut self, url: String) -> Self {
        self.rpc_url = url;
        self
    }

    pub fn with_work_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.work_dir = dir.as_ref().to_path_buf();
        self
    }
}

impl fmt::Debug for MinterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinterConfig")
            .field("nft_storage_key", &"<redacted>")
            .field("payer", &self.payer.pubkey())
            .field("rpc_url", &self.rpc_url)
            .field("work_dir", &self.work_dir)
            .finish()
    }
}

/// Load a keypair stored as a JSON array of secret key bytes, expanding a leading `~`
pub fn load_keypair(path: &str, home: Option<&str>) -> MinterResult<Keypair> {
    let expanded_path = match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) => format!("{}{}", home, rest),
        (Some(_), None) => {
            return Err(MinterError::config(
                "HOME environment variable not set, cannot expand keypair path",
            ))
        }
        (None, _) => path.to_string(),
    };

    read_keypair_file(&expanded_path).map_err(|e| {
        MinterError::config(format!(
            "Failed to load keypair from {}: {}",
            expanded_path, e
        ))
    })
}
