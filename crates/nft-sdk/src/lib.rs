//! NFT minting SDK
//!
//! Client-side building blocks for creating one-of-one tokens on Solana:
//! - Metadata account derivation
//! - Byte-exact `CreateMetadataAccountV3` payload encoding
//! - The six-instruction mint transaction
//! - A blocking JSON-RPC helper
pub mod core;
pub mod instructions;
pub mod prelude;
pub mod protocol;
pub mod rpc;

pub use crate::core::*;
pub use instructions::{mint_nft, mint_nft_instructions, MintOutcome, NftMintParams};
pub use rpc::{ChainRpc, RpcHelper};
