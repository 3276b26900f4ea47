use solana_sdk::pubkey::Pubkey;

/// Metaplex token metadata program
pub const METADATA_PROGRAM_ID: Pubkey = mpl_token_metadata::ID;

/// Default RPC endpoint (public devnet)
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Seeds for derived addresses
pub mod seeds {
    pub const METADATA: &[u8] = b"metadata";
}

/// Size of an SPL token mint account
pub const MINT_ACCOUNT_LEN: usize = 82;

/// Indivisible units only
pub const NFT_DECIMALS: u8 = 0;

/// Amount minted before the mint authority is revoked
pub const NFT_SUPPLY: u64 = 1;

/// Royalty charged on secondary sales (5%)
pub const DEFAULT_SELLER_FEE_BASIS_POINTS: u16 = 500;

/// Creator share when the payer is the only creator
pub const SOLE_CREATOR_SHARE: u8 = 100;

/// Instruction discriminators of the metadata program
pub const CREATE_METADATA_ACCOUNT_V3_DISCRIMINATOR: u8 = 33;
