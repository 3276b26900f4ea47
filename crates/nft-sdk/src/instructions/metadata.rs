//! `CreateMetadataAccountV3` for the token metadata program
//!
//! Field order and option tags must match the program's Borsh layout exactly;
//! a single misplaced byte gets the whole transaction rejected.

use crate::prelude::*;
use solana_sdk::instruction::Instruction;

use crate::{
    core::{
        SdkResult, CREATE_METADATA_ACCOUNT_V3_DISCRIMINATOR, DEFAULT_SELLER_FEE_BASIS_POINTS,
        SOLE_CREATOR_SHARE,
    },
    impl_instruction,
    instructions::{InstructionBuilder, MetadataInstructionBuilder},
    protocol::metadata_address,
};

/// Royalty recipient
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Creator {
    pub address: [u8; 32],
    pub verified: bool,
    /// Percentage of royalties, all creators sum to 100
    pub share: u8,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    pub verified: bool,
    pub key: [u8; 32],
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Uses {
    pub use_method: u8,
    pub remaining: u64,
    pub total: u64,
}

/// Display metadata stored on-chain
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DataV2 {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub collection: Option<Collection>,
    pub uses: Option<Uses>,
}

impl DataV2 {
    /// Metadata for a one-of-one token with `creator` as the verified sole creator
    pub fn one_of_one(name: &str, symbol: &str, uri: &str, creator: &Pubkey) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            uri: uri.to_string(),
            seller_fee_basis_points: DEFAULT_SELLER_FEE_BASIS_POINTS,
            creators: Some(vec![Creator {
                address: creator.to_bytes(),
                verified: true,
                share: SOLE_CREATOR_SHARE,
            }]),
            collection: None,
            uses: None,
        }
    }
}

/// Arguments of `CreateMetadataAccountV3`
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateMetadataAccountArgsV3 {
    pub data: DataV2,
    pub is_mutable: bool,
    /// `None` for plain (non-collection) NFTs
    pub collection_details: Option<u8>,
}

impl_instruction!(
    CreateMetadataAccountArgsV3,
    CREATE_METADATA_ACCOUNT_V3_DISCRIMINATOR
);

/// Build the create-metadata instruction for `mint`.
///
/// The metadata account is derived from the mint, never supplied by the caller.
pub fn create_metadata_account_v3(
    mint: Pubkey,
    mint_authority: Pubkey,
    payer: Pubkey,
    update_authority: Pubkey,
    args: &CreateMetadataAccountArgsV3,
) -> SdkResult<Instruction> {
    let (metadata, _) = metadata_address(&mint);

    Ok(MetadataInstructionBuilder::new()
        .add_writable(metadata)
        .add_readonly(mint)
        .add_readonly_signer(mint_authority)
        .add_signer(payer)
        .add_readonly_signer(update_authority)
        .add_readonly(solana_sdk::system_program::id())
        .add_readonly(sysvar::rent::id())
        .with_data(args.build_data()?)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::METADATA_PROGRAM_ID;

    fn args(creator: &Pubkey) -> CreateMetadataAccountArgsV3 {
        CreateMetadataAccountArgsV3 {
            data: DataV2::one_of_one("Tweet NFT", "TNFT", "https://nftstorage.link/ipfs/cid", creator),
            is_mutable: true,
            collection_details: None,
        }
    }

    #[test]
    fn test_payload_layout() {
        let creator = Pubkey::new_from_array([7u8; 32]);
        let data = CreateMetadataAccountArgsV3 {
            data: DataV2::one_of_one("ab", "C", "u", &creator),
            is_mutable: true,
            collection_details: None,
        }
        .build_data()
        .unwrap();

        let mut expected = vec![33u8];
        expected.extend_from_slice(&[2, 0, 0, 0, b'a', b'b']);
        expected.extend_from_slice(&[1, 0, 0, 0, b'C']);
        expected.extend_from_slice(&[1, 0, 0, 0, b'u']);
        expected.extend_from_slice(&500u16.to_le_bytes());
        // creators: Some(vec of 1)
        expected.push(1);
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.extend_from_slice(&[7u8; 32]);
        expected.push(1); // verified
        expected.push(100); // share
        expected.push(0); // collection
        expected.push(0); // uses
        expected.push(1); // is_mutable
        expected.push(0); // collection_details

        assert_eq!(data, expected);
    }

    #[test]
    fn test_payload_is_deterministic() {
        let creator = Pubkey::new_unique();
        let first = args(&creator).build_data().unwrap();
        let second = args(&creator).build_data().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_payload_round_trips_after_discriminator() {
        let creator = Pubkey::new_unique();
        let original = args(&creator);
        let data = original.build_data().unwrap();
        assert_eq!(data[0], CREATE_METADATA_ACCOUNT_V3_DISCRIMINATOR);

        let decoded = CreateMetadataAccountArgsV3::try_from_slice(&data[1..]).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_present_collection_and_uses_are_tagged() {
        let mut data = DataV2::one_of_one("n", "s", "u", &Pubkey::new_unique());
        data.creators = None;
        data.collection = Some(Collection { verified: false, key: [9u8; 32] });
        data.uses = Some(Uses { use_method: 2, remaining: 3, total: 4 });
        let bytes = data.try_to_vec().unwrap();

        // 3 strings of one byte (5 each) + fee (2) + creators tag
        let tail = &bytes[5 * 3 + 2..];
        assert_eq!(tail[0], 0);
        assert_eq!(tail[1], 1);
        assert_eq!(tail[2], 0);
        assert_eq!(&tail[3..35], &[9u8; 32]);
        assert_eq!(tail[35], 1);
        assert_eq!(tail[36], 2);
        assert_eq!(&tail[37..45], &3u64.to_le_bytes());
        assert_eq!(&tail[45..53], &4u64.to_le_bytes());
        assert_eq!(tail.len(), 53);
    }

    #[test]
    fn test_instruction_accounts() {
        let mint = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let ix = create_metadata_account_v3(mint, payer, payer, payer, &args(&payer)).unwrap();

        assert_eq!(ix.program_id, METADATA_PROGRAM_ID);
        assert_eq!(ix.accounts.len(), 7);
        assert_eq!(ix.accounts[0].pubkey, metadata_address(&mint).0);
        assert!(ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, mint);
        assert!(!ix.accounts[1].is_writable);
        assert!(ix.accounts[2].is_signer);
        assert!(ix.accounts[3].is_signer && ix.accounts[3].is_writable);
        assert_eq!(ix.accounts[5].pubkey, solana_sdk::system_program::id());
        assert_eq!(ix.accounts[6].pubkey, sysvar::rent::id());
    }

    #[test]
    fn test_matches_metaplex_client_encoding() {
        use mpl_token_metadata::{
            instructions::{CreateMetadataAccountV3, CreateMetadataAccountV3InstructionArgs},
            types,
        };

        let mint = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let ours = create_metadata_account_v3(mint, payer, payer, payer, &args(&payer)).unwrap();

        let theirs = CreateMetadataAccountV3 {
            metadata: metadata_address(&mint).0,
            mint,
            mint_authority: payer,
            payer,
            update_authority: (payer, true),
            system_program: solana_sdk::system_program::id(),
            rent: Some(sysvar::rent::id()),
        }
        .instruction(CreateMetadataAccountV3InstructionArgs {
            data: types::DataV2 {
                name: "Tweet NFT".to_string(),
                symbol: "TNFT".to_string(),
                uri: "https://nftstorage.link/ipfs/cid".to_string(),
                seller_fee_basis_points: 500,
                creators: Some(vec![types::Creator {
                    address: payer,
                    verified: true,
                    share: 100,
                }]),
                collection: None,
                uses: None,
            },
            is_mutable: true,
            collection_details: None,
        });

        assert_eq!(ours.program_id, theirs.program_id);
        assert_eq!(ours.data, theirs.data);
        assert_eq!(ours.accounts, theirs.accounts);
    }
}
