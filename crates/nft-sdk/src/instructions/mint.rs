use crate::prelude::*;
use solana_sdk::{
    instruction::Instruction,
    signature::{Keypair, Signature, Signer},
    system_instruction,
    transaction::Transaction,
};
use spl_token::instruction::AuthorityType;
use tracing::{debug, info};

use crate::{
    core::{SdkResult, MINT_ACCOUNT_LEN, NFT_DECIMALS, NFT_SUPPLY},
    instructions::{create_metadata_account_v3, CreateMetadataAccountArgsV3, DataV2},
    protocol::associated_token_address,
    rpc::ChainRpc,
};

/// Display fields of the token being minted
#[derive(Clone, Debug)]
pub struct NftMintParams {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// Result of a submitted mint transaction
#[derive(Clone, Debug)]
pub struct MintOutcome {
    /// The new mint account, which is also the token's identity
    pub mint: Pubkey,
    pub signature: Signature,
}

/// Build the full one-of-one mint sequence.
///
/// Order matters: the runtime executes the instructions in sequence inside one
/// atomic transaction, and each step depends on the account created before it.
pub fn mint_nft_instructions(
    payer: Pubkey,
    mint: Pubkey,
    rent_lamports: u64,
    params: &NftMintParams,
) -> SdkResult<Vec<Instruction>> {
    let token_program = spl_token::id();
    let token_account = associated_token_address(&payer, &mint);

    let create_mint = system_instruction::create_account(
        &payer,
        &mint,
        rent_lamports,
        MINT_ACCOUNT_LEN as u64,
        &token_program,
    );

    let initialize_mint = spl_token::instruction::initialize_mint(
        &token_program,
        &mint,
        &payer,
        None,
        NFT_DECIMALS,
    )?;

    let create_token_account =
        spl_associated_token_account::instruction::create_associated_token_account(
            &payer,
            &payer,
            &mint,
            &token_program,
        );

    let mint_to = spl_token::instruction::mint_to(
        &token_program,
        &mint,
        &token_account,
        &payer,
        &[],
        NFT_SUPPLY,
    )?;

    // Supply is capped for good once the authority is gone
    let revoke_mint_authority = spl_token::instruction::set_authority(
        &token_program,
        &mint,
        None,
        AuthorityType::MintTokens,
        &payer,
        &[],
    )?;

    let create_metadata = create_metadata_account_v3(
        mint,
        payer,
        payer,
        payer,
        &CreateMetadataAccountArgsV3 {
            data: DataV2::one_of_one(&params.name, &params.symbol, &params.uri, &payer),
            is_mutable: true,
            collection_details: None,
        },
    )?;

    Ok(vec![
        create_mint,
        initialize_mint,
        create_token_account,
        mint_to,
        revoke_mint_authority,
        create_metadata,
    ])
}

/// Create, fund and submit a one-of-one mint paid for by `payer`.
///
/// The mint keypair is generated here and dropped after signing.
pub fn mint_nft(
    rpc: &dyn ChainRpc,
    payer: &Keypair,
    params: &NftMintParams,
) -> SdkResult<MintOutcome> {
    let mint_keypair = Keypair::new();
    let mint = mint_keypair.pubkey();

    let rent_lamports = rpc.minimum_balance_for_rent_exemption(MINT_ACCOUNT_LEN)?;
    debug!(%mint, rent_lamports, "building mint transaction");

    let instructions = mint_nft_instructions(payer.pubkey(), mint, rent_lamports, params)?;
    let blockhash = rpc.latest_blockhash()?;

    let transaction = Transaction::new_signed_with_payer(
        &instructions,
        Some(&payer.pubkey()),
        &[payer, &mint_keypair],
        blockhash,
    );

    let signature = rpc.send_transaction(&transaction)?;
    info!(%mint, %signature, "mint transaction submitted");

    Ok(MintOutcome { mint, signature })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SdkError, METADATA_PROGRAM_ID};
    use crate::protocol::metadata_address;
    use solana_program::program_pack::Pack;
    use solana_sdk::hash::Hash;
    use std::cell::RefCell;

    fn params() -> NftMintParams {
        NftMintParams {
            name: "Tweet NFT".to_string(),
            symbol: "TNFT".to_string(),
            uri: "https://nftstorage.link/ipfs/bafymeta".to_string(),
        }
    }

    #[derive(Default)]
    struct RecordingRpc {
        rent_queries: RefCell<Vec<usize>>,
        sent: RefCell<Vec<Transaction>>,
        reject: bool,
    }

    impl ChainRpc for RecordingRpc {
        fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64> {
            self.rent_queries.borrow_mut().push(data_len);
            Ok(1_461_600)
        }

        fn latest_blockhash(&self) -> SdkResult<Hash> {
            Ok(Hash::new_unique())
        }

        fn send_transaction(&self, transaction: &Transaction) -> SdkResult<Signature> {
            if self.reject {
                return Err(SdkError::RpcError("insufficient funds".to_string()));
            }
            self.sent.borrow_mut().push(transaction.clone());
            Ok(transaction.signatures[0])
        }
    }

    #[test]
    fn test_mint_account_len_matches_spl_token() {
        assert_eq!(MINT_ACCOUNT_LEN, spl_token::state::Mint::LEN);
    }

    #[test]
    fn test_instruction_order() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let ixs = mint_nft_instructions(payer, mint, 1_000, &params()).unwrap();

        let programs: Vec<Pubkey> = ixs.iter().map(|ix| ix.program_id).collect();
        assert_eq!(
            programs,
            vec![
                solana_sdk::system_program::id(),
                spl_token::id(),
                spl_associated_token_account::id(),
                spl_token::id(),
                spl_token::id(),
                METADATA_PROGRAM_ID,
            ]
        );
    }

    #[test]
    fn test_token_instructions_decode() {
        use spl_token::instruction::TokenInstruction;

        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let ixs = mint_nft_instructions(payer, mint, 1_000, &params()).unwrap();

        match TokenInstruction::unpack(&ixs[1].data).unwrap() {
            TokenInstruction::InitializeMint { decimals, mint_authority, freeze_authority } => {
                assert_eq!(decimals, 0);
                assert_eq!(mint_authority, payer);
                assert!(freeze_authority.is_none());
            }
            other => panic!("unexpected instruction {:?}", other),
        }

        match TokenInstruction::unpack(&ixs[3].data).unwrap() {
            TokenInstruction::MintTo { amount } => assert_eq!(amount, 1),
            other => panic!("unexpected instruction {:?}", other),
        }
        assert_eq!(ixs[3].accounts[1].pubkey, associated_token_address(&payer, &mint));

        match TokenInstruction::unpack(&ixs[4].data).unwrap() {
            TokenInstruction::SetAuthority { authority_type, new_authority } => {
                assert_eq!(authority_type, AuthorityType::MintTokens);
                assert!(new_authority.is_none());
            }
            other => panic!("unexpected instruction {:?}", other),
        }
    }

    #[test]
    fn test_create_account_is_rent_exempt_mint() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let ixs = mint_nft_instructions(payer, mint, 1_461_600, &params()).unwrap();

        let create = &ixs[0];
        assert_eq!(create.accounts[0].pubkey, payer);
        assert_eq!(create.accounts[1].pubkey, mint);
        assert!(create.accounts[1].is_signer);

        // CreateAccount: u32 tag, u64 lamports, u64 space, owner
        assert_eq!(&create.data[0..4], &0u32.to_le_bytes());
        assert_eq!(&create.data[4..12], &1_461_600u64.to_le_bytes());
        assert_eq!(&create.data[12..20], &82u64.to_le_bytes());
        assert_eq!(&create.data[20..52], spl_token::id().as_ref());
    }

    #[test]
    fn test_metadata_instruction_targets_derived_account() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let ixs = mint_nft_instructions(payer, mint, 1_000, &params()).unwrap();
        assert_eq!(ixs[5].accounts[0].pubkey, metadata_address(&mint).0);
    }

    #[test]
    fn test_mint_nft_signs_with_payer_and_mint() {
        let rpc = RecordingRpc::default();
        let payer = Keypair::new();

        let outcome = mint_nft(&rpc, &payer, &params()).unwrap();

        assert_eq!(*rpc.rent_queries.borrow(), vec![MINT_ACCOUNT_LEN]);
        let sent = rpc.sent.borrow();
        assert_eq!(sent.len(), 1);
        let tx = &sent[0];
        assert_eq!(tx.message.instructions.len(), 6);
        assert_eq!(tx.message.account_keys[0], payer.pubkey());
        assert!(tx.message.account_keys.contains(&outcome.mint));
        assert!(tx.verify().is_ok());
        assert_eq!(outcome.signature, tx.signatures[0]);
    }

    #[test]
    fn test_mint_nft_uses_fresh_mint_each_time() {
        let rpc = RecordingRpc::default();
        let payer = Keypair::new();

        let first = mint_nft(&rpc, &payer, &params()).unwrap();
        let second = mint_nft(&rpc, &payer, &params()).unwrap();
        assert_ne!(first.mint, second.mint);
    }

    #[test]
    fn test_mint_nft_propagates_rejection() {
        let rpc = RecordingRpc {
            reject: true,
            ..Default::default()
        };
        let err = mint_nft(&rpc, &Keypair::new(), &params()).unwrap_err();
        assert!(matches!(err, SdkError::RpcError(_)));
    }
}
