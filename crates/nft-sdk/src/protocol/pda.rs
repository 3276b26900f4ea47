//! Derived address helpers
//!
//! Neither address below may be chosen freely: the metadata program and the
//! associated token program both re-derive them on-chain and reject anything else.

use crate::core::{seeds, METADATA_PROGRAM_ID};
use crate::prelude::*;

/// Metadata account for a mint: `["metadata", program_id, mint]` under the metadata program
pub fn metadata_address(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[seeds::METADATA, METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &METADATA_PROGRAM_ID,
    )
}

/// Associated token account holding `mint` for `owner` under the legacy token program
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(owner, mint)
}
