use crate::prelude::*;
use solana_sdk::instruction::{AccountMeta, Instruction};

use crate::core::{SdkError, SdkResult, METADATA_PROGRAM_ID};

/// Trait for building instruction data with consistent patterns
pub trait InstructionBuilder: BorshSerialize {
    /// The single-byte instruction discriminator
    const DISCRIMINATOR: u8;

    /// Build the instruction data (discriminator + serialized args)
    fn build_data(&self) -> SdkResult<Vec<u8>> {
        let mut data = vec![Self::DISCRIMINATOR];
        data.extend_from_slice(
            &self
                .try_to_vec()
                .map_err(|e| SdkError::SerializationError(e.to_string()))?,
        );
        Ok(data)
    }
}

/// Builder for instructions addressed to the metadata program
pub struct MetadataInstructionBuilder {
    program_id: Pubkey,
    accounts: Vec<AccountMeta>,
    data: Vec<u8>,
}

impl MetadataInstructionBuilder {
    pub fn new() -> Self {
        Self::with_program_id(METADATA_PROGRAM_ID)
    }

    pub fn with_program_id(program_id: Pubkey) -> Self {
        Self {
            program_id,
            accounts: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Add a writable signer account
    pub fn add_signer(mut self, pubkey: Pubkey) -> Self {
        self.accounts.push(AccountMeta::new(pubkey, true));
        self
    }

    /// Add a readonly signer account
    pub fn add_readonly_signer(mut self, pubkey: Pubkey) -> Self {
        self.accounts.push(AccountMeta::new_readonly(pubkey, true));
        self
    }

    /// Add a writable non-signer account
    pub fn add_writable(mut self, pubkey: Pubkey) -> Self {
        self.accounts.push(AccountMeta::new(pubkey, false));
        self
    }

    /// Add a readonly account
    pub fn add_readonly(mut self, pubkey: Pubkey) -> Self {
        self.accounts.push(AccountMeta::new_readonly(pubkey, false));
        self
    }

    /// Set the instruction data
    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Build the final instruction
    pub fn build(self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: self.accounts,
            data: self.data,
        }
    }
}

impl Default for MetadataInstructionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Macro for implementing InstructionBuilder for an args struct
#[macro_export]
macro_rules! impl_instruction {
    ($name:ident, $discriminator:expr) => {
        impl $crate::instructions::InstructionBuilder for $name {
            const DISCRIMINATOR: u8 = $discriminator;
        }
    };
}
