//! PumpFun create-instruction decoding.
//!
//! Locates the create instruction inside a transaction by its leading
//! discriminator bytes and resolves its positional account list into named
//! roles.

use log::{debug, warn};
use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

use crate::core::transaction::TransactionRecord;

/// PumpFun program ID as Pubkey constant
pub const PUMPFUN_PROGRAM_ID: Pubkey = pubkey!("6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P");

/// PumpFun discriminator constants
pub mod discriminators {
    /// Leading 4 bytes of the 8-byte create discriminator (`181ec828` in hex).
    pub const CREATE: [u8; 4] = [0x18, 0x1e, 0xc8, 0x28];
}

/// Number of accounts the create instruction carries. The positional schema
/// below is a hard contract of the program's account ordering; any other
/// count means the instruction is not the expected create.
pub const CREATE_ACCOUNT_COUNT: usize = 14;

/// Classification of an instruction payload by discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    Create,
    Unrecognized,
}

/// Classify an instruction payload by its leading discriminator bytes.
///
/// Payloads shorter than the full 8-byte discriminator cannot carry a valid
/// create and classify as unrecognized.
#[inline]
pub fn classify_instruction(data: &[u8]) -> InstructionKind {
    if data.len() < 8 {
        return InstructionKind::Unrecognized;
    }
    if data[..4] == discriminators::CREATE {
        InstructionKind::Create
    } else {
        InstructionKind::Unrecognized
    }
}

/// Find the index of the create instruction in a transaction.
///
/// Scans compiled instructions in order and returns the first whose payload
/// classifies as create. Instructions at program-id index 0 are skipped:
/// table position 0 is the fee payer and can never be an invoked program.
pub fn find_create_instruction(record: &TransactionRecord) -> Option<usize> {
    let index = record.instructions.iter().position(|ix| {
        ix.program_id_index > 0 && classify_instruction(&ix.data) == InstructionKind::Create
    })?;
    debug!(
        "matched create discriminator {} at instruction {} for signature {}",
        hex::encode(&record.instructions[index].data[..4]),
        index,
        record.primary_signature()
    );
    Some(index)
}

/// Accounts of the create instruction, in instruction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateAccounts {
    pub mint: Pubkey,
    pub mint_authority: Pubkey,
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
    pub global: Pubkey,
    pub mpl_token_metadata: Pubkey,
    pub metadata: Pubkey,
    pub user: Pubkey,
    pub system_program: Pubkey,
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
    pub rent: Pubkey,
    pub event_authority: Pubkey,
    pub program: Pubkey,
}

/// Resolve the create instruction's account indexes into named roles.
///
/// Rejects (with a logged warning) transactions lacking meta or post token
/// balances, indexes that fall outside the account-key table, and any account
/// count other than [`CREATE_ACCOUNT_COUNT`]. A mismatch means the data does
/// not describe the expected event and is never coerced.
pub fn resolve_create_accounts(
    record: &TransactionRecord,
    instruction_index: usize,
) -> Option<CreateAccounts> {
    let signature = record.primary_signature();

    let Some(meta) = record.meta.as_ref() else {
        warn!("transaction has no meta for signature {}", signature);
        return None;
    };
    if meta.post_token_balances.is_none() {
        warn!(
            "transaction has no post token balances for signature {}",
            signature
        );
        return None;
    }

    let instruction = record.instructions.get(instruction_index)?;

    let mut resolved = Vec::with_capacity(instruction.accounts.len());
    for &index in &instruction.accounts {
        match record.account_keys.get(index as usize) {
            Some(key) => resolved.push(*key),
            None => {
                warn!(
                    "account index {} out of bounds for signature {}",
                    index, signature
                );
                return None;
            }
        }
    }

    if resolved.len() != CREATE_ACCOUNT_COUNT {
        warn!(
            "create instruction has {} accounts, expected {} for signature {}",
            resolved.len(),
            CREATE_ACCOUNT_COUNT,
            signature
        );
        return None;
    }

    Some(CreateAccounts {
        mint: resolved[0],
        mint_authority: resolved[1],
        bonding_curve: resolved[2],
        associated_bonding_curve: resolved[3],
        global: resolved[4],
        mpl_token_metadata: resolved[5],
        metadata: resolved[6],
        user: resolved[7],
        system_program: resolved[8],
        token_program: resolved[9],
        associated_token_program: resolved[10],
        rent: resolved[11],
        event_authority: resolved[12],
        program: resolved[13],
    })
}
