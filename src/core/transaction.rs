//! Plain transaction record types the launch pipeline operates on.
//!
//! RPC responses are converted into these structs once (see `crate::rpc`) so
//! the pipeline never touches encoding-specific wrappers and tests can build
//! records directly.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::TransactionError;

/// One compiled instruction: a program reference and a flat account-index
/// list, both pointing into the owning record's account-key table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InstructionRecord {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// Token balance snapshot entry from transaction meta.
///
/// `ui_amount` is absent when the node reports a null display amount;
/// `decimals` is absent only for degraded data sources and defaults to 0
/// downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalanceRecord {
    pub account_index: u8,
    pub mint: Pubkey,
    pub ui_amount: Option<f64>,
    pub decimals: Option<u8>,
}

/// Execution metadata attached to a confirmed transaction.
///
/// Balance arrays are indexed parallel to the account-key table. The token
/// balance lists are optional as a whole: older nodes and pruned responses
/// omit them entirely, which the pipeline treats as a malformed-transaction
/// signal rather than an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TransactionMeta {
    pub err: Option<TransactionError>,
    pub pre_balances: Vec<u64>,
    pub post_balances: Vec<u64>,
    pub pre_token_balances: Option<Vec<TokenBalanceRecord>>,
    pub post_token_balances: Option<Vec<TokenBalanceRecord>>,
}

/// A confirmed transaction flattened for parsing.
///
/// `account_keys` holds the full runtime table: static message keys followed
/// by loaded writable and loaded readonly addresses, in that order, so
/// instruction account indexes and balance positions resolve directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TransactionRecord {
    pub signatures: Vec<Signature>,
    pub account_keys: Vec<Pubkey>,
    pub instructions: Vec<InstructionRecord>,
    pub meta: Option<TransactionMeta>,
}

impl TransactionRecord {
    /// First signature, used as the transaction's identity in diagnostics.
    pub fn primary_signature(&self) -> Signature {
        self.signatures.first().copied().unwrap_or_default()
    }

    /// True when the transaction executed but failed on chain.
    pub fn is_reverted(&self) -> bool {
        self.meta
            .as_ref()
            .is_some_and(|meta| meta.err.is_some())
    }
}
