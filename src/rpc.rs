//! RPC transaction decoding.
//!
//! Converts an encoded `getTransaction` response into the plain
//! [`TransactionRecord`](crate::core::transaction::TransactionRecord) the
//! pipeline consumes: base64 payload to a versioned transaction, static keys
//! extended with the loaded address tables, meta flattened out of its
//! serializer wrappers.

use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use solana_sdk::pubkey::{ParsePubkeyError, Pubkey};
use solana_sdk::transaction::VersionedTransaction;
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta, EncodedTransaction, UiLoadedAddresses,
    UiTransactionStatusMeta, UiTransactionTokenBalance,
};
use thiserror::Error;

use crate::core::transaction::{
    InstructionRecord, TokenBalanceRecord, TransactionMeta, TransactionRecord,
};

/// Failures while flattening an encoded RPC transaction.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported transaction encoding, expected base64")]
    UnsupportedEncoding,
    #[error("invalid base64 transaction payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid transaction payload: {0}")]
    Payload(#[from] bincode::Error),
    #[error("invalid account key: {0}")]
    AccountKey(#[from] ParsePubkeyError),
}

/// Flatten an encoded RPC transaction into a plain record.
///
/// The account-key table is the runtime view: static message keys followed by
/// loaded writable then loaded readonly addresses, so balance positions and
/// instruction indexes resolve without further translation. A missing meta is
/// preserved as `None` for the pipeline to judge, not treated as a decode
/// failure.
pub fn decode_transaction(
    rpc_tx: &EncodedConfirmedTransactionWithStatusMeta,
) -> Result<TransactionRecord, DecodeError> {
    let encoded = &rpc_tx.transaction;

    let EncodedTransaction::Binary(payload, _encoding) = &encoded.transaction else {
        return Err(DecodeError::UnsupportedEncoding);
    };
    let bytes = general_purpose::STANDARD.decode(payload)?;
    let versioned: VersionedTransaction = bincode::deserialize(&bytes)?;

    let mut account_keys: Vec<Pubkey> = versioned.message.static_account_keys().to_vec();
    if let Some(ui_meta) = encoded.meta.as_ref() {
        let loaded: Option<UiLoadedAddresses> = ui_meta.loaded_addresses.clone().into();
        if let Some(loaded) = loaded {
            for key in loaded.writable.iter().chain(loaded.readonly.iter()) {
                account_keys.push(Pubkey::from_str(key)?);
            }
        }
    }

    let instructions = versioned
        .message
        .instructions()
        .iter()
        .map(|ix| InstructionRecord {
            program_id_index: ix.program_id_index,
            accounts: ix.accounts.clone(),
            data: ix.data.clone(),
        })
        .collect();

    let meta = encoded.meta.as_ref().map(convert_meta).transpose()?;

    Ok(TransactionRecord {
        signatures: versioned.signatures.clone(),
        account_keys,
        instructions,
        meta,
    })
}

fn convert_meta(ui_meta: &UiTransactionStatusMeta) -> Result<TransactionMeta, DecodeError> {
    let pre_token: Option<Vec<UiTransactionTokenBalance>> =
        ui_meta.pre_token_balances.clone().into();
    let post_token: Option<Vec<UiTransactionTokenBalance>> =
        ui_meta.post_token_balances.clone().into();

    Ok(TransactionMeta {
        err: ui_meta.err.clone().map(Into::into),
        pre_balances: ui_meta.pre_balances.clone(),
        post_balances: ui_meta.post_balances.clone(),
        pre_token_balances: pre_token.map(convert_token_balances).transpose()?,
        post_token_balances: post_token.map(convert_token_balances).transpose()?,
    })
}

fn convert_token_balances(
    balances: Vec<UiTransactionTokenBalance>,
) -> Result<Vec<TokenBalanceRecord>, DecodeError> {
    balances
        .iter()
        .map(|balance| {
            Ok(TokenBalanceRecord {
                account_index: balance.account_index,
                mint: Pubkey::from_str(&balance.mint)?,
                ui_amount: balance.ui_token_amount.ui_amount,
                decimals: Some(balance.ui_token_amount.decimals),
            })
        })
        .collect()
}
