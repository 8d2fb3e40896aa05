//! Transaction fetching behind the subscription.
//!
//! The monitor needs exactly one RPC call: `getTransaction` by signature with
//! binary encoding. The [`TransactionFetcher`] trait keeps that seam mockable
//! so the dispatch path can be tested without a validator.

use async_trait::async_trait;
use serde_json::json;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_client::rpc_request::RpcRequest;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use solana_transaction_status::{EncodedConfirmedTransactionWithStatusMeta, UiTransactionEncoding};
use thiserror::Error;

use crate::core::transaction::TransactionRecord;
use crate::rpc::{decode_transaction, DecodeError};

/// Failures while retrieving or decoding a transaction.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("rpc request failed: {0}")]
    Rpc(#[from] ClientError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Fetches the full transaction behind a subscribed signature.
///
/// `Ok(None)` means the node does not know the signature, which happens when a
/// fetch races the transaction's propagation across the cluster.
#[async_trait]
pub trait TransactionFetcher: Send + Sync {
    async fn fetch(&self, signature: &Signature) -> Result<Option<TransactionRecord>, FetchError>;
}

/// [`TransactionFetcher`] backed by a JSON-RPC node.
pub struct RpcTransactionFetcher {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcTransactionFetcher {
    pub fn new(rpc_url: String, commitment: CommitmentConfig) -> Self {
        Self { client: RpcClient::new(rpc_url), commitment }
    }
}

#[async_trait]
impl TransactionFetcher for RpcTransactionFetcher {
    async fn fetch(&self, signature: &Signature) -> Result<Option<TransactionRecord>, FetchError> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Base64),
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(0),
        };
        // raw `send` keeps the null response visible instead of folding it
        // into a signature-not-found error
        let response: Option<EncodedConfirmedTransactionWithStatusMeta> = self
            .client
            .send(RpcRequest::GetTransaction, json!([signature.to_string(), config]))
            .await?;
        match response {
            Some(rpc_tx) => Ok(Some(decode_transaction(&rpc_tx)?)),
            None => Ok(None),
        }
    }
}
