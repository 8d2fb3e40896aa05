//! Launch monitor event loop.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use log::{debug, error, info, warn};
use solana_client::nonblocking::pubsub_client::{PubsubClient, PubsubClientError};
use solana_client::rpc_config::{RpcTransactionLogsConfig, RpcTransactionLogsFilter};
use solana_sdk::signature::Signature;
use thiserror::Error;
use tokio::sync::{mpsc, Semaphore};

use crate::core::events::LaunchRecord;
use crate::core::pipeline::parse_launch;
use crate::instr::pumpfun::PUMPFUN_PROGRAM_ID;
use crate::logs::is_launch_candidate;

use super::fetcher::{RpcTransactionFetcher, TransactionFetcher};
use super::types::MonitorConfig;

/// Failures that end the monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("websocket connection to {url} failed: {source}")]
    Connect {
        url: String,
        #[source]
        source: PubsubClientError,
    },
    #[error("logs subscription failed: {0}")]
    Subscribe(#[source] PubsubClientError),
    #[error("logs subscription stream closed")]
    StreamClosed,
}

/// Watches pump.fun logs for token launches.
///
/// One websocket subscription feeds a bounded pool of `getTransaction`
/// fetches. Every fetched non-reverted transaction becomes a
/// [`LaunchRecord`], with `launch: None` when the transaction fails the
/// create-instruction or liquidity checks.
pub struct LaunchMonitor {
    config: MonitorConfig,
    fetcher: Arc<dyn TransactionFetcher>,
}

impl LaunchMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        let fetcher = Arc::new(RpcTransactionFetcher::new(
            config.rpc_url.clone(),
            config.commitment,
        ));
        Self { config, fetcher }
    }

    /// Swap in a different transaction source, e.g. a mock in tests.
    pub fn with_fetcher(config: MonitorConfig, fetcher: Arc<dyn TransactionFetcher>) -> Self {
        Self { config, fetcher }
    }

    /// Subscribe and stream launch records into `sink` until the
    /// subscription stream terminates.
    ///
    /// Connection and subscription failures are fatal. Per-transaction
    /// problems (fetch errors, unknown signatures, reverted transactions) are
    /// logged and skipped without stopping the monitor.
    pub async fn run(&self, sink: mpsc::Sender<LaunchRecord>) -> Result<(), MonitorError> {
        let client = PubsubClient::new(&self.config.ws_url)
            .await
            .map_err(|source| MonitorError::Connect {
                url: self.config.ws_url.clone(),
                source,
            })?;

        let filter = RpcTransactionLogsFilter::Mentions(vec![PUMPFUN_PROGRAM_ID.to_string()]);
        let logs_config = RpcTransactionLogsConfig {
            commitment: Some(self.config.commitment),
        };
        let (mut stream, _unsubscribe) = client
            .logs_subscribe(filter, logs_config)
            .await
            .map_err(MonitorError::Subscribe)?;
        info!("subscribed to pump.fun logs at {}", self.config.ws_url);

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_fetches));
        while let Some(notification) = stream.next().await {
            let slot = notification.context.slot;
            let value = notification.value;

            if !is_launch_candidate(&value.logs) {
                continue;
            }

            let signature = match Signature::from_str(&value.signature) {
                Ok(signature) => signature,
                Err(err) => {
                    warn!(
                        "unparseable signature {} in logs notification: {}",
                        value.signature, err
                    );
                    continue;
                }
            };

            // the semaphore is never closed while the monitor runs
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let fetcher = Arc::clone(&self.fetcher);
            let sink = sink.clone();
            tokio::spawn(async move {
                handle_signature(fetcher, signature, slot, sink).await;
                drop(permit);
            });
        }

        Err(MonitorError::StreamClosed)
    }
}

/// Fetch one subscribed signature and push its launch record into the sink.
async fn handle_signature(
    fetcher: Arc<dyn TransactionFetcher>,
    signature: Signature,
    slot: u64,
    sink: mpsc::Sender<LaunchRecord>,
) {
    let record = match fetcher.fetch(&signature).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            warn!("transaction not found for signature {}", signature);
            return;
        }
        Err(err) => {
            error!("failed to fetch transaction {}: {}", signature, err);
            return;
        }
    };

    if record.is_reverted() {
        debug!("skipping reverted transaction {}", signature);
        return;
    }

    let launch = parse_launch(&record);
    let delivered = sink
        .send(LaunchRecord {
            signature,
            slot,
            launch,
            observed_at: Utc::now(),
        })
        .await;
    if delivered.is_err() {
        debug!("launch record receiver dropped, discarding {}", signature);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transaction::{
        InstructionRecord, TokenBalanceRecord, TransactionMeta, TransactionRecord,
    };
    use crate::instr::pumpfun::discriminators;
    use crate::monitor::fetcher::FetchError;
    use crate::rpc::DecodeError;
    use async_trait::async_trait;
    use solana_sdk::native_token::LAMPORTS_PER_SOL;
    use solana_sdk::pubkey::Pubkey;
    use solana_sdk::transaction::TransactionError;

    enum StaticFetcher {
        Found(TransactionRecord),
        NotFound,
        Failing,
    }

    #[async_trait]
    impl TransactionFetcher for StaticFetcher {
        async fn fetch(
            &self,
            _signature: &Signature,
        ) -> Result<Option<TransactionRecord>, FetchError> {
            match self {
                StaticFetcher::Found(record) => Ok(Some(record.clone())),
                StaticFetcher::NotFound => Ok(None),
                StaticFetcher::Failing => Err(FetchError::Decode(DecodeError::UnsupportedEncoding)),
            }
        }
    }

    async fn dispatch(fetcher: StaticFetcher) -> Option<LaunchRecord> {
        let (tx, mut rx) = mpsc::channel(8);
        let signature = Signature::from([7u8; 64]);
        handle_signature(Arc::new(fetcher), signature, 42, tx).await;
        rx.try_recv().ok()
    }

    /// A full launch: marker instruction, fourteen resolved accounts and a
    /// passing sol plus token delta.
    fn launch_transaction() -> TransactionRecord {
        let account_keys: Vec<Pubkey> = (0..16).map(|_| Pubkey::new_unique()).collect();
        let mut create_data = discriminators::CREATE.to_vec();
        create_data.extend_from_slice(&[0u8; 24]);

        let mut pre_balances = vec![0u64; 16];
        let mut post_balances = vec![0u64; 16];
        pre_balances[3] = LAMPORTS_PER_SOL;
        post_balances[3] = 4 * LAMPORTS_PER_SOL;

        TransactionRecord {
            signatures: vec![Signature::from([7u8; 64])],
            account_keys: account_keys.clone(),
            instructions: vec![InstructionRecord {
                program_id_index: 15,
                accounts: (1..=14).collect(),
                data: create_data,
            }],
            meta: Some(TransactionMeta {
                err: None,
                pre_balances,
                post_balances,
                pre_token_balances: Some(vec![]),
                post_token_balances: Some(vec![TokenBalanceRecord {
                    account_index: 4,
                    mint: account_keys[1],
                    ui_amount: Some(2.0),
                    decimals: Some(6),
                }]),
            }),
        }
    }

    #[tokio::test]
    async fn test_dispatch_delivers_launch_record() {
        let transaction = launch_transaction();
        let mint = transaction.account_keys[1];
        let bonding_curve = transaction.account_keys[3];

        let record = dispatch(StaticFetcher::Found(transaction)).await.unwrap();
        assert_eq!(record.signature, Signature::from([7u8; 64]));
        assert_eq!(record.slot, 42);

        let launch = record.launch.unwrap();
        assert_eq!(launch.mint, mint);
        assert_eq!(launch.bonding_curve, bonding_curve);
        assert_eq!(launch.initial_sol_lamports, 3 * LAMPORTS_PER_SOL as i64);
        assert_eq!(launch.initial_token_amount, 2_000_000);
    }

    #[tokio::test]
    async fn test_dispatch_records_rejected_transactions_without_launch() {
        let mut transaction = launch_transaction();
        transaction.instructions[0].data = vec![0u8; 16];

        let record = dispatch(StaticFetcher::Found(transaction)).await.unwrap();
        assert_eq!(record.slot, 42);
        assert!(record.launch.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_skips_unknown_signature() {
        assert!(dispatch(StaticFetcher::NotFound).await.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_skips_fetch_failure() {
        assert!(dispatch(StaticFetcher::Failing).await.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_skips_reverted_transaction() {
        let mut transaction = launch_transaction();
        if let Some(meta) = transaction.meta.as_mut() {
            meta.err = Some(TransactionError::AccountNotFound);
        }

        assert!(dispatch(StaticFetcher::Found(transaction)).await.is_none());
    }
}
