use serde::{Deserialize, Serialize};
use solana_commitment_config::CommitmentConfig;

/// Connection and concurrency settings for
/// [`LaunchMonitor`](super::LaunchMonitor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Websocket endpoint for the logs subscription.
    pub ws_url: String,
    /// HTTP endpoint used to fetch full transactions.
    pub rpc_url: String,
    /// Commitment applied to both the subscription and the fetches.
    pub commitment: CommitmentConfig,
    /// Upper bound on in-flight `getTransaction` requests.
    pub max_concurrent_fetches: usize,
    /// Capacity of the launch record channel between monitor and consumer.
    pub channel_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            ws_url: "wss://api.mainnet-beta.solana.com".to_string(),
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            commitment: CommitmentConfig::confirmed(),
            max_concurrent_fetches: 8,
            channel_capacity: 1024,
        }
    }
}

impl MonitorConfig {
    /// Devnet endpoints with the default tuning.
    pub fn devnet() -> Self {
        Self {
            ws_url: "wss://api.devnet.solana.com".to_string(),
            rpc_url: "https://api.devnet.solana.com".to_string(),
            ..Self::default()
        }
    }
}
