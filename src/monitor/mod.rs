//! Real-time pump.fun launch monitoring.
//!
//! The monitor chains a websocket logs subscription to bounded JSON-RPC
//! fetches: log notifications are screened for the create-plus-buy marker
//! pair, matching signatures are fetched as full transactions, and each one
//! is parsed into a launch record for the consumer channel.

pub mod client;
pub mod fetcher;
pub mod types;

pub use client::{LaunchMonitor, MonitorError};
pub use fetcher::{FetchError, RpcTransactionFetcher, TransactionFetcher};
pub use types::MonitorConfig;
