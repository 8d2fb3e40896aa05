// core modules, flat layout
pub mod core;
pub mod instr; // create-instruction discriminators and account resolution
pub mod logs;  // log marker screening

// websocket subscription + bounded rpc fetching
pub mod monitor;

// rpc transaction decoding
pub mod rpc;

// re-export the main api
pub use crate::core::{
    // event types
    LaunchEvent, LaunchRecord,
    // pipeline entry points
    parse_launch, parse_launch_with,
    // liquidity gates
    compute_initial_liquidity, InitialLiquidity, LaunchThresholds, MAX_INITIAL_SOL,
    MIN_INITIAL_SOL, MIN_INITIAL_TOKEN,
    // plain transaction records
    InstructionRecord, TokenBalanceRecord, TransactionMeta, TransactionRecord,
};

// instruction + log surfaces
pub use crate::instr::{
    find_create_instruction, resolve_create_accounts, CreateAccounts, CREATE_ACCOUNT_COUNT,
    PUMPFUN_PROGRAM_ID,
};
pub use crate::logs::{is_launch_candidate, BUY_LOG, CREATE_METADATA_LOG};

// monitor entry points
pub use crate::monitor::{
    FetchError, LaunchMonitor, MonitorConfig, MonitorError, RpcTransactionFetcher,
    TransactionFetcher,
};
pub use crate::rpc::{decode_transaction, DecodeError};
