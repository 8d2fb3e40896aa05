//! Launch detection core.
//!
//! Pure, synchronous pipeline stages: plain transaction records in, launch
//! events out. No I/O happens below this module; the monitor layer owns the
//! subscription and fetch plumbing.

pub mod events;
pub mod liquidity;
pub mod pipeline;
pub mod transaction;

pub use events::{LaunchEvent, LaunchRecord};
pub use liquidity::{
    compute_initial_liquidity, InitialLiquidity, LaunchThresholds, MAX_INITIAL_SOL,
    MIN_INITIAL_SOL, MIN_INITIAL_TOKEN,
};
pub use pipeline::{parse_launch, parse_launch_with};
pub use transaction::{InstructionRecord, TokenBalanceRecord, TransactionMeta, TransactionRecord};
