//! Log-side detection.
//!
//! The subscription delivers raw log lines per transaction; this module
//! decides which signatures are worth fetching.

pub mod pumpfun;

pub use pumpfun::{is_launch_candidate, BUY_LOG, CREATE_METADATA_LOG};
