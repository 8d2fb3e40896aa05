//! PumpFun launch log pre-filter.
//!
//! A launch bundles token creation and an initial buy into one transaction,
//! so its log stream carries both marker lines. Matching them before fetching
//! keeps the expensive transaction pipeline off the overwhelming majority of
//! program activity.

/// Metadata-creation marker logged by the create instruction.
pub const CREATE_METADATA_LOG: &str = "Program log: IX: Create Metadata Accounts v3";
/// Buy marker logged by the bundled initial purchase.
pub const BUY_LOG: &str = "Program log: Instruction: Buy";

/// True when the log lines contain both launch markers.
///
/// Membership is exact per line, not substring: truncated or decorated
/// variants of the markers do not qualify.
pub fn is_launch_candidate(logs: &[String]) -> bool {
    let mut has_create = false;
    let mut has_buy = false;
    for line in logs {
        if line == CREATE_METADATA_LOG {
            has_create = true;
        } else if line == BUY_LOG {
            has_buy = true;
        }
        if has_create && has_buy {
            return true;
        }
    }
    false
}
