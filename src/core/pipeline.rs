//! Single-entry launch parsing pipeline.
//!
//! Pure composition: locate the create instruction, resolve its accounts,
//! validate the balance deltas, assemble the event. All accept/reject logic
//! lives in the located stages; nothing is validated here.

use crate::core::events::LaunchEvent;
use crate::core::liquidity::{compute_initial_liquidity, LaunchThresholds};
use crate::core::transaction::TransactionRecord;
use crate::instr::pumpfun::{find_create_instruction, resolve_create_accounts};

/// Parse a transaction record into a launch event with default thresholds.
///
/// Returns `None` when the transaction does not describe a plausible launch;
/// the failing gate logs its own diagnostic.
pub fn parse_launch(record: &TransactionRecord) -> Option<LaunchEvent> {
    parse_launch_with(record, &LaunchThresholds::default())
}

/// Parse a transaction record into a launch event with custom thresholds.
pub fn parse_launch_with(
    record: &TransactionRecord,
    thresholds: &LaunchThresholds,
) -> Option<LaunchEvent> {
    let instruction_index = find_create_instruction(record)?;
    let accounts = resolve_create_accounts(record, instruction_index)?;
    let liquidity =
        compute_initial_liquidity(record, &accounts.mint, &accounts.bonding_curve, thresholds)?;
    Some(LaunchEvent::from_parts(accounts, liquidity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transaction::{
        InstructionRecord, TokenBalanceRecord, TransactionMeta, TransactionRecord,
    };
    use crate::instr::pumpfun::{discriminators, CREATE_ACCOUNT_COUNT};
    use solana_sdk::pubkey::Pubkey;
    use solana_sdk::signature::Signature;

    /// A synthetic create-and-buy transaction that passes every gate.
    ///
    /// Account table layout: position 0 fee payer, 1..=14 the create
    /// instruction accounts (mint at 1, bonding curve at 3), 15 the invoked
    /// program entry.
    fn launch_transaction() -> TransactionRecord {
        let keys: Vec<Pubkey> = (0..16).map(|_| Pubkey::new_unique()).collect();
        let mint = keys[1];

        let mut data = discriminators::CREATE.to_vec();
        data.extend_from_slice(&[0u8; 24]);

        let mut pre_balances = vec![0u64; keys.len()];
        let mut post_balances = vec![0u64; keys.len()];
        pre_balances[3] = 1_000_000_000;
        post_balances[3] = 4_000_000_000;

        TransactionRecord {
            signatures: vec![Signature::from([7u8; 64])],
            account_keys: keys,
            instructions: vec![
                // Unrelated instruction ahead of the create.
                InstructionRecord {
                    program_id_index: 15,
                    accounts: vec![0, 1],
                    data: vec![0u8; 16],
                },
                InstructionRecord {
                    program_id_index: 15,
                    accounts: (1..=CREATE_ACCOUNT_COUNT as u8).collect(),
                    data,
                },
            ],
            meta: Some(TransactionMeta {
                err: None,
                pre_balances,
                post_balances,
                pre_token_balances: Some(vec![]),
                post_token_balances: Some(vec![TokenBalanceRecord {
                    account_index: 4,
                    mint,
                    ui_amount: Some(2.0),
                    decimals: Some(6),
                }]),
            }),
        }
    }

    #[test]
    fn test_full_pipeline_produces_event() {
        let record = launch_transaction();
        let event = parse_launch(&record).unwrap();

        assert_eq!(event.mint, record.account_keys[1]);
        assert_eq!(event.mint_authority, record.account_keys[2]);
        assert_eq!(event.bonding_curve, record.account_keys[3]);
        assert_eq!(event.program, record.account_keys[14]);
        assert_eq!(event.initial_sol_lamports, 3_000_000_000);
        assert_eq!(event.initial_sol_ui, 3.0);
        assert_eq!(event.initial_token_amount, 2_000_000);
        assert_eq!(event.initial_token_ui, 2.0);
        assert_eq!(event.token_decimals, 6);
    }

    #[test]
    fn test_no_event_without_discriminator() {
        let mut record = launch_transaction();
        record.instructions[1].data = vec![0u8; 24];
        assert!(parse_launch(&record).is_none());
    }

    #[test]
    fn test_no_event_for_wrong_account_counts() {
        for count in [13usize, 15] {
            let mut record = launch_transaction();
            record.instructions[1].accounts = (1..=count as u8).collect();
            assert!(parse_launch(&record).is_none(), "count {}", count);
        }
    }

    #[test]
    fn test_no_event_on_sol_decrease() {
        let mut record = launch_transaction();
        if let Some(meta) = record.meta.as_mut() {
            meta.pre_balances[3] = 1_000_000_000;
            meta.post_balances[3] = 900_000_000;
        }
        assert!(parse_launch(&record).is_none());
    }

    #[test]
    fn test_no_event_above_maximum_sol() {
        let mut record = launch_transaction();
        if let Some(meta) = record.meta.as_mut() {
            meta.pre_balances[3] = 0;
            meta.post_balances[3] = 51_000_000_000;
        }
        assert!(parse_launch(&record).is_none());
    }

    #[test]
    fn test_no_event_without_post_token_entry() {
        let mut record = launch_transaction();
        if let Some(meta) = record.meta.as_mut() {
            meta.post_token_balances = Some(vec![]);
        }
        assert!(parse_launch(&record).is_none());
    }

    #[test]
    fn test_no_event_without_meta() {
        let mut record = launch_transaction();
        record.meta = None;
        assert!(parse_launch(&record).is_none());
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let record = launch_transaction();
        let first = parse_launch(&record).unwrap();
        let second = parse_launch(&record).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_smallest_unit_round_trip() {
        for decimals in [0u8, 6, 9] {
            let mut record = launch_transaction();
            if let Some(meta) = record.meta.as_mut() {
                if let Some(balances) = meta.post_token_balances.as_mut() {
                    balances[0].decimals = Some(decimals);
                }
            }

            let event = parse_launch(&record).unwrap();
            let rescaled =
                (event.initial_token_ui * 10f64.powi(decimals as i32)).floor() as i64;
            assert_eq!(event.initial_token_amount, rescaled, "decimals {}", decimals);
        }
    }
}
