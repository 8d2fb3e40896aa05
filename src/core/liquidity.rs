//! Initial liquidity derivation from balance snapshots.
//!
//! A create-and-buy transaction does not carry its liquidity amounts
//! anywhere in the instruction payload; they are reconstructed by
//! differencing the pre/post balance snapshots around the bonding curve
//! account and the freshly minted token. Every step is a gate: on failure
//! the transaction is rejected with a logged warning and no event is
//! produced.

use log::warn;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;

use crate::core::transaction::{TokenBalanceRecord, TransactionRecord};

/// Smallest plausible launch buy-in, in lamports.
pub const MIN_INITIAL_SOL: u64 = 3 * LAMPORTS_PER_SOL;
/// Largest plausible launch buy-in, in lamports.
pub const MAX_INITIAL_SOL: u64 = 50 * LAMPORTS_PER_SOL;
/// Smallest plausible initial token purchase, in display units.
pub const MIN_INITIAL_TOKEN: f64 = 1.0;

/// Plausibility bounds applied to the balance deltas.
///
/// The defaults bound out wash-trade-sized and implausibly large launches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchThresholds {
    pub min_sol_lamports: u64,
    pub max_sol_lamports: u64,
    pub min_token_ui: f64,
}

impl Default for LaunchThresholds {
    fn default() -> Self {
        Self {
            min_sol_lamports: MIN_INITIAL_SOL,
            max_sol_lamports: MAX_INITIAL_SOL,
            min_token_ui: MIN_INITIAL_TOKEN,
        }
    }
}

/// Validated initial liquidity of a launch, in both representations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialLiquidity {
    /// Lamports added to the bonding curve.
    pub sol_lamports: u64,
    /// Same amount in SOL.
    pub sol_ui: f64,
    /// Tokens bought at launch, in smallest units (scaled by decimals).
    pub token_amount: i64,
    /// Same amount in display units.
    pub token_ui: f64,
    pub token_decimals: u8,
}

fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

fn find_token_balance<'a>(
    balances: &'a [TokenBalanceRecord],
    mint: &Pubkey,
) -> Option<&'a TokenBalanceRecord> {
    balances.iter().find(|balance| balance.mint == *mint)
}

/// Derive the initial liquidity for a resolved create instruction.
///
/// `bonding_curve` is re-located in the account-key table by identity so its
/// position can index the parallel lamport balance arrays; the token side is
/// matched by mint against the snapshot entries. Returns `None` when any
/// gate fails.
pub fn compute_initial_liquidity(
    record: &TransactionRecord,
    mint: &Pubkey,
    bonding_curve: &Pubkey,
    thresholds: &LaunchThresholds,
) -> Option<InitialLiquidity> {
    let signature = record.primary_signature();
    let meta = record.meta.as_ref()?;

    let Some(position) = record.account_keys.iter().position(|key| key == bonding_curve) else {
        warn!("transaction has no bonding curve for signature {}", signature);
        return None;
    };

    let (Some(&before_sol), Some(&after_sol)) = (
        meta.pre_balances.get(position),
        meta.post_balances.get(position),
    ) else {
        warn!(
            "balance arrays do not cover account position {} for signature {}",
            position, signature
        );
        return None;
    };

    if after_sol <= before_sol {
        warn!("transaction has no sol balance change for signature {}", signature);
        warn!("before: {} lamports, after: {} lamports", before_sol, after_sol);
        return None;
    }
    let sol_lamports = after_sol - before_sol;

    if sol_lamports < thresholds.min_sol_lamports {
        warn!(
            "transaction has less than minimum sol balance ({} SOL) for signature {}",
            lamports_to_sol(sol_lamports),
            signature
        );
        return None;
    }
    if sol_lamports > thresholds.max_sol_lamports {
        warn!(
            "transaction has more than maximum sol balance ({} SOL) for signature {}",
            lamports_to_sol(sol_lamports),
            signature
        );
        return None;
    }

    // Absent pre entry means the mint had no prior balance, the normal case
    // for a brand-new token.
    let before_token = meta
        .pre_token_balances
        .as_deref()
        .and_then(|balances| find_token_balance(balances, mint))
        .and_then(|balance| balance.ui_amount)
        .unwrap_or(0.0);

    let post_balances = meta.post_token_balances.as_deref()?;
    let Some(after_entry) = find_token_balance(post_balances, mint) else {
        warn!("transaction has no post token balance for signature {}", signature);
        return None;
    };
    let Some(after_token) = after_entry.ui_amount else {
        warn!("transaction has no post token balance for signature {}", signature);
        return None;
    };

    if after_token <= before_token {
        warn!("transaction has no token balance change for signature {}", signature);
        return None;
    }
    let token_ui = after_token - before_token;

    if token_ui < thresholds.min_token_ui {
        warn!(
            "transaction has less than minimum token balance ({}) for signature {}",
            token_ui, signature
        );
        return None;
    }

    let token_decimals = match after_entry.decimals {
        Some(decimals) => decimals,
        None => {
            warn!("transaction has no token decimals for signature {}", signature);
            0
        }
    };

    Some(InitialLiquidity {
        sol_lamports,
        sol_ui: lamports_to_sol(sol_lamports),
        token_amount: (token_ui * 10f64.powi(token_decimals as i32)).floor() as i64,
        token_ui,
        token_decimals,
    })
}
