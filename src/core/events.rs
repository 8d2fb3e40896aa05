//! Launch event types emitted by the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::core::liquidity::InitialLiquidity;
use crate::instr::pumpfun::CreateAccounts;

/// A detected PumpFun token launch.
///
/// Carries the create instruction's full account set plus the initial
/// liquidity derived from balance snapshots. Immutable once assembled; the
/// core hands it to the sink and keeps no reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LaunchEvent {
    // === create instruction accounts ===
    pub mint: Pubkey,
    pub mint_authority: Pubkey,
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
    pub global: Pubkey,
    pub mpl_token_metadata: Pubkey,
    pub metadata: Pubkey,
    pub user: Pubkey,
    pub system_program: Pubkey,
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
    pub rent: Pubkey,
    pub event_authority: Pubkey,
    pub program: Pubkey,

    // === initial liquidity ===
    /// Lamports added to the bonding curve by the bundled buy.
    pub initial_sol_lamports: i64,
    /// Tokens bought at launch, in smallest units.
    pub initial_token_amount: i64,
    /// Lamport amount in SOL.
    pub initial_sol_ui: f64,
    /// Token amount in display units.
    pub initial_token_ui: f64,
    pub token_decimals: u8,
}

impl LaunchEvent {
    /// Assemble an event from resolved accounts and validated liquidity.
    pub fn from_parts(accounts: CreateAccounts, liquidity: InitialLiquidity) -> Self {
        Self {
            mint: accounts.mint,
            mint_authority: accounts.mint_authority,
            bonding_curve: accounts.bonding_curve,
            associated_bonding_curve: accounts.associated_bonding_curve,
            global: accounts.global,
            mpl_token_metadata: accounts.mpl_token_metadata,
            metadata: accounts.metadata,
            user: accounts.user,
            system_program: accounts.system_program,
            token_program: accounts.token_program,
            associated_token_program: accounts.associated_token_program,
            rent: accounts.rent,
            event_authority: accounts.event_authority,
            program: accounts.program,
            initial_sol_lamports: liquidity.sol_lamports as i64,
            initial_token_amount: liquidity.token_amount,
            initial_sol_ui: liquidity.sol_ui,
            initial_token_ui: liquidity.token_ui,
            token_decimals: liquidity.token_decimals,
        }
    }
}

/// Per-transaction record delivered to the sink.
///
/// One record is produced for every transaction that passed the log filter,
/// was fetched, and did not revert; `launch` is `None` when a pipeline gate
/// rejected it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub signature: Signature,
    /// Slot from the log notification's response context.
    pub slot: u64,
    pub launch: Option<LaunchEvent>,
    pub observed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_copies_every_field() {
        let accounts = CreateAccounts {
            mint: Pubkey::new_unique(),
            mint_authority: Pubkey::new_unique(),
            bonding_curve: Pubkey::new_unique(),
            associated_bonding_curve: Pubkey::new_unique(),
            global: Pubkey::new_unique(),
            mpl_token_metadata: Pubkey::new_unique(),
            metadata: Pubkey::new_unique(),
            user: Pubkey::new_unique(),
            system_program: Pubkey::new_unique(),
            token_program: Pubkey::new_unique(),
            associated_token_program: Pubkey::new_unique(),
            rent: Pubkey::new_unique(),
            event_authority: Pubkey::new_unique(),
            program: Pubkey::new_unique(),
        };
        let liquidity = InitialLiquidity {
            sol_lamports: 3_000_000_000,
            sol_ui: 3.0,
            token_amount: 2_000_000,
            token_ui: 2.0,
            token_decimals: 6,
        };

        let event = LaunchEvent::from_parts(accounts, liquidity);
        assert_eq!(event.mint, accounts.mint);
        assert_eq!(event.bonding_curve, accounts.bonding_curve);
        assert_eq!(event.program, accounts.program);
        assert_eq!(event.initial_sol_lamports, 3_000_000_000);
        assert_eq!(event.initial_token_amount, 2_000_000);
        assert_eq!(event.initial_sol_ui, 3.0);
        assert_eq!(event.initial_token_ui, 2.0);
        assert_eq!(event.token_decimals, 6);
    }
}
