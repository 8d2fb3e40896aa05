//! Instruction-side decoding.
//!
//! One program, one instruction type: the PumpFun create. Everything else in
//! a transaction is deliberately opaque to this crate.

pub mod pumpfun;

pub use pumpfun::{
    classify_instruction, find_create_instruction, resolve_create_accounts, CreateAccounts,
    InstructionKind, CREATE_ACCOUNT_COUNT, PUMPFUN_PROGRAM_ID,
};
