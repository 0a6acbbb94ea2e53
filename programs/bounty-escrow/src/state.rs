use anchor_lang::prelude::*;

use crate::{constants::RECIPIENT_COUNT, errors::ErrorCode};

/// Singleton prize pool ledger
#[account(zero_copy(unsafe))]
#[repr(C)]
#[derive(Default)]
pub struct Ledger {
    /// Authority for recovery and reconfiguration
    pub authority: Pubkey,
    /// Pending authority for two-step transfer (default = no pending transfer)
    pub pending_authority: Pubkey,
    /// Adjudicator whose Ed25519 signature settles decisions
    pub backend_authority: Pubkey,
    /// Token mint all sub-accounts are denominated in
    pub mint: Pubkey,
    /// Pool (this ledger), operations, buyback, staking
    pub recipient_wallets: [Pubkey; RECIPIENT_COUNT],
    /// Payer of the most recent entry
    pub last_participant: Pubkey,
    /// Balance below which the pool is considered under-funded
    pub research_fund_floor: u64,
    /// Minimum accepted entry payment
    pub entry_price: u64,
    /// Balance attributable to the prize pool
    pub current_pool: u64,
    /// Monotonic entry counter
    pub total_entries: u64,
    /// Per-call emergency recovery ceiling
    pub max_recovery_amount: u64,
    /// Seconds required between emergency recoveries
    pub recovery_cooldown: i64,
    /// Seconds of inactivity before the escape plan may run
    pub dormancy_threshold: i64,
    /// Last entry or settlement
    pub last_activity_ts: i64,
    pub last_rollover_ts: i64,
    pub next_rollover_ts: i64,
    /// Most recent emergency recovery (0 = never)
    pub last_recovery_ts: i64,
    /// Integer percentages summing to 100, fixed at initialization
    pub split_percentages: [u8; RECIPIENT_COUNT],
    pub is_active: bool,
    /// Reentrancy guard, set only while a settlement or recovery runs
    pub is_processing: bool,
    /// End-of-round policy: deactivate after a winning settlement
    pub deactivate_on_win: bool,
    /// Bump seed for PDA derivation (stored for CU optimization)
    pub bump: u8,
}

impl Ledger {
    /// Marks the ledger as mid-operation. Fails if a guarded operation is already running.
    pub fn begin_processing(&mut self) -> Result<()> {
        require!(!self.is_processing, ErrorCode::ReentrancyDetected);
        self.is_processing = true;
        Ok(())
    }

    pub fn end_processing(&mut self) {
        self.is_processing = false;
    }
}

/// Write-once record of a single entry payment
#[account(zero_copy(unsafe))]
#[repr(C)]
#[derive(Default)]
pub struct Entry {
    pub payer_identity: Pubkey,
    pub amount_paid: u64,
    pub pool_contribution: u64,
    /// Sum of the operations, buyback and staking shares
    pub fee_contribution: u64,
    /// Caller-chosen; only used to derive a unique address
    pub nonce: u64,
    pub timestamp: i64,
    pub is_processed: bool,
    pub bump: u8,
    pub _padding: [u8; 6],
}

/// Write-once marker for a settled adjudication, keyed by its decision hash
#[account(zero_copy(unsafe))]
#[repr(C)]
#[derive(Default)]
pub struct Decision {
    pub decision_hash: [u8; 32],
    pub user_id: u64,
    /// Timestamp signed by the adjudicator
    pub decision_timestamp: i64,
    pub settled_at: i64,
    pub is_successful: bool,
    pub bump: u8,
    pub _padding: [u8; 6],
}

// Compile-time size assertions to catch accidental struct changes
const _: () = assert!(std::mem::size_of::<Ledger>() == 384); // 392 - 8 (discriminator added by Anchor)
const _: () = assert!(std::mem::size_of::<Entry>() == 80); // 88 - 8 (discriminator added by Anchor)
const _: () = assert!(std::mem::size_of::<Decision>() == 64); // 72 - 8 (discriminator added by Anchor)
