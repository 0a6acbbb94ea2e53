use anchor_lang::prelude::*;

use crate::constants::RECIPIENT_COUNT;

#[event]
pub struct LotteryInitialized {
    pub ledger: Pubkey,
    pub authority: Pubkey,
    pub backend_authority: Pubkey,
    pub mint: Pubkey,
    pub recipient_wallets: [Pubkey; RECIPIENT_COUNT],
    pub split_percentages: [u8; RECIPIENT_COUNT],
    pub research_fund_floor: u64,
    pub entry_price: u64,
    pub max_recovery_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct EntryProcessed {
    pub payer: Pubkey,
    pub amount: u64,
    pub nonce: u64,
    /// Pool, operations, buyback, staking
    pub splits: [u64; RECIPIENT_COUNT],
    pub new_pool: u64,
    pub total_entries: u64,
    pub timestamp: i64,
}

#[event]
pub struct WinnerSelected {
    pub winner: Pubkey,
    pub amount: u64,
    pub user_id: u64,
    pub session_id: String,
    pub user_message: String,
    pub ai_response: String,
    pub decision_hash: [u8; 32],
    pub deactivated: bool,
    pub timestamp: i64,
}

/// Emitted for every verified decision, winning or not
#[event]
pub struct DecisionLogged {
    pub user_id: u64,
    pub session_id: String,
    pub is_successful: bool,
    pub decision_hash: [u8; 32],
    pub decision_timestamp: i64,
    pub timestamp: i64,
}

#[event]
pub struct EmergencyRecoveryEvent {
    pub amount: u64,
    pub remaining_pool: u64,
    pub authority: Pubkey,
    pub timestamp: i64,
    pub max_recovery_allowed: u64,
}

#[event]
pub struct TimeEscapePlanExecuted {
    pub last_participant: Pubkey,
    pub amount: u64,
    pub total_participants: u32,
    pub dormant_for: i64,
    pub timestamp: i64,
}

#[event]
pub struct LotteryStatusChanged {
    pub authority: Pubkey,
    pub is_active: bool,
    pub timestamp: i64,
}

#[event]
pub struct BackendAuthorityUpdated {
    pub authority: Pubkey,
    pub old_backend_authority: Pubkey,
    pub new_backend_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferProposed {
    pub authority: Pubkey,
    pub pending_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferAccepted {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}
