// PDA seeds
pub const LEDGER_SEED: &[u8] = b"lottery";
pub const ENTRY_SEED: &[u8] = b"entry";
pub const DECISION_SEED: &[u8] = b"decision";

// Recipient slots (fixed order in Ledger::recipient_wallets)
pub const RECIPIENT_COUNT: usize = 4;
pub const POOL_INDEX: usize = 0;
pub const OPERATIONS_INDEX: usize = 1;
pub const BUYBACK_INDEX: usize = 2;
pub const STAKING_INDEX: usize = 3;

// Split configuration
pub const PERCENT_DENOMINATOR: u64 = 100;
pub const DEFAULT_SPLIT_PERCENTAGES: [u8; RECIPIENT_COUNT] = [60, 20, 10, 10]; // pool/ops/buyback/staking

// Adjudication input bounds
pub const MAX_MESSAGE_LENGTH: usize = 5000;
pub const MAX_SESSION_ID_LENGTH: usize = 100;
pub const TIMESTAMP_TOLERANCE: i64 = 60 * 60; // 1 hour

// Escape plan
pub const MAX_PARTICIPANTS: usize = 64;

// Rollover markers are opaque to the engine; refreshed on init and escape
pub const ROLLOVER_INTERVAL: i64 = 24 * 60 * 60;

// Account sizes for zero-copy structs
// Ledger:
// - discriminator: 8
// - authority, pending_authority, backend_authority, mint: 4 * 32 = 128
// - recipient_wallets: [Pubkey; 4] = 128
// - last_participant: 32
// - u64/i64 fields: 11 * 8 = 88
// - split_percentages: 4
// - is_active, is_processing, deactivate_on_win, bump: 4
// Total: 8 + 128 + 128 + 32 + 88 + 4 + 4 = 392
pub const LEDGER_SIZE: usize = 392;

// Entry:
// - discriminator: 8
// - payer_identity: 32
// - amount_paid, pool_contribution, fee_contribution, nonce, timestamp: 5 * 8 = 40
// - is_processed, bump: 2
// - padding for 8-byte alignment: 6
// Total: 8 + 32 + 40 + 2 + 6 = 88
pub const ENTRY_SIZE: usize = 88;

// Decision:
// - discriminator: 8
// - decision_hash: 32
// - user_id, decision_timestamp, settled_at: 3 * 8 = 24
// - is_successful, bump: 2
// - padding for 8-byte alignment: 6
// Total: 8 + 32 + 24 + 2 + 6 = 72
pub const DECISION_SIZE: usize = 72;
