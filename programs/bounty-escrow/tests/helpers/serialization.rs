//! Serialization helpers for zero-copy Anchor structs
//!
//! NOTE: This is written for mollusk-svm 0.5.1 with solana-sdk 2.2
//! Zero-copy structs use raw bytes with 8-byte Anchor discriminator prefix
//! Layout must match #[repr(C)] struct definitions exactly

use solana_sdk::pubkey::Pubkey;

// Constants matching the program
pub const LEDGER_SIZE: usize = 392;
pub const ENTRY_SIZE: usize = 88;
pub const DECISION_SIZE: usize = 72;

// Anchor discriminators (first 8 bytes of sha256("account:Name"))
pub const LEDGER_DISCRIMINATOR: [u8; 8] = [0x2b, 0x29, 0x15, 0xd5, 0xb4, 0xb0, 0x5f, 0x20];
pub const ENTRY_DISCRIMINATOR: [u8; 8] = [0x3f, 0x12, 0x98, 0x71, 0xd7, 0xf6, 0xdd, 0xfa];
pub const DECISION_DISCRIMINATOR: [u8; 8] = [0x34, 0x5a, 0xd9, 0x75, 0x1c, 0x48, 0x0c, 0x49];

// Ledger field offsets (discriminator included)
const AUTHORITY: usize = 8;
const PENDING_AUTHORITY: usize = 40;
const BACKEND_AUTHORITY: usize = 72;
const MINT: usize = 104;
const RECIPIENT_WALLETS: usize = 136;
const LAST_PARTICIPANT: usize = 264;
const RESEARCH_FUND_FLOOR: usize = 296;
const ENTRY_PRICE: usize = 304;
const CURRENT_POOL: usize = 312;
const TOTAL_ENTRIES: usize = 320;
const MAX_RECOVERY_AMOUNT: usize = 328;
const RECOVERY_COOLDOWN: usize = 336;
const DORMANCY_THRESHOLD: usize = 344;
const LAST_ACTIVITY_TS: usize = 352;
const LAST_ROLLOVER_TS: usize = 360;
const NEXT_ROLLOVER_TS: usize = 368;
const LAST_RECOVERY_TS: usize = 376;
const SPLIT_PERCENTAGES: usize = 384;
const IS_ACTIVE: usize = 388;
const IS_PROCESSING: usize = 389;
const DEACTIVATE_ON_WIN: usize = 390;
const BUMP: usize = 391;

/// Ledger state for building and inspecting test accounts
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LedgerData {
    pub authority: Pubkey,
    pub pending_authority: Pubkey,
    pub backend_authority: Pubkey,
    pub mint: Pubkey,
    pub recipient_wallets: [Pubkey; 4],
    pub last_participant: Pubkey,
    pub research_fund_floor: u64,
    pub entry_price: u64,
    pub current_pool: u64,
    pub total_entries: u64,
    pub max_recovery_amount: u64,
    pub recovery_cooldown: i64,
    pub dormancy_threshold: i64,
    pub last_activity_ts: i64,
    pub last_rollover_ts: i64,
    pub next_rollover_ts: i64,
    pub last_recovery_ts: i64,
    pub split_percentages: [u8; 4],
    pub is_active: bool,
    pub is_processing: bool,
    pub deactivate_on_win: bool,
    pub bump: u8,
}

fn write_pubkey(data: &mut [u8], offset: usize, key: &Pubkey) {
    data[offset..offset + 32].copy_from_slice(&key.to_bytes());
}

fn read_pubkey(data: &[u8], offset: usize) -> Pubkey {
    Pubkey::new_from_array(data[offset..offset + 32].try_into().unwrap())
}

fn read_u64(data: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(data[offset..offset + 8].try_into().unwrap())
}

fn read_i64(data: &[u8], offset: usize) -> i64 {
    i64::from_le_bytes(data[offset..offset + 8].try_into().unwrap())
}

/// Serialize Ledger for test account data
pub fn serialize_ledger(ledger: &LedgerData) -> Vec<u8> {
    let mut data = vec![0u8; LEDGER_SIZE];

    data[0..8].copy_from_slice(&LEDGER_DISCRIMINATOR);

    write_pubkey(&mut data, AUTHORITY, &ledger.authority);
    write_pubkey(&mut data, PENDING_AUTHORITY, &ledger.pending_authority);
    write_pubkey(&mut data, BACKEND_AUTHORITY, &ledger.backend_authority);
    write_pubkey(&mut data, MINT, &ledger.mint);
    for (i, wallet) in ledger.recipient_wallets.iter().enumerate() {
        write_pubkey(&mut data, RECIPIENT_WALLETS + i * 32, wallet);
    }
    write_pubkey(&mut data, LAST_PARTICIPANT, &ledger.last_participant);

    data[RESEARCH_FUND_FLOOR..RESEARCH_FUND_FLOOR + 8]
        .copy_from_slice(&ledger.research_fund_floor.to_le_bytes());
    data[ENTRY_PRICE..ENTRY_PRICE + 8].copy_from_slice(&ledger.entry_price.to_le_bytes());
    data[CURRENT_POOL..CURRENT_POOL + 8].copy_from_slice(&ledger.current_pool.to_le_bytes());
    data[TOTAL_ENTRIES..TOTAL_ENTRIES + 8].copy_from_slice(&ledger.total_entries.to_le_bytes());
    data[MAX_RECOVERY_AMOUNT..MAX_RECOVERY_AMOUNT + 8]
        .copy_from_slice(&ledger.max_recovery_amount.to_le_bytes());
    data[RECOVERY_COOLDOWN..RECOVERY_COOLDOWN + 8]
        .copy_from_slice(&ledger.recovery_cooldown.to_le_bytes());
    data[DORMANCY_THRESHOLD..DORMANCY_THRESHOLD + 8]
        .copy_from_slice(&ledger.dormancy_threshold.to_le_bytes());
    data[LAST_ACTIVITY_TS..LAST_ACTIVITY_TS + 8]
        .copy_from_slice(&ledger.last_activity_ts.to_le_bytes());
    data[LAST_ROLLOVER_TS..LAST_ROLLOVER_TS + 8]
        .copy_from_slice(&ledger.last_rollover_ts.to_le_bytes());
    data[NEXT_ROLLOVER_TS..NEXT_ROLLOVER_TS + 8]
        .copy_from_slice(&ledger.next_rollover_ts.to_le_bytes());
    data[LAST_RECOVERY_TS..LAST_RECOVERY_TS + 8]
        .copy_from_slice(&ledger.last_recovery_ts.to_le_bytes());

    data[SPLIT_PERCENTAGES..SPLIT_PERCENTAGES + 4].copy_from_slice(&ledger.split_percentages);
    data[IS_ACTIVE] = ledger.is_active as u8;
    data[IS_PROCESSING] = ledger.is_processing as u8;
    data[DEACTIVATE_ON_WIN] = ledger.deactivate_on_win as u8;
    data[BUMP] = ledger.bump;

    data
}

/// Parse Ledger account data back into its fields
pub fn deserialize_ledger(data: &[u8]) -> LedgerData {
    assert_eq!(data.len(), LEDGER_SIZE);
    assert_eq!(data[0..8], LEDGER_DISCRIMINATOR);

    let mut recipient_wallets = [Pubkey::default(); 4];
    for (i, wallet) in recipient_wallets.iter_mut().enumerate() {
        *wallet = read_pubkey(data, RECIPIENT_WALLETS + i * 32);
    }

    LedgerData {
        authority: read_pubkey(data, AUTHORITY),
        pending_authority: read_pubkey(data, PENDING_AUTHORITY),
        backend_authority: read_pubkey(data, BACKEND_AUTHORITY),
        mint: read_pubkey(data, MINT),
        recipient_wallets,
        last_participant: read_pubkey(data, LAST_PARTICIPANT),
        research_fund_floor: read_u64(data, RESEARCH_FUND_FLOOR),
        entry_price: read_u64(data, ENTRY_PRICE),
        current_pool: read_u64(data, CURRENT_POOL),
        total_entries: read_u64(data, TOTAL_ENTRIES),
        max_recovery_amount: read_u64(data, MAX_RECOVERY_AMOUNT),
        recovery_cooldown: read_i64(data, RECOVERY_COOLDOWN),
        dormancy_threshold: read_i64(data, DORMANCY_THRESHOLD),
        last_activity_ts: read_i64(data, LAST_ACTIVITY_TS),
        last_rollover_ts: read_i64(data, LAST_ROLLOVER_TS),
        next_rollover_ts: read_i64(data, NEXT_ROLLOVER_TS),
        last_recovery_ts: read_i64(data, LAST_RECOVERY_TS),
        split_percentages: data[SPLIT_PERCENTAGES..SPLIT_PERCENTAGES + 4]
            .try_into()
            .unwrap(),
        is_active: data[IS_ACTIVE] != 0,
        is_processing: data[IS_PROCESSING] != 0,
        deactivate_on_win: data[DEACTIVATE_ON_WIN] != 0,
        bump: data[BUMP],
    }
}

/// Entry record fields
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryData {
    pub payer_identity: Pubkey,
    pub amount_paid: u64,
    pub pool_contribution: u64,
    pub fee_contribution: u64,
    pub nonce: u64,
    pub timestamp: i64,
    pub is_processed: bool,
    pub bump: u8,
}

/// Serialize Entry for test account data
///
/// Layout (zero-copy #[repr(C)]):
/// - 8 bytes: discriminator
/// - 32 bytes: payer_identity
/// - 5 * 8 bytes: amount_paid, pool_contribution, fee_contribution, nonce, timestamp
/// - 1 byte: is_processed
/// - 1 byte: bump
/// - 6 bytes: padding
pub fn serialize_entry(entry: &EntryData) -> Vec<u8> {
    let mut data = vec![0u8; ENTRY_SIZE];

    data[0..8].copy_from_slice(&ENTRY_DISCRIMINATOR);
    write_pubkey(&mut data, 8, &entry.payer_identity);
    data[40..48].copy_from_slice(&entry.amount_paid.to_le_bytes());
    data[48..56].copy_from_slice(&entry.pool_contribution.to_le_bytes());
    data[56..64].copy_from_slice(&entry.fee_contribution.to_le_bytes());
    data[64..72].copy_from_slice(&entry.nonce.to_le_bytes());
    data[72..80].copy_from_slice(&entry.timestamp.to_le_bytes());
    data[80] = entry.is_processed as u8;
    data[81] = entry.bump;

    data
}

/// Parse Entry account data back into its fields
pub fn deserialize_entry(data: &[u8]) -> EntryData {
    assert_eq!(data.len(), ENTRY_SIZE);
    assert_eq!(data[0..8], ENTRY_DISCRIMINATOR);

    EntryData {
        payer_identity: read_pubkey(data, 8),
        amount_paid: read_u64(data, 40),
        pool_contribution: read_u64(data, 48),
        fee_contribution: read_u64(data, 56),
        nonce: read_u64(data, 64),
        timestamp: read_i64(data, 72),
        is_processed: data[80] != 0,
        bump: data[81],
    }
}

/// Decision account data
#[derive(Clone, Debug, Default)]
pub struct DecisionData {
    pub decision_hash: [u8; 32],
    pub user_id: u64,
    pub decision_timestamp: i64,
    pub settled_at: i64,
    pub is_successful: bool,
    pub bump: u8,
}

/// Serialize Decision for test account data
///
/// Layout (zero-copy #[repr(C)]):
/// - 8 bytes: discriminator
/// - 32 bytes: decision_hash
/// - 3 * 8 bytes: user_id, decision_timestamp, settled_at
/// - 1 byte: is_successful
/// - 1 byte: bump
/// - 6 bytes: padding
pub fn serialize_decision(decision: &DecisionData) -> Vec<u8> {
    let mut data = vec![0u8; DECISION_SIZE];

    data[0..8].copy_from_slice(&DECISION_DISCRIMINATOR);
    data[8..40].copy_from_slice(&decision.decision_hash);
    data[40..48].copy_from_slice(&decision.user_id.to_le_bytes());
    data[48..56].copy_from_slice(&decision.decision_timestamp.to_le_bytes());
    data[56..64].copy_from_slice(&decision.settled_at.to_le_bytes());
    data[64] = decision.is_successful as u8;
    data[65] = decision.bump;

    data
}

/// Parse Decision account data back into its fields
pub fn deserialize_decision(data: &[u8]) -> DecisionData {
    assert_eq!(data.len(), DECISION_SIZE);
    assert_eq!(data[0..8], DECISION_DISCRIMINATOR);

    let mut decision_hash = [0u8; 32];
    decision_hash.copy_from_slice(&data[8..40]);

    DecisionData {
        decision_hash,
        user_id: read_u64(data, 40),
        decision_timestamp: read_i64(data, 48),
        settled_at: read_i64(data, 56),
        is_successful: data[64] != 0,
        bump: data[65],
    }
}
