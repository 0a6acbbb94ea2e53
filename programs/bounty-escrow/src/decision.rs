//! Verification of adjudicator decisions
//!
//! The backend signs the 32-byte decision hash with the key stored as
//! `Ledger::backend_authority`. On-chain the signature is checked by the native
//! Ed25519 program, which must run as the instruction immediately before
//! `process_ai_decision`; this module asserts that instruction covers exactly
//! the claimed hash, signature and key.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::Instruction,
    sysvar::instructions::{load_current_index_checked, load_instruction_at_checked},
};
use solana_sha256_hasher::hashv;

use crate::{
    constants::{MAX_MESSAGE_LENGTH, MAX_SESSION_ID_LENGTH, TIMESTAMP_TOLERANCE},
    errors::ErrorCode,
};

// Ed25519SigVerify111111111111111111111111111
pub fn ed25519_program_id() -> Pubkey {
    Pubkey::new_from_array([
        3, 125, 70, 214, 124, 147, 251, 190, 18, 249, 66, 143, 131, 141, 64, 255,
        5, 112, 116, 73, 39, 244, 138, 100, 252, 202, 112, 68, 128, 0, 0, 0,
    ])
}

// Ed25519 instruction data layout
const ED25519_HEADER_LEN: usize = 2;
const ED25519_OFFSETS_LEN: usize = 14;
const ED25519_SIGNATURE_LEN: usize = 64;
const ED25519_PUBKEY_LEN: usize = 32;

/// An adjudication claim as submitted by the backend
pub struct DecisionClaim<'a> {
    pub user_message: &'a str,
    pub ai_response: &'a str,
    pub user_id: u64,
    pub session_id: &'a str,
    pub timestamp: i64,
    pub decision_hash: [u8; 32],
    pub signature: [u8; 64],
    pub is_successful: bool,
}

/// Signature, public key and message carried by an Ed25519 verify instruction
#[derive(Debug)]
pub struct Ed25519Payload {
    pub signature: [u8; 64],
    pub pubkey: Pubkey,
    pub message: Vec<u8>,
}

/// SHA-256 over the canonical decision layout:
/// user_message | 0x00 | ai_response | 0x00 | outcome | user_id (le) | session_id | timestamp (le)
pub fn compute_decision_hash(
    user_message: &str,
    ai_response: &str,
    is_successful: bool,
    user_id: u64,
    session_id: &str,
    timestamp: i64,
) -> [u8; 32] {
    hashv(&[
        user_message.as_bytes(),
        &[0u8],
        ai_response.as_bytes(),
        &[0u8],
        &[is_successful as u8],
        &user_id.to_le_bytes(),
        session_id.as_bytes(),
        &timestamp.to_le_bytes(),
    ])
    .to_bytes()
}

// Tx layout must be: [ ..., ed25519_verify, process_ai_decision ]
pub fn load_preceding_instruction(instructions_sysvar: &AccountInfo) -> Result<Instruction> {
    let current_ix = load_current_index_checked(instructions_sysvar)? as usize;
    require!(current_ix >= 1, ErrorCode::InvalidSignature);

    load_instruction_at_checked(current_ix - 1, instructions_sysvar)
        .map_err(|_| error!(ErrorCode::InvalidSignature))
}

/// Parses a single self-contained signature out of an Ed25519 verify instruction
pub fn parse_ed25519_instruction(ix: &Instruction) -> Result<Ed25519Payload> {
    require_keys_eq!(ix.program_id, ed25519_program_id(), ErrorCode::InvalidSignature);

    let data = &ix.data;
    require!(
        data.len() >= ED25519_HEADER_LEN + ED25519_OFFSETS_LEN,
        ErrorCode::InvalidSignature
    );

    let num_sigs = data[0];
    require!(num_sigs == 1, ErrorCode::InvalidSignature);

    let read_u16 = |at: usize| u16::from_le_bytes([data[at], data[at + 1]]);
    let o = ED25519_HEADER_LEN;

    let sig_off = read_u16(o) as usize;
    let sig_ix = read_u16(o + 2);
    let pk_off = read_u16(o + 4) as usize;
    let pk_ix = read_u16(o + 6);
    let msg_off = read_u16(o + 8) as usize;
    let msg_sz = read_u16(o + 10) as usize;
    let msg_ix = read_u16(o + 12);

    // Every part must live inside this instruction, not be borrowed from another one
    require!(sig_ix == u16::MAX, ErrorCode::InvalidSignature);
    require!(pk_ix == u16::MAX, ErrorCode::InvalidSignature);
    require!(msg_ix == u16::MAX, ErrorCode::InvalidSignature);

    require!(
        sig_off + ED25519_SIGNATURE_LEN <= data.len(),
        ErrorCode::InvalidSignature
    );
    require!(
        pk_off + ED25519_PUBKEY_LEN <= data.len(),
        ErrorCode::InvalidSignature
    );
    require!(msg_off + msg_sz <= data.len(), ErrorCode::InvalidSignature);

    let signature: [u8; 64] = data[sig_off..sig_off + ED25519_SIGNATURE_LEN]
        .try_into()
        .map_err(|_| error!(ErrorCode::InvalidSignature))?;
    let pk_bytes: [u8; 32] = data[pk_off..pk_off + ED25519_PUBKEY_LEN]
        .try_into()
        .map_err(|_| error!(ErrorCode::InvalidSignature))?;

    Ok(Ed25519Payload {
        signature,
        pubkey: Pubkey::new_from_array(pk_bytes),
        message: data[msg_off..msg_off + msg_sz].to_vec(),
    })
}

/// Verifies a claim end to end. Pure: performs no state mutation.
///
/// 1. the hash recomputed from the payload equals `decision_hash`
/// 2. the Ed25519 instruction signs `decision_hash` with `signature` under `backend_authority`
/// 3. `timestamp` is within `TIMESTAMP_TOLERANCE` of `now`
/// 4. string fields respect their bounds
pub fn verify_decision(
    claim: &DecisionClaim,
    backend_authority: &Pubkey,
    ed25519_ix: &Instruction,
    now: i64,
) -> Result<()> {
    let expected_hash = compute_decision_hash(
        claim.user_message,
        claim.ai_response,
        claim.is_successful,
        claim.user_id,
        claim.session_id,
        claim.timestamp,
    );
    require!(
        claim.decision_hash == expected_hash,
        ErrorCode::InvalidDecisionHash
    );

    let payload = parse_ed25519_instruction(ed25519_ix)?;
    require!(
        payload.message.as_slice() == claim.decision_hash.as_slice(),
        ErrorCode::InvalidSignature
    );
    require!(payload.signature == claim.signature, ErrorCode::InvalidSignature);
    require_keys_eq!(
        payload.pubkey,
        *backend_authority,
        ErrorCode::UnauthorizedBackend
    );

    check_decision_timestamp(claim.timestamp, now)?;
    check_decision_inputs(claim)?;

    Ok(())
}

/// Bounds replay of old decisions and rejects ones dated in the future
pub fn check_decision_timestamp(timestamp: i64, now: i64) -> Result<()> {
    require!(timestamp > 0, ErrorCode::InvalidTimestamp);
    require!(
        now.saturating_sub(timestamp).saturating_abs() <= TIMESTAMP_TOLERANCE,
        ErrorCode::TimestampOutOfRange
    );
    Ok(())
}

pub fn check_decision_inputs(claim: &DecisionClaim) -> Result<()> {
    require!(
        claim.user_message.len() <= MAX_MESSAGE_LENGTH,
        ErrorCode::InputTooLong
    );
    require!(
        claim.ai_response.len() <= MAX_MESSAGE_LENGTH,
        ErrorCode::InputTooLong
    );
    require!(
        claim.session_id.len() <= MAX_SESSION_ID_LENGTH,
        ErrorCode::InputTooLong
    );
    require!(
        !claim.session_id.is_empty()
            && claim
                .session_id
                .bytes()
                .all(|c| c.is_ascii_alphanumeric() || c == b'-' || c == b'_'),
        ErrorCode::InvalidSessionId
    );
    require!(claim.user_id > 0, ErrorCode::InvalidInput);
    Ok(())
}
