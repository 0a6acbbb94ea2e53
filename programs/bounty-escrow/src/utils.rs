use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::get_associated_token_address_with_program_id,
    token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::{
    constants::{LEDGER_SEED, PERCENT_DENOMINATOR, POOL_INDEX, RECIPIENT_COUNT},
    errors::ErrorCode,
    state::Ledger,
};

/// Split an entry payment across the four recipients
/// Floors each share, then assigns the rounding remainder to the pool so the
/// parts always sum to `amount`. Returns None on overflow.
pub fn calculate_entry_splits(
    amount: u64,
    percentages: &[u8; RECIPIENT_COUNT],
) -> Option<[u64; RECIPIENT_COUNT]> {
    let mut splits = [0u64; RECIPIENT_COUNT];
    let mut allocated = 0u64;

    for (split, pct) in splits.iter_mut().zip(percentages.iter()) {
        *split = (amount as u128)
            .checked_mul(*pct as u128)?
            .checked_div(PERCENT_DENOMINATOR as u128)?
            .try_into()
            .ok()?;
        allocated = allocated.checked_add(*split)?;
    }

    let remainder = amount.checked_sub(allocated)?;
    splits[POOL_INDEX] = splits[POOL_INDEX].checked_add(remainder)?;

    Some(splits)
}

/// Percentages must sum to exactly 100
pub fn validate_split_percentages(percentages: &[u8; RECIPIENT_COUNT]) -> bool {
    percentages.iter().map(|p| *p as u64).sum::<u64>() == PERCENT_DENOMINATOR
}

/// Bounded emergency recovery rules, checked in order: ceiling, pool balance, cooldown
pub fn check_recovery_allowed(
    amount: u64,
    max_recovery_amount: u64,
    current_pool: u64,
    last_recovery_ts: i64,
    recovery_cooldown: i64,
    now: i64,
) -> Result<()> {
    require!(amount > 0, ErrorCode::InvalidInput);
    require!(
        amount <= max_recovery_amount,
        ErrorCode::RecoveryAmountExceedsLimit
    );
    require!(amount <= current_pool, ErrorCode::InsufficientFunds);

    let elapsed = now.saturating_sub(last_recovery_ts);
    require!(elapsed >= recovery_cooldown, ErrorCode::RecoveryCooldownActive);

    Ok(())
}

/// Returns how long the ledger has been dormant, or fails if below threshold
pub fn check_dormancy(last_activity_ts: i64, dormancy_threshold: i64, now: i64) -> Result<i64> {
    let dormant_for = now.saturating_sub(last_activity_ts);
    require!(
        dormant_for >= dormancy_threshold,
        ErrorCode::EscapePlanNotReady
    );
    Ok(dormant_for)
}

/// Token account must be the canonical ATA of `owner` for `mint`
pub fn validate_recipient_ata(
    token_account: &InterfaceAccount<TokenAccount>,
    owner: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Result<()> {
    let expected_ata = get_associated_token_address_with_program_id(owner, mint, token_program);
    require_keys_eq!(
        token_account.key(),
        expected_ata,
        ErrorCode::InvalidRecipientAccount
    );
    require_keys_eq!(token_account.owner, *owner, ErrorCode::InvalidRecipientAccount);
    require_keys_eq!(token_account.mint, *mint, ErrorCode::InvalidRecipientAccount);
    Ok(())
}

/// Runs `body` with the ledger's reentrancy guard held
/// The guard is written to account data before `body` runs, so a nested
/// invocation from a CPI observes it. It is released on both the success and
/// the error path before the body's result is returned.
pub fn with_processing_lock<'info, T>(
    ledger: &AccountLoader<'info, Ledger>,
    body: impl FnOnce() -> Result<T>,
) -> Result<T> {
    ledger.load_mut()?.begin_processing()?;
    // ← Borrow DROPPED here, body is free to CPI

    let outcome = body();

    ledger.load_mut()?.end_processing();

    outcome
}

/// Transfers tokens out of the pool vault, signed by the ledger PDA
pub fn transfer_from_pool<'info>(
    ledger_info: &AccountInfo<'info>,
    ledger_bump: u8,
    pool_vault: &InterfaceAccount<'info, TokenAccount>,
    destination: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    token_program: &Interface<'info, TokenInterface>,
    amount: u64,
) -> Result<()> {
    let seeds = &[LEDGER_SEED, &[ledger_bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = TransferChecked {
        from: pool_vault.to_account_info(),
        mint: mint.to_account_info(),
        to: destination.to_account_info(),
        authority: ledger_info.clone(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token_interface::transfer_checked(cpi_ctx, amount, mint.decimals)
}

/// Transfers tokens from a payer-owned account; the payer signs the transaction
pub fn transfer_from_payer<'info>(
    payer: &Signer<'info>,
    source: &InterfaceAccount<'info, TokenAccount>,
    destination: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    token_program: &Interface<'info, TokenInterface>,
    amount: u64,
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from: source.to_account_info(),
        mint: mint.to_account_info(),
        to: destination.to_account_info(),
        authority: payer.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    token_interface::transfer_checked(cpi_ctx, amount, mint.decimals)
}
