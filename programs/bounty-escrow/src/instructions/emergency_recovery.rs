use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{LEDGER_SEED, POOL_INDEX},
    errors::ErrorCode,
    events::EmergencyRecoveryEvent,
    state::Ledger,
    utils::{check_recovery_allowed, transfer_from_pool, validate_recipient_ata, with_processing_lock},
};

#[derive(Accounts)]
pub struct EmergencyRecovery<'info> {
    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.load()?.bump,
        constraint = ledger.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub ledger: AccountLoader<'info, Ledger>,

    pub authority: Signer<'info>,

    #[account(
        constraint = mint.key() == ledger.load()?.mint @ ErrorCode::InvalidRecipientAccount
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub pool_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub authority_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Withdraws a bounded amount from the pool to the authority
/// Rate limited by the ledger's per-call ceiling and cooldown
pub fn handler(ctx: Context<EmergencyRecovery>, amount: u64) -> Result<()> {
    with_processing_lock(&ctx.accounts.ledger, || recover(&ctx, amount))
}

fn recover(ctx: &Context<EmergencyRecovery>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let (pool_wallet, max_recovery_amount, bump) = {
        let ledger = ctx.accounts.ledger.load()?;
        check_recovery_allowed(
            amount,
            ledger.max_recovery_amount,
            ledger.current_pool,
            ledger.last_recovery_ts,
            ledger.recovery_cooldown,
            now,
        )?;
        (
            ledger.recipient_wallets[POOL_INDEX],
            ledger.max_recovery_amount,
            ledger.bump,
        )
    };

    validate_recipient_ata(
        &ctx.accounts.pool_vault,
        &pool_wallet,
        &ctx.accounts.mint.key(),
        &ctx.accounts.token_program.key(),
    )?;

    transfer_from_pool(
        &ctx.accounts.ledger.to_account_info(),
        bump,
        &ctx.accounts.pool_vault,
        &ctx.accounts.authority_token_account,
        &ctx.accounts.mint,
        &ctx.accounts.token_program,
        amount,
    )?;

    let remaining_pool = {
        let ledger = &mut ctx.accounts.ledger.load_mut()?;
        ledger.current_pool = ledger
            .current_pool
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientFunds)?;
        ledger.last_recovery_ts = now;
        ledger.current_pool
    };

    #[cfg(feature = "verbose")]
    msg!("Emergency recovery of {}, {} left in pool", amount, remaining_pool);

    emit!(EmergencyRecoveryEvent {
        amount,
        remaining_pool,
        authority: ctx.accounts.authority.key(),
        timestamp: now,
        max_recovery_allowed: max_recovery_amount,
    });

    Ok(())
}
