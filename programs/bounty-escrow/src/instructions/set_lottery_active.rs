use anchor_lang::prelude::*;

use crate::{constants::LEDGER_SEED, errors::ErrorCode, events::LotteryStatusChanged, state::Ledger};

#[derive(Accounts)]
pub struct SetLotteryActive<'info> {
    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.load()?.bump,
        constraint = ledger.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub ledger: AccountLoader<'info, Ledger>,

    pub authority: Signer<'info>,
}

/// Pauses or resumes the ledger
/// Only callable by the ledger authority
pub fn handler(ctx: Context<SetLotteryActive>, is_active: bool) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger.load_mut()?;

    ledger.is_active = is_active;

    emit!(LotteryStatusChanged {
        authority: ctx.accounts.authority.key(),
        is_active,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
