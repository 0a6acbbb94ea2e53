use anchor_lang::prelude::*;

use crate::{
    constants::LEDGER_SEED, errors::ErrorCode, events::BackendAuthorityUpdated, state::Ledger,
};

#[derive(Accounts)]
pub struct SetBackendAuthority<'info> {
    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.load()?.bump,
        constraint = ledger.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub ledger: AccountLoader<'info, Ledger>,

    pub authority: Signer<'info>,
}

/// Rotates the adjudicator key used to verify decisions
/// Only callable by the ledger authority
pub fn handler(ctx: Context<SetBackendAuthority>, new_backend_authority: Pubkey) -> Result<()> {
    require!(
        new_backend_authority != Pubkey::default(),
        ErrorCode::InvalidPubkey
    );

    let ledger = &mut ctx.accounts.ledger.load_mut()?;
    require_keys_neq!(
        new_backend_authority,
        ledger.authority,
        ErrorCode::InvalidInput
    );

    let old_backend_authority = ledger.backend_authority;
    ledger.backend_authority = new_backend_authority;

    emit!(BackendAuthorityUpdated {
        authority: ctx.accounts.authority.key(),
        old_backend_authority,
        new_backend_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
