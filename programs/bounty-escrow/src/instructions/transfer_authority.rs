use anchor_lang::prelude::*;

use crate::{
    constants::LEDGER_SEED, errors::ErrorCode, events::AuthorityTransferProposed, state::Ledger,
};

#[derive(Accounts)]
pub struct TransferAuthority<'info> {
    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.load()?.bump,
        constraint = ledger.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub ledger: AccountLoader<'info, Ledger>,

    pub authority: Signer<'info>,
}

/// Nominates a successor for recovery and reconfiguration rights.
/// The successor takes over only after accept_authority; Pubkey::default() withdraws the nomination.
pub fn handler(ctx: Context<TransferAuthority>, new_authority: Pubkey) -> Result<()> {
    let ledger_key = ctx.accounts.ledger.key();
    let ledger = &mut ctx.accounts.ledger.load_mut()?;

    if new_authority != Pubkey::default() {
        // The ledger PDA cannot sign, so it could never accept
        require_keys_neq!(new_authority, ledger_key, ErrorCode::InvalidPubkey);
        // Recovery rights stay separate from the adjudicator key
        require_keys_neq!(
            new_authority,
            ledger.backend_authority,
            ErrorCode::InvalidInput
        );
    }

    ledger.pending_authority = new_authority;

    #[cfg(feature = "verbose")]
    msg!("Pending ledger authority: {}", new_authority);

    emit!(AuthorityTransferProposed {
        authority: ctx.accounts.authority.key(),
        pending_authority: new_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
