use anchor_lang::prelude::*;

use crate::{
    constants::LEDGER_SEED, errors::ErrorCode, events::AuthorityTransferAccepted, state::Ledger,
};

#[derive(Accounts)]
pub struct AcceptAuthority<'info> {
    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.load()?.bump,
    )]
    pub ledger: AccountLoader<'info, Ledger>,

    pub new_authority: Signer<'info>,
}

/// Completes a nomination made by transfer_authority. Signed by the nominee.
pub fn handler(ctx: Context<AcceptAuthority>) -> Result<()> {
    let claimant = ctx.accounts.new_authority.key();
    let ledger = &mut ctx.accounts.ledger.load_mut()?;

    let pending = ledger.pending_authority;
    require!(pending != Pubkey::default(), ErrorCode::NoPendingTransfer);
    require_keys_eq!(pending, claimant, ErrorCode::Unauthorized);

    // The adjudicator key may have been rotated onto the nominee since the proposal
    require_keys_neq!(claimant, ledger.backend_authority, ErrorCode::InvalidInput);

    let old_authority = std::mem::replace(&mut ledger.authority, claimant);
    ledger.pending_authority = Pubkey::default();

    emit!(AuthorityTransferAccepted {
        old_authority,
        new_authority: claimant,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
