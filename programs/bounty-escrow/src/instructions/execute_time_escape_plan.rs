use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{LEDGER_SEED, MAX_PARTICIPANTS, POOL_INDEX, ROLLOVER_INTERVAL},
    errors::ErrorCode,
    events::TimeEscapePlanExecuted,
    state::Ledger,
    utils::{check_dormancy, transfer_from_pool, validate_recipient_ata, with_processing_lock},
};

#[derive(Accounts)]
#[instruction(last_participant: Pubkey)]
pub struct ExecuteTimeEscapePlan<'info> {
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

    /// CHECK: Must match the last_participant argument, only used as token account owner
    #[account(
        constraint = last_participant_wallet.key() == last_participant @ ErrorCode::InvalidInput
    )]
    pub last_participant_wallet: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = last_participant_wallet,
        token::token_program = token_program,
    )]
    pub last_participant_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Releases the whole pool to the last participant once the ledger has gone dormant
pub fn handler(
    ctx: Context<ExecuteTimeEscapePlan>,
    last_participant: Pubkey,
    participant_list: Vec<Pubkey>,
) -> Result<()> {
    with_processing_lock(&ctx.accounts.ledger, || {
        escape(&ctx, last_participant, &participant_list)
    })
}

fn escape(
    ctx: &Context<ExecuteTimeEscapePlan>,
    last_participant: Pubkey,
    participant_list: &[Pubkey],
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let (pool_wallet, payout, bump, dormant_for) = {
        let ledger = ctx.accounts.ledger.load()?;

        let dormant_for = check_dormancy(ledger.last_activity_ts, ledger.dormancy_threshold, now)?;

        require!(!participant_list.is_empty(), ErrorCode::NoParticipants);
        require!(
            participant_list.len() <= MAX_PARTICIPANTS,
            ErrorCode::InputTooLong
        );
        require!(
            participant_list.iter().all(|p| *p != Pubkey::default()),
            ErrorCode::InvalidPubkey
        );
        require!(
            participant_list.contains(&last_participant),
            ErrorCode::InvalidInput
        );
        require_keys_eq!(
            last_participant,
            ledger.last_participant,
            ErrorCode::InvalidInput
        );

        require!(ledger.current_pool > 0, ErrorCode::InsufficientFunds);

        (
            ledger.recipient_wallets[POOL_INDEX],
            ledger.current_pool,
            ledger.bump,
            dormant_for,
        )
    };

    validate_recipient_ata(
        &ctx.accounts.pool_vault,
        &pool_wallet,
        &ctx.accounts.mint.key(),
        &ctx.accounts.token_program.key(),
    )?;
    require!(
        ctx.accounts.pool_vault.amount >= payout,
        ErrorCode::InsufficientFunds
    );

    transfer_from_pool(
        &ctx.accounts.ledger.to_account_info(),
        bump,
        &ctx.accounts.pool_vault,
        &ctx.accounts.last_participant_token_account,
        &ctx.accounts.mint,
        &ctx.accounts.token_program,
        payout,
    )?;

    {
        let ledger = &mut ctx.accounts.ledger.load_mut()?;
        ledger.current_pool = 0;
        ledger.last_activity_ts = now;
        ledger.last_rollover_ts = now;
        ledger.next_rollover_ts = now
            .checked_add(ROLLOVER_INTERVAL)
            .ok_or(ErrorCode::MathOverflow)?;
    }

    #[cfg(feature = "verbose")]
    msg!(
        "Escape plan paid {} to {} after {}s dormant",
        payout,
        last_participant,
        dormant_for
    );

    emit!(TimeEscapePlanExecuted {
        last_participant,
        amount: payout,
        total_participants: participant_list.len() as u32,
        dormant_for,
        timestamp: now,
    });

    Ok(())
}
