use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{DECISION_SEED, DECISION_SIZE, LEDGER_SEED, POOL_INDEX},
    decision::{load_preceding_instruction, verify_decision, DecisionClaim},
    errors::ErrorCode,
    events::{DecisionLogged, WinnerSelected},
    state::{Decision, Ledger},
    utils::{transfer_from_pool, validate_recipient_ata, with_processing_lock},
};

#[derive(Accounts)]
#[instruction(user_message: String, ai_response: String, decision_hash: [u8; 32])]
pub struct ProcessAiDecision<'info> {
    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.load()?.bump
    )]
    pub ledger: AccountLoader<'info, Ledger>,

    #[account(
        mut,
        constraint = backend_authority.key() == ledger.load()?.backend_authority
            @ ErrorCode::UnauthorizedBackend
    )]
    pub backend_authority: Signer<'info>,

    /// Settled-decision marker; a second settlement of the same hash fails at creation
    #[account(
        init,
        payer = backend_authority,
        space = DECISION_SIZE,
        seeds = [DECISION_SEED, ledger.key().as_ref(), decision_hash.as_ref()],
        bump
    )]
    pub decision: AccountLoader<'info, Decision>,

    #[account(
        constraint = mint.key() == ledger.load()?.mint @ ErrorCode::InvalidRecipientAccount
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub pool_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Payout recipient, only used as the token account owner
    pub winner: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = winner,
        token::token_program = token_program,
    )]
    pub winner_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Instructions sysvar, read for the preceding Ed25519 verify instruction
    #[account(address = anchor_lang::solana_program::sysvar::instructions::ID)]
    pub instructions: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// Verifies a signed adjudication and, on a win, pays out the whole pool
/// Tx layout must be: [ ed25519_verify, process_ai_decision ]
/// Each decision hash settles at most once
#[allow(clippy::too_many_arguments)]
pub fn handler(
    ctx: Context<ProcessAiDecision>,
    user_message: String,
    ai_response: String,
    decision_hash: [u8; 32],
    signature: [u8; 64],
    is_successful: bool,
    user_id: u64,
    session_id: String,
    timestamp: i64,
) -> Result<()> {
    let claim = DecisionClaim {
        user_message: &user_message,
        ai_response: &ai_response,
        user_id,
        session_id: &session_id,
        timestamp,
        decision_hash,
        signature,
        is_successful,
    };

    with_processing_lock(&ctx.accounts.ledger, || settle(&ctx, &claim))
}

fn settle(ctx: &Context<ProcessAiDecision>, claim: &DecisionClaim) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let (backend_authority, pool_wallet, current_pool, bump) = {
        let ledger = ctx.accounts.ledger.load()?;
        require!(ledger.is_active, ErrorCode::LotteryInactive);
        (
            ledger.backend_authority,
            ledger.recipient_wallets[POOL_INDEX],
            ledger.current_pool,
            ledger.bump,
        )
    };

    let ed25519_ix = load_preceding_instruction(&ctx.accounts.instructions.to_account_info())?;
    verify_decision(claim, &backend_authority, &ed25519_ix, now)?;

    {
        let decision = &mut ctx.accounts.decision.load_init()?;
        decision.decision_hash = claim.decision_hash;
        decision.user_id = claim.user_id;
        decision.decision_timestamp = claim.timestamp;
        decision.settled_at = now;
        decision.is_successful = claim.is_successful;
        decision.bump = ctx.bumps.decision;
    }

    if claim.is_successful {
        validate_recipient_ata(
            &ctx.accounts.pool_vault,
            &pool_wallet,
            &ctx.accounts.mint.key(),
            &ctx.accounts.token_program.key(),
        )?;

        let payout = current_pool;
        require!(payout > 0, ErrorCode::InsufficientFunds);
        require!(
            ctx.accounts.pool_vault.amount >= payout,
            ErrorCode::InsufficientFunds
        );

        transfer_from_pool(
            &ctx.accounts.ledger.to_account_info(),
            bump,
            &ctx.accounts.pool_vault,
            &ctx.accounts.winner_token_account,
            &ctx.accounts.mint,
            &ctx.accounts.token_program,
            payout,
        )?;

        let deactivated = {
            let ledger = &mut ctx.accounts.ledger.load_mut()?;
            ledger.current_pool = 0;
            if ledger.deactivate_on_win {
                ledger.is_active = false;
            }
            !ledger.is_active
        };

        #[cfg(feature = "verbose")]
        msg!("Winner {} paid {}", ctx.accounts.winner.key(), payout);

        emit!(WinnerSelected {
            winner: ctx.accounts.winner.key(),
            amount: payout,
            user_id: claim.user_id,
            session_id: claim.session_id.to_string(),
            user_message: claim.user_message.to_string(),
            ai_response: claim.ai_response.to_string(),
            decision_hash: claim.decision_hash,
            deactivated,
            timestamp: now,
        });
    }

    ctx.accounts.ledger.load_mut()?.last_activity_ts = now;

    emit!(DecisionLogged {
        user_id: claim.user_id,
        session_id: claim.session_id.to_string(),
        is_successful: claim.is_successful,
        decision_hash: claim.decision_hash,
        decision_timestamp: claim.timestamp,
        timestamp: now,
    });

    Ok(())
}
