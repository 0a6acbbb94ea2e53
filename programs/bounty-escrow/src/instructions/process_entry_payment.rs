use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{
        BUYBACK_INDEX, ENTRY_SEED, ENTRY_SIZE, LEDGER_SEED, OPERATIONS_INDEX, POOL_INDEX,
        RECIPIENT_COUNT, STAKING_INDEX,
    },
    errors::ErrorCode,
    events::EntryProcessed,
    state::{Entry, Ledger},
    utils::{calculate_entry_splits, transfer_from_payer, validate_recipient_ata},
};

#[derive(Accounts)]
#[instruction(amount: u64, payer_identity: Pubkey, nonce: u64)]
pub struct ProcessEntryPayment<'info> {
    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.load()?.bump
    )]
    pub ledger: AccountLoader<'info, Ledger>,

    #[account(
        init,
        payer = rent_payer,
        space = ENTRY_SIZE,
        seeds = [
            ENTRY_SEED,
            ledger.key().as_ref(),
            payer_identity.as_ref(),
            nonce.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub entry: AccountLoader<'info, Entry>,

    #[account(
        constraint = payer.key() == payer_identity @ ErrorCode::Unauthorized
    )]
    pub payer: Signer<'info>,

    /// Account paying rent for the entry record (can be same as payer or a relayer)
    #[account(mut)]
    pub rent_payer: Signer<'info>,

    #[account(
        constraint = mint.key() == ledger.load()?.mint @ ErrorCode::InvalidRecipientAccount
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = payer,
        token::token_program = token_program,
    )]
    pub payer_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub pool_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub operations_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub buyback_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub staking_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// Splits an entry payment across the pool and fee recipients and records it
pub fn handler(
    ctx: Context<ProcessEntryPayment>,
    amount: u64,
    payer_identity: Pubkey,
    nonce: u64,
) -> Result<()> {
    // Phase 1: Read all needed data and DROP borrow before CPIs
    let (percentages, recipient_wallets) = {
        let ledger = ctx.accounts.ledger.load()?;

        require!(ledger.is_active, ErrorCode::LotteryInactive);
        require!(amount > 0, ErrorCode::InvalidInput);
        require!(amount >= ledger.entry_price, ErrorCode::InsufficientPayment);

        (ledger.split_percentages, ledger.recipient_wallets)
    };

    let mint_key = ctx.accounts.mint.key();
    let token_program_key = ctx.accounts.token_program.key();

    let destinations: [&InterfaceAccount<TokenAccount>; RECIPIENT_COUNT] = [
        &ctx.accounts.pool_vault,
        &ctx.accounts.operations_token_account,
        &ctx.accounts.buyback_token_account,
        &ctx.accounts.staking_token_account,
    ];
    for (destination, wallet) in destinations.iter().zip(recipient_wallets.iter()) {
        validate_recipient_ata(destination, wallet, &mint_key, &token_program_key)?;
    }

    let splits = calculate_entry_splits(amount, &percentages).ok_or(ErrorCode::MathOverflow)?;

    // Phase 2: CPIs, zero-amount parts are skipped
    for (destination, split) in destinations.iter().zip(splits.iter()) {
        if *split == 0 {
            continue;
        }
        transfer_from_payer(
            &ctx.accounts.payer,
            &ctx.accounts.payer_token_account,
            destination,
            &ctx.accounts.mint,
            &ctx.accounts.token_program,
            *split,
        )?;
    }

    // Phase 3: Record the entry and update the ledger
    let now = Clock::get()?.unix_timestamp;
    let fee_contribution = splits[OPERATIONS_INDEX]
        .checked_add(splits[BUYBACK_INDEX])
        .and_then(|s| s.checked_add(splits[STAKING_INDEX]))
        .ok_or(ErrorCode::MathOverflow)?;

    {
        let entry = &mut ctx.accounts.entry.load_init()?;
        entry.payer_identity = payer_identity;
        entry.amount_paid = amount;
        entry.pool_contribution = splits[POOL_INDEX];
        entry.fee_contribution = fee_contribution;
        entry.nonce = nonce;
        entry.timestamp = now;
        entry.is_processed = true;
        entry.bump = ctx.bumps.entry;
    }

    let (new_pool, total_entries) = {
        let ledger = &mut ctx.accounts.ledger.load_mut()?;

        ledger.total_entries = ledger
            .total_entries
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        ledger.current_pool = ledger
            .current_pool
            .checked_add(splits[POOL_INDEX])
            .ok_or(ErrorCode::MathOverflow)?;
        ledger.last_participant = payer_identity;
        ledger.last_activity_ts = now;

        (ledger.current_pool, ledger.total_entries)
    };

    #[cfg(feature = "verbose")]
    msg!(
        "Entry {} from {}: pool +{}, fees +{}",
        nonce,
        payer_identity,
        splits[POOL_INDEX],
        fee_contribution
    );

    emit!(EntryProcessed {
        payer: payer_identity,
        amount,
        nonce,
        splits,
        new_pool,
        total_entries,
        timestamp: now,
    });

    Ok(())
}
