use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::{
    constants::{
        BUYBACK_INDEX, DEFAULT_SPLIT_PERCENTAGES, LEDGER_SEED, LEDGER_SIZE, OPERATIONS_INDEX,
        POOL_INDEX, RECIPIENT_COUNT, ROLLOVER_INTERVAL, STAKING_INDEX,
    },
    errors::ErrorCode,
    events::LotteryInitialized,
    state::Ledger,
    utils::validate_split_percentages,
    ID,
};

#[derive(Accounts)]
#[instruction(
    research_fund_floor: u64,
    entry_price: u64,
    recipients: [Pubkey; RECIPIENT_COUNT]
)]
pub struct InitializeLottery<'info> {
    #[account(
        init,
        payer = authority,
        space = LEDGER_SIZE,
        seeds = [LEDGER_SEED],
        bump
    )]
    pub ledger: AccountLoader<'info, Ledger>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: The program's executable data account - validated in handler
    #[account(
        constraint = program_data.owner == &anchor_lang::solana_program::bpf_loader_upgradeable::id()
            @ ErrorCode::Unauthorized
    )]
    pub program_data: AccountInfo<'info>,

    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Pool vault, owned by the ledger PDA
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = mint,
        associated_token::authority = ledger,
        associated_token::token_program = token_program,
    )]
    pub pool_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Wallet only used as ATA owner, must match recipients[1]
    #[account(
        constraint = operations_wallet.key() == recipients[OPERATIONS_INDEX]
            @ ErrorCode::InvalidRecipientAccount
    )]
    pub operations_wallet: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = mint,
        associated_token::authority = operations_wallet,
        associated_token::token_program = token_program,
    )]
    pub operations_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Wallet only used as ATA owner, must match recipients[2]
    #[account(
        constraint = buyback_wallet.key() == recipients[BUYBACK_INDEX]
            @ ErrorCode::InvalidRecipientAccount
    )]
    pub buyback_wallet: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = mint,
        associated_token::authority = buyback_wallet,
        associated_token::token_program = token_program,
    )]
    pub buyback_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Wallet only used as ATA owner, must match recipients[3]
    #[account(
        constraint = staking_wallet.key() == recipients[STAKING_INDEX]
            @ ErrorCode::InvalidRecipientAccount
    )]
    pub staking_wallet: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = mint,
        associated_token::authority = staking_wallet,
        associated_token::token_program = token_program,
    )]
    pub staking_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Deployment-time ledger parameters
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct LedgerConfigInput {
    /// Pool, operations, buyback, staking. Defaults to 60/20/10/10.
    pub split_percentages: Option<[u8; RECIPIENT_COUNT]>,
    pub max_recovery_amount: u64,
    pub recovery_cooldown: i64,
    pub dormancy_threshold: i64,
    pub deactivate_on_win: bool,
}

/// Verifies the signer is the program's upgrade authority
fn verify_upgrade_authority(program_data: &AccountInfo, authority: &Pubkey) -> Result<()> {
    let (expected_program_data, _) = Pubkey::find_program_address(
        &[ID.as_ref()],
        &anchor_lang::solana_program::bpf_loader_upgradeable::id(),
    );
    require_keys_eq!(
        program_data.key(),
        expected_program_data,
        ErrorCode::Unauthorized
    );

    let data = program_data.try_borrow_data()?;

    // UpgradeableLoaderState::ProgramData layout:
    // - 4 bytes: discriminant
    // - 8 bytes: slot
    // - 1 byte: Option discriminant for upgrade_authority
    // - 32 bytes: upgrade_authority pubkey (if Some)
    require!(data.len() >= 45, ErrorCode::Unauthorized);
    require!(data[12] == 1, ErrorCode::Unauthorized); // Must have upgrade authority

    let upgrade_authority =
        Pubkey::try_from(&data[13..45]).map_err(|_| ErrorCode::Unauthorized)?;
    require_keys_eq!(upgrade_authority, *authority, ErrorCode::Unauthorized);

    Ok(())
}

/// Creates the ledger and its four recipient token accounts
/// Can only be called once by the program's upgrade authority
pub fn handler(
    ctx: Context<InitializeLottery>,
    research_fund_floor: u64,
    entry_price: u64,
    recipients: [Pubkey; RECIPIENT_COUNT],
    backend_authority: Pubkey,
    config: LedgerConfigInput,
) -> Result<()> {
    verify_upgrade_authority(&ctx.accounts.program_data, &ctx.accounts.authority.key())?;

    let split_percentages = config.split_percentages.unwrap_or(DEFAULT_SPLIT_PERCENTAGES);
    require!(
        validate_split_percentages(&split_percentages),
        ErrorCode::InvalidInput
    );

    require!(backend_authority != Pubkey::default(), ErrorCode::InvalidInput);
    require_keys_neq!(
        backend_authority,
        ctx.accounts.authority.key(),
        ErrorCode::InvalidInput
    );
    for (i, recipient) in recipients.iter().enumerate() {
        require!(*recipient != Pubkey::default(), ErrorCode::InvalidInput);

        // No duplicates
        for other in recipients.iter().skip(i + 1) {
            require!(recipient != other, ErrorCode::InvalidInput);
        }
    }

    // Pool slot is the ledger itself, its ATA is the pool vault
    require_keys_eq!(
        recipients[POOL_INDEX],
        ctx.accounts.ledger.key(),
        ErrorCode::InvalidRecipientAccount
    );

    require!(entry_price > 0, ErrorCode::InvalidInput);
    require!(config.recovery_cooldown >= 0, ErrorCode::InvalidInput);
    require!(config.dormancy_threshold > 0, ErrorCode::InvalidInput);

    require!(
        ctx.accounts.pool_vault.amount >= research_fund_floor,
        ErrorCode::InsufficientInitialFunding
    );

    let now = Clock::get()?.unix_timestamp;
    let next_rollover_ts = now
        .checked_add(ROLLOVER_INTERVAL)
        .ok_or(ErrorCode::MathOverflow)?;

    let ledger = &mut ctx.accounts.ledger.load_init()?;

    ledger.authority = ctx.accounts.authority.key();
    ledger.pending_authority = Pubkey::default(); // No pending transfer initially
    ledger.backend_authority = backend_authority;
    ledger.mint = ctx.accounts.mint.key();
    ledger.recipient_wallets = recipients;
    ledger.last_participant = Pubkey::default();
    ledger.research_fund_floor = research_fund_floor;
    ledger.entry_price = entry_price;
    ledger.current_pool = 0;
    ledger.total_entries = 0;
    ledger.max_recovery_amount = config.max_recovery_amount;
    ledger.recovery_cooldown = config.recovery_cooldown;
    ledger.dormancy_threshold = config.dormancy_threshold;
    ledger.last_activity_ts = now;
    ledger.last_rollover_ts = now;
    ledger.next_rollover_ts = next_rollover_ts;
    ledger.last_recovery_ts = 0;
    ledger.split_percentages = split_percentages;
    ledger.is_active = true;
    ledger.is_processing = false;
    ledger.deactivate_on_win = config.deactivate_on_win;
    ledger.bump = ctx.bumps.ledger;

    #[cfg(feature = "verbose")]
    msg!(
        "Ledger initialized, vault holds {} (floor {})",
        ctx.accounts.pool_vault.amount,
        research_fund_floor
    );

    emit!(LotteryInitialized {
        ledger: ctx.accounts.ledger.key(),
        authority: ctx.accounts.authority.key(),
        backend_authority,
        mint: ctx.accounts.mint.key(),
        recipient_wallets: recipients,
        split_percentages,
        research_fund_floor,
        entry_price,
        max_recovery_amount: config.max_recovery_amount,
        timestamp: now,
    });

    Ok(())
}
