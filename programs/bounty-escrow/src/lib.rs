use anchor_lang::prelude::*;

pub mod constants;
pub mod decision;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
mod utils;

use instructions::*;

declare_id!("5DV72YAHJibxvSg1UyJNEj68KRBWwJLCyU3iAVu2B5tA");

// Security contact information (embedded on-chain)
#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Billions Bounty",
    project_url: "https://billionsbounty.com",
    contacts: "link:https://billionsbounty.com",
    policy: "https://billionsbounty.com/security",
    source_release: "v0.1.0"
}

#[program]
pub mod bounty_escrow {
    use super::*;

    /// Creates the ledger, the pool vault and the fee recipient token accounts
    /// Can only be called once by the program's upgrade authority
    pub fn initialize_lottery(
        ctx: Context<InitializeLottery>,
        research_fund_floor: u64,
        entry_price: u64,
        recipients: [Pubkey; 4],
        backend_authority: Pubkey,
        config: LedgerConfigInput,
    ) -> Result<()> {
        instructions::initialize_lottery::handler(
            ctx,
            research_fund_floor,
            entry_price,
            recipients,
            backend_authority,
            config,
        )
    }

    /// Splits an entry payment between the pool and the fee recipients
    /// Each (payer, nonce) pair can be used once
    pub fn process_entry_payment(
        ctx: Context<ProcessEntryPayment>,
        amount: u64,
        payer_identity: Pubkey,
        nonce: u64,
    ) -> Result<()> {
        instructions::process_entry_payment::handler(ctx, amount, payer_identity, nonce)
    }

    /// Settles a backend-signed decision, paying the pool to the winner on success
    /// Must be preceded by an Ed25519 verify instruction over the decision hash
    #[allow(clippy::too_many_arguments)]
    pub fn process_ai_decision(
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
        instructions::process_ai_decision::handler(
            ctx,
            user_message,
            ai_response,
            decision_hash,
            signature,
            is_successful,
            user_id,
            session_id,
            timestamp,
        )
    }

    /// Withdraws up to the configured ceiling from the pool, once per cooldown
    /// Only callable by the ledger authority
    pub fn emergency_recovery(ctx: Context<EmergencyRecovery>, amount: u64) -> Result<()> {
        instructions::emergency_recovery::handler(ctx, amount)
    }

    /// Pays the whole pool to the last participant after the dormancy threshold
    /// Only callable by the ledger authority
    pub fn execute_time_escape_plan(
        ctx: Context<ExecuteTimeEscapePlan>,
        last_participant: Pubkey,
        participant_list: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::execute_time_escape_plan::handler(ctx, last_participant, participant_list)
    }

    /// Pauses or resumes entries and settlements
    pub fn set_lottery_active(ctx: Context<SetLotteryActive>, is_active: bool) -> Result<()> {
        instructions::set_lottery_active::handler(ctx, is_active)
    }

    /// Rotates the backend authority whose signatures settle decisions
    pub fn set_backend_authority(
        ctx: Context<SetBackendAuthority>,
        new_backend_authority: Pubkey,
    ) -> Result<()> {
        instructions::set_backend_authority::handler(ctx, new_backend_authority)
    }

    /// Proposes ledger authority transfer to a new address (two-step pattern)
    /// New authority must call accept_authority to complete
    pub fn transfer_authority(ctx: Context<TransferAuthority>, new_authority: Pubkey) -> Result<()> {
        instructions::transfer_authority::handler(ctx, new_authority)
    }

    /// Accepts a pending ledger authority transfer
    /// Only callable by the pending authority
    pub fn accept_authority(ctx: Context<AcceptAuthority>) -> Result<()> {
        instructions::accept_authority::handler(ctx)
    }
}
