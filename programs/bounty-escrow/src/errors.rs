use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Lottery is not active")]
    LotteryInactive,

    #[msg("Insufficient funds for operation")]
    InsufficientFunds,

    #[msg("Input value is invalid")]
    InvalidInput,

    #[msg("Invalid signature provided")]
    InvalidSignature,

    #[msg("Decision hash does not match the supplied payload")]
    InvalidDecisionHash,

    #[msg("Pool vault holds less than the research fund floor")]
    InsufficientInitialFunding,

    #[msg("Payment is below the entry price")]
    InsufficientPayment,

    #[msg("Input exceeds maximum length")]
    InputTooLong,

    #[msg("Invalid session ID format")]
    InvalidSessionId,

    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    #[msg("Timestamp is outside acceptable range")]
    TimestampOutOfRange,

    #[msg("Unauthorized backend authority")]
    UnauthorizedBackend,

    #[msg("Reentrancy detected - operation already in progress")]
    ReentrancyDetected,

    #[msg("Emergency recovery cooldown is still active")]
    RecoveryCooldownActive,

    #[msg("Emergency recovery amount exceeds maximum allowed")]
    RecoveryAmountExceedsLimit,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Dormancy threshold has not elapsed")]
    EscapePlanNotReady,

    #[msg("No participants supplied for escape plan")]
    NoParticipants,

    #[msg("Recipient token account is invalid")]
    InvalidRecipientAccount,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("No pending authority transfer")]
    NoPendingTransfer,
}
