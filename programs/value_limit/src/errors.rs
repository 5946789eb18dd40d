use anchor_lang::error_code;

#[error_code]
pub enum ValueLimitError {
    #[msg("Configuration must be a borsh-encoded 8-byte lamport ceiling")]
    MalformedConfig,

    #[msg("Operation value exceeds the installed per-call ceiling")]
    ValueAboveLimit,

    #[msg("Operation summary does not belong to the calling account")]
    OperationAccountMismatch,
}
