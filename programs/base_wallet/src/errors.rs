use anchor_lang::error_code;

#[error_code]
pub enum BaseWalletError {
    #[msg("Vault balance is below the requested transfer amount")]
    InsufficientFunds,

    #[msg("Forward must move value or carry a payload")]
    EmptyForward,

    #[msg("Value transfer destination may not be the vault itself")]
    InvalidDestination,

    #[msg("Target program is not executable")]
    TargetNotExecutable,

    #[msg("Forwarding back into the account stack is not allowed")]
    ReentrancyBlocked,

    #[msg("A payload call needs at least one target account")]
    MissingCallAccounts,

    #[msg("Init payload could not be decoded")]
    InvalidInitPayload,
}
