use anchor_lang::error_code;

#[error_code]
pub enum SmartAccountError {
    #[msg("Only the account owner may perform this action")]
    Unauthorized,

    #[msg("Operation nonce does not match the account's replay counter")]
    ReplayedOperation,

    #[msg("Replay counter overflow")]
    NonceOverflow,

    #[msg("Operation timestamp is outside the acceptance window")]
    OperationExpired,

    #[msg("Owner key must not be the default pubkey")]
    InvalidOwner,

    #[msg("Implementation may not be the account program itself")]
    InvalidImplementation,

    #[msg("Implementation program is not executable")]
    ImplementationNotExecutable,

    #[msg("Stored implementation does not match the provided account")]
    ImplementationMismatch,

    #[msg("Module program is not executable")]
    ModuleNotExecutable,

    #[msg("Stored verifier does not match the provided account")]
    VerifierMismatch,

    #[msg("Stored fallback handler does not match the provided account")]
    FallbackHandlerMismatch,

    #[msg("Plugin is not installed on this account")]
    PluginNotInstalled,

    #[msg("Plugin capacity reached")]
    PluginLimitReached,

    #[msg("Plugin configuration exceeds the size limit")]
    PluginConfigTooLarge,

    #[msg("Plugin program is not executable")]
    PluginNotExecutable,

    #[msg("Installed plugin program account was not supplied")]
    PluginAccountMissing,

    #[msg("Init payload could not be decoded")]
    InvalidInitPayload,

    #[msg("Init payload exceeds the size limit")]
    InitPayloadTooLarge,

    #[msg("Call payload exceeds the size limit")]
    PayloadTooLarge,

    #[msg("Signature must be 64 bytes")]
    InvalidSignatureLength,

    #[msg("Verifier returned no data")]
    VerifierNoResponse,

    #[msg("Verifier did not return the signature marker")]
    SignatureRejected,

    #[msg("Deposit amount must be greater than zero")]
    InvalidDepositAmount,

    #[msg("Vault PDA could not be re-derived from stored state")]
    InvalidVaultDerivation,

    #[msg("Account data PDA does not match the vault")]
    AccountDataMismatch,

    ProgramNotExecutable,

    TooManyRemainingAccounts,

    InvalidRemainingAccounts,

    TransferAmountOverflow,

    InvalidInstructionData,

    DataSerializationFailed,
}
