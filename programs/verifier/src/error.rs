use anchor_lang::error_code;

#[error_code]
pub enum VerifierError {
    #[msg("Invalid verify instruction length")]
    InvalidLengthForVerification,

    #[msg("Verify instruction header mismatch")]
    VerifyHeaderMismatch,

    #[msg("Verify instruction data mismatch")]
    VerifyDataMismatch,

    #[msg("Signature must be 64 bytes")]
    InvalidSignatureLength,

    #[msg("Message must not be empty")]
    EmptyMessage,
}
