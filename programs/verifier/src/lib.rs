use anchor_lang::{prelude::*, solana_program::sysvar::instructions::load_instruction_at_checked};

use anchor_lang::solana_program::sysvar::instructions::ID as IX_ID;
use smart_account::constants::SIGNATURE_MAGIC;
use smart_account::state::VerifyMessageArgs;

pub mod ed25519;
pub mod error;

use error::VerifierError;

declare_id!("E3geaX2kFBSvHV4co5odHsRW737NJjySziGXk8jXJCqV");

#[program]
pub mod verifier {
    use super::*;

    /// Validates an owner signature over an operation message and returns the
    /// acceptance magic on success.
    pub fn verify_message(ctx: Context<VerifyMessage>, args: VerifyMessageArgs) -> Result<[u8; 4]> {
        require!(
            args.signature.len() == 64,
            VerifierError::InvalidSignatureLength
        );
        require!(!args.message.is_empty(), VerifierError::EmptyMessage);

        // The actual cryptography ran in the ed25519 precompile earlier in
        // this transaction. Introspect it and check it covered our inputs.
        let verify_ix = load_instruction_at_checked(
            args.verify_instruction_index as usize,
            &ctx.accounts.ix_sysvar,
        )?;

        ed25519::verify_ed25519_ix(
            &verify_ix,
            args.expected_signer.to_bytes(),
            &args.message,
            &args.signature,
        )?;

        msg!("Signature accepted for {}", args.expected_signer);

        Ok(SIGNATURE_MAGIC)
    }
}

#[derive(Accounts)]
pub struct VerifyMessage<'info> {
    #[account(address = IX_ID)]
    /// CHECK: Sysvar for instructions.
    pub ix_sysvar: UncheckedAccount<'info>,
}
