use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::get_return_data;
use anchor_lang::solana_program::sysvar::instructions::ID as IX_ID;

use crate::{
    constants::{SIGNATURE_MAGIC, SMART_ACCOUNT_SEED},
    error::SmartAccountError,
    instructions::common::Args,
    security::validation,
    state::{SmartAccount, VerifyMessageArgs},
    utils::{cpi_data, execute_cpi},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct IsValidSignatureArgs {
    /// Bytes the owner allegedly signed, usually a 32-byte digest
    pub message: Vec<u8>,
    pub signature: Vec<u8>,
    /// Index of the signature precompile instruction in this transaction
    pub verify_instruction_index: u8,
}

impl Args for IsValidSignatureArgs {
    fn validate(&self) -> Result<()> {
        require!(
            !self.message.is_empty(),
            SmartAccountError::InvalidInstructionData
        );
        validation::validate_payload(&self.message)?;
        require!(
            self.signature.len() == 64,
            SmartAccountError::InvalidSignatureLength
        );
        require!(
            self.verify_instruction_index < 255,
            SmartAccountError::InvalidInstructionData
        );
        Ok(())
    }
}

/// Read-only signature validity query. Answers with the acceptance marker
/// when the account's verifier accepts the signature for the stored owner;
/// any rejection propagates as the verifier's error.
pub fn is_valid_signature(
    ctx: Context<IsValidSignature>,
    args: IsValidSignatureArgs,
) -> Result<[u8; 4]> {
    args.validate()?;

    let verify_args = VerifyMessageArgs {
        expected_signer: ctx.accounts.account_data.owner,
        message: args.message,
        signature: args.signature,
        verify_instruction_index: args.verify_instruction_index,
    };
    let data = cpi_data("verify_message", &verify_args)?;
    execute_cpi(
        &[ctx.accounts.ix_sysvar.to_account_info()],
        &data,
        &ctx.accounts.verifier,
        None,
    )?;

    let (responder, returned) =
        get_return_data().ok_or(SmartAccountError::VerifierNoResponse)?;
    require!(
        responder == ctx.accounts.verifier.key() && returned == SIGNATURE_MAGIC,
        SmartAccountError::SignatureRejected
    );

    msg!("Signature accepted for account {}", ctx.accounts.vault.key());

    Ok(SIGNATURE_MAGIC)
}

#[derive(Accounts)]
pub struct IsValidSignature<'info> {
    #[account(
        seeds = [SMART_ACCOUNT_SEED, account_data.params_digest.as_ref()],
        bump = account_data.vault_bump
    )]
    /// CHECK: vault PDA verified by seeds
    pub vault: UncheckedAccount<'info>,

    #[account(
        seeds = [SmartAccount::PREFIX_SEED, vault.key().as_ref()],
        bump = account_data.bump,
        has_one = verifier @ SmartAccountError::VerifierMismatch,
    )]
    pub account_data: Box<Account<'info, SmartAccount>>,

    /// CHECK: must match the stored verifier pointer
    pub verifier: UncheckedAccount<'info>,

    /// CHECK: instruction sysvar
    #[account(address = IX_ID)]
    pub ix_sysvar: UncheckedAccount<'info>,
}
