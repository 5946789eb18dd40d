use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::get_return_data;
use anchor_lang::solana_program::sysvar::instructions::ID as IX_ID;

use crate::{
    constants::{SIGNATURE_MAGIC, SMART_ACCOUNT_SEED},
    error::SmartAccountError,
    events::OperationExecuted,
    instructions::common::{forward_to_implementation, run_plugin_checks, Args},
    security::validation,
    state::{OperationCheck, OperationMessage, SmartAccount, VerifyMessageArgs},
    utils::{cpi_data, execute_cpi},
};
use anchor_lang::solana_program::hash::hash;

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct HandleOperationArgs {
    /// Lamports to move from the vault to the target
    pub value: u64,
    /// Instruction data for the target program; empty for a plain transfer
    pub payload: Vec<u8>,
    /// Replay token; must equal the account's current counter
    pub nonce: u64,
    /// Owner-side creation time of the operation
    pub created_at: i64,
    /// Owner signature over the canonical operation message
    pub signature: Vec<u8>,
    /// Index of the signature precompile instruction in this transaction
    pub verify_instruction_index: u8,
}

impl Args for HandleOperationArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_payload(&self.payload)?;
        validation::validate_lamport_amount(self.value)?;
        require!(
            self.value > 0 || !self.payload.is_empty(),
            SmartAccountError::InvalidInstructionData
        );
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

pub fn handle_operation<'c: 'info, 'info>(
    ctx: Context<'_, '_, 'c, 'info, HandleOperation<'info>>,
    args: HandleOperationArgs,
) -> Result<()> {
    // 0. Validate args and freshness
    args.validate()?;
    validation::validate_remaining_accounts(ctx.remaining_accounts)?;
    let now = Clock::get()?.unix_timestamp;
    validation::validate_timestamp(args.created_at, now)?;

    // 1. Consume the replay token up front; a failed forward below reverts
    //    the whole transaction, advance included
    ctx.accounts.account_data.consume_nonce(args.nonce)?;

    // 2. Rebuild the canonical message the owner signed
    let message = OperationMessage {
        account: ctx.accounts.vault.key(),
        target: ctx.accounts.target.key(),
        target_program: ctx.accounts.target_program.key(),
        value: args.value,
        payload_hash: hash(&args.payload).to_bytes(),
        nonce: args.nonce,
        created_at: args.created_at,
    };
    let message_bytes = message.to_bytes()?;

    // 3. Signature check through the account's verifier
    let verify_args = VerifyMessageArgs {
        expected_signer: ctx.accounts.account_data.owner,
        message: message_bytes,
        signature: args.signature.clone(),
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

    msg!("Operation signature verified");

    // 4. Plugin gate
    let operation = OperationCheck::for_call(
        ctx.accounts.vault.key(),
        ctx.accounts.target.key(),
        ctx.accounts.target_program.key(),
        args.value,
        &args.payload,
    );
    run_plugin_checks(
        &ctx.accounts.account_data,
        &ctx.accounts.vault,
        &operation,
        ctx.remaining_accounts,
    )?;

    // 5. Forward through the implementation with the vault signature
    forward_to_implementation(
        &ctx.accounts.account_data,
        &ctx.accounts.vault,
        &ctx.accounts.implementation,
        &ctx.accounts.target,
        &ctx.accounts.target_program,
        &ctx.accounts.system_program.to_account_info(),
        ctx.remaining_accounts,
        args.value,
        &args.payload,
    )?;

    msg!("Operation executed successfully");

    OperationExecuted::emit_event(
        ctx.accounts.vault.key(),
        ctx.accounts.payer.key(),
        ctx.accounts.target.key(),
        ctx.accounts.target_program.key(),
        args.value,
        args.nonce,
    )?;

    Ok(())
}

#[derive(Accounts)]
pub struct HandleOperation<'info> {
    /// Relayer submitting the operation; pays fees, holds no authority
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [SMART_ACCOUNT_SEED, account_data.params_digest.as_ref()],
        bump = account_data.vault_bump
    )]
    /// CHECK: vault PDA verified by seeds
    pub vault: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [SmartAccount::PREFIX_SEED, vault.key().as_ref()],
        bump = account_data.bump,
        has_one = implementation @ SmartAccountError::ImplementationMismatch,
        has_one = verifier @ SmartAccountError::VerifierMismatch,
    )]
    pub account_data: Box<Account<'info, SmartAccount>>,

    /// CHECK: must match the stored implementation pointer
    pub implementation: UncheckedAccount<'info>,

    /// CHECK: must match the stored verifier pointer
    pub verifier: UncheckedAccount<'info>,

    /// CHECK: recipient of the forwarded value
    #[account(mut)]
    pub target: UncheckedAccount<'info>,

    /// CHECK: program invoked with the payload; unused for plain transfers
    pub target_program: UncheckedAccount<'info>,

    /// CHECK: instruction sysvar
    #[account(address = IX_ID)]
    pub ix_sysvar: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
