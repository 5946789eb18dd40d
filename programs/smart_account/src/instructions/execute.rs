use anchor_lang::prelude::*;

use crate::{
    constants::SMART_ACCOUNT_SEED,
    error::SmartAccountError,
    events::TransactionExecuted,
    instructions::common::{forward_to_implementation, run_plugin_checks, Args},
    security::validation,
    state::{OperationCheck, SmartAccount},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct ExecuteArgs {
    /// Lamports to move from the vault to the target
    pub value: u64,
    /// Instruction data for the target program; empty for a plain transfer
    pub payload: Vec<u8>,
}

impl Args for ExecuteArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_payload(&self.payload)?;
        validation::validate_lamport_amount(self.value)?;
        require!(
            self.value > 0 || !self.payload.is_empty(),
            SmartAccountError::InvalidInstructionData
        );
        Ok(())
    }
}

pub fn execute<'c: 'info, 'info>(
    ctx: Context<'_, '_, 'c, 'info, Execute<'info>>,
    args: ExecuteArgs,
) -> Result<()> {
    // 0. Validate args
    args.validate()?;
    validation::validate_remaining_accounts(ctx.remaining_accounts)?;

    // 1. Plugin gate: every installed plugin must accept the operation
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

    // 2. Forward through the implementation with the vault signature
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

    msg!("Transaction executed successfully");

    emit!(TransactionExecuted {
        account: ctx.accounts.vault.key(),
        owner: ctx.accounts.owner.key(),
        target: ctx.accounts.target.key(),
        target_program: ctx.accounts.target_program.key(),
        value: args.value,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Execute<'info> {
    /// The account owner authorizing the call
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [SMART_ACCOUNT_SEED, account_data.params_digest.as_ref()],
        bump = account_data.vault_bump
    )]
    /// CHECK: vault PDA verified by seeds
    pub vault: UncheckedAccount<'info>,

    #[account(
        seeds = [SmartAccount::PREFIX_SEED, vault.key().as_ref()],
        bump = account_data.bump,
        has_one = owner @ SmartAccountError::Unauthorized,
        has_one = implementation @ SmartAccountError::ImplementationMismatch,
    )]
    pub account_data: Box<Account<'info, SmartAccount>>,

    /// CHECK: must match the stored implementation pointer
    pub implementation: UncheckedAccount<'info>,

    /// CHECK: recipient of the forwarded value
    #[account(mut)]
    pub target: UncheckedAccount<'info>,

    /// CHECK: program invoked with the payload; unused for plain transfers
    pub target_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
