use anchor_lang::prelude::*;
use smart_account::state::{CheckOperationArgs, SmartAccount};

use crate::{errors::ValueLimitError, state::ValueLimitConfig};

pub fn check_operation(ctx: Context<CheckOperation>, args: CheckOperationArgs) -> Result<()> {
    let limit = ValueLimitConfig::parse(&args.config)?;

    // The summary must describe the account whose vault signed this call
    require!(
        args.operation.account == ctx.accounts.smart_account.key(),
        ValueLimitError::OperationAccountMismatch
    );

    require!(
        limit.allows(args.operation.value),
        ValueLimitError::ValueAboveLimit
    );

    msg!(
        "Value within limit: {} <= {}",
        args.operation.value,
        limit.max_value
    );
    Ok(())
}

#[derive(Accounts)]
pub struct CheckOperation<'info> {
    /// The account's vault; only the core program can produce this signature
    pub smart_account: Signer<'info>,

    /// Account state owned by the core program, re-derived from the vault
    #[account(
        seeds = [SmartAccount::PREFIX_SEED, smart_account.key().as_ref()],
        bump = account_data.bump,
        seeds::program = smart_account::ID,
    )]
    pub account_data: Account<'info, SmartAccount>,
}
