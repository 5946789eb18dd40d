use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::{
    constants::SMART_ACCOUNT_SEED,
    error::SmartAccountError,
    events::DepositReceived,
    security::validation,
    state::SmartAccount,
};

/// Fund the vault. Anyone may deposit; plugins and the owner are never
/// consulted. Plain transfers straight to the vault address work as well,
/// this instruction just makes the funding observable.
pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    require!(amount > 0, SmartAccountError::InvalidDepositAmount);
    validation::validate_lamport_amount(amount)?;

    let cpi_ctx = CpiContext::new(
        ctx.accounts.system_program.to_account_info(),
        Transfer {
            from: ctx.accounts.from.to_account_info(),
            to: ctx.accounts.vault.to_account_info(),
        },
    );
    transfer(cpi_ctx, amount)?;

    msg!(
        "Deposited {} lamports into {}",
        amount,
        ctx.accounts.vault.key()
    );

    emit!(DepositReceived {
        account: ctx.accounts.vault.key(),
        from: ctx.accounts.from.key(),
        amount,
        new_balance: ctx.accounts.vault.lamports(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub from: Signer<'info>,

    #[account(
        mut,
        seeds = [SMART_ACCOUNT_SEED, account_data.params_digest.as_ref()],
        bump = account_data.vault_bump
    )]
    /// CHECK: vault PDA verified by seeds
    pub vault: UncheckedAccount<'info>,

    #[account(
        seeds = [SmartAccount::PREFIX_SEED, vault.key().as_ref()],
        bump = account_data.bump
    )]
    pub account_data: Box<Account<'info, SmartAccount>>,

    pub system_program: Program<'info, System>,
}
