use anchor_lang::prelude::*;

use crate::{events::ProgramInitialized, security::validation, state::Config};

pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    validation::validate_program_executable(&ctx.accounts.default_implementation)?;
    validation::validate_program_executable(&ctx.accounts.default_verifier)?;
    validation::validate_program_executable(&ctx.accounts.default_fallback_handler)?;

    let config = &mut ctx.accounts.config;
    config.set_inner(Config {
        authority: ctx.accounts.payer.key(),
        default_implementation: ctx.accounts.default_implementation.key(),
        default_verifier: ctx.accounts.default_verifier.key(),
        default_fallback_handler: ctx.accounts.default_fallback_handler.key(),
    });

    msg!("Program configuration initialized");

    emit!(ProgramInitialized {
        authority: config.authority,
        default_implementation: config.default_implementation,
        default_verifier: config.default_verifier,
        default_fallback_handler: config.default_fallback_handler,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + Config::INIT_SPACE,
        seeds = [Config::PREFIX_SEED],
        bump
    )]
    pub config: Box<Account<'info, Config>>,

    /// Implementation applied to accounts whose init payload leaves it unset
    /// CHECK: validated to be executable
    pub default_implementation: UncheckedAccount<'info>,

    /// Verifier applied to accounts whose init payload leaves it unset
    /// CHECK: validated to be executable
    pub default_verifier: UncheckedAccount<'info>,

    /// Fallback handler applied to accounts whose init payload leaves it unset
    /// CHECK: validated to be executable
    pub default_fallback_handler: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
