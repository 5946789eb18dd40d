use anchor_lang::prelude::*;

use crate::{
    error::SmartAccountError,
    events::ConfigUpdated,
    state::{Config, UpdateConfigType},
};

pub fn update_config(ctx: Context<UpdateConfig>, param: UpdateConfigType) -> Result<()> {
    let new_value_info = ctx
        .remaining_accounts
        .first()
        .ok_or(SmartAccountError::InvalidRemainingAccounts)?;

    let config = &mut ctx.accounts.config;
    let update_type;
    let old_value;

    match param {
        UpdateConfigType::Authority => {
            update_type = "AUTHORITY";
            old_value = config.authority;
            config.authority = new_value_info.key();
        }
        UpdateConfigType::DefaultImplementation => {
            if !new_value_info.executable {
                return err!(SmartAccountError::ProgramNotExecutable);
            }
            update_type = "DEFAULT_IMPLEMENTATION";
            old_value = config.default_implementation;
            config.default_implementation = new_value_info.key();
        }
        UpdateConfigType::DefaultVerifier => {
            if !new_value_info.executable {
                return err!(SmartAccountError::ProgramNotExecutable);
            }
            update_type = "DEFAULT_VERIFIER";
            old_value = config.default_verifier;
            config.default_verifier = new_value_info.key();
        }
        UpdateConfigType::DefaultFallbackHandler => {
            if !new_value_info.executable {
                return err!(SmartAccountError::ProgramNotExecutable);
            }
            update_type = "DEFAULT_FALLBACK_HANDLER";
            old_value = config.default_fallback_handler;
            config.default_fallback_handler = new_value_info.key();
        }
    }

    emit!(ConfigUpdated {
        authority: ctx.accounts.authority.key(),
        update_type: update_type.to_string(),
        old_value: old_value.to_string(),
        new_value: new_value_info.key().to_string(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// The current authority of the program.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The program's configuration account.
    #[account(
        mut,
        seeds = [Config::PREFIX_SEED],
        bump,
        has_one = authority
    )]
    pub config: Box<Account<'info, Config>>,
}
