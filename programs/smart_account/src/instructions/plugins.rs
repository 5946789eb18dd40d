use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use crate::{
    constants::SMART_ACCOUNT_SEED,
    error::SmartAccountError,
    events::{PluginInstalled, PluginUninstalled},
    security::validation,
    state::SmartAccount,
    utils::{cpi_data, execute_cpi, vault_signer},
};

pub fn install_plugin<'c: 'info, 'info>(
    ctx: Context<'_, '_, 'c, 'info, InstallPlugin<'info>>,
    config: Vec<u8>,
) -> Result<()> {
    validation::validate_plugin_config(&config)?;
    validation::validate_remaining_accounts(ctx.remaining_accounts)?;
    require!(
        ctx.accounts.plugin_program.executable,
        SmartAccountError::PluginNotExecutable
    );

    // Let the plugin inspect the configuration before it is stored; a
    // rejected install aborts here
    let data = cpi_data("on_install", &config)?;
    let mut infos = vec![
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.account_data.to_account_info(),
    ];
    infos.extend_from_slice(ctx.remaining_accounts);
    execute_cpi(
        &infos,
        &data,
        &ctx.accounts.plugin_program,
        Some(vault_signer(&ctx.accounts.account_data)),
    )?;

    let config_hash = hash(&config).to_bytes();
    ctx.accounts
        .account_data
        .install_plugin(ctx.accounts.plugin_program.key(), config)?;

    msg!("Plugin installed: {}", ctx.accounts.plugin_program.key());

    emit!(PluginInstalled {
        account: ctx.accounts.vault.key(),
        plugin_program: ctx.accounts.plugin_program.key(),
        config_hash,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn uninstall_plugin(ctx: Context<UninstallPlugin>) -> Result<()> {
    ctx.accounts
        .account_data
        .uninstall_plugin(&ctx.accounts.plugin_program.key())?;

    msg!("Plugin uninstalled: {}", ctx.accounts.plugin_program.key());

    emit!(PluginUninstalled {
        account: ctx.accounts.vault.key(),
        plugin_program: ctx.accounts.plugin_program.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InstallPlugin<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [SMART_ACCOUNT_SEED, account_data.params_digest.as_ref()],
        bump = account_data.vault_bump
    )]
    /// CHECK: vault PDA verified by seeds
    pub vault: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [SmartAccount::PREFIX_SEED, vault.key().as_ref()],
        bump = account_data.bump,
        has_one = owner @ SmartAccountError::Unauthorized,
    )]
    pub account_data: Box<Account<'info, SmartAccount>>,

    /// CHECK: validated to be executable; consulted via its install hook
    pub plugin_program: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct UninstallPlugin<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [SMART_ACCOUNT_SEED, account_data.params_digest.as_ref()],
        bump = account_data.vault_bump
    )]
    /// CHECK: vault PDA verified by seeds
    pub vault: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [SmartAccount::PREFIX_SEED, vault.key().as_ref()],
        bump = account_data.bump,
        has_one = owner @ SmartAccountError::Unauthorized,
    )]
    pub account_data: Box<Account<'info, SmartAccount>>,

    /// CHECK: only the key is read to locate the installed entry
    pub plugin_program: UncheckedAccount<'info>,
}
