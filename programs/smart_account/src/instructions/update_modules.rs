use anchor_lang::prelude::*;

use crate::{
    constants::SMART_ACCOUNT_SEED,
    error::SmartAccountError,
    events::{FallbackHandlerChanged, ImplementationChanged, OwnerChanged, VerifierChanged},
    state::SmartAccount,
};

pub fn update_owner(ctx: Context<UpdateOwner>, new_owner: Pubkey) -> Result<()> {
    require!(new_owner != Pubkey::default(), SmartAccountError::InvalidOwner);

    let account_data = &mut ctx.accounts.account_data;
    let old_owner = account_data.owner;
    account_data.owner = new_owner;

    msg!("Owner changed: {} -> {}", old_owner, new_owner);

    emit!(OwnerChanged {
        account: ctx.accounts.vault.key(),
        old_owner,
        new_owner,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn update_implementation(ctx: Context<UpdateModule>) -> Result<()> {
    let new_module = &ctx.accounts.new_module;
    require!(
        new_module.executable,
        SmartAccountError::ImplementationNotExecutable
    );
    require!(
        new_module.key() != crate::ID,
        SmartAccountError::InvalidImplementation
    );

    let account_data = &mut ctx.accounts.account_data;
    let old_implementation = account_data.implementation;
    account_data.implementation = new_module.key();

    msg!(
        "Implementation changed: {} -> {}",
        old_implementation,
        new_module.key()
    );

    emit!(ImplementationChanged {
        account: ctx.accounts.vault.key(),
        old_implementation,
        new_implementation: new_module.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn update_verifier(ctx: Context<UpdateModule>) -> Result<()> {
    let new_module = &ctx.accounts.new_module;
    require!(new_module.executable, SmartAccountError::ModuleNotExecutable);

    let account_data = &mut ctx.accounts.account_data;
    let old_verifier = account_data.verifier;
    account_data.verifier = new_module.key();

    msg!("Verifier changed: {} -> {}", old_verifier, new_module.key());

    emit!(VerifierChanged {
        account: ctx.accounts.vault.key(),
        old_verifier,
        new_verifier: new_module.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn update_fallback_handler(ctx: Context<UpdateModule>) -> Result<()> {
    let new_module = &ctx.accounts.new_module;
    require!(new_module.executable, SmartAccountError::ModuleNotExecutable);

    let account_data = &mut ctx.accounts.account_data;
    let old_handler = account_data.fallback_handler;
    account_data.fallback_handler = new_module.key();

    msg!(
        "Fallback handler changed: {} -> {}",
        old_handler,
        new_module.key()
    );

    emit!(FallbackHandlerChanged {
        account: ctx.accounts.vault.key(),
        old_handler,
        new_handler: new_module.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateOwner<'info> {
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
}

/// Shared by the implementation, verifier and fallback handler swaps; the
/// pointer moves atomically with no migration of account state.
#[derive(Accounts)]
pub struct UpdateModule<'info> {
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

    /// CHECK: validated to be executable before the pointer is swapped
    pub new_module: UncheckedAccount<'info>,
}
