use anchor_lang::prelude::*;

use crate::{
    constants::SMART_ACCOUNT_SEED,
    error::SmartAccountError,
    events::AccountCreated,
    security::validation,
    state::{AccountInitPayload, Config, SmartAccount},
    utils::{cpi_data, create_params_digest, execute_cpi, vault_signer},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct CreateAccountArgs {
    /// Identity that will control the new account
    pub owner: Pubkey,
    /// Optional module overrides, forwarded once to the implementation
    pub init_payload: Vec<u8>,
    /// Caller-chosen disambiguator for the deterministic address
    pub salt: [u8; 32],
}

pub fn create_account<'c: 'info, 'info>(
    ctx: Context<'_, '_, 'c, 'info, CreateAccount<'info>>,
    args: CreateAccountArgs,
) -> Result<()> {
    // === Input Validation ===
    validation::validate_init_payload(&args.init_payload)?;
    validation::validate_remaining_accounts(ctx.remaining_accounts)?;
    require!(args.owner != Pubkey::default(), SmartAccountError::InvalidOwner);

    // The implementation must be a program distinct from this one
    require!(
        ctx.accounts.implementation.executable,
        SmartAccountError::ImplementationNotExecutable
    );
    require!(
        ctx.accounts.implementation.key() != crate::ID,
        SmartAccountError::InvalidImplementation
    );

    // === Resolve Modules ===
    // An overridden module must arrive in remaining accounts as an
    // executable program; config defaults were vetted when they were set
    let init = AccountInitPayload::parse(&args.init_payload)?;
    let config = &ctx.accounts.config;
    let verifier = match init.verifier {
        Some(key) => {
            validation::validate_module_override(&key, ctx.remaining_accounts)?;
            key
        }
        None => config.default_verifier,
    };
    let fallback_handler = match init.fallback_handler {
        Some(key) => {
            validation::validate_module_override(&key, ctx.remaining_accounts)?;
            key
        }
        None => config.default_fallback_handler,
    };

    // === Initialize Account State ===
    // The vault PDA itself is never allocated: it stays a zero-data system
    // address so it can be funded before this instruction ever runs.
    let params_digest = create_params_digest(
        &args.owner,
        &ctx.accounts.implementation.key(),
        &args.init_payload,
        &args.salt,
    );

    let account_data = &mut ctx.accounts.account_data;
    account_data.set_inner(SmartAccount {
        owner: args.owner,
        implementation: ctx.accounts.implementation.key(),
        verifier,
        fallback_handler,
        params_digest,
        nonce: 0,
        vault_bump: ctx.bumps.vault,
        bump: ctx.bumps.account_data,
        plugins: Vec::new(),
    });

    // === One-Shot Setup CPI ===
    // Hand the raw payload to the implementation exactly once, vault-signed
    // so the implementation knows the call is genuine.
    let data = cpi_data("on_create", &args.init_payload)?;
    let mut infos = vec![ctx.accounts.vault.to_account_info()];
    infos.extend_from_slice(ctx.remaining_accounts);
    execute_cpi(
        &infos,
        &data,
        &ctx.accounts.implementation,
        Some(vault_signer(account_data)),
    )?;

    msg!("Smart account created: {}", ctx.accounts.vault.key());
    msg!("Owner: {}", args.owner);
    msg!("Implementation: {}", ctx.accounts.implementation.key());

    AccountCreated::emit_event(
        ctx.accounts.vault.key(),
        args.owner,
        ctx.accounts.implementation.key(),
        verifier,
        fallback_handler,
        args.salt,
        &args.init_payload,
    )?;

    Ok(())
}

#[derive(Accounts)]
#[instruction(args: CreateAccountArgs)]
pub struct CreateAccount<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Program configuration supplying module defaults
    #[account(
        seeds = [Config::PREFIX_SEED],
        bump
    )]
    pub config: Box<Account<'info, Config>>,

    /// Executor program for the new account
    /// CHECK: validated to be executable and not this program
    pub implementation: UncheckedAccount<'info>,

    /// The lamport vault at the address derived from the creation tuple
    #[account(
        seeds = [
            SMART_ACCOUNT_SEED,
            create_params_digest(
                &args.owner,
                implementation.key,
                &args.init_payload,
                &args.salt,
            ).as_ref()
        ],
        bump
    )]
    /// CHECK: zero-data system address; only its derivation matters
    pub vault: UncheckedAccount<'info>,

    /// Account state; its existence is what makes a second creation with the
    /// same tuple fail
    #[account(
        init,
        payer = payer,
        space = 8 + SmartAccount::INIT_SPACE,
        seeds = [SmartAccount::PREFIX_SEED, vault.key().as_ref()],
        bump
    )]
    pub account_data: Box<Account<'info, SmartAccount>>,

    pub system_program: Program<'info, System>,
}
