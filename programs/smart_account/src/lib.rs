use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod security;
pub mod state;
pub mod utils;

use instructions::*;
use state::UpdateConfigType;

declare_id!("5xk7TofwN46GUpkRoLAtJVaGkfHGYY7wm3aGWAzBAmq7");

/// Programmable smart account suite: deterministic account creation, owner
/// and relayed execution, plugin policy checks, and swappable modules
#[program]
pub mod smart_account {
    use super::*;

    /// Initialize the program by creating the configuration account
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize(ctx)
    }

    /// Update one configuration field; the new value is supplied as the
    /// first remaining account
    pub fn update_config(ctx: Context<UpdateConfig>, param: UpdateConfigType) -> Result<()> {
        instructions::update_config(ctx, param)
    }

    /// Create a new smart account at the address derived from its creation
    /// tuple; fails if the same tuple was already deployed
    pub fn create_account<'c: 'info, 'info>(
        ctx: Context<'_, '_, 'c, 'info, CreateAccount<'info>>,
        args: CreateAccountArgs,
    ) -> Result<()> {
        instructions::create_account(ctx, args)
    }

    /// Fund the account's vault
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    /// Execute a guarded call signed by the owner
    pub fn execute<'c: 'info, 'info>(
        ctx: Context<'_, '_, 'c, 'info, Execute<'info>>,
        args: ExecuteArgs,
    ) -> Result<()> {
        instructions::execute(ctx, args)
    }

    /// Execute a relayer-submitted operation authorized by an owner
    /// signature and a sequential replay token
    pub fn handle_operation<'c: 'info, 'info>(
        ctx: Context<'_, '_, 'c, 'info, HandleOperation<'info>>,
        args: HandleOperationArgs,
    ) -> Result<()> {
        instructions::handle_operation(ctx, args)
    }

    /// Install a plugin or replace its configuration
    pub fn install_plugin<'c: 'info, 'info>(
        ctx: Context<'_, '_, 'c, 'info, InstallPlugin<'info>>,
        config: Vec<u8>,
    ) -> Result<()> {
        instructions::install_plugin(ctx, config)
    }

    /// Remove an installed plugin
    pub fn uninstall_plugin(ctx: Context<UninstallPlugin>) -> Result<()> {
        instructions::uninstall_plugin(ctx)
    }

    /// Transfer account ownership
    pub fn update_owner(ctx: Context<UpdateOwner>, new_owner: Pubkey) -> Result<()> {
        instructions::update_owner(ctx, new_owner)
    }

    /// Swap the implementation program guarded calls are forwarded through
    pub fn update_implementation(ctx: Context<UpdateModule>) -> Result<()> {
        instructions::update_implementation(ctx)
    }

    /// Swap the verifier program answering signature queries
    pub fn update_verifier(ctx: Context<UpdateModule>) -> Result<()> {
        instructions::update_verifier(ctx)
    }

    /// Swap the fallback handler receiving unrecognized instruction data
    pub fn update_fallback_handler(ctx: Context<UpdateModule>) -> Result<()> {
        instructions::update_fallback_handler(ctx)
    }

    /// Ask the account's verifier whether a signature is valid for the
    /// owner; returns the acceptance marker on success
    pub fn is_valid_signature(
        ctx: Context<IsValidSignature>,
        args: IsValidSignatureArgs,
    ) -> Result<[u8; 4]> {
        instructions::is_valid_signature(ctx, args)
    }

    /// Unrecognized instruction data is routed to the account's fallback
    /// handler program
    pub fn fallback<'info>(
        program_id: &Pubkey,
        accounts: &'info [AccountInfo<'info>],
        data: &[u8],
    ) -> Result<()> {
        instructions::fallback_forward(program_id, accounts, data)
    }
}
