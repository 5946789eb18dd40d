use anchor_lang::prelude::*;

mod errors;
mod instructions;
mod utils;

use instructions::*;

declare_id!("8r2SeUcUmdzXHuvsNDsNxCPLkn8w6Jz9z1wtLk3ChzNR");

/// Default executor for smart accounts. The core program forwards every
/// guarded call here with the vault signature; this program moves value and
/// invokes targets on the account's behalf.
#[program]
pub mod base_wallet {
    use super::*;

    /// One-shot setup call issued by the core during account creation
    pub fn on_create(ctx: Context<OnCreate>, init_payload: Vec<u8>) -> Result<()> {
        instructions::on_create(ctx, init_payload)
    }

    /// Move value and/or invoke a target program as the smart account
    pub fn forward_call<'c: 'info, 'info>(
        ctx: Context<'_, '_, 'c, 'info, ForwardCall<'info>>,
        args: smart_account::state::ForwardCallArgs,
    ) -> Result<()> {
        instructions::forward_call(ctx, args)
    }
}
