use anchor_lang::prelude::*;

mod errors;
mod instructions;
mod state;

use instructions::*;
use smart_account::state::CheckOperationArgs;

declare_id!("B2UgDMshe2sug7qTv4DseFNz6ipRSKPbqc9j98TAWJuo");

/// Reference plugin: denies guarded calls whose value exceeds a per-call
/// lamport ceiling fixed at install time.
#[program]
pub mod value_limit {
    use super::*;

    /// Validate an install-time configuration blob
    pub fn on_install(ctx: Context<OnInstall>, config: Vec<u8>) -> Result<()> {
        instructions::on_install(ctx, config)
    }

    /// Accept or deny one operation; called by the core before every
    /// guarded call while this plugin is installed
    pub fn check_operation(
        ctx: Context<CheckOperation>,
        args: CheckOperationArgs,
    ) -> Result<()> {
        instructions::check_operation(ctx, args)
    }
}
