use anchor_lang::prelude::*;

use crate::state::ValueLimitConfig;

pub fn on_install(ctx: Context<OnInstall>, config: Vec<u8>) -> Result<()> {
    // Reject a blob that would make every later check fail to decode
    let limit = ValueLimitConfig::parse(&config)?;

    msg!(
        "Value limit installed for {}: max {} lamports per call",
        ctx.accounts.smart_account.key(),
        limit.max_value
    );
    Ok(())
}

#[derive(Accounts)]
pub struct OnInstall<'info> {
    /// The account's vault. The PDA signature proves the install request
    /// went through the core program's owner checks.
    pub smart_account: Signer<'info>,
}
