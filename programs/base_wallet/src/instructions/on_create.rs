use anchor_lang::prelude::*;
use smart_account::state::AccountInitPayload;

use crate::errors::BaseWalletError;

pub fn on_create(ctx: Context<OnCreate>, init_payload: Vec<u8>) -> Result<()> {
    // The payload already selected the modules core-side; here it only has
    // to be well formed so a typo never produces a half-configured account
    AccountInitPayload::parse(&init_payload)
        .map_err(|_| BaseWalletError::InvalidInitPayload)?;

    msg!(
        "Smart account setup complete: {}",
        ctx.accounts.smart_account.key()
    );
    Ok(())
}

#[derive(Accounts)]
pub struct OnCreate<'info> {
    /// The account's vault. The PDA signature proves this call was issued
    /// by the core program during creation; nothing else can produce it.
    pub smart_account: Signer<'info>,
}
