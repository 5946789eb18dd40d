use anchor_lang::prelude::*;

declare_id!("FcHpLspZz2U5JykpRmFBjaAsfJvPZsfKSBpegNBnjFbX");

/// Receives calls a smart account could not route anywhere else. The handler
/// only observes and logs; it holds no authority over the account.
#[program]
pub mod fallback_handler {
    use super::*;

    /// Liveness probe so integrators can confirm the handler is wired up.
    pub fn probe(ctx: Context<Probe>) -> Result<()> {
        msg!("Fallback handler reachable, probed by {}", ctx.accounts.caller.key());

        emit!(ProbeAcknowledged {
            caller: ctx.accounts.caller.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }

    pub fn fallback(
        _program_id: &Pubkey,
        accounts: &[AccountInfo],
        data: &[u8],
    ) -> Result<()> {
        msg!(
            "Unrecognized instruction: {} bytes, {} accounts",
            data.len(),
            accounts.len()
        );

        emit!(ForwardedDataReceived {
            data_len: data.len() as u32,
            account_count: accounts.len() as u32,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}

#[derive(Accounts)]
pub struct Probe<'info> {
    pub caller: Signer<'info>,
}

#[event]
pub struct ProbeAcknowledged {
    pub caller: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ForwardedDataReceived {
    pub data_len: u32,
    pub account_count: u32,
    pub timestamp: i64,
}
