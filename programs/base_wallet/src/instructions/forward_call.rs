use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use smart_account::state::ForwardCallArgs;

use crate::{errors::BaseWalletError, utils::forward_instruction};

pub fn forward_call<'c: 'info, 'info>(
    ctx: Context<'_, '_, 'c, 'info, ForwardCall<'info>>,
    args: ForwardCallArgs,
) -> Result<()> {
    require!(
        args.value > 0 || !args.payload.is_empty(),
        BaseWalletError::EmptyForward
    );

    // 1. Move value first so a payload call observes the funded target
    if args.value > 0 {
        require!(
            ctx.accounts.target.key() != ctx.accounts.smart_account.key(),
            BaseWalletError::InvalidDestination
        );
        require!(
            ctx.accounts.smart_account.lamports() >= args.value,
            BaseWalletError::InsufficientFunds
        );

        // The vault is a zero-data system account; its propagated PDA
        // signature authorizes the debit
        let cpi_ctx = CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.smart_account.to_account_info(),
                to: ctx.accounts.target.to_account_info(),
            },
        );
        transfer(cpi_ctx, args.value)?;

        msg!(
            "Transferred {} lamports to {}",
            args.value,
            ctx.accounts.target.key()
        );
    }

    // 2. Invoke the target program with the payload
    if !args.payload.is_empty() {
        let target_program = &ctx.accounts.target_program;
        require!(
            target_program.executable,
            BaseWalletError::TargetNotExecutable
        );
        require!(
            target_program.key() != smart_account::ID && target_program.key() != crate::ID,
            BaseWalletError::ReentrancyBlocked
        );
        require!(
            !ctx.remaining_accounts.is_empty(),
            BaseWalletError::MissingCallAccounts
        );

        msg!("Invoking target program: {}", target_program.key());
        forward_instruction(ctx.remaining_accounts, &args.payload, target_program)?;
    }

    Ok(())
}

#[derive(Accounts)]
pub struct ForwardCall<'info> {
    /// The account's vault, signed by the core program's PDA signature
    #[account(mut)]
    pub smart_account: Signer<'info>,

    /// CHECK: value recipient chosen by the authorized caller
    #[account(mut)]
    pub target: UncheckedAccount<'info>,

    /// CHECK: validated executable before a payload call
    pub target_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
