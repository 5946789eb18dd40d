use anchor_lang::prelude::*;

use crate::{
    constants::SMART_ACCOUNT_SEED,
    error::SmartAccountError,
    events::FallbackInvoked,
    security::validation,
    state::SmartAccount,
    utils::execute_cpi,
};

/// Route unrecognized instruction data to the account's fallback handler.
/// Account convention: vault, account data, handler program, then whatever
/// the handler expects. The forward carries no signature, so a handler can
/// observe and log but never spend.
pub fn fallback_forward<'info>(
    program_id: &Pubkey,
    accounts: &'info [AccountInfo<'info>],
    data: &[u8],
) -> Result<()> {
    let vault = accounts
        .first()
        .ok_or(SmartAccountError::InvalidRemainingAccounts)?;
    let state_info = accounts
        .get(1)
        .ok_or(SmartAccountError::InvalidRemainingAccounts)?;
    let handler = accounts
        .get(2)
        .ok_or(SmartAccountError::InvalidRemainingAccounts)?;
    let forward_accounts = &accounts[3..];
    validation::validate_remaining_accounts(forward_accounts)?;

    let account_data: Account<SmartAccount> = Account::try_from(state_info)?;

    // Re-derive both PDAs from the stored bumps before trusting anything
    let expected_state = Pubkey::create_program_address(
        &[
            SmartAccount::PREFIX_SEED,
            vault.key.as_ref(),
            &[account_data.bump],
        ],
        program_id,
    )
    .map_err(|_| SmartAccountError::AccountDataMismatch)?;
    require!(
        state_info.key() == expected_state,
        SmartAccountError::AccountDataMismatch
    );

    let expected_vault = Pubkey::create_program_address(
        &[
            SMART_ACCOUNT_SEED,
            account_data.params_digest.as_ref(),
            &[account_data.vault_bump],
        ],
        program_id,
    )
    .map_err(|_| SmartAccountError::InvalidVaultDerivation)?;
    require!(
        vault.key() == expected_vault,
        SmartAccountError::InvalidVaultDerivation
    );

    require!(
        handler.key() == account_data.fallback_handler,
        SmartAccountError::FallbackHandlerMismatch
    );
    validation::validate_program_executable(handler)?;

    msg!("Forwarding {} bytes to fallback handler", data.len());

    execute_cpi(forward_accounts, data, handler, None)?;

    emit!(FallbackInvoked {
        account: vault.key(),
        handler: handler.key(),
        data_len: data.len() as u32,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_requires_positional_accounts() {
        let err = fallback_forward(&crate::ID, &[], &[0xde, 0xad]).unwrap_err();
        assert_eq!(err, SmartAccountError::InvalidRemainingAccounts.into());
    }

    #[test]
    fn forward_rejects_state_account_off_its_derived_address() {
        let vault_key = Pubkey::new_unique();
        let state_key = Pubkey::new_unique();
        let handler_key = Pubkey::new_unique();
        let system = anchor_lang::system_program::ID;

        let state = SmartAccount {
            owner: Pubkey::new_unique(),
            implementation: Pubkey::new_unique(),
            verifier: Pubkey::new_unique(),
            fallback_handler: handler_key,
            params_digest: [7u8; 32],
            nonce: 0,
            vault_bump: 254,
            bump: 254,
            plugins: Vec::new(),
        };
        let mut state_data = SmartAccount::DISCRIMINATOR.to_vec();
        state_data.extend_from_slice(&state.try_to_vec().unwrap());

        let mut vault_lamports = 1_000_000u64;
        let mut vault_data = [0u8; 0];
        let mut state_lamports = 1_000_000u64;
        let mut handler_lamports = 1u64;
        let mut handler_data = [0u8; 0];

        let accounts = [
            AccountInfo::new(
                &vault_key,
                false,
                true,
                &mut vault_lamports,
                &mut vault_data,
                &system,
                false,
                0,
            ),
            AccountInfo::new(
                &state_key,
                false,
                false,
                &mut state_lamports,
                &mut state_data,
                &crate::ID,
                false,
                0,
            ),
            AccountInfo::new(
                &handler_key,
                false,
                false,
                &mut handler_lamports,
                &mut handler_data,
                &system,
                true,
                0,
            ),
        ];

        let err = fallback_forward(&crate::ID, &accounts, &[]).unwrap_err();
        assert_eq!(err, SmartAccountError::AccountDataMismatch.into());
    }
}
