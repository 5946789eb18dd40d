use anchor_lang::prelude::*;

use crate::error::SmartAccountError;

// Security constants and validation utilities

/// Maximum allowed size for an account creation init payload
pub const MAX_INIT_PAYLOAD_SIZE: usize = 512;

/// Maximum allowed size for a plugin configuration blob
pub const MAX_PLUGIN_CONFIG_SIZE: usize = 256;

/// Maximum allowed size for a forwarded call payload
pub const MAX_PAYLOAD_SIZE: usize = 1024;

/// Maximum number of plugins installable on one account
pub const MAX_PLUGINS: usize = 8;

/// Maximum allowed remaining accounts
pub const MAX_REMAINING_ACCOUNTS: usize = 32;

/// Maximum relayed operation age in seconds
pub const MAX_OPERATION_AGE: i64 = 300; // 5 minutes

/// Security validation functions
pub mod validation {
    use super::*;

    /// Validate init payload size
    pub fn validate_init_payload(init_payload: &[u8]) -> Result<()> {
        require!(
            init_payload.len() <= MAX_INIT_PAYLOAD_SIZE,
            SmartAccountError::InitPayloadTooLarge
        );
        Ok(())
    }

    /// Validate plugin configuration size
    pub fn validate_plugin_config(config: &[u8]) -> Result<()> {
        require!(
            config.len() <= MAX_PLUGIN_CONFIG_SIZE,
            SmartAccountError::PluginConfigTooLarge
        );
        Ok(())
    }

    /// Validate forwarded call payload size. An empty payload is a
    /// plain value transfer and is allowed.
    pub fn validate_payload(payload: &[u8]) -> Result<()> {
        require!(
            payload.len() <= MAX_PAYLOAD_SIZE,
            SmartAccountError::PayloadTooLarge
        );
        Ok(())
    }

    /// Validate remaining accounts count
    pub fn validate_remaining_accounts(accounts: &[AccountInfo]) -> Result<()> {
        require!(
            accounts.len() <= MAX_REMAINING_ACCOUNTS,
            SmartAccountError::TooManyRemainingAccounts
        );
        Ok(())
    }

    /// Validate lamport amount to prevent overflow in balance arithmetic
    pub fn validate_lamport_amount(amount: u64) -> Result<()> {
        require!(
            amount <= u64::MAX / 2,
            SmartAccountError::TransferAmountOverflow
        );
        Ok(())
    }

    /// Validate program is executable
    pub fn validate_program_executable(program: &AccountInfo) -> Result<()> {
        require!(
            program.executable,
            SmartAccountError::ProgramNotExecutable
        );
        Ok(())
    }

    /// Resolve a module override against the accounts supplied with the
    /// instruction; the override must be present and executable
    pub fn validate_module_override(expected: &Pubkey, accounts: &[AccountInfo]) -> Result<()> {
        let module = accounts
            .iter()
            .find(|info| info.key == expected)
            .ok_or(SmartAccountError::InvalidRemainingAccounts)?;
        validate_program_executable(module)
    }

    /// Validate an operation timestamp is neither stale nor from the future
    pub fn validate_timestamp(timestamp: i64, current_time: i64) -> Result<()> {
        let age = current_time.saturating_sub(timestamp);
        require!(
            age >= 0 && age <= MAX_OPERATION_AGE,
            SmartAccountError::OperationExpired
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_window_accepts_fresh_operations() {
        let now = 1_700_000_000;
        assert!(validation::validate_timestamp(now, now).is_ok());
        assert!(validation::validate_timestamp(now - 1, now).is_ok());
        assert!(validation::validate_timestamp(now - MAX_OPERATION_AGE, now).is_ok());
    }

    #[test]
    fn timestamp_window_rejects_stale_operations() {
        let now = 1_700_000_000;
        let err = validation::validate_timestamp(now - MAX_OPERATION_AGE - 1, now).unwrap_err();
        assert_eq!(err, SmartAccountError::OperationExpired.into());
    }

    #[test]
    fn timestamp_window_rejects_future_operations() {
        let now = 1_700_000_000;
        let err = validation::validate_timestamp(now + 10, now).unwrap_err();
        assert_eq!(err, SmartAccountError::OperationExpired.into());
    }

    #[test]
    fn payload_caps() {
        assert!(validation::validate_payload(&[]).is_ok());
        assert!(validation::validate_payload(&vec![0u8; MAX_PAYLOAD_SIZE]).is_ok());
        assert!(validation::validate_payload(&vec![0u8; MAX_PAYLOAD_SIZE + 1]).is_err());

        assert!(validation::validate_plugin_config(&vec![0u8; MAX_PLUGIN_CONFIG_SIZE]).is_ok());
        assert!(validation::validate_plugin_config(&vec![0u8; MAX_PLUGIN_CONFIG_SIZE + 1]).is_err());

        assert!(validation::validate_init_payload(&vec![0u8; MAX_INIT_PAYLOAD_SIZE]).is_ok());
        assert!(validation::validate_init_payload(&vec![0u8; MAX_INIT_PAYLOAD_SIZE + 1]).is_err());
    }

    #[test]
    fn lamport_amount_overflow_guard() {
        assert!(validation::validate_lamport_amount(0).is_ok());
        assert!(validation::validate_lamport_amount(u64::MAX / 2).is_ok());
        let err = validation::validate_lamport_amount(u64::MAX / 2 + 1).unwrap_err();
        assert_eq!(err, SmartAccountError::TransferAmountOverflow.into());
    }

    #[test]
    fn module_override_must_be_supplied_as_an_account() {
        let key = Pubkey::new_unique();
        let err = validation::validate_module_override(&key, &[]).unwrap_err();
        assert_eq!(err, SmartAccountError::InvalidRemainingAccounts.into());
    }

    #[test]
    fn module_override_accepts_listed_executable_program() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 1u64;
        let mut data = [0u8; 0];
        let program = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &owner,
            true,
            0,
        );

        assert!(validation::validate_module_override(&key, &[program]).is_ok());
    }

    #[test]
    fn module_override_rejects_non_executable_account() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 1u64;
        let mut data = [0u8; 0];
        let plain = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &owner,
            false,
            0,
        );

        let err = validation::validate_module_override(&key, &[plain]).unwrap_err();
        assert_eq!(err, SmartAccountError::ProgramNotExecutable.into());
    }
}
