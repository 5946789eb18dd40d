use anchor_lang::prelude::*;

use crate::error::SmartAccountError;
use crate::security::{MAX_PLUGINS, MAX_PLUGIN_CONFIG_SIZE};

/// Data account for a smart account. Lives at a PDA derived from the vault
/// address and survives implementation swaps untouched.
#[account]
#[derive(Debug, InitSpace)]
pub struct SmartAccount {
    /// Sole privileged identity of the account
    pub owner: Pubkey,
    /// Program every guarded call is forwarded through
    pub implementation: Pubkey,
    /// Program answering signature validity queries
    pub verifier: Pubkey,
    /// Program receiving unrecognized instruction data
    pub fallback_handler: Pubkey,
    /// Creation digest; re-derives the vault seeds when signing
    pub params_digest: [u8; 32],
    /// Next expected replay token for relayed operations
    pub nonce: u64,
    /// Bump seed of the lamport vault PDA
    pub vault_bump: u8,
    /// Bump seed of this data PDA
    pub bump: u8,
    /// Installed plugins consulted before every guarded call
    #[max_len(MAX_PLUGINS)]
    pub plugins: Vec<PluginEntry>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, InitSpace, PartialEq, Eq)]
pub struct PluginEntry {
    pub program: Pubkey,
    /// Opaque configuration handed back to the plugin on every check
    #[max_len(MAX_PLUGIN_CONFIG_SIZE)]
    pub config: Vec<u8>,
}

impl SmartAccount {
    pub const PREFIX_SEED: &'static [u8] = b"account_data";

    pub fn plugin_position(&self, program: &Pubkey) -> Option<usize> {
        self.plugins.iter().position(|entry| entry.program == *program)
    }

    /// Record a plugin. Reinstalling an already-installed plugin replaces
    /// its configuration in place.
    pub fn install_plugin(&mut self, program: Pubkey, config: Vec<u8>) -> Result<()> {
        require!(
            config.len() <= MAX_PLUGIN_CONFIG_SIZE,
            SmartAccountError::PluginConfigTooLarge
        );

        match self.plugin_position(&program) {
            Some(position) => {
                self.plugins[position].config = config;
            }
            None => {
                require!(
                    self.plugins.len() < MAX_PLUGINS,
                    SmartAccountError::PluginLimitReached
                );
                self.plugins.push(PluginEntry { program, config });
            }
        }
        Ok(())
    }

    pub fn uninstall_plugin(&mut self, program: &Pubkey) -> Result<()> {
        let position = self
            .plugin_position(program)
            .ok_or(SmartAccountError::PluginNotInstalled)?;
        self.plugins.remove(position);
        Ok(())
    }

    /// Check and advance the replay counter in one step. The caller relies
    /// on transaction atomicity: a failed execution reverts the advance.
    pub fn consume_nonce(&mut self, expected: u64) -> Result<()> {
        require!(expected == self.nonce, SmartAccountError::ReplayedOperation);
        self.nonce = self
            .nonce
            .checked_add(1)
            .ok_or(SmartAccountError::NonceOverflow)?;
        Ok(())
    }
}

/// Optional module overrides supplied at account creation. An empty payload
/// selects the configured defaults for every module.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountInitPayload {
    pub verifier: Option<Pubkey>,
    pub fallback_handler: Option<Pubkey>,
}

impl AccountInitPayload {
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::default());
        }
        Self::try_from_slice(data).map_err(|_| SmartAccountError::InvalidInitPayload.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> SmartAccount {
        SmartAccount {
            owner: Pubkey::new_unique(),
            implementation: Pubkey::new_unique(),
            verifier: Pubkey::new_unique(),
            fallback_handler: Pubkey::new_unique(),
            params_digest: [3u8; 32],
            nonce: 0,
            vault_bump: 254,
            bump: 255,
            plugins: vec![],
        }
    }

    #[test]
    fn init_space_covers_full_plugin_capacity() {
        // 4 pubkeys + digest + nonce + two bumps = 170 bytes, then the
        // plugin vec: 4 + MAX_PLUGINS * (32 + 4 + MAX_PLUGIN_CONFIG_SIZE)
        let fixed = 32 * 4 + 32 + 8 + 1 + 1;
        let plugins = 4 + MAX_PLUGINS * (32 + 4 + MAX_PLUGIN_CONFIG_SIZE);
        assert_eq!(SmartAccount::INIT_SPACE, fixed + plugins);
        assert_eq!(SmartAccount::INIT_SPACE, 2510);
    }

    #[test]
    fn state_roundtrips_through_serialization() {
        let mut account = sample_account();
        account.nonce = 41;
        account
            .install_plugin(Pubkey::new_unique(), vec![1, 2, 3])
            .unwrap();

        let bytes = account.try_to_vec().unwrap();
        let decoded = SmartAccount::try_from_slice(&bytes).unwrap();

        assert_eq!(decoded.owner, account.owner);
        assert_eq!(decoded.implementation, account.implementation);
        assert_eq!(decoded.verifier, account.verifier);
        assert_eq!(decoded.fallback_handler, account.fallback_handler);
        assert_eq!(decoded.params_digest, account.params_digest);
        assert_eq!(decoded.nonce, 41);
        assert_eq!(decoded.plugins, account.plugins);
    }

    #[test]
    fn install_registers_and_overwrites() {
        let mut account = sample_account();
        let plugin = Pubkey::new_unique();

        account.install_plugin(plugin, vec![1]).unwrap();
        assert_eq!(account.plugins.len(), 1);
        assert_eq!(account.plugin_position(&plugin), Some(0));

        // Reinstalling replaces the blob, not appends
        account.install_plugin(plugin, vec![2, 2]).unwrap();
        assert_eq!(account.plugins.len(), 1);
        assert_eq!(account.plugins[0].config, vec![2, 2]);
    }

    #[test]
    fn install_rejects_oversized_config() {
        let mut account = sample_account();
        let err = account
            .install_plugin(Pubkey::new_unique(), vec![0; MAX_PLUGIN_CONFIG_SIZE + 1])
            .unwrap_err();
        assert_eq!(err, SmartAccountError::PluginConfigTooLarge.into());
    }

    #[test]
    fn install_enforces_capacity() {
        let mut account = sample_account();
        for _ in 0..MAX_PLUGINS {
            account.install_plugin(Pubkey::new_unique(), vec![]).unwrap();
        }
        let err = account
            .install_plugin(Pubkey::new_unique(), vec![])
            .unwrap_err();
        assert_eq!(err, SmartAccountError::PluginLimitReached.into());

        // Overwriting an existing entry still works at capacity
        let existing = account.plugins[0].program;
        account.install_plugin(existing, vec![9]).unwrap();
        assert_eq!(account.plugins[0].config, vec![9]);
    }

    #[test]
    fn uninstall_removes_and_errors_on_unknown() {
        let mut account = sample_account();
        let plugin = Pubkey::new_unique();
        account.install_plugin(plugin, vec![5]).unwrap();

        account.uninstall_plugin(&plugin).unwrap();
        assert!(account.plugins.is_empty());

        let err = account.uninstall_plugin(&plugin).unwrap_err();
        assert_eq!(err, SmartAccountError::PluginNotInstalled.into());
    }

    #[test]
    fn nonce_consumption_is_sequential() {
        let mut account = sample_account();

        account.consume_nonce(0).unwrap();
        assert_eq!(account.nonce, 1);
        account.consume_nonce(1).unwrap();
        assert_eq!(account.nonce, 2);

        // Replaying a consumed token fails
        let err = account.consume_nonce(1).unwrap_err();
        assert_eq!(err, SmartAccountError::ReplayedOperation.into());
        // A token from the future fails the same way
        let err = account.consume_nonce(5).unwrap_err();
        assert_eq!(err, SmartAccountError::ReplayedOperation.into());
    }

    #[test]
    fn nonce_overflow_is_explicit() {
        let mut account = sample_account();
        account.nonce = u64::MAX;
        let err = account.consume_nonce(u64::MAX).unwrap_err();
        assert_eq!(err, SmartAccountError::NonceOverflow.into());
    }

    #[test]
    fn init_payload_empty_selects_defaults() {
        let payload = AccountInitPayload::parse(&[]).unwrap();
        assert_eq!(payload, AccountInitPayload::default());
        assert!(payload.verifier.is_none());
        assert!(payload.fallback_handler.is_none());
    }

    #[test]
    fn init_payload_roundtrip() {
        let payload = AccountInitPayload {
            verifier: Some(Pubkey::new_unique()),
            fallback_handler: None,
        };
        let bytes = payload.try_to_vec().unwrap();
        let decoded = AccountInitPayload::parse(&bytes).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn init_payload_rejects_garbage() {
        let err = AccountInitPayload::parse(&[7u8; 5]).unwrap_err();
        assert_eq!(err, SmartAccountError::InvalidInitPayload.into());
    }
}
