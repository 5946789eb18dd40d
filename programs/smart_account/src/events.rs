use anchor_lang::prelude::*;

/// Event emitted when the program configuration is created
#[event]
pub struct ProgramInitialized {
    pub authority: Pubkey,
    pub default_implementation: Pubkey,
    pub default_verifier: Pubkey,
    pub default_fallback_handler: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when program configuration is updated
#[event]
pub struct ConfigUpdated {
    pub authority: Pubkey,
    pub update_type: String,
    pub old_value: String,
    pub new_value: String,
    pub timestamp: i64,
}

/// Event emitted when a new smart account is created
#[event]
pub struct AccountCreated {
    pub account: Pubkey,
    pub owner: Pubkey,
    pub implementation: Pubkey,
    pub verifier: Pubkey,
    pub fallback_handler: Pubkey,
    pub salt: [u8; 32],
    pub init_payload_hash: [u8; 32],
    pub timestamp: i64,
}

/// Event emitted when lamports are deposited through the deposit instruction
#[event]
pub struct DepositReceived {
    pub account: Pubkey,
    pub from: Pubkey,
    pub amount: u64,
    pub new_balance: u64,
    pub timestamp: i64,
}

/// Event emitted when the owner executes a call directly
#[event]
pub struct TransactionExecuted {
    pub account: Pubkey,
    pub owner: Pubkey,
    pub target: Pubkey,
    pub target_program: Pubkey,
    pub value: u64,
    pub timestamp: i64,
}

/// Event emitted when a relayed operation is executed
#[event]
pub struct OperationExecuted {
    pub account: Pubkey,
    pub relayer: Pubkey,
    pub target: Pubkey,
    pub target_program: Pubkey,
    pub value: u64,
    pub nonce: u64,
    pub timestamp: i64,
}

/// Event emitted when a plugin is installed or its configuration replaced
#[event]
pub struct PluginInstalled {
    pub account: Pubkey,
    pub plugin_program: Pubkey,
    pub config_hash: [u8; 32],
    pub timestamp: i64,
}

/// Event emitted when a plugin is removed
#[event]
pub struct PluginUninstalled {
    pub account: Pubkey,
    pub plugin_program: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when account ownership is transferred
#[event]
pub struct OwnerChanged {
    pub account: Pubkey,
    pub old_owner: Pubkey,
    pub new_owner: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the implementation program is swapped
#[event]
pub struct ImplementationChanged {
    pub account: Pubkey,
    pub old_implementation: Pubkey,
    pub new_implementation: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the verifier program is swapped
#[event]
pub struct VerifierChanged {
    pub account: Pubkey,
    pub old_verifier: Pubkey,
    pub new_verifier: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the fallback handler program is swapped
#[event]
pub struct FallbackHandlerChanged {
    pub account: Pubkey,
    pub old_handler: Pubkey,
    pub new_handler: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when unrecognized instruction data is routed to the handler
#[event]
pub struct FallbackInvoked {
    pub account: Pubkey,
    pub handler: Pubkey,
    pub data_len: u32,
    pub timestamp: i64,
}

// Helper functions for emitting events

impl AccountCreated {
    pub fn emit_event(
        account: Pubkey,
        owner: Pubkey,
        implementation: Pubkey,
        verifier: Pubkey,
        fallback_handler: Pubkey,
        salt: [u8; 32],
        init_payload: &[u8],
    ) -> Result<()> {
        let init_payload_hash = anchor_lang::solana_program::hash::hash(init_payload).to_bytes();

        emit!(Self {
            account,
            owner,
            implementation,
            verifier,
            fallback_handler,
            salt,
            init_payload_hash,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}

impl OperationExecuted {
    pub fn emit_event(
        account: Pubkey,
        relayer: Pubkey,
        target: Pubkey,
        target_program: Pubkey,
        value: u64,
        nonce: u64,
    ) -> Result<()> {
        emit!(Self {
            account,
            relayer,
            target,
            target_program,
            value,
            nonce,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}
