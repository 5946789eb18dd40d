use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use crate::error::SmartAccountError;

/// Canonical payload an owner signs to authorize a relayed operation.
/// The serialized bytes of this struct are what the verifier checks the
/// signature against; the call payload enters through its hash.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct OperationMessage {
    pub account: Pubkey,
    pub target: Pubkey,
    pub target_program: Pubkey,
    pub value: u64,
    pub payload_hash: [u8; 32],
    pub nonce: u64,
    pub created_at: i64,
}

impl OperationMessage {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.try_to_vec()
            .map_err(|_| SmartAccountError::DataSerializationFailed.into())
    }
}

/// Operation summary handed to every installed plugin.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct OperationCheck {
    pub account: Pubkey,
    pub target: Pubkey,
    pub target_program: Pubkey,
    pub value: u64,
    pub payload_len: u32,
    pub payload_hash: [u8; 32],
}

impl OperationCheck {
    pub fn for_call(
        account: Pubkey,
        target: Pubkey,
        target_program: Pubkey,
        value: u64,
        payload: &[u8],
    ) -> Self {
        Self {
            account,
            target,
            target_program,
            value,
            payload_len: payload.len() as u32,
            payload_hash: hash(payload).to_bytes(),
        }
    }
}

/// Arguments for a plugin's check_operation instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct CheckOperationArgs {
    /// The configuration blob stored at install time, handed back verbatim
    pub config: Vec<u8>,
    pub operation: OperationCheck,
}

/// Arguments for an implementation's forward_call instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct ForwardCallArgs {
    pub value: u64,
    pub payload: Vec<u8>,
}

/// Arguments for a verifier's verify_message instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct VerifyMessageArgs {
    pub expected_signer: Pubkey,
    pub message: Vec<u8>,
    pub signature: Vec<u8>,
    pub verify_instruction_index: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_message_layout_is_stable() {
        let message = OperationMessage {
            account: Pubkey::new_unique(),
            target: Pubkey::new_unique(),
            target_program: Pubkey::new_unique(),
            value: 50_000_000,
            payload_hash: [9u8; 32],
            nonce: 3,
            created_at: 1_700_000_100,
        };

        let bytes = message.to_bytes().unwrap();
        // 3 pubkeys + value + payload hash + nonce + created_at
        assert_eq!(bytes.len(), 32 * 3 + 8 + 32 + 8 + 8);
        assert_eq!(&bytes[..32], message.account.as_ref());
        assert_eq!(&bytes[96..104], &50_000_000u64.to_le_bytes());

        let decoded = OperationMessage::try_from_slice(&bytes).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn operation_check_hashes_payload() {
        let payload = vec![1u8, 2, 3, 4];
        let check = OperationCheck::for_call(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            10,
            &payload,
        );

        assert_eq!(check.payload_len, 4);
        assert_eq!(check.payload_hash, hash(&payload).to_bytes());

        let empty = OperationCheck::for_call(
            check.account,
            check.target,
            check.target_program,
            10,
            &[],
        );
        assert_eq!(empty.payload_len, 0);
        assert_ne!(empty.payload_hash, check.payload_hash);
    }
}
