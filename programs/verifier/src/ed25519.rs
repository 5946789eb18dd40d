use crate::error::VerifierError;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;

pub const ED25519_ID: Pubkey = pubkey!("Ed25519SigVerify111111111111111111111111111");

/// Checks that `instruction` is an ed25519 precompile invocation covering
/// exactly `message` signed by `public_key`.
pub fn verify_ed25519_ix(
    instruction: &Instruction,
    public_key: [u8; 32],
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    if instruction.program_id != ED25519_ID
        || instruction.accounts.len() != 0
        || instruction.data.len() != (2 + 14 + 32 + 64 + message.len())
    {
        return Err(VerifierError::InvalidLengthForVerification.into());
    }

    check_ed25519_data(&instruction.data, public_key, message, signature)?;
    Ok(())
}

fn check_ed25519_data(
    data: &[u8],
    public_key: [u8; 32],
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    // Parse header components
    let num_signatures = &[data[0]];
    let signature_offset = &data[2..=3];
    let signature_instruction_index = &data[4..=5];
    let public_key_offset = &data[6..=7];
    let public_key_instruction_index = &data[8..=9];
    let message_data_offset = &data[10..=11];
    let message_data_size = &data[12..=13];
    let message_instruction_index = &data[14..=15];

    // Get actual data
    let parsed_public_key = &data[16..16 + 32];
    let parsed_signature = &data[48..48 + 64];
    let parsed_message = &data[112..];

    // Calculate expected values
    const SIGNATURE_OFFSETS_SERIALIZED_SIZE: u16 = 14;
    const DATA_START: u16 = 2 + SIGNATURE_OFFSETS_SERIALIZED_SIZE;
    let message_length: u16 = message.len() as u16;
    let public_key_length: u16 = public_key.len() as u16;
    let signature_length: u16 = signature.len() as u16;

    let expected_public_key_offset: u16 = DATA_START;
    let expected_signature_offset: u16 = DATA_START + public_key_length;
    let expected_message_data_offset: u16 = expected_signature_offset + signature_length;

    // Verify header
    if num_signatures != &[1]
        || signature_offset != &expected_signature_offset.to_le_bytes()
        || signature_instruction_index != &0xFFFFu16.to_le_bytes()
        || public_key_offset != &expected_public_key_offset.to_le_bytes()
        || public_key_instruction_index != &0xFFFFu16.to_le_bytes()
        || message_data_offset != &expected_message_data_offset.to_le_bytes()
        || message_data_size != &message_length.to_le_bytes()
        || message_instruction_index != &0xFFFFu16.to_le_bytes()
    {
        return Err(VerifierError::VerifyHeaderMismatch.into());
    }

    if &parsed_public_key[..] != &public_key[..]
        || &parsed_signature[..] != &signature[..]
        || &parsed_message[..] != &message[..]
    {
        return Err(VerifierError::VerifyDataMismatch.into());
    }
    Ok(())
}

/// Builds the instruction data the ed25519 precompile expects for a single
/// signature over `message`. Clients place this in the same transaction,
/// before the instruction that names it by index.
pub fn build_ed25519_verify_data(
    public_key: &[u8; 32],
    message: &[u8],
    signature: &[u8; 64],
) -> Vec<u8> {
    const DATA_START: u16 = 16;
    let public_key_offset: u16 = DATA_START;
    let signature_offset: u16 = DATA_START + 32;
    let message_data_offset: u16 = signature_offset + 64;

    let mut data = Vec::with_capacity(112 + message.len());
    data.push(1); // num_signatures
    data.push(0); // padding
    data.extend_from_slice(&signature_offset.to_le_bytes());
    data.extend_from_slice(&0xFFFFu16.to_le_bytes());
    data.extend_from_slice(&public_key_offset.to_le_bytes());
    data.extend_from_slice(&0xFFFFu16.to_le_bytes());
    data.extend_from_slice(&message_data_offset.to_le_bytes());
    data.extend_from_slice(&(message.len() as u16).to_le_bytes());
    data.extend_from_slice(&0xFFFFu16.to_le_bytes());
    data.extend_from_slice(public_key);
    data.extend_from_slice(signature);
    data.extend_from_slice(message);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify_instruction(data: Vec<u8>) -> Instruction {
        Instruction {
            program_id: ED25519_ID,
            accounts: vec![],
            data,
        }
    }

    #[test]
    fn built_data_passes_verification() {
        let public_key = [7u8; 32];
        let signature = [9u8; 64];
        let message = b"operation digest".to_vec();

        let data = build_ed25519_verify_data(&public_key, &message, &signature);
        assert_eq!(data.len(), 112 + message.len());

        let ix = verify_instruction(data);
        assert!(verify_ed25519_ix(&ix, public_key, &message, &signature).is_ok());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let public_key = [7u8; 32];
        let signature = [9u8; 64];
        let message = b"operation digest".to_vec();
        let ix = verify_instruction(build_ed25519_verify_data(&public_key, &message, &signature));

        let err = verify_ed25519_ix(&ix, public_key, b"other digest net", &signature).unwrap_err();
        assert_eq!(err, VerifierError::VerifyDataMismatch.into());

        let err = verify_ed25519_ix(&ix, [8u8; 32], &message, &signature).unwrap_err();
        assert_eq!(err, VerifierError::VerifyDataMismatch.into());

        let err = verify_ed25519_ix(&ix, public_key, &message, &[0u8; 64]).unwrap_err();
        assert_eq!(err, VerifierError::VerifyDataMismatch.into());
    }

    #[test]
    fn foreign_program_is_rejected() {
        let public_key = [7u8; 32];
        let signature = [9u8; 64];
        let message = b"operation digest".to_vec();

        let mut ix = verify_instruction(build_ed25519_verify_data(&public_key, &message, &signature));
        ix.program_id = Pubkey::new_unique();

        let err = verify_ed25519_ix(&ix, public_key, &message, &signature).unwrap_err();
        assert_eq!(err, VerifierError::InvalidLengthForVerification.into());
    }

    #[test]
    fn truncated_data_is_rejected() {
        let public_key = [7u8; 32];
        let signature = [9u8; 64];
        let message = b"operation digest".to_vec();

        let mut data = build_ed25519_verify_data(&public_key, &message, &signature);
        data.pop();

        let err = verify_ed25519_ix(&verify_instruction(data), public_key, &message, &signature)
            .unwrap_err();
        assert_eq!(err, VerifierError::InvalidLengthForVerification.into());
    }

    #[test]
    fn multi_signature_header_is_rejected() {
        let public_key = [7u8; 32];
        let signature = [9u8; 64];
        let message = b"operation digest".to_vec();

        let mut data = build_ed25519_verify_data(&public_key, &message, &signature);
        data[0] = 2;

        let err = verify_ed25519_ix(&verify_instruction(data), public_key, &message, &signature)
            .unwrap_err();
        assert_eq!(err, VerifierError::VerifyHeaderMismatch.into());
    }

    #[test]
    fn cross_instruction_reference_is_rejected() {
        let public_key = [7u8; 32];
        let signature = [9u8; 64];
        let message = b"operation digest".to_vec();

        // Point the message at another instruction in the transaction.
        let mut data = build_ed25519_verify_data(&public_key, &message, &signature);
        data[14..16].copy_from_slice(&0u16.to_le_bytes());

        let err = verify_ed25519_ix(&verify_instruction(data), public_key, &message, &signature)
            .unwrap_err();
        assert_eq!(err, VerifierError::VerifyHeaderMismatch.into());
    }
}
