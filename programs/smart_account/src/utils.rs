use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    hash::{hash, Hasher},
    instruction::Instruction,
    program::{invoke, invoke_signed},
};

use crate::{constants::SMART_ACCOUNT_SEED, error::SmartAccountError, state::SmartAccount, ID};

/// PDA that signs an outgoing CPI on behalf of this program.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct PdaSigner {
    pub seeds: Vec<Vec<u8>>,
    pub bump: u8,
}

/// Invoke `cpi_program` with `instruction_data`, building metas from the
/// given account infos. When a PDA signer is supplied its account is marked
/// as a signer and the invocation is signed with the PDA seeds.
pub fn execute_cpi(
    accounts: &[AccountInfo],
    instruction_data: &[u8],
    cpi_program: &AccountInfo,
    pda_signer: Option<PdaSigner>,
) -> Result<()> {
    let pda_key = match pda_signer.as_ref() {
        Some(pda) => {
            let mut seeds: Vec<&[u8]> = pda.seeds.iter().map(Vec::as_slice).collect();
            let bump = [pda.bump];
            seeds.push(&bump);
            Some(
                Pubkey::create_program_address(&seeds, &ID)
                    .map_err(|_| SmartAccountError::InvalidVaultDerivation)?,
            )
        }
        None => None,
    };

    let account_metas = accounts
        .iter()
        .map(|account| AccountMeta {
            pubkey: *account.key,
            is_signer: account.is_signer || pda_key.as_ref() == Some(account.key),
            is_writable: account.is_writable,
        })
        .collect::<Vec<_>>();

    let instruction = Instruction {
        program_id: cpi_program.key(),
        accounts: account_metas,
        data: instruction_data.to_vec(),
    };

    if let Some(pda) = pda_signer {
        let mut seeds: Vec<&[u8]> = pda.seeds.iter().map(Vec::as_slice).collect();
        let bump = [pda.bump];
        seeds.push(&bump);
        invoke_signed(&instruction, accounts, &[&seeds])?;
    } else {
        invoke(&instruction, accounts)?;
    }

    Ok(())
}

/// Signer for the lamport vault of the given account state.
pub fn vault_signer(account: &SmartAccount) -> PdaSigner {
    PdaSigner {
        seeds: vec![
            SMART_ACCOUNT_SEED.to_vec(),
            account.params_digest.to_vec(),
        ],
        bump: account.vault_bump,
    }
}

/// 8-byte instruction discriminator: sha256("<namespace>:<name>")[..8].
pub fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{}:{}", namespace, name);
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    out
}

/// Discriminator plus borsh-encoded arguments for a generic CPI.
pub fn cpi_data<T: AnchorSerialize>(name: &str, args: &T) -> Result<Vec<u8>> {
    let mut data = sighash("global", name).to_vec();
    args.serialize(&mut data)
        .map_err(|_| SmartAccountError::DataSerializationFailed)?;
    Ok(data)
}

/// Digest binding an account to its full creation tuple. The init payload
/// enters through its hash so the digest length stays fixed.
pub fn create_params_digest(
    owner: &Pubkey,
    implementation: &Pubkey,
    init_payload: &[u8],
    salt: &[u8; 32],
) -> [u8; 32] {
    let mut hasher = Hasher::default();
    hasher.hash(owner.as_ref());
    hasher.hash(implementation.as_ref());
    hasher.hash(&hash(init_payload).to_bytes());
    hasher.hash(salt);
    hasher.result().to_bytes()
}

/// Deterministic account address for a creation tuple. Callable off-chain
/// before the account exists, so the address can be funded counterfactually.
pub fn compute_account_address(
    owner: &Pubkey,
    implementation: &Pubkey,
    init_payload: &[u8],
    salt: &[u8; 32],
) -> (Pubkey, u8) {
    let digest = create_params_digest(owner, implementation, init_payload, salt);
    Pubkey::find_program_address(&[SMART_ACCOUNT_SEED, digest.as_ref()], &ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_address_is_deterministic() {
        let owner = Pubkey::new_unique();
        let implementation = Pubkey::new_unique();
        let payload = vec![1u8, 2, 3];
        let salt = [7u8; 32];

        let (a, bump_a) = compute_account_address(&owner, &implementation, &payload, &salt);
        let (b, bump_b) = compute_account_address(&owner, &implementation, &payload, &salt);

        assert_eq!(a, b);
        assert_eq!(bump_a, bump_b);
        assert_ne!(a, Pubkey::default());
    }

    #[test]
    fn account_address_depends_on_every_tuple_element() {
        let owner = Pubkey::new_unique();
        let implementation = Pubkey::new_unique();
        let payload = vec![1u8, 2, 3];
        let salt = [7u8; 32];

        let (base, _) = compute_account_address(&owner, &implementation, &payload, &salt);

        let (other_owner, _) =
            compute_account_address(&Pubkey::new_unique(), &implementation, &payload, &salt);
        assert_ne!(base, other_owner);

        let (other_impl, _) =
            compute_account_address(&owner, &Pubkey::new_unique(), &payload, &salt);
        assert_ne!(base, other_impl);

        let (other_payload, _) =
            compute_account_address(&owner, &implementation, &[1u8, 2, 4], &salt);
        assert_ne!(base, other_payload);

        let (other_salt, _) =
            compute_account_address(&owner, &implementation, &payload, &[8u8; 32]);
        assert_ne!(base, other_salt);
    }

    #[test]
    fn empty_payload_digest_is_stable() {
        let owner = Pubkey::new_unique();
        let implementation = Pubkey::new_unique();
        let salt = [0u8; 32];

        let a = create_params_digest(&owner, &implementation, &[], &salt);
        let b = create_params_digest(&owner, &implementation, &[], &salt);
        assert_eq!(a, b);
    }

    #[test]
    fn sighash_matches_instruction_dispatch() {
        let fwd = sighash("global", "forward_call");
        assert_eq!(fwd.len(), 8);
        assert_eq!(fwd, sighash("global", "forward_call"));
        assert_ne!(fwd, sighash("global", "check_operation"));
        assert_ne!(fwd, sighash("global", "on_install"));
    }

    #[test]
    fn cpi_data_prefixes_discriminator() {
        let payload: Vec<u8> = vec![9, 9, 9];
        let data = cpi_data("on_create", &payload).unwrap();

        assert_eq!(&data[..8], &sighash("global", "on_create"));
        // borsh vec encoding: u32 length prefix then the bytes
        assert_eq!(&data[8..12], &3u32.to_le_bytes());
        assert_eq!(&data[12..], &[9, 9, 9]);
    }
}
