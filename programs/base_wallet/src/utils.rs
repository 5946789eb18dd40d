use anchor_lang::prelude::*;
use anchor_lang::solana_program::{instruction::Instruction, program::invoke};

/// Invoke `cpi_program` with the given data, preserving the signer and
/// writability flags of the supplied accounts. The vault signature granted
/// by the core program propagates through this plain invoke.
pub fn forward_instruction(
    accounts: &[AccountInfo],
    instruction_data: &[u8],
    cpi_program: &AccountInfo,
) -> Result<()> {
    let account_metas = accounts
        .iter()
        .map(|account| AccountMeta {
            pubkey: *account.key,
            is_signer: account.is_signer,
            is_writable: account.is_writable,
        })
        .collect::<Vec<_>>();

    let instruction = Instruction {
        program_id: cpi_program.key(),
        accounts: account_metas,
        data: instruction_data.to_vec(),
    };

    invoke(&instruction, accounts)?;

    Ok(())
}
