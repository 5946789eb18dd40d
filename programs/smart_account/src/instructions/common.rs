use anchor_lang::prelude::*;

use crate::error::SmartAccountError;
use crate::security::validation;
use crate::state::{CheckOperationArgs, ForwardCallArgs, OperationCheck, SmartAccount};
use crate::utils::{cpi_data, execute_cpi, vault_signer};

/// Validated instruction argument bundles.
pub trait Args {
    fn validate(&self) -> Result<()>;
}

/// Run every installed plugin's check against the operation. Each plugin
/// program account must be present in the remaining accounts; a single
/// failing check aborts the whole transaction.
pub(crate) fn run_plugin_checks<'info>(
    account_data: &Account<'info, SmartAccount>,
    vault: &AccountInfo<'info>,
    operation: &OperationCheck,
    remaining: &[AccountInfo<'info>],
) -> Result<()> {
    for entry in account_data.plugins.iter() {
        let plugin_program = remaining
            .iter()
            .find(|info| info.key == &entry.program)
            .ok_or(SmartAccountError::PluginAccountMissing)?;
        require!(
            plugin_program.executable,
            SmartAccountError::PluginNotExecutable
        );

        let check_args = CheckOperationArgs {
            config: entry.config.clone(),
            operation: operation.clone(),
        };
        let data = cpi_data("check_operation", &check_args)?;

        let mut infos = vec![vault.clone(), account_data.to_account_info()];
        infos.extend_from_slice(remaining);

        execute_cpi(&infos, &data, plugin_program, Some(vault_signer(account_data)))?;
        msg!("Plugin check passed: {}", entry.program);
    }
    Ok(())
}

/// Forward a guarded call through the account's implementation program,
/// signing with the vault so the implementation can move value and act as
/// the account toward the target.
pub(crate) fn forward_to_implementation<'info>(
    account_data: &Account<'info, SmartAccount>,
    vault: &AccountInfo<'info>,
    implementation: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    target_program: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    remaining: &[AccountInfo<'info>],
    value: u64,
    payload: &[u8],
) -> Result<()> {
    require!(
        implementation.executable,
        SmartAccountError::ImplementationNotExecutable
    );
    validation::validate_lamport_amount(value)?;

    let args = ForwardCallArgs {
        value,
        payload: payload.to_vec(),
    };
    let data = cpi_data("forward_call", &args)?;

    let mut infos = vec![
        vault.clone(),
        target.clone(),
        target_program.clone(),
        system_program.clone(),
    ];
    infos.extend_from_slice(remaining);

    execute_cpi(&infos, &data, implementation, Some(vault_signer(account_data)))
}
