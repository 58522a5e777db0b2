//! Sequential mint dispatch through the Aptos CLI

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::address::{strip_prefix, NormalizedAddress, ADDRESS_PREFIX};
use crate::address_list::AddressList;
use crate::error::{MinterError, MinterResult};

pub const DEFAULT_CLI_BINARY: &str = "aptos";
pub const DEFAULT_MODULE_NAME: &str = "summits_token";
pub const DEFAULT_FUNCTION_NAME: &str = "mint_to";

/// Entry function every mint is sent to, fixed for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintTarget {
    contract_address: String,
    module: String,
    function: String,
}

impl MintTarget {
    /// `account` is the profile account as written by the Aptos CLI, with or without `0x`
    pub fn new(account: &str, module: &str, function: &str) -> Self {
        Self {
            contract_address: format!("{}{}", ADDRESS_PREFIX, strip_prefix(account.trim())),
            module: module.to_string(),
            function: function.to_string(),
        }
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    pub fn function_id(&self) -> String {
        format!("{}::{}::{}", self.contract_address, self.module, self.function)
    }
}

/// A fully built CLI invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl MintCommand {
    pub fn build(
        program: &str,
        profile: &str,
        target: &MintTarget,
        address: &NormalizedAddress,
        assume_yes: bool,
    ) -> Self {
        let mut args = vec![
            "move".to_string(),
            "run".to_string(),
            "--profile".to_string(),
            profile.to_string(),
            "--function-id".to_string(),
            target.function_id(),
            "--args".to_string(),
            format!("address:{}", address),
        ];

        if assume_yes {
            args.push("--assume-yes".to_string());
        }

        Self {
            program: program.to_string(),
            args,
        }
    }
}

impl fmt::Display for MintCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.args.join(" "))
    }
}

/// Exit status of one external invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub code: Option<i32>,
}

/// Runs external commands to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Errors only when the program could not be started at all
    async fn run(&self, command: &MintCommand) -> MinterResult<CommandOutcome>;
}

/// Spawns the command with inherited stdio and waits for it to exit
pub struct TokioCommandRunner;

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, command: &MintCommand) -> MinterResult<CommandOutcome> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .await
            .map_err(|source| MinterError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        Ok(CommandOutcome {
            success: status.success(),
            code: status.code(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    pub program: String,
    pub profile: String,
    pub assume_yes: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintOutcome {
    Minted,
    Failed(Option<i32>),
    DryRun,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub total: usize,
    pub minted: usize,
    pub failed: usize,
    pub dry_run: usize,
}

impl DispatchReport {
    fn record(&mut self, outcome: MintOutcome) {
        self.total += 1;
        match outcome {
            MintOutcome::Minted => self.minted += 1,
            MintOutcome::Failed(_) => self.failed += 1,
            MintOutcome::DryRun => self.dry_run += 1,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

pub struct MintDispatcher<C> {
    runner: C,
    target: MintTarget,
    settings: DispatchSettings,
}

impl<C: CommandRunner> MintDispatcher<C> {
    pub fn new(runner: C, target: MintTarget, settings: DispatchSettings) -> Self {
        Self {
            runner,
            target,
            settings,
        }
    }

    /// Mint to every address, one at a time, in list order
    pub async fn dispatch(&self, addresses: &AddressList) -> MinterResult<DispatchReport> {
        info!(
            "Minting to {} addresses via {}",
            addresses.len(),
            self.target.function_id()
        );

        let mut report = DispatchReport::default();
        for address in addresses {
            let outcome = self.mint_one(address).await?;
            report.record(outcome);
        }

        info!(
            "Dispatch finished: {} total, {} minted, {} failed, {} dry run",
            report.total, report.minted, report.failed, report.dry_run
        );

        Ok(report)
    }

    /// A non-zero exit is expected when the address already holds a token,
    /// so it is reported as a failure but never as an error
    pub async fn mint_one(&self, address: &NormalizedAddress) -> MinterResult<MintOutcome> {
        info!("Minting to {}", address);

        if self.settings.dry_run {
            return Ok(MintOutcome::DryRun);
        }

        let command = MintCommand::build(
            &self.settings.program,
            &self.settings.profile,
            &self.target,
            address,
            self.settings.assume_yes,
        );
        debug!("Running {}", command);

        let outcome = self.runner.run(&command).await?;
        if outcome.success {
            info!("Minted to {}", address);
            Ok(MintOutcome::Minted)
        } else {
            match outcome.code {
                Some(code) => warn!("Minting to {} failed with exit code {}", address, code),
                None => warn!("Minting to {} failed", address),
            }
            Ok(MintOutcome::Failed(outcome.code))
        }
    }
}
