//! Reads, normalizes, deduplicates and mints, in that order

use std::path::PathBuf;

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::address_list::AddressList;
use crate::config::{AptosCliConfig, MinterConfig};
use crate::csv_reader::CsvInputReader;
use crate::dispatcher::{CommandRunner, DispatchReport, DispatchSettings, MintDispatcher, MintTarget};
use crate::error::MinterResult;
use crate::name_client::NameResolver;
use crate::normalizer::Normalizer;

/// Per-run choices taken from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub profile: String,
    pub assume_yes: bool,
    pub randomize: bool,
    pub dry_run: bool,
    pub skip_header: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub rows: usize,
    pub skipped: usize,
    pub duplicates: usize,
    pub dispatch: DispatchReport,
}

pub async fn run<N, C, G>(
    options: &RunOptions,
    config: &MinterConfig,
    resolver: N,
    runner: C,
    rng: &mut G,
) -> MinterResult<RunReport>
where
    N: NameResolver,
    C: CommandRunner,
    G: Rng + ?Sized,
{
    let aptos_config = AptosCliConfig::load(&config.aptos_config_path)?;
    let target = MintTarget::new(
        aptos_config.account(&options.profile)?,
        &config.module_name,
        &config.function_name,
    );
    info!("Using profile {} with contract {}", options.profile, target.contract_address());

    let reader = CsvInputReader::open(&options.input, config.address_column, options.skip_header)?;
    let normalized = Normalizer::new(resolver).normalize_all(reader.records()).await?;
    info!(
        "Read {} rows from {:?}, {} usable addresses, {} skipped",
        normalized.rows,
        options.input,
        normalized.addresses.len(),
        normalized.skipped
    );

    let found = normalized.addresses.len();
    let mut addresses = AddressList::dedup(normalized.addresses);
    let duplicates = found - addresses.len();
    if duplicates > 0 {
        info!("Removed {} duplicate addresses", duplicates);
    }

    if options.randomize {
        addresses.shuffle(rng);
    }

    let dispatcher = MintDispatcher::new(
        runner,
        target,
        DispatchSettings {
            program: config.cli_binary.clone(),
            profile: options.profile.clone(),
            assume_yes: options.assume_yes,
            dry_run: options.dry_run,
        },
    );
    let dispatch = dispatcher.dispatch(&addresses).await?;

    Ok(RunReport {
        rows: normalized.rows,
        skipped: normalized.skipped,
        duplicates,
        dispatch,
    })
}
