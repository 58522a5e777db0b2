//! CLI argument parsing

use std::path::PathBuf;

use clap::Parser;

use crate::runner::RunOptions;

#[derive(Parser, Debug)]
#[command(name = "summits-minter")]
#[command(about = "Mint a summit token to every wallet address in a feedback form export", long_about = None)]
#[command(version)]
pub struct Cli {
    /// CSV export of the feedback form
    pub path: PathBuf,

    /// Aptos CLI profile that signs the mint transactions
    #[arg(long)]
    pub profile: String,

    /// Pass --assume-yes to the Aptos CLI so it does not prompt
    #[arg(long, default_value_t = false)]
    pub assume_yes: bool,

    /// Randomize the order
    #[arg(long, default_value_t = false)]
    pub randomize: bool,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Log what would be minted without calling the Aptos CLI
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Treat the first row of the CSV as a header
    #[arg(long, default_value_t = false)]
    pub skip_header: bool,

    /// Settings file (defaults to minter.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Aptos CLI config holding the profiles
    #[arg(long)]
    pub aptos_config: Option<PathBuf>,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            input: self.path.clone(),
            profile: self.profile.clone(),
            assume_yes: self.assume_yes,
            randomize: self.randomize,
            dry_run: self.dry_run,
            skip_header: self.skip_header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "summits-minter",
            "--profile",
            "local",
            "data.csv",
            "--assume-yes",
            "--randomize",
            "-d",
            "--dry-run",
        ])
        .unwrap();

        let options = cli.run_options();
        assert_eq!(options.input, PathBuf::from("data.csv"));
        assert_eq!(options.profile, "local");
        assert!(options.assume_yes);
        assert!(options.randomize);
        assert!(options.dry_run);
        assert!(!options.skip_header);
        assert!(cli.debug);
    }

    #[test]
    fn test_profile_is_required() {
        assert!(Cli::try_parse_from(["summits-minter", "data.csv"]).is_err());
    }

    #[test]
    fn test_flags_default_off() {
        let cli = Cli::try_parse_from(["summits-minter", "data.csv", "--profile", "local"]).unwrap();
        assert!(!cli.assume_yes && !cli.randomize && !cli.debug && !cli.dry_run);
        assert!(cli.config.is_none());
        assert!(cli.aptos_config.is_none());
    }
}
