//! Summit token minter
//!
//! Reads wallet addresses from a feedback form CSV export and mints one summit
//! token to each of them through `aptos move run`.
//!
//! - Addresses are lowercased and zero-extended to 64 hex digits
//! - Values that are not hex are looked up as Aptos Names
//! - Duplicates are dropped, keeping the first occurrence
//! - Mints run one at a time; a failed mint (usually because the address
//!   already holds a token) is logged and the run continues

pub mod address;
pub mod address_list;
pub mod cli;
pub mod config;
pub mod csv_reader;
pub mod dispatcher;
pub mod error;
pub mod name_client;
pub mod normalizer;
pub mod runner;

pub use address::{Candidate, NormalizedAddress};
pub use address_list::AddressList;
pub use config::{AptosCliConfig, MinterConfig};
pub use dispatcher::{
    CommandOutcome, CommandRunner, DispatchReport, MintCommand, MintDispatcher, MintTarget,
    TokioCommandRunner,
};
pub use error::{MinterError, MinterResult};
pub use name_client::{AnsClient, NameResolver};
pub use runner::{run, RunOptions, RunReport};
