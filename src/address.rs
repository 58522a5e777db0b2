//! Address classification and normalization

use std::fmt;
use std::str::FromStr;

use alloy_primitives::B256;
use thiserror::Error;

/// Marker shown in front of every address
pub const ADDRESS_PREFIX: &str = "0x";

/// Number of hex digits in a full-width address
pub const ADDRESS_HEX_LEN: usize = 64;

/// Value the spreadsheet export writes when a wallet could not be looked up
pub const NOT_FOUND_SENTINEL: &str = "not found";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address body is empty")]
    Empty,

    #[error("address has {0} hex digits, at most 64 allowed")]
    TooLong(usize),

    #[error("'{0}' is not valid hex")]
    NotHex(String),
}

/// A 32-byte account address, displayed as `0x` followed by 64 lowercase hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedAddress(B256);

impl NormalizedAddress {
    /// Build an address from a hex body without marker.
    ///
    /// Short bodies are zero-extended on the left, so `abc` and
    /// `0000...0abc` are the same address.
    pub fn from_hex_body(body: &str) -> Result<Self, AddressError> {
        if body.is_empty() {
            return Err(AddressError::Empty);
        }
        if !body.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressError::NotHex(body.to_string()));
        }
        if body.len() > ADDRESS_HEX_LEN {
            return Err(AddressError::TooLong(body.len()));
        }

        let padded = format!("{:0>width$}", body, width = ADDRESS_HEX_LEN);
        let bytes = hex::decode(&padded).map_err(|_| AddressError::NotHex(body.to_string()))?;

        Ok(Self(B256::from_slice(&bytes)))
    }
}

impl FromStr for NormalizedAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::from_hex_body(strip_prefix(&lowered))
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ADDRESS_PREFIX, hex::encode(self.0))
    }
}

/// Outcome of looking at one raw spreadsheet value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    ParsedHex(NormalizedAddress),
    NameToResolve(String),
}

/// Strip a leading `0x` marker if present
pub fn strip_prefix(value: &str) -> &str {
    value.strip_prefix(ADDRESS_PREFIX).unwrap_or(value)
}

/// Classify one raw value.
///
/// `Ok(None)` means the cell is empty or holds the export's "not found"
/// sentinel. Over-long hex is an error and must never reach name resolution.
pub fn classify(raw: &str) -> Result<Option<Candidate>, AddressError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == NOT_FOUND_SENTINEL {
        return Ok(None);
    }

    let lowered = raw.to_lowercase();
    let body = strip_prefix(&lowered);

    match NormalizedAddress::from_hex_body(body) {
        Ok(address) => Ok(Some(Candidate::ParsedHex(address))),
        Err(AddressError::NotHex(_)) => Ok(Some(Candidate::NameToResolve(body.to_string()))),
        Err(e) => Err(e),
    }
}
