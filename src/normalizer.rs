//! Turns raw spreadsheet values into full-width addresses

use tracing::{debug, info, warn};

use crate::address::{classify, Candidate, NormalizedAddress};
use crate::csv_reader::RawRecord;
use crate::error::MinterResult;
use crate::name_client::NameResolver;

/// Addresses collected from the input, in discovery order and possibly repeated
#[derive(Debug, Default)]
pub struct Normalized {
    pub addresses: Vec<NormalizedAddress>,
    pub rows: usize,
    pub skipped: usize,
}

pub struct Normalizer<R> {
    resolver: R,
}

impl<R: NameResolver> Normalizer<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Normalize one raw value, `None` when it must not be minted to
    pub async fn normalize(&self, raw: &str) -> Option<NormalizedAddress> {
        match classify(raw) {
            Ok(None) => {
                debug!("Skipping empty value {:?}", raw);
                None
            }
            Ok(Some(Candidate::ParsedHex(address))) => Some(address),
            Ok(Some(Candidate::NameToResolve(name))) => self.resolve_name(&name).await,
            Err(e) => {
                warn!("Skipping malformed address {}: {}", raw, e);
                None
            }
        }
    }

    async fn resolve_name(&self, name: &str) -> Option<NormalizedAddress> {
        warn!("Not an address, trying to look it up as a name: {}", name);

        match self.resolver.resolve(name).await {
            Ok(Some(resolved)) => match resolved.parse::<NormalizedAddress>() {
                Ok(address) => {
                    info!("Name {} is {}", name, address);
                    Some(address)
                }
                Err(e) => {
                    warn!("Name {} resolved to an invalid address {}: {}", name, resolved, e);
                    None
                }
            },
            Ok(None) => {
                warn!("Invalid address, not a registered name either: {}", name);
                None
            }
            Err(e) => {
                warn!("Name lookup for {} failed: {}", name, e);
                None
            }
        }
    }

    /// Normalize every record in order. Only reader errors are fatal.
    pub async fn normalize_all<I>(&self, records: I) -> MinterResult<Normalized>
    where
        I: IntoIterator<Item = MinterResult<RawRecord>>,
    {
        let mut normalized = Normalized::default();

        for record in records {
            let record = record?;
            normalized.rows += 1;

            match self.normalize(&record.address).await {
                Some(address) => normalized.addresses.push(address),
                None => normalized.skipped += 1,
            }
        }

        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MinterError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct ScriptedResolver {
        names: HashMap<String, Option<String>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedResolver {
        fn new(entries: &[(&str, Option<&str>)]) -> Self {
            Self {
                names: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl NameResolver for ScriptedResolver {
        async fn resolve(&self, name: &str) -> MinterResult<Option<String>> {
            self.calls.lock().unwrap().push(name.to_string());
            match self.names.get(name) {
                Some(value) => Ok(value.clone()),
                None => Err(MinterError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    format!("lookup failed for {}", name),
                ))),
            }
        }
    }

    fn record(row: u64, address: &str) -> MinterResult<RawRecord> {
        Ok(RawRecord {
            row,
            address: address.to_string(),
        })
    }

    #[tokio::test]
    async fn test_hex_never_hits_resolver() {
        let normalizer = Normalizer::new(ScriptedResolver::new(&[]));
        let address = normalizer.normalize("0xABC").await.unwrap();

        assert_eq!(address.to_string(), format!("0x{:0>64}", "abc"));
        assert!(normalizer.resolver.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_name_resolved_to_short_address() {
        let normalizer = Normalizer::new(ScriptedResolver::new(&[("alice", Some("0x1"))]));
        let address = normalizer.normalize("Alice").await.unwrap();

        assert_eq!(address.to_string(), format!("0x{:0>64}", "1"));
        assert_eq!(*normalizer.resolver.calls.lock().unwrap(), vec!["alice".to_string()]);
    }

    #[tokio::test]
    async fn test_unresolved_and_failed_lookups_are_dropped() {
        let normalizer = Normalizer::new(ScriptedResolver::new(&[
            ("alice", None),
            ("bob", Some("not-hex")),
        ]));

        assert_eq!(normalizer.normalize("alice").await, None);
        assert_eq!(normalizer.normalize("bob").await, None);
        // not scripted, resolver errors
        assert_eq!(normalizer.normalize("carol").await, None);
    }

    #[tokio::test]
    async fn test_over_length_hex_is_not_resolved() {
        let normalizer = Normalizer::new(ScriptedResolver::new(&[]));
        let raw = format!("0x{}", "f".repeat(65));

        assert_eq!(normalizer.normalize(&raw).await, None);
        assert!(normalizer.resolver.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_normalize_all_counts_skips() {
        let normalizer = Normalizer::new(ScriptedResolver::new(&[]));
        let records = vec![
            record(1, "0xABC"),
            record(2, "abc"),
            record(3, ""),
            record(4, "not found"),
            record(5, "0xABC"),
        ];

        let normalized = normalizer.normalize_all(records).await.unwrap();

        assert_eq!(normalized.rows, 5);
        assert_eq!(normalized.skipped, 2);
        assert_eq!(normalized.addresses.len(), 3);
    }

    #[tokio::test]
    async fn test_normalize_all_stops_on_reader_error() {
        let normalizer = Normalizer::new(ScriptedResolver::new(&[]));
        let records = vec![
            record(1, "0x1"),
            Err(MinterError::MalformedRow {
                row: 2,
                expected: 7,
                columns: 3,
            }),
            record(3, "0x2"),
        ];

        let result = normalizer.normalize_all(records).await;
        assert!(matches!(result, Err(MinterError::MalformedRow { row: 2, .. })));
    }
}
