use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::{MinterError, MinterResult};

/// Zero-based column of the wallet address in the feedback form export
pub const DEFAULT_ADDRESS_COLUMN: usize = 6;

/// One spreadsheet row, reduced to its address cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line in the input file
    pub row: u64,
    pub address: String,
}

pub struct CsvInputReader<R: io::Read> {
    reader: csv::Reader<R>,
    column: usize,
}

impl CsvInputReader<File> {
    pub fn open<P: AsRef<Path>>(path: P, column: usize, skip_header: bool) -> MinterResult<Self> {
        let reader = Self::builder(skip_header).from_path(path)?;
        Ok(Self { reader, column })
    }
}

impl<R: io::Read> CsvInputReader<R> {
    pub fn from_reader(rdr: R, column: usize, skip_header: bool) -> Self {
        Self {
            reader: Self::builder(skip_header).from_reader(rdr),
            column,
        }
    }

    // Rows are allowed to differ in width, short ones are rejected per row
    fn builder(skip_header: bool) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder.has_headers(skip_header).flexible(true).trim(Trim::All);
        builder
    }

    /// Lazily yield the address cell of every row
    pub fn records(self) -> impl Iterator<Item = MinterResult<RawRecord>> {
        let column = self.column;

        self.reader.into_records().map(move |result| {
            let record = result?;
            let row = record.position().map(|p| p.line()).unwrap_or_default();

            match record.get(column) {
                Some(address) => Ok(RawRecord {
                    row,
                    address: address.to_string(),
                }),
                None => Err(MinterError::MalformedRow {
                    row,
                    expected: column.saturating_add(1),
                    columns: record.len(),
                }),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
2024-01-10,yes,5,great,more talks,alice@example.com,0xABC
2024-01-11,no,4,ok,,bob@example.com,not found
2024-01-12,yes,3,,,carol@example.com,
";

    #[test]
    fn test_reads_address_column() {
        let records: Vec<_> = CsvInputReader::from_reader(EXPORT.as_bytes(), DEFAULT_ADDRESS_COLUMN, false)
            .records()
            .collect::<MinterResult<_>>()
            .unwrap();

        let addresses: Vec<_> = records.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["0xABC", "not found", ""]);
        assert_eq!(records[0].row, 1);
        assert_eq!(records[2].row, 3);
    }

    #[test]
    fn test_skip_header() {
        let input = format!("a,b,c,d,e,f,Wallet address\n{}", EXPORT);
        let records: Vec<_> = CsvInputReader::from_reader(input.as_bytes(), DEFAULT_ADDRESS_COLUMN, true)
            .records()
            .collect::<MinterResult<_>>()
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].address, "0xABC");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let input = "a,b,c,d,e,f,  0x1  \n";
        let mut records = CsvInputReader::from_reader(input.as_bytes(), DEFAULT_ADDRESS_COLUMN, false).records();
        assert_eq!(records.next().unwrap().unwrap().address, "0x1");
    }

    #[test]
    fn test_short_row_is_fatal() {
        let input = "a,b,c,d,e,f,0x1\na,b,c\n";
        let results: Vec<_> = CsvInputReader::from_reader(input.as_bytes(), DEFAULT_ADDRESS_COLUMN, false)
            .records()
            .collect();

        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(MinterError::MalformedRow { row: 2, expected: 7, columns: 3 })
        ));
    }

    #[test]
    fn test_huge_column_is_a_malformed_row() {
        let input = "a,b,c\n";
        let mut records = CsvInputReader::from_reader(input.as_bytes(), usize::MAX, false).records();

        assert!(matches!(
            records.next(),
            Some(Err(MinterError::MalformedRow { row: 1, expected: usize::MAX, columns: 3 }))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(CsvInputReader::open("/nonexistent/feedback.csv", DEFAULT_ADDRESS_COLUMN, false).is_err());
    }
}
