use std::io::Read;

use csv::{StringRecord, StringRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Client,
    Open,
    Deposit,
    Transfer,
}

#[derive(Debug, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub client: Option<String>,
    pub email: Option<String>,
    pub account: Option<String>,
    pub to: Option<String>,
    pub amount: Option<Decimal>,
}

/// Parses a list of ledger operations in CSV format, yielding each row
/// together with the line it starts on.
pub struct CsvOperationParser<R> {
    headers: Option<StringRecord>,
    records: StringRecordsIntoIter<R>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let mut reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);
        let headers = reader.headers().ok().cloned();

        Self {
            headers,
            records: reader.into_records(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, Result<Operation, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.records.next()? {
            Ok(record) => (
                record.position().map_or(0, |pos| pos.line()),
                record.deserialize(self.headers.as_ref()),
            ),
            Err(err) => (err.position().map_or(0, |pos| pos.line()), Err(err)),
        };
        Some(row)
    }
}
