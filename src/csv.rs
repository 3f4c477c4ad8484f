use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::machine::Stats;
use crate::{Coin, Command, Item};
use crate::model::ParseCatalogError;

/// Errors that can occur when reading a command script
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open script: {0}")]
    Open(#[source] csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized action '{action}'")]
    UnrecognizedAction { line: usize, action: String },

    #[error("line {line}: insert missing coin")]
    MissingCoin { line: usize },

    #[error("line {line}: {source}")]
    Catalog {
        line: usize,
        source: ParseCatalogError,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    action: String,
    #[serde(default)]
    arg: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    kind: &'a str,
    name: &'a str,
    value: u64,
}

/// Read machine commands from a csv file with an `action,arg` header
pub fn read_commands(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Command, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            let arg = row.arg.filter(|arg| !arg.is_empty());
            match row.action.to_ascii_lowercase().as_str() {
                "select" => {
                    let item = arg
                        .map(|name| name.parse::<Item>())
                        .transpose()
                        .map_err(|source| CsvError::Catalog { line, source })?;
                    Ok(Command::Select { item })
                }
                "insert" => {
                    let name = arg.ok_or(CsvError::MissingCoin { line })?;
                    let coin = name
                        .parse::<Coin>()
                        .map_err(|source| CsvError::Catalog { line, source })?;
                    Ok(Command::Insert { coin })
                }
                "collect" => Ok(Command::Collect),
                "refund" => Ok(Command::Refund),
                "reset" => Ok(Command::Reset),
                "stats" => Ok(Command::Stats),
                other => Err(CsvError::UnrecognizedAction {
                    line,
                    action: other.to_string(),
                }),
            }
        }))
}

/// Write a stats snapshot in csv format: total sales, then coin and item stock
pub fn write_stats(writer: impl io::Write, stats: &Stats) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.serialize(OutputRow {
        kind: "sales",
        name: "total",
        value: stats.total_sales.units(),
    })?;
    for (coin, quantity) in &stats.coins {
        writer.serialize(OutputRow {
            kind: "coin",
            name: coin.name(),
            value: u64::from(*quantity),
        })?;
    }
    for (item, quantity) in &stats.items {
        writer.serialize(OutputRow {
            kind: "item",
            name: item.name(),
            value: u64::from(*quantity),
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VendingMachine;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn read(content: &str) -> Vec<Result<Command, CsvError>> {
        let file = write_csv(content);
        read_commands(file.path()).unwrap().collect()
    }

    #[test]
    fn read_purchase_script() {
        let commands: Vec<Command> = read(
            "action,arg\nselect,coke\ninsert,quarter\ncollect,\nrefund,\nreset,\nstats,\n",
        )
        .into_iter()
        .map(Result::unwrap)
        .collect();

        assert_eq!(
            commands,
            vec![
                Command::Select {
                    item: Some(Item::Coke)
                },
                Command::Insert {
                    coin: Coin::Quarter
                },
                Command::Collect,
                Command::Refund,
                Command::Reset,
                Command::Stats,
            ]
        );
    }

    #[test]
    fn read_with_whitespace_and_case() {
        let results = read("action, arg\n SELECT , Pepsi \n");
        assert!(matches!(
            results[0],
            Ok(Command::Select {
                item: Some(Item::Pepsi)
            })
        ));
    }

    #[test]
    fn select_without_item_is_kept_for_the_machine() {
        let results = read("action,arg\nselect,\n");
        assert!(matches!(results[0], Ok(Command::Select { item: None })));
    }

    #[test]
    fn read_returns_error_for_unknown_action() {
        let results = read("action,arg\ndance,\n");
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::UnrecognizedAction { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_unknown_coin() {
        let results = read("action,arg\ncollect,\ninsert,doubloon\n");
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert!(matches!(
            err,
            CsvError::Catalog {
                line: 3,
                source: ParseCatalogError::UnknownCoin(_)
            }
        ));
    }

    #[test]
    fn read_returns_error_for_missing_coin() {
        let results = read("action,arg\ninsert,\n");
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::MissingCoin { line: 2 }));
    }

    #[test]
    fn commands_outlive_the_path_argument() {
        let file = write_csv("action,arg\nselect,soda\ncollect,\n");
        let commands = {
            let path = file.path().to_path_buf();
            read_commands(path).unwrap()
        };

        let handle = std::thread::spawn(move || commands.count());
        assert_eq!(handle.join().unwrap(), 2);
    }

    #[test]
    fn read_missing_file_fails() {
        assert!(matches!(
            read_commands("does/not/exist.csv"),
            Err(CsvError::Open(_))
        ));
    }

    #[test]
    fn write_stats_rows() {
        let machine = VendingMachine::with_initial_stock(3);
        let mut out = Vec::new();
        write_stats(&mut out, &machine.stats()).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "kind,name,value",
                "sales,total,0",
                "coin,Quarter,3",
                "coin,Dime,3",
                "coin,Nickle,3",
                "coin,Penny,3",
                "item,Coke,3",
                "item,Pepsi,3",
                "item,Soda,3",
            ]
        );
    }
}
