use anyhow::{Context, Result};
use percolate::Config;
use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};
use prettytable::Table;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn create_table() -> Table {
    let mut table = Table::new();
    table.set_format(
        FormatBuilder::new()
            .column_separator(' ')
            .separator(LinePosition::Title, LineSeparator::new('-', '+', ' ', ' '))
            .build(),
    );
    table
}

pub fn read_config(path: &Path) -> Result<Config> {
    let file = File::open(path).context(format!("unable to open '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .context(format!("unable to parse '{}' as a sweep configuration", path.display()))
}
