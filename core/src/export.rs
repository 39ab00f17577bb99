// core/src/export.rs
use std::io::Write;
use std::path::Path;

use log::info;
use serde_json::{Map, Value};

use crate::format::SHEET_HEADER;
use crate::models::SheetRow;

/// Overskrift + én tab-separert linje per rad, klar til innliming i regnearket.
pub fn print_sheet<W: Write>(out: &mut W, rows: &[SheetRow]) -> std::io::Result<()> {
    writeln!(out, "{}", SHEET_HEADER.join("\t"))?;
    for row in rows {
        writeln!(out, "{}", row.to_tsv_line())?;
    }
    Ok(())
}

/// Skriver samme kolonner som komma-separert CSV.
pub fn write_results_csv(path: &Path, header: &[&str], rows: &[SheetRow]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row.columns())?;
    }
    writer.flush()?;
    info!("✅ {} rader skrevet til {}", rows.len(), path.display());
    Ok(())
}

/// JSON-modus: `{}` uten data, selve objektet for ett segment, ellers id -> objekt.
pub fn histories_json(histories: &[(String, Value)]) -> Value {
    match histories {
        [] => Value::Object(Map::new()),
        [(_, only)] => only.clone(),
        many => Value::Object(
            many.iter()
                .map(|(id, history)| (id.clone(), history.clone()))
                .collect(),
        ),
    }
}
