use super::RenderResult;
use crate::row::{HEADER, Row};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the header and one eight-field record per row. Break rows carry
/// their label in the first field.
pub fn write_rows_csv<W: Write>(writer: W, rows: &[Row]) -> RenderResult<()> {
    let mut writer = ::csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;
    for row in rows {
        let mut cells = row.cells();
        cells.resize(HEADER.len(), String::new());
        writer.write_record(&cells)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_rows_to_csv<P: AsRef<Path>>(path: P, rows: &[Row]) -> RenderResult<()> {
    let file = File::create(path)?;
    write_rows_csv(file, rows)
}
