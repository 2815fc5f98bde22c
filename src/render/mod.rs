//! Turning generated rows into documents.

use thiserror::Error;

pub mod csv;
pub mod table;

pub use self::csv::{save_rows_to_csv, write_rows_csv};
pub use self::table::{render_dataframe, render_preview};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
