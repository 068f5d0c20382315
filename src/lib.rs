//! iv3json - Pure-Rust converter from Dutch Iv3 municipal workbooks to JSON
//!
//! This crate reads an Iv3 ("Informatie voor Derden") reporting workbook and
//! produces the normalized JSON document consumed by the Iv3 reporting pipeline.
//! Tables inside the workbook are located heuristically, so no fixed cell
//! addresses are assumed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use iv3json::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // Open input workbook
//!     let input = File::open("iv3.xlsx")?;
//!
//!     // Create output JSON file ("Iv3_export_2026.json")
//!     let output = File::create(converter.output_file_name())?;
//!
//!     // Convert workbook to JSON
//!     converter.convert_to_writer(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use std::fs::File;
//! use iv3json::{AmountScale, ConverterBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_financieel_pakket("Key2Financiën")
//!         .with_export_software("Cognos")
//!         .with_export_name("Iv3_2025_Q4")
//!         .with_details_openbaar(true)
//!         .with_amount_scale(AmountScale::Thousands)  // amounts are in thousands
//!         .build()?;
//!
//!     let document = converter.convert(File::open("iv3.xlsx")?)?;
//!     println!("{} lasten records", document.data.lasten.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Parsing a Single Sheet
//!
//! The sheet parsers work on a [`CellGrid`] and can be used on their own:
//!
//! ```rust
//! use iv3json::{parse_matrix, AmountScale, CellGrid};
//!
//! let rows = [
//!     ["", "1.1", "1.2", "2.1"],
//!     ["1", "100,5", "0", ""],
//!     ["2", "", "", ""],
//!     ["3", "", "", ""],
//! ];
//! let grid = CellGrid::from_rows(
//!     rows.iter()
//!         .map(|r| r.iter().map(|s| s.to_string()).collect())
//!         .collect(),
//! );
//!
//! let records = parse_matrix(&grid, AmountScale::Units);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].bedrag, 100); // half-to-even
//! ```

mod api;
mod builder;
mod error;
mod formatter;
mod grid;
mod output;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{sheets, AmountScale};
pub use builder::{Converter, ConverterBuilder};
pub use error::Iv3Error;
pub use grid::CellGrid;
pub use output::{DataSection, Iv3Document};
pub use parser::{
    find_balance_header, find_category_header_row, find_key_figures_header_row,
    find_task_field_column, header_to_verslagperiode, kengetal_for_label, parse_balansstanden,
    parse_free_text_date, parse_kengetallen, parse_matrix, BalanceHeader, InfoMap, WorkbookReader,
};
pub use types::{
    BalanceRecord, Contact, Kengetal, KeyFigureRecord, MatrixRecord, Metadata, Standper,
};
