//! cartelgen - Exhibition label (cartel) generator from spreadsheets to DOCX
//!
//! This crate reads a spreadsheet of artworks (one row per work, with title,
//! artist, creation date and description columns) and produces a printable
//! Word document containing one formatted label per artwork.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use cartelgen::CartelGeneratorBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a generator with default settings
//!     let generator = CartelGeneratorBuilder::new().build()?;
//!
//!     // Open input spreadsheet
//!     let input = File::open("oeuvres.xlsx")?;
//!
//!     // Generate the document
//!     let artifact = generator.generate(input)?;
//!
//!     // "Cartels - Expo A.docx"
//!     std::fs::write(artifact.file_name(), artifact.bytes())?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use cartelgen::{CartelGeneratorBuilder, ColumnNames, PageSize, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = CartelGeneratorBuilder::new()
//!         .with_file_name("Cartels - Salle 2")
//!         .with_margin_cm(2.5)
//!         .with_columns(ColumnNames::french())  // "Titre de l'œuvre", "Artiste", ...
//!         .with_fallback_title("Sans titre")
//!         .with_sheet_selector(SheetSelector::Name("Salle 2".to_string()))
//!         .with_page_size(PageSize::Letter)
//!         .build()?;
//!
//!     let spreadsheet: Vec<u8> = vec![]; // Your spreadsheet bytes
//!     let artifact = generator.generate(Cursor::new(spreadsheet))?;
//!     println!("{} ({} bytes)", artifact.file_name(), artifact.bytes().len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Preview Before Generating
//!
//! ```rust,no_run
//! use std::fs::File;
//! use cartelgen::CartelGeneratorBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = CartelGeneratorBuilder::new().build()?;
//!     let table = generator.load_table(File::open("oeuvres.xlsx")?)?;
//!
//!     println!("{} works, columns: {:?}", table.len(), table.headers());
//!     for record in generator.records(&table).iter().take(5) {
//!         println!("{} / {}", record.title(), record.artist());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod document;
mod error;
mod formatter;
mod output;
mod parser;
mod render;
mod schema;
mod security;
mod types;

// 公開API
pub use api::{ColumnNames, PageSize, SheetSelector};
pub use builder::{
    CartelGenerator, CartelGeneratorBuilder, RenderConfig, DEFAULT_MARGIN_CM, DEFAULT_TITLE,
    MAX_MARGIN_CM, MIN_MARGIN_CM,
};
pub use document::{Alignment, Document, StyledBlock, TextStyle};
pub use error::CartelError;
pub use output::{OutputArtifact, DOCX_MIME_TYPE};
pub use types::{CellValue, Record, Table, TableRow};
