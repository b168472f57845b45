//! # rxcheck-reference
//!
//! Reference data for the rxcheck validator: loading the diagnosis → drugs
//! table from CSV, and publishing it to validators through a handle that can
//! be swapped while validations are running.

pub mod handle;
pub mod loader;

pub use handle::ReferenceHandle;
pub use loader::{from_path, from_reader, load_csv_str};
