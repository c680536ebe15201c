//! Dataset files on disk

mod loader;

pub use loader::{DatasetFormat, LoadError, load_dataset, parse_dataset};
