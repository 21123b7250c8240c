//! Quiz catalog files on disk.

mod loader;

pub use loader::{load_catalog, save_catalog, LoadError};
