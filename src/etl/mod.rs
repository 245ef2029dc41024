//! Wide-to-long transform of the portal's CSV files.
//!
//! `catalog` says which files feed which table and how they are laid out,
//! `text` and `frame` turn raw bytes into a clean rectangular table, and
//! `reshape` emits one row per (entity, year).

pub mod catalog;
pub mod frame;
pub mod reshape;
pub mod text;

pub use catalog::{CATALOG, Layout, SourceFile, SourceSpec, TableKind};
pub use frame::{Frame, HeaderLayout};
pub use reshape::{LongRow, reshape};
