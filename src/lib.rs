//! Autoref: Archival Reference Generation
//!
//! Walks a directory tree, assigns every folder and file an ISAD(G) style hierarchical
//! reference (`PFX/1/2`), optionally with accession numbers, fixities and keyword
//! segments, and exports the result as a table.

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod logging;
pub mod prune;
pub mod reference;
pub mod store;
pub mod tooling;
pub mod tree;

pub use config::{CatalogueConfig, ConfigLoader, FieldNames};
pub use error::CatalogueError;
pub use generator::{Catalogue, GeneratorOptions, ReferenceGenerator, RunReport};
pub use store::RecordSet;
