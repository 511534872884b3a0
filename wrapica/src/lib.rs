//! Convenience layer over the ICAv2 platform.
//!
//! The part of the platform wrapped here is bring-your-own-bucket (BYOB)
//! resolution: translating between a project's data paths and the S3 URIs
//! where that data actually lives, given three configuration tables
//! (storage configurations, project mappings and storage credentials).
//!
//! ```no_run
//! use wrapica::byob::ByobResolver;
//! use wrapica::types::ProjectId;
//!
//! let resolver = ByobResolver::from_env()?;
//! let uri = resolver.to_s3_uri(&ProjectId::from("P1"), "sample.fastq")?;
//! println!("{}", uri);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod byob;
mod constants;
pub mod errors;
mod keys;
pub mod models;
pub mod types;

pub use byob::{ByobConfig, ByobConfigPaths, ByobResolver, ProjectRelativePath};
pub use constants::*;
