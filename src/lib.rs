pub mod audit;
pub mod comparator;
pub mod config;
pub mod error;
pub mod export;
pub mod fingerprint;
pub mod sources;
pub mod types;
pub mod utils;

pub use comparator::FingerprintComparison;
pub use error::{FingerprintError, Result};
pub use fingerprint::{Fingerprint, FingerprintContent};
