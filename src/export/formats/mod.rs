pub mod audit;
pub mod comparison;
pub mod fingerprint;
