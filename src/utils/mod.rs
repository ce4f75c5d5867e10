pub mod error;
pub mod fixtures;
pub mod logger;
pub mod validation;
