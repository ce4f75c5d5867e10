pub mod cause;
pub mod codecs;
pub mod roundtrip;

pub use crate::domain::model::{RoundTripStage, TextComparison};
pub use crate::domain::ports::Codec;
pub use crate::utils::error::Result;
