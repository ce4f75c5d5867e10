pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, DocumentFormat};

pub use crate::config::TestkitConfig;
pub use crate::core::cause::{causes_of, find_cause, is_caused_by, AggregateError, CausedBy, Causes};
pub use crate::core::codecs::{JsonCodec, JsonValueCodec, TomlCodec, XmlCodec};
pub use crate::core::roundtrip::{
    verify_json_round_trip, verify_json_value_round_trip, verify_round_trip,
    verify_toml_round_trip, verify_with_codec, verify_xml_round_trip,
};
pub use crate::domain::ports::Codec;
pub use crate::utils::error::{BoxError, Result, TestkitError};
pub use crate::utils::fixtures::{read_fixture, read_fixture_lines, FixtureLoader};
