use crate::core::codecs::{JsonCodec, JsonValueCodec, TomlCodec, XmlCodec};
use crate::core::Codec;
use crate::config::toml_config::{JsonFormatting, JsonValueOptions, TomlOptions, XmlOptions};
use crate::domain::model::{RoundTripStage, TextComparison};
use crate::utils::error::{BoxError, Result, TestkitError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Deserializes `serialized_text`, validates the value, serializes it, then
/// deserializes and validates that output too. A final serialization must be
/// byte-identical to the previous one.
///
/// With `compare_original_text`, the first serialization is also compared
/// (trimmed) against `serialized_text`. Do not enable it when the original
/// text contains comments, non-uniform indentation or any other formatting
/// the serializer cannot reproduce.
///
/// Returns the stabilized serialized text.
pub fn verify_round_trip<T, V, E, S, D>(
    serialized_text: &str,
    mut validate: V,
    mut serialize_fn: S,
    mut deserialize_fn: D,
    compare_original_text: bool,
) -> Result<String>
where
    V: FnMut(&T) -> std::result::Result<(), E>,
    E: Into<BoxError>,
    S: FnMut(&T) -> Result<String>,
    D: FnMut(&str) -> Result<Option<T>>,
{
    let value = deserialize_and_validate(
        serialized_text,
        RoundTripStage::Baseline,
        &mut deserialize_fn,
        &mut validate,
    )?;
    let serialized_again = serialize_fn(&value)?;
    tracing::trace!(text = %serialized_again, "first serialization");

    if compare_original_text {
        ensure_identical(
            TextComparison::OriginalText,
            serialized_text.trim(),
            serialized_again.trim(),
        )?;
    }

    let value = deserialize_and_validate(
        &serialized_again,
        RoundTripStage::Reserialized,
        &mut deserialize_fn,
        &mut validate,
    )?;
    let serialized_once_again = serialize_fn(&value)?;
    ensure_identical(
        TextComparison::Stability,
        &serialized_again,
        &serialized_once_again,
    )?;

    tracing::debug!(bytes = serialized_once_again.len(), "round trip is stable");
    Ok(serialized_once_again)
}

/// Runs [`verify_round_trip`] with the serialize/deserialize pair of `codec`.
pub fn verify_with_codec<T, C, V, E>(
    codec: &C,
    serialized_text: &str,
    validate: V,
    compare_original_text: bool,
) -> Result<String>
where
    C: Codec<T> + ?Sized,
    V: FnMut(&T) -> std::result::Result<(), E>,
    E: Into<BoxError>,
{
    tracing::debug!(codec = codec.name(), compare_original_text, "verifying round trip");
    verify_round_trip(
        serialized_text,
        validate,
        |value: &T| codec.serialize(value),
        |text: &str| codec.deserialize(text),
        compare_original_text,
    )
}

/// XML round trip through quick-xml.
pub fn verify_xml_round_trip<T, V, E>(
    xml: &str,
    validate: V,
    options: &XmlOptions,
    compare_original_text: bool,
) -> Result<String>
where
    T: Serialize + DeserializeOwned,
    V: FnMut(&T) -> std::result::Result<(), E>,
    E: Into<BoxError>,
{
    let codec = XmlCodec::new(options.clone());
    verify_with_codec(&codec, xml, validate, compare_original_text)
}

/// JSON round trip through the streaming serde_json encoder, which keeps field order.
pub fn verify_json_round_trip<T, V, E>(
    json: &str,
    validate: V,
    formatting: JsonFormatting,
    compare_original_text: bool,
) -> Result<String>
where
    T: Serialize + DeserializeOwned,
    V: FnMut(&T) -> std::result::Result<(), E>,
    E: Into<BoxError>,
{
    let codec = JsonCodec::new(formatting);
    verify_with_codec(&codec, json, validate, compare_original_text)
}

/// JSON round trip through a `serde_json::Value` tree, which emits object keys sorted.
pub fn verify_json_value_round_trip<T, V, E>(
    json: &str,
    validate: V,
    options: &JsonValueOptions,
    compare_original_text: bool,
) -> Result<String>
where
    T: Serialize + DeserializeOwned,
    V: FnMut(&T) -> std::result::Result<(), E>,
    E: Into<BoxError>,
{
    let codec = JsonValueCodec::new(options.clone());
    verify_with_codec(&codec, json, validate, compare_original_text)
}

pub fn verify_toml_round_trip<T, V, E>(
    toml: &str,
    validate: V,
    options: &TomlOptions,
    compare_original_text: bool,
) -> Result<String>
where
    T: Serialize + DeserializeOwned,
    V: FnMut(&T) -> std::result::Result<(), E>,
    E: Into<BoxError>,
{
    let codec = TomlCodec::new(options.clone());
    verify_with_codec(&codec, toml, validate, compare_original_text)
}

fn deserialize_and_validate<T, V, E, D>(
    text: &str,
    stage: RoundTripStage,
    deserialize_fn: &mut D,
    validate: &mut V,
) -> Result<T>
where
    V: FnMut(&T) -> std::result::Result<(), E>,
    E: Into<BoxError>,
    D: FnMut(&str) -> Result<Option<T>>,
{
    let value = deserialize_fn(text)?.ok_or(TestkitError::NullResultError { stage })?;
    validate(&value).map_err(|e| TestkitError::ValidationError {
        stage,
        source: e.into(),
    })?;
    tracing::debug!(%stage, "value deserialized and validated");
    Ok(value)
}

fn ensure_identical(comparison: TextComparison, expected: &str, actual: &str) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    let position = first_difference(expected, actual);
    tracing::debug!(%comparison, position, "serialized text mismatch");
    Err(TestkitError::MismatchError {
        comparison,
        expected: expected.to_string(),
        actual: actual.to_string(),
        position,
    })
}

/// Byte offset of the first differing character, or the shorter length when
/// one text is a prefix of the other.
fn first_difference(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}
