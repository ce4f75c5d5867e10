use crate::utils::error::Result;

/// A serialize/deserialize pair for one text format.
///
/// `deserialize` returns `Ok(None)` when the text decodes to an absent value
/// (for example JSON `null`); the round-trip verifier treats that as a failure.
pub trait Codec<T> {
    fn name(&self) -> &'static str;
    fn serialize(&self, value: &T) -> Result<String>;
    fn deserialize(&self, text: &str) -> Result<Option<T>>;
}
