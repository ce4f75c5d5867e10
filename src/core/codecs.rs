use crate::config::toml_config::{JsonFormatting, JsonValueOptions, TomlOptions, XmlOptions};
use crate::core::Codec;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// XML codec backed by quick-xml's serde support.
///
/// quick-xml trims leading and trailing whitespace of text content on read,
/// so a string such as `"  Good  "` deserializes as `"Good"`. Values whose
/// text starts or ends with whitespace do not survive an XML round trip.
#[derive(Debug, Clone, Default)]
pub struct XmlCodec {
    options: XmlOptions,
}

impl XmlCodec {
    pub fn new(options: XmlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &XmlOptions {
        &self.options
    }
}

impl<T> Codec<T> for XmlCodec
where
    T: Serialize + DeserializeOwned,
{
    fn name(&self) -> &'static str {
        "xml"
    }

    fn serialize(&self, value: &T) -> Result<String> {
        let mut body = String::new();
        let mut serializer = match self.options.root_tag.as_deref() {
            Some(tag) => quick_xml::se::Serializer::with_root(&mut body, Some(tag))?,
            None => quick_xml::se::Serializer::new(&mut body),
        };
        if let Some(indent) = &self.options.indent {
            serializer.indent(indent.char, indent.size);
        }
        serializer.expand_empty_elements(self.options.expand_empty_elements);
        value.serialize(serializer)?;

        if !self.options.declaration {
            return Ok(body);
        }
        // 縮排模式下宣告獨立成行
        let separator = if self.options.indent.is_some() { "\n" } else { "" };
        Ok(format!("{XML_DECLARATION}{separator}{body}"))
    }

    fn deserialize(&self, text: &str) -> Result<Option<T>> {
        let value = quick_xml::de::from_str(text)?;
        Ok(Some(value))
    }
}

/// JSON codec writing straight from the value's `Serialize` impl; field order
/// follows the type's declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec {
    formatting: JsonFormatting,
}

impl JsonCodec {
    pub fn new(formatting: JsonFormatting) -> Self {
        Self { formatting }
    }
}

impl<T> Codec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn name(&self) -> &'static str {
        "json"
    }

    fn serialize(&self, value: &T) -> Result<String> {
        let text = match self.formatting {
            JsonFormatting::Compact => serde_json::to_string(value)?,
            JsonFormatting::Indented => serde_json::to_string_pretty(value)?,
        };
        Ok(text)
    }

    fn deserialize(&self, text: &str) -> Result<Option<T>> {
        Ok(serde_json::from_str::<Option<T>>(text)?)
    }
}

/// JSON codec going through a `serde_json::Value` tree. Objects come out with
/// their keys sorted, so output is canonical regardless of field order.
#[derive(Debug, Clone, Default)]
pub struct JsonValueCodec {
    options: JsonValueOptions,
}

impl JsonValueCodec {
    pub fn new(options: JsonValueOptions) -> Self {
        Self { options }
    }
}

impl<T> Codec<T> for JsonValueCodec
where
    T: Serialize + DeserializeOwned,
{
    fn name(&self) -> &'static str {
        "json-value"
    }

    fn serialize(&self, value: &T) -> Result<String> {
        let tree = serde_json::to_value(value)?;
        let Some(indent) = self.options.indent.as_deref() else {
            return Ok(serde_json::to_string(&tree)?);
        };

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        tree.serialize(&mut serializer)?;
        Ok(String::from_utf8(buffer)?)
    }

    fn deserialize(&self, text: &str) -> Result<Option<T>> {
        let tree: serde_json::Value = serde_json::from_str(text)?;
        Ok(serde_json::from_value::<Option<T>>(tree)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec {
    options: TomlOptions,
}

impl TomlCodec {
    pub fn new(options: TomlOptions) -> Self {
        Self { options }
    }
}

impl<T> Codec<T> for TomlCodec
where
    T: Serialize + DeserializeOwned,
{
    fn name(&self) -> &'static str {
        "toml"
    }

    fn serialize(&self, value: &T) -> Result<String> {
        let text = if self.options.pretty {
            toml::to_string_pretty(value)?
        } else {
            toml::to_string(value)?
        };
        Ok(text)
    }

    fn deserialize(&self, text: &str) -> Result<Option<T>> {
        Ok(Some(toml::from_str(text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::IndentConfig;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Sample {
        zeta: String,
        alpha: i32,
    }

    fn sample() -> Sample {
        Sample {
            zeta: "z".to_string(),
            alpha: 1,
        }
    }

    #[test]
    fn test_json_codec_keeps_field_order() {
        let codec = JsonCodec::new(JsonFormatting::Compact);
        let text = Codec::<Sample>::serialize(&codec, &sample()).unwrap();
        assert_eq!(text, r#"{"Zeta":"z","Alpha":1}"#);
    }

    #[test]
    fn test_json_codec_indented_uses_two_spaces() {
        let codec = JsonCodec::new(JsonFormatting::Indented);
        let text = Codec::<Sample>::serialize(&codec, &sample()).unwrap();
        assert_eq!(text, "{\n  \"Zeta\": \"z\",\n  \"Alpha\": 1\n}");
    }

    #[test]
    fn test_json_null_is_absent() {
        let codec = JsonCodec::default();
        let value: Option<Sample> = codec.deserialize("null").unwrap();
        assert!(value.is_none());

        let codec = JsonValueCodec::default();
        let value: Option<Sample> = codec.deserialize(" null ").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_json_value_codec_sorts_keys() {
        let codec = JsonValueCodec::default();
        let text = Codec::<Sample>::serialize(&codec, &sample()).unwrap();
        assert_eq!(text, r#"{"Alpha":1,"Zeta":"z"}"#);
    }

    #[test]
    fn test_json_value_codec_custom_indent() {
        let codec = JsonValueCodec::new(JsonValueOptions {
            indent: Some("\t".to_string()),
        });
        let text = Codec::<Sample>::serialize(&codec, &sample()).unwrap();
        assert_eq!(text, "{\n\t\"Alpha\": 1,\n\t\"Zeta\": \"z\"\n}");
    }

    #[test]
    fn test_xml_codec_reads_declaration_and_whitespace() {
        let codec = XmlCodec::default();
        let xml = "<?xml version=\"1.0\"?>\n<Sample>\n  <Zeta>z</Zeta>\n  <Alpha>1</Alpha>\n</Sample>";
        let value: Option<Sample> = codec.deserialize(xml).unwrap();
        assert_eq!(value, Some(sample()));
    }

    #[test]
    fn test_xml_codec_trims_text_content() {
        let codec = XmlCodec::default();
        let xml = "<Sample><Zeta>  z  </Zeta><Alpha>1</Alpha></Sample>";
        let value: Option<Sample> = codec.deserialize(xml).unwrap();
        assert_eq!(value, Some(sample()));
    }

    #[test]
    fn test_xml_codec_writes_declaration_and_root() {
        let codec = XmlCodec::new(XmlOptions {
            declaration: true,
            root_tag: Some("Item".to_string()),
            indent: Some(IndentConfig { char: ' ', size: 2 }),
            expand_empty_elements: false,
        });
        assert_eq!(codec.options().root_tag.as_deref(), Some("Item"));
        let text = Codec::<Sample>::serialize(&codec, &sample()).unwrap();
        assert!(text.starts_with(&format!("{XML_DECLARATION}\n<Item>")));
        assert!(text.contains("<Zeta>z</Zeta>"));
        assert!(text.trim_end().ends_with("</Item>"));
    }

    #[test]
    fn test_toml_codec() {
        let codec = TomlCodec::default();
        let text = Codec::<Sample>::serialize(&codec, &sample()).unwrap();
        assert!(text.contains("Zeta = \"z\""));
        let value: Option<Sample> = codec.deserialize(&text).unwrap();
        assert_eq!(value, Some(sample()));
    }
}
