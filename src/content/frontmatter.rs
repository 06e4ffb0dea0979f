//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::ContentError;

/// Custom deserializer that handles both a single value and a list of values.
/// Nested lists are flattened and scalars are stringified.
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    fn collect<E: Error>(value: serde_yaml::Value, out: &mut Vec<String>) -> Result<(), E> {
        match value {
            serde_yaml::Value::Null => Ok(()),
            serde_yaml::Value::Sequence(items) => {
                for item in items {
                    collect(item, out)?;
                }
                Ok(())
            }
            serde_yaml::Value::Tagged(tagged) => collect(tagged.value, out),
            serde_yaml::Value::Mapping(_) => {
                Err(E::custom("expected a string or a list of strings"))
            }
            scalar => {
                if let Some(s) = scalar_to_string(&scalar) {
                    out.push(s);
                }
                Ok(())
            }
        }
    }

    let value = serde_yaml::Value::deserialize(deserializer)?;
    let mut out = Vec::new();
    collect::<D::Error>(value, &mut out)?;
    Ok(out)
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts any YAML scalar as a string (`date: 2024` or `title: 1984`)
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct Scalar;

    impl<'de> Visitor<'de> for Scalar {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a scalar value")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(Scalar)
        }
    }

    deserializer.deserialize_any(Scalar)
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub draft: bool,
    #[serde(deserialize_with = "string_or_vec", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "string_or_vec", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub more_link: Option<String>,

    /// Unknown keys, kept in declaration order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Rewrite non-string keys (`2024: retrospective`) as strings so they land in `extra`
fn string_keys(mapping: serde_yaml::Mapping) -> serde_yaml::Mapping {
    mapping
        .into_iter()
        .map(|(key, value)| {
            let key = match key {
                serde_yaml::Value::String(_) => key,
                other => {
                    let text = scalar_to_string(&other).unwrap_or_else(|| {
                        serde_yaml::to_string(&other)
                            .map(|s| s.trim_end().to_string())
                            .unwrap_or_default()
                    });
                    serde_yaml::Value::String(text)
                }
            };
            (key, value)
        })
        .collect()
}

impl FrontMatter {
    /// Locate the leading `---` block.
    /// Returns the YAML text and the byte offset where the body starts.
    pub fn split(content: &str) -> Result<(&str, usize), ContentError> {
        let start = if content.starts_with('\u{feff}') {
            '\u{feff}'.len_utf8()
        } else {
            0
        };

        let first_line = content[start..]
            .split_inclusive('\n')
            .next()
            .unwrap_or_default();
        if first_line.trim_end() != "---" {
            return Err(ContentError::malformed("file does not start with `---`"));
        }

        let yaml_start = start + first_line.len();
        let mut offset = yaml_start;
        for line in content[yaml_start..].split_inclusive('\n') {
            let trimmed = line.trim_end();
            if trimmed == "---" || trimmed == "..." {
                return Ok((&content[yaml_start..offset], offset + line.len()));
            }
            offset += line.len();
        }

        Err(ContentError::malformed("missing closing `---`"))
    }

    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let (yaml, body_offset) = Self::split(content)?;
        let body = &content[body_offset..];

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| ContentError::malformed(e.to_string()))?;

        let fm = match value {
            serde_yaml::Value::Null => FrontMatter::default(),
            serde_yaml::Value::Mapping(mapping) => {
                serde_yaml::from_value(serde_yaml::Value::Mapping(string_keys(mapping)))
                    .map_err(|e| ContentError::malformed(e.to_string()))?
            }
            _ => {
                return Err(ContentError::malformed(
                    "front-matter is not a key-value mapping",
                ))
            }
        };

        Ok((fm, body))
    }

    /// Render as a `---` delimited YAML block, newline terminated
    pub fn to_yaml_block(&self) -> Result<String, serde_yaml::Error> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{}---\n", yaml))
    }
}
