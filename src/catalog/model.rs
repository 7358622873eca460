//! Deserializable representation of a catalog entry document.
//!
//! The types mirror the document keys so helpers and tests can reason about
//! dataset metadata without ad-hoc JSON handling. Every object keeps the keys
//! it does not model in an `extra` map, and numbers stay in their JSON
//! representation, so serializing a loaded entry reproduces the input.
//! Fields are private: entries are built by the loader and read-only after.

use crate::catalog::identity::{EntryId, FieldType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One dataset as described in the catalog.
pub struct CatalogEntry {
    name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    title: Option<Option<String>>,
    id: EntryId,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    description: Option<Option<String>>,
    sources: Vec<Source>,
    #[serde(rename = "owidTags", default, skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
    resources: Vec<Resource>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Attribution for the upstream publisher of the data.
pub struct Source {
    name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    link: Option<Option<String>>,
    #[serde(
        rename = "dataPublishedBy",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    data_published_by: Option<Option<String>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A data file shipped with the entry and the schema of its columns.
pub struct Resource {
    path: String,
    schema: Schema,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Ordered column list; position `i` describes CSV column `i`.
pub struct Schema {
    fields: Vec<Field>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A single column declaration.
pub struct Field {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    description: Option<Option<String>>,
    #[serde(
        rename = "owidDisplaySettings",
        default,
        skip_serializing_if = "Option::is_none",
        with = "embedded_settings"
    )]
    display: Option<Option<DisplaySettings>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Rendering hints for a column.
///
/// `conversion_factor` is kept as the literal JSON number; use
/// [`DisplaySettings::conversion_factor`] for arithmetic.
pub struct DisplaySettings {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    unit: Option<Option<String>>,
    #[serde(
        rename = "shortUnit",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    short_unit: Option<Option<String>>,
    #[serde(
        rename = "includeInTable",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    include_in_table: Option<Option<bool>>,
    #[serde(
        rename = "conversionFactor",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    conversion_factor: Option<Option<Number>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
    /// Original string when the settings arrived as serialized JSON.
    #[serde(skip)]
    embedded: Option<String>,
}

impl CatalogEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        self.title.as_ref().and_then(Option::as_deref).unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_ref().and_then(Option::as_deref).unwrap_or_default()
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Resolve a resource by its relative path.
    pub fn resource(&self, path: &str) -> Option<&Resource> {
        self.resources.iter().find(|res| res.path == path)
    }

    /// Top-level keys the model does not interpret.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

impl Source {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_ref().and_then(Option::as_deref)
    }

    pub fn data_published_by(&self) -> Option<&str> {
        self.data_published_by.as_ref().and_then(Option::as_deref)
    }
}

impl Resource {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Schema {
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First field with the given name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// CSV column index of the named field.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().and_then(Option::as_deref)
    }

    pub fn display(&self) -> Option<&DisplaySettings> {
        self.display.as_ref().and_then(Option::as_ref)
    }
}

impl DisplaySettings {
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Option::as_deref)
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_ref().and_then(Option::as_deref)
    }

    pub fn short_unit(&self) -> Option<&str> {
        self.short_unit.as_ref().and_then(Option::as_deref)
    }

    /// Columns are shown in summary tables unless explicitly excluded.
    pub fn include_in_table(&self) -> bool {
        self.include_in_table.flatten().unwrap_or(true)
    }

    pub fn conversion_factor(&self) -> Option<f64> {
        self.conversion_factor_literal().and_then(Number::as_f64)
    }

    /// The conversion factor exactly as written in the document.
    pub fn conversion_factor_literal(&self) -> Option<&Number> {
        self.conversion_factor.as_ref().and_then(Option::as_ref)
    }

    /// True when the document stored these settings as a JSON string.
    pub fn is_embedded(&self) -> bool {
        self.embedded.is_some()
    }
}

/// Optional keys keep an explicit `null` apart from an absent key: absent
/// binds to `None`, `null` to `Some(None)`, so both serialize back unchanged.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// `owidDisplaySettings` is either an inline object or a string holding a
/// serialized object. The string form is written back verbatim.
mod embedded_settings {
    use super::DisplaySettings;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(
        value: &Option<Option<DisplaySettings>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(Some(settings)) => match &settings.embedded {
                Some(raw) => serializer.serialize_str(raw),
                None => settings.serialize(serializer),
            },
            Some(None) | None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<Option<Option<DisplaySettings>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(Some(None)),
            Some(Value::String(raw)) => {
                let mut settings: DisplaySettings = serde_json::from_str(&raw).map_err(|err| {
                    D::Error::custom(format!(
                        "owidDisplaySettings string is not a serialized object: {err}"
                    ))
                })?;
                settings.embedded = Some(raw);
                Ok(Some(Some(settings)))
            }
            Some(other) => serde_json::from_value(other)
                .map(|settings| Some(Some(settings)))
                .map_err(|err| D::Error::custom(format!("owidDisplaySettings: {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_field(settings: Value) -> Value {
        json!({
            "name": "tfp",
            "type": "any",
            "owidDisplaySettings": settings
        })
    }

    #[test]
    fn inline_settings_are_read() {
        let field: Field = serde_json::from_value(sample_field(json!({
            "name": "TFP",
            "unit": "index",
            "shortUnit": "",
            "includeInTable": false,
            "conversionFactor": 0.5
        })))
        .unwrap();
        let settings = field.display().expect("settings present");
        assert_eq!(settings.name(), Some("TFP"));
        assert_eq!(settings.unit(), Some("index"));
        assert_eq!(settings.short_unit(), Some(""));
        assert!(!settings.include_in_table());
        assert_eq!(settings.conversion_factor(), Some(0.5));
        assert!(!settings.is_embedded());
    }

    #[test]
    fn embedded_settings_are_parsed_and_written_back_verbatim() {
        let raw = "{\"unit\": \"tonnes\",  \"conversionFactor\": 1000}";
        let input = sample_field(Value::String(raw.to_string()));
        let field: Field = serde_json::from_value(input.clone()).unwrap();
        let settings = field.display().expect("settings present");
        assert!(settings.is_embedded());
        assert_eq!(settings.unit(), Some("tonnes"));
        assert_eq!(settings.conversion_factor(), Some(1000.0));

        let back = serde_json::to_value(&field).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn embedded_settings_must_be_an_object() {
        let err = serde_json::from_value::<Field>(sample_field(json!("not json"))).unwrap_err();
        assert!(err.to_string().contains("owidDisplaySettings"));
    }

    #[test]
    fn include_in_table_defaults_to_true() {
        let field: Field = serde_json::from_value(sample_field(json!({"unit": "%"}))).unwrap();
        assert!(field.display().unwrap().include_in_table());
    }

    #[test]
    fn integer_conversion_factor_keeps_its_literal() {
        let input = sample_field(json!({"conversionFactor": 1}));
        let field: Field = serde_json::from_value(input.clone()).unwrap();
        let settings = field.display().unwrap();
        assert_eq!(settings.conversion_factor_literal(), Some(&Number::from(1)));
        assert_eq!(serde_json::to_value(&field).unwrap(), input);
    }

    #[test]
    fn unknown_keys_survive_serialization() {
        let input = json!({
            "fields": [
                {"name": "Entity", "type": "string", "constraints": {"required": true}}
            ],
            "primaryKey": ["Entity"]
        });
        let schema: Schema = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.position("Entity"), Some(0));
        assert_eq!(serde_json::to_value(&schema).unwrap(), input);
    }

    #[test]
    fn explicit_nulls_survive_serialization() {
        let input = json!({
            "name": "tfp",
            "type": "any",
            "description": null,
            "owidDisplaySettings": null
        });
        let field: Field = serde_json::from_value(input.clone()).unwrap();
        assert!(field.description().is_none());
        assert!(field.display().is_none());
        assert_eq!(serde_json::to_value(&field).unwrap(), input);

        let settings_input = sample_field(json!({
            "name": null,
            "unit": null,
            "shortUnit": null,
            "includeInTable": null,
            "conversionFactor": null
        }));
        let field: Field = serde_json::from_value(settings_input.clone()).unwrap();
        let settings = field.display().unwrap();
        assert!(settings.unit().is_none());
        assert!(settings.include_in_table());
        assert!(settings.conversion_factor().is_none());
        assert_eq!(serde_json::to_value(&field).unwrap(), settings_input);
    }

    #[test]
    fn absent_optionals_stay_absent() {
        let input = json!({"name": "Entity", "type": "string"});
        let field: Field = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&field).unwrap(), input);
    }
}
