use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Numeric identifier of a catalog entry (e.g. `5491`).
///
/// Unique across a catalog; `CatalogRepository` rejects a second entry that
/// reuses an id.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared column type of a schema field.
///
/// Known variants keep serialization consistent; `Other` preserves values
/// outside the recognized set so the validator can report them instead of the
/// loader rejecting the document.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum FieldType {
    String,
    Year,
    Any,
    Other(String),
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Year => "year",
            FieldType::Any => "any",
            FieldType::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "string" => FieldType::String,
            "year" => FieldType::Year,
            "any" => FieldType::Any,
            other => FieldType::Other(other.to_string()),
        }
    }

    /// True for the three types a catalog entry may declare.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, FieldType::Other(_))
    }

    /// Numeric columns are declared as `any` in catalog documents.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Any)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_round_trips_known_and_unknown() {
        let known = FieldType::Year;
        let json = serde_json::to_string(&known).unwrap();
        assert_eq!(json, "\"year\"");
        let back: FieldType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, known);

        let custom_json = "\"integer\"";
        let parsed: FieldType = serde_json::from_str(custom_json).unwrap();
        assert_eq!(parsed, FieldType::Other("integer".to_string()));
        assert!(!parsed.is_recognized());
        let serialized = serde_json::to_string(&parsed).unwrap();
        assert_eq!(serialized, custom_json);
    }

    #[test]
    fn field_type_is_case_sensitive() {
        let parsed: FieldType = serde_json::from_str("\"Year\"").unwrap();
        assert_eq!(parsed, FieldType::Other("Year".to_string()));
    }

    #[test]
    fn entry_id_is_transparent() {
        let id: EntryId = serde_json::from_str("5491").unwrap();
        assert_eq!(id, EntryId(5491));
        assert_eq!(serde_json::to_string(&id).unwrap(), "5491");
        assert_eq!(id.to_string(), "5491");
    }

    #[test]
    fn entry_id_rejects_strings() {
        assert!(serde_json::from_str::<EntryId>("\"5491\"").is_err());
    }
}
