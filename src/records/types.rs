//! Media record definitions

use super::fields::{Field, Searchable};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of catalogue entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    Person,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Person => "person",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single movie, show or person entry from a catalogue search.
///
/// Keys are read like untyped JSON records: the snake_case key wins over its
/// camelCase twin, and a title field holding anything but a string is
/// treated as absent. The losing twin is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Map<String, Value>")]
pub struct MediaRecord {
    /// Catalogue ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Entry kind (multi-search results carry it)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    /// Title in the original language (movies)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    /// Name in the original language (shows)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// Localized name (shows, people)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Localized title (movies)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Any other attributes, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MediaRecord {
    pub fn movie(original_title: impl Into<String>) -> Self {
        Self {
            media_type: Some(MediaType::Movie),
            original_title: Some(original_title.into()),
            ..Default::default()
        }
    }

    pub fn tv(name: impl Into<String>) -> Self {
        Self {
            media_type: Some(MediaType::Tv),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_original_name(mut self, original_name: impl Into<String>) -> Self {
        self.original_name = Some(original_name.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl TryFrom<Map<String, Value>> for MediaRecord {
    type Error = serde_json::Error;

    fn try_from(mut object: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut text = |field: Field| -> Option<String> {
            let snake = object.remove(field.as_str());
            let camel = object.remove(field.camel_case());
            [snake, camel].into_iter().find_map(|value| match value {
                Some(Value::String(s)) => Some(s),
                _ => None,
            })
        };

        let original_title = text(Field::OriginalTitle);
        let original_name = text(Field::OriginalName);
        let name = text(Field::Name);

        Ok(Self {
            id: typed(&mut object, "id", "id")?,
            media_type: typed(&mut object, "media_type", "mediaType")?,
            original_title,
            original_name,
            name,
            title: typed(&mut object, "title", "title")?,
            overview: typed(&mut object, "overview", "overview")?,
            extra: object,
        })
    }
}

/// Take `snake` (or, when absent or null, `camel`) out of `object`
fn typed<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    snake: &str,
    camel: &str,
) -> serde_json::Result<Option<T>> {
    let snake_value = object.remove(snake).filter(|v| !v.is_null());
    let camel_value = object.remove(camel).filter(|v| !v.is_null());

    match snake_value.or(camel_value) {
        Some(value) => serde_json::from_value(value).map(Some),
        None => Ok(None),
    }
}

impl Searchable for MediaRecord {
    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::OriginalTitle => self.original_title.as_deref(),
            Field::OriginalName => self.original_name.as_deref(),
            Field::Name => self.name.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_catalogue_payload() {
        let record: MediaRecord = serde_json::from_str(
            r#"{"id": 438631, "media_type": "movie", "original_title": "Dune",
                "title": "Dune", "vote_average": 7.8}"#,
        )
        .unwrap();

        assert_eq!(record.id, Some(438631));
        assert_eq!(record.media_type, Some(MediaType::Movie));
        assert_eq!(record.field(Field::OriginalTitle), Some("Dune"));
        assert_eq!(record.field(Field::Name), None);
        assert!(record.extra.contains_key("vote_average"));
    }

    #[test]
    fn test_deserialize_camel_case_keys() {
        let record: MediaRecord =
            serde_json::from_str(r#"{"originalName": "Dark", "mediaType": "tv"}"#).unwrap();
        assert_eq!(record.original_name.as_deref(), Some("Dark"));
        assert_eq!(record.media_type, Some(MediaType::Tv));
    }

    #[test]
    fn test_both_key_spellings_match_untyped_lookup() {
        let payloads = [
            json!({"original_title": "A", "originalTitle": "B"}),
            json!({"original_title": null, "originalTitle": "B"}),
            json!({"original_title": 7, "originalTitle": "B", "name": 42}),
        ];

        for payload in payloads {
            let record: MediaRecord = serde_json::from_value(payload.clone()).unwrap();
            for field in Field::STANDARD {
                assert_eq!(record.field(field), payload.field(field), "{}", payload);
            }
            assert!(!record.extra.contains_key("originalTitle"));
        }
    }

    #[test]
    fn test_invalid_typed_value_errors() {
        assert!(serde_json::from_value::<MediaRecord>(json!({"id": "x"})).is_err());
        assert!(serde_json::from_value::<MediaRecord>(json!({"media_type": "book"})).is_err());
        assert!(serde_json::from_value::<MediaRecord>(json!(["not", "an", "object"])).is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let record = MediaRecord::movie("Le Samouraï").with_id(5).with_name("The Samurai");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["original_title"], "Le Samouraï");
        assert!(value.get("title").is_none());
        assert_eq!(serde_json::from_value::<MediaRecord>(value).unwrap(), record);
    }
}
