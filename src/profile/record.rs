use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

pub const WEBSITE_SETTINGS: &str = "websiteSettings";
pub const RESIZED_IMAGES: &str = "resizedImages";
pub const STICKER_IMAGES: &str = "stickerImages";
pub const CREATED_AT: &str = "createdAt";

/// Data kept for one profile. Keys the store does not know about are carried
/// through untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default)]
    pub website_settings: Map<String, Value>,
    #[serde(default)]
    pub resized_images: Vec<Value>,
    #[serde(default)]
    pub sticker_images: Vec<Value>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileRecord {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            ..Self::default()
        }
    }

    /// Replaces the whole value stored under `key`.
    pub fn set_field(&mut self, key: &str, value: Value) -> AppResult<()> {
        match key {
            WEBSITE_SETTINGS => match value {
                Value::Object(settings) => self.website_settings = settings,
                _ => return Err(field_type(key, "an object")),
            },
            RESIZED_IMAGES => match value {
                Value::Array(images) => self.resized_images = images,
                _ => return Err(field_type(key, "an array")),
            },
            STICKER_IMAGES => match value {
                Value::Array(images) => self.sticker_images = images,
                _ => return Err(field_type(key, "an array")),
            },
            CREATED_AT => return Err(AppError::ReadOnlyField(key.to_string())),
            "" => {
                return Err(AppError::InvalidInput(
                    "field key cannot be empty".to_string(),
                ));
            }
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }

        Ok(())
    }

    /// Rebuilds a record from stored JSON. Known fields with the wrong shape
    /// fall back to their empty value instead of failing the whole mapping.
    pub fn from_stored(name: &str, value: Value) -> Self {
        let mut record = Self::default();
        let Value::Object(fields) = value else {
            tracing::warn!(profile = name, "stored profile is not an object, resetting it");
            return record;
        };

        for (key, value) in fields {
            match key.as_str() {
                WEBSITE_SETTINGS => match value {
                    Value::Object(settings) => record.website_settings = settings,
                    other => skip_field(name, &key, &other),
                },
                RESIZED_IMAGES => match value {
                    Value::Array(images) => record.resized_images = images,
                    other => skip_field(name, &key, &other),
                },
                STICKER_IMAGES => match value {
                    Value::Array(images) => record.sticker_images = images,
                    other => skip_field(name, &key, &other),
                },
                CREATED_AT => match value
                    .as_str()
                    .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                {
                    Some(created_at) => record.created_at = created_at.with_timezone(&Utc),
                    None => skip_field(name, &key, &value),
                },
                _ => {
                    record.extra.insert(key, value);
                }
            }
        }

        record
    }

    pub fn field(&self, key: &str) -> Option<Value> {
        match key {
            WEBSITE_SETTINGS => Some(Value::Object(self.website_settings.clone())),
            RESIZED_IMAGES => Some(Value::Array(self.resized_images.clone())),
            STICKER_IMAGES => Some(Value::Array(self.sticker_images.clone())),
            CREATED_AT => serde_json::to_value(self.created_at).ok(),
            _ => self.extra.get(key).cloned(),
        }
    }
}

fn skip_field(profile: &str, key: &str, value: &Value) {
    tracing::warn!(profile, field = key, %value, "ignoring stored field with unexpected shape");
}

fn field_type(key: &str, expected: &'static str) -> AppError {
    AppError::FieldType {
        field: key.to_string(),
        expected,
    }
}

/// Profiles keyed by name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileBook {
    entries: Vec<(String, ProfileRecord)>,
}

impl ProfileBook {
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.entries.first().map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&ProfileRecord> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, record)| record)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ProfileRecord> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, record)| record)
    }

    /// Appends a new entry, or replaces the record in place when `name` exists.
    pub fn insert(&mut self, name: String, record: ProfileRecord) {
        match self.get_mut(&name) {
            Some(existing) => *existing = record,
            None => self.entries.push((name, record)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<ProfileRecord> {
        let index = self
            .entries
            .iter()
            .position(|(existing, _)| existing == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ProfileBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(name, record)| (name, record)))
    }
}

impl<'de> Deserialize<'de> for ProfileBook {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let entries = raw
            .into_iter()
            .map(|(name, value)| {
                let record = ProfileRecord::from_stored(&name, value);
                (name, record)
            })
            .collect();

        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_with_original_field_names() {
        let record = ProfileRecord::new(DateTime::<Utc>::UNIX_EPOCH);
        let value = serde_json::to_value(&record).expect("serialize");

        assert_eq!(value["websiteSettings"], json!({}));
        assert_eq!(value["resizedImages"], json!([]));
        assert_eq!(value["stickerImages"], json!([]));
        assert_eq!(value["createdAt"], json!("1970-01-01T00:00:00Z"));
    }

    #[test]
    fn missing_known_fields_default_to_empty() {
        let record: ProfileRecord =
            serde_json::from_value(json!({ "createdAt": "2024-05-01T12:00:00Z" }))
                .expect("deserialize");
        assert!(record.website_settings.is_empty());
        assert!(record.resized_images.is_empty());
        assert!(record.extra.is_empty());
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let input = json!({
            "websiteSettings": { "theme": "dark" },
            "resizedImages": [],
            "stickerImages": [],
            "createdAt": "2024-05-01T12:00:00Z",
            "memeTemplates": ["a", "b"]
        });
        let record: ProfileRecord = serde_json::from_value(input.clone()).expect("deserialize");
        assert_eq!(record.extra["memeTemplates"], json!(["a", "b"]));
        assert_eq!(serde_json::to_value(&record).expect("serialize"), input);
    }

    #[test]
    fn set_field_replaces_whole_value() {
        let mut record = ProfileRecord::default();
        record
            .set_field(WEBSITE_SETTINGS, json!({ "theme": "dark", "title": "My Coin" }))
            .expect("set");
        record
            .set_field(WEBSITE_SETTINGS, json!({ "theme": "light" }))
            .expect("set");

        assert_eq!(
            record.field(WEBSITE_SETTINGS),
            Some(json!({ "theme": "light" }))
        );
    }

    #[test]
    fn set_field_checks_shape() {
        let mut record = ProfileRecord::default();
        let err = record
            .set_field(STICKER_IMAGES, json!({ "not": "a list" }))
            .expect_err("type mismatch");
        assert!(matches!(err, AppError::FieldType { expected: "an array", .. }));

        let err = record
            .set_field(WEBSITE_SETTINGS, json!([1, 2]))
            .expect_err("type mismatch");
        assert!(matches!(err, AppError::FieldType { expected: "an object", .. }));
    }

    #[test]
    fn created_at_is_read_only() {
        let mut record = ProfileRecord::new(DateTime::<Utc>::UNIX_EPOCH);
        let err = record
            .set_field(CREATED_AT, json!("2030-01-01T00:00:00Z"))
            .expect_err("read only");
        assert!(matches!(err, AppError::ReadOnlyField(_)));
        assert_eq!(record.created_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn book_keeps_insertion_order_through_json() {
        let mut book = ProfileBook::default();
        for name in ["zeta", "alpha", "$ABC"] {
            book.insert(name.to_string(), ProfileRecord::default());
        }

        let raw = serde_json::to_string(&book).expect("serialize");
        let parsed: ProfileBook = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(parsed.names(), vec!["zeta", "alpha", "$ABC"]);
    }

    #[test]
    fn off_shape_fields_fall_back_to_empty() {
        let record = ProfileRecord::from_stored(
            "legacy",
            json!({
                "websiteSettings": null,
                "resizedImages": "nope",
                "stickerImages": ["ok.png"],
                "createdAt": 1714564800,
                "theme": "dark"
            }),
        );

        assert!(record.website_settings.is_empty());
        assert!(record.resized_images.is_empty());
        assert_eq!(record.sticker_images, vec![json!("ok.png")]);
        assert_eq!(record.created_at, DateTime::<Utc>::default());
        assert_eq!(record.extra["theme"], json!("dark"));
    }

    #[test]
    fn one_bad_record_does_not_sink_the_book() {
        let raw = json!({
            "keep": {
                "websiteSettings": { "theme": "dark" },
                "resizedImages": [],
                "stickerImages": [],
                "createdAt": "2024-05-01T12:00:00Z"
            },
            "legacy": { "websiteSettings": null },
            "broken": 42
        })
        .to_string();

        let book: ProfileBook = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(book.names(), vec!["keep", "legacy", "broken"]);
        let keep = book.get("keep").expect("keep");
        assert_eq!(keep.website_settings["theme"], json!("dark"));
        assert_eq!(
            keep.created_at,
            DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
                .expect("timestamp")
                .with_timezone(&Utc)
        );
    }

    #[test]
    fn book_requires_a_json_object() {
        assert!(serde_json::from_str::<ProfileBook>("[1, 2]").is_err());
        assert!(serde_json::from_str::<ProfileBook>("{not json").is_err());
    }

    #[test]
    fn book_remove_keeps_remaining_order() {
        let mut book = ProfileBook::default();
        for name in ["a", "b", "c"] {
            book.insert(name.to_string(), ProfileRecord::default());
        }

        assert!(book.remove("b").is_some());
        assert!(book.remove("b").is_none());
        assert_eq!(book.names(), vec!["a", "c"]);
        assert_eq!(book.first_name(), Some("a"));
    }
}
