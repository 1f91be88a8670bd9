use serde::{Deserialize, Serialize};

use crate::FileMap;
use crate::normalize::NO_DESCRIPTION;

/// Record format, decided once during normalization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RecordShape {
    /// Free-form prompt plus context/patch/harness files.
    #[default]
    Agentic,
    /// Fixed input/output pair.
    NonAgentic,
}

impl RecordShape {
    pub fn label(self) -> &'static str {
        match self {
            RecordShape::Agentic => "Agentic",
            RecordShape::NonAgentic => "Non-Agentic",
        }
    }
}

/// Which flattened file mapping of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileSection {
    Context,
    Harness,
    Patch,
}

impl FileSection {
    pub const ALL: [FileSection; 3] = [FileSection::Context, FileSection::Harness, FileSection::Patch];

    /// Prefix used in transient file ids (`context-<key>` etc.).
    pub fn id_prefix(self) -> &'static str {
        match self {
            FileSection::Context => "context",
            FileSection::Harness => "harness",
            FileSection::Patch => "patch",
        }
    }

    pub fn file_id(self, key: &str) -> String {
        format!("{}-{key}", self.id_prefix())
    }
}

/// One normalized benchmark problem.
///
/// Serialized with camelCase fields. Reading back is forgiving: missing fields
/// fall back to defaults and wrong-typed values are coerced, so one damaged
/// record never invalidates a persisted collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub category: String,
    #[serde(deserialize_with = "lenient::string")]
    pub difficulty: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub prompt: String,
    #[serde(deserialize_with = "lenient::files")]
    pub context_data: FileMap,
    #[serde(deserialize_with = "lenient::files")]
    pub patch_data: FileMap,
    #[serde(deserialize_with = "lenient::files")]
    pub harness_data: FileMap,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub system_message: Option<String>,
    #[serde(rename = "isAgentic", with = "shape_flag")]
    pub shape: RecordShape,
}

impl ProblemRecord {
    pub fn is_agentic(&self) -> bool {
        self.shape == RecordShape::Agentic
    }

    pub fn files(&self, section: FileSection) -> &FileMap {
        match section {
            FileSection::Context => &self.context_data,
            FileSection::Harness => &self.harness_data,
            FileSection::Patch => &self.patch_data,
        }
    }

    /// Description with the render-time placeholder applied.
    pub fn display_description(&self) -> &str {
        if self.description.is_empty() {
            NO_DESCRIPTION
        } else {
            &self.description
        }
    }

    pub fn display_prompt(&self) -> &str {
        if self.prompt.is_empty() {
            NO_DESCRIPTION
        } else {
            &self.prompt
        }
    }
}

/// `RecordShape` persisted as the `isAgentic` boolean.
mod shape_flag {
    use super::RecordShape;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(shape: &RecordShape, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bool(*shape == RecordShape::Agentic)
    }

    /// Only an explicit `false` means non-agentic.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<RecordShape, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(false) => RecordShape::NonAgentic,
            _ => RecordShape::Agentic,
        })
    }
}

/// Coercing readers for persisted record fields.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::normalize::{is_truthy, text};
    use crate::FileMap;

    /// Falsy values read as empty, anything else as its text.
    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_string(d)?.unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(is_truthy(&v).then(|| text(&v)))
    }

    /// Non-objects read as empty; non-string entries keep their JSON text.
    pub fn files<'de, D: Deserializer<'de>>(d: D) -> Result<FileMap, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), text(v))).collect(),
            _ => FileMap::new(),
        })
    }
}
