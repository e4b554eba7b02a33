use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Named application setting. The value is stored as text and interpreted
/// according to `kind`.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub id: u64,
    #[serde(default, alias = "Name", deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, alias = "value_c", deserialize_with = "lenient::text")]
    pub value: String,
    #[serde(default, rename = "type", alias = "type_c")]
    pub kind: SettingType,
    #[serde(default, alias = "description_c")]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum SettingType {
    #[default]
    String,
    Number,
    Boolean,
    Unknown(String),
}

impl SettingType {
    pub fn as_str(&self) -> &str {
        match self {
            SettingType::String => "string",
            SettingType::Number => "number",
            SettingType::Boolean => "boolean",
            SettingType::Unknown(raw) => raw,
        }
    }
}

impl From<String> for SettingType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "string" => SettingType::String,
            "number" => SettingType::Number,
            "boolean" => SettingType::Boolean,
            _ => SettingType::Unknown(raw),
        }
    }
}

impl From<SettingType> for String {
    fn from(kind: SettingType) -> Self {
        kind.as_str().to_string()
    }
}
