use thiserror::Error;

use crate::models::setting::{Setting, SettingType};

/// Settings whose name contains `search` (case-insensitive) and, when given,
/// whose type equals `kind`. Sorted by name.
pub fn search_settings<'a>(
    settings: &'a [Setting],
    search: Option<&str>,
    kind: Option<&SettingType>,
) -> Vec<&'a Setting> {
    let term = search.map(str::to_lowercase);
    let mut found: Vec<&Setting> = settings
        .iter()
        .filter(|s| {
            term.as_ref()
                .is_none_or(|t| s.name.to_lowercase().contains(t.as_str()))
        })
        .filter(|s| kind.is_none_or(|k| &s.kind == k))
        .collect();
    found.sort_by(|a, b| a.name.cmp(&b.name));
    found
}

/// A setting value interpreted according to its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Text(String),
    Number(f64),
    Boolean(bool),
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingValueError {
    #[error("'{0}' is not a valid number")]
    NotANumber(String),

    #[error("'{0}' is not true or false")]
    NotABoolean(String),
}

/// Interpret the stored text. Unknown types are read as text.
pub fn typed_value(setting: &Setting) -> Result<SettingValue, SettingValueError> {
    let raw = setting.value.trim();
    match setting.kind {
        SettingType::Number => raw
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(SettingValue::Number)
            .ok_or_else(|| SettingValueError::NotANumber(setting.value.clone())),
        SettingType::Boolean => match raw.to_lowercase().as_str() {
            "true" => Ok(SettingValue::Boolean(true)),
            "false" => Ok(SettingValue::Boolean(false)),
            _ => Err(SettingValueError::NotABoolean(setting.value.clone())),
        },
        SettingType::String | SettingType::Unknown(_) => {
            Ok(SettingValue::Text(setting.value.clone()))
        }
    }
}
