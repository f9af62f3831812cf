//! Flat format dictionaries
//!
//! Every model node carries a [`FormatMap`]: a flat map from camelCase format keys
//! (`bold`, `fontSize`, `marginLeft`, ...) to string, number or boolean values. Values are never
//! nested, so cloning a map is a plain copy of its pairs. A missing key means "inherit".

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FormatValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FormatValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FormatValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FormatValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for FormatValue {
    fn from(value: &str) -> Self {
        FormatValue::Text(value.to_string())
    }
}

impl From<String> for FormatValue {
    fn from(value: String) -> Self {
        FormatValue::Text(value)
    }
}

impl From<bool> for FormatValue {
    fn from(value: bool) -> Self {
        FormatValue::Bool(value)
    }
}

impl From<f64> for FormatValue {
    fn from(value: f64) -> Self {
        FormatValue::Number(value)
    }
}

impl From<i64> for FormatValue {
    fn from(value: i64) -> Self {
        FormatValue::Number(value as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatMap(BTreeMap<String, FormatValue>);

impl FormatMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FormatValue> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(FormatValue::as_str)
    }

    /// Boolean flag; absent keys read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.0
            .get(key)
            .and_then(FormatValue::as_bool)
            .unwrap_or(false)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(FormatValue::as_bool)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(FormatValue::as_number)
    }

    pub fn set(&mut self, key: &str, value: impl Into<FormatValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FormatValue> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormatValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Copy every pair of `other` over this map.
    pub fn extend_from(&mut self, other: &FormatMap) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Copy the pairs of `defaults` whose keys are not set here.
    pub fn merge_under(&mut self, defaults: &FormatMap) {
        for (k, v) in &defaults.0 {
            self.0.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }

    /// A copy without the given keys.
    pub fn without(&self, keys: &[&str]) -> FormatMap {
        let mut copy = self.clone();
        copy.0.retain(|k, _| !keys.contains(&k.as_str()));
        copy
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &FormatValue) -> bool) {
        self.0.retain(|k, v| keep(k, v));
    }
}

impl<K: Into<String>, V: Into<FormatValue>> FromIterator<(K, V)> for FormatMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormatMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_under_keeps_existing_values() {
        let mut format: FormatMap = [("underline", false)].into_iter().collect();
        let defaults: FormatMap = [("underline", true), ("bold", true)].into_iter().collect();
        format.merge_under(&defaults);
        assert_eq!(format.get_bool("underline"), Some(false));
        assert!(format.flag("bold"));
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut format = FormatMap::new();
        format.set("bold", true);
        format.set("fontSize", "10pt");
        format.set("lineHeight", 1.5);
        let json = serde_json::to_string(&format).unwrap();
        assert_eq!(json, r#"{"bold":true,"fontSize":"10pt","lineHeight":1.5}"#);
        let back: FormatMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, format);
    }
}
