use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::placeholder::token::normalize_placeholder;

/// Replacement values keyed by normalized placeholder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap(BTreeMap<String, String>);

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts under `key` exactly as given.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Inserts under the normalized form of `raw_key`, so `full name` lands on `FULL_NAME`.
    pub fn insert_normalized(&mut self, raw_key: &str, value: impl Into<String>) -> Option<String> {
        self.0.insert(normalize_placeholder(raw_key), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlays `other`; its values win on equal keys.
    pub fn merge(&mut self, other: ValueMap) {
        self.0.extend(other.0);
    }

    /// Same values with every key normalized. Later keys win when two collapse together.
    pub fn normalized(self) -> Self {
        let mut out = Self::new();
        for (k, v) in self.0 {
            out.insert_normalized(&k, v);
        }
        out
    }

    /// Detected placeholders that have no value or only whitespace.
    pub fn missing<'a>(&self, detected: &'a [String]) -> Vec<&'a str> {
        detected
            .iter()
            .filter(|p| self.get(p).map_or(true, |v| v.trim().is_empty()))
            .map(|p| p.as_str())
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ValueMap;

    #[test]
    fn missing_reports_blank_and_absent() {
        let values: ValueMap = [("NAME", "Ola"), ("CITY", "  ")].into_iter().collect();
        let detected = vec!["CITY".to_string(), "DATE".to_string(), "NAME".to_string()];
        assert_eq!(values.missing(&detected), vec!["CITY", "DATE"]);
    }

    #[test]
    fn normalized_keys() {
        let values: ValueMap = [("full name", "Ola Nordmann"), ("by", "Bergen")]
            .into_iter()
            .collect();
        let values = values.normalized();
        assert_eq!(values.get("FULL_NAME"), Some("Ola Nordmann"));
        assert_eq!(values.get("BY"), Some("Bergen"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn merge_overrides() {
        let mut base: ValueMap = [("NAME", "A"), ("CITY", "Oslo")].into_iter().collect();
        base.merge([("NAME", "B")].into_iter().collect());
        assert_eq!(base.get("NAME"), Some("B"));
        assert_eq!(base.get("CITY"), Some("Oslo"));
    }

    #[test]
    fn deserializes_from_flat_json() {
        let values: ValueMap = serde_json::from_str(r#"{"NAME":"Ola","CITY":"Oslo"}"#).expect("json");
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("CITY"), Some("Oslo"));
    }
}
