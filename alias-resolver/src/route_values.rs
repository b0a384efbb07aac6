/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Route-parameter representations used on both sides of the alias boundary.
//!
//! [`RouteValueDictionary`] is the typed form exchanged with the routing engine and
//! callers. [`RouteValues`] is the canonical string form aliases are stored with.
//! Conversions between the two are explicit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Canonical stored form of an alias target.
pub type RouteValues = BTreeMap<String, String>;

/// A single typed route parameter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RouteValue {
    /// Renders the value the same way regardless of host locale.
    pub fn to_invariant_string(&self) -> String {
        match self {
            RouteValue::Null => String::new(),
            RouteValue::Bool(value) => value.to_string(),
            RouteValue::Integer(value) => value.to_string(),
            RouteValue::Float(value) => value.to_string(),
            RouteValue::Text(value) => value.clone(),
        }
    }

    pub(crate) fn eq_ignore_case(&self, other: &str) -> bool {
        self.to_invariant_string().eq_ignore_ascii_case(other)
    }
}

impl Display for RouteValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_invariant_string())
    }
}

impl From<&str> for RouteValue {
    fn from(value: &str) -> Self {
        RouteValue::Text(value.to_string())
    }
}

impl From<String> for RouteValue {
    fn from(value: String) -> Self {
        RouteValue::Text(value)
    }
}

impl From<&String> for RouteValue {
    fn from(value: &String) -> Self {
        RouteValue::Text(value.clone())
    }
}

impl From<bool> for RouteValue {
    fn from(value: bool) -> Self {
        RouteValue::Bool(value)
    }
}

impl From<i32> for RouteValue {
    fn from(value: i32) -> Self {
        RouteValue::Integer(i64::from(value))
    }
}

impl From<u32> for RouteValue {
    fn from(value: u32) -> Self {
        RouteValue::Integer(i64::from(value))
    }
}

impl From<i64> for RouteValue {
    fn from(value: i64) -> Self {
        RouteValue::Integer(value)
    }
}

impl From<f64> for RouteValue {
    fn from(value: f64) -> Self {
        RouteValue::Float(value)
    }
}

impl<T: Into<RouteValue>> From<Option<T>> for RouteValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RouteValue::Null)
    }
}

/// Route parameters keyed by name, with ASCII case-insensitive keys.
///
/// Inserting a key that differs from an existing one only by case replaces the
/// existing entry and takes over the new spelling.
///
/// ```
/// use alias_resolver::RouteValueDictionary;
///
/// let mut values = RouteValueDictionary::new();
/// values.insert("Controller", "Blog");
/// values.insert("id", 42);
///
/// assert_eq!(values.get("controller").unwrap().to_string(), "Blog");
/// assert_eq!(values.to_route_values()["id"], "42");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, RouteValue>",
    into = "BTreeMap<String, RouteValue>"
)]
pub struct RouteValueDictionary {
    values: BTreeMap<String, RouteValue>,
}

impl RouteValueDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RouteValue>) {
        let key = key.into();
        if let Some(existing) = self.existing_key(&key) {
            self.values.remove(&existing);
        }
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RouteValue> {
        self.values.get(key).or_else(|| {
            self.values
                .iter()
                .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
                .map(|(_, value)| value)
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<RouteValue> {
        let existing = self.existing_key(key)?;
        self.values.remove(&existing)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RouteValue)> {
        self.values.iter()
    }

    /// Converts every value to its invariant string form.
    pub fn to_route_values(&self) -> RouteValues {
        self.values
            .iter()
            .map(|(key, value)| (key.clone(), value.to_invariant_string()))
            .collect()
    }

    /// Returns `true` when every entry of `target` is present here with an equal value.
    ///
    /// Keys and values compare ASCII case-insensitively. An empty target is contained
    /// in every dictionary.
    pub fn matches(&self, target: &RouteValues) -> bool {
        target.iter().all(|(key, expected)| {
            self.get(key)
                .is_some_and(|actual| actual.eq_ignore_case(expected))
        })
    }

    fn existing_key(&self, key: &str) -> Option<String> {
        self.values
            .keys()
            .find(|candidate| candidate.eq_ignore_ascii_case(key))
            .cloned()
    }
}

impl From<RouteValues> for RouteValueDictionary {
    fn from(values: RouteValues) -> Self {
        values.into_iter().collect()
    }
}

impl From<&RouteValues> for RouteValueDictionary {
    fn from(values: &RouteValues) -> Self {
        values
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl From<BTreeMap<String, RouteValue>> for RouteValueDictionary {
    fn from(values: BTreeMap<String, RouteValue>) -> Self {
        values.into_iter().collect()
    }
}

impl From<RouteValueDictionary> for BTreeMap<String, RouteValue> {
    fn from(dictionary: RouteValueDictionary) -> Self {
        dictionary.values
    }
}

impl<K, V> FromIterator<(K, V)> for RouteValueDictionary
where
    K: Into<String>,
    V: Into<RouteValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dictionary = RouteValueDictionary::new();
        for (key, value) in iter {
            dictionary.insert(key, value);
        }
        dictionary
    }
}

impl<'a> IntoIterator for &'a RouteValueDictionary {
    type Item = (&'a String, &'a RouteValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, RouteValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{RouteValue, RouteValueDictionary, RouteValues};

    fn stored(pairs: &[(&str, &str)]) -> RouteValues {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn invariant_string_form_is_locale_free() {
        assert_eq!(RouteValue::Null.to_invariant_string(), "");
        assert_eq!(RouteValue::Bool(true).to_invariant_string(), "true");
        assert_eq!(RouteValue::Integer(-42).to_invariant_string(), "-42");
        assert_eq!(RouteValue::Float(1.5).to_invariant_string(), "1.5");
        assert_eq!(RouteValue::from(None::<i64>), RouteValue::Null);
    }

    #[test]
    fn keys_are_case_insensitive_and_last_spelling_wins() {
        let mut values = RouteValueDictionary::new();
        values.insert("controller", "Blog");
        values.insert("Controller", "Page");

        assert_eq!(values.len(), 1);
        assert_eq!(values.get("CONTROLLER"), Some(&RouteValue::from("Page")));
        assert_eq!(values.to_route_values(), stored(&[("Controller", "Page")]));
    }

    #[test]
    fn matches_is_containment_of_the_stored_target() {
        let live: RouteValueDictionary = [
            ("controller", RouteValue::from("Blog")),
            ("action", RouteValue::from("Item")),
            ("id", RouteValue::from(42)),
        ]
        .into_iter()
        .collect();

        assert!(live.matches(&stored(&[("controller", "blog"), ("id", "42")])));
        assert!(live.matches(&stored(&[
            ("controller", "Blog"),
            ("action", "Item"),
            ("id", "42")
        ])));
        assert!(!live.matches(&stored(&[("controller", "Blog"), ("id", "43")])));
        assert!(!live.matches(&stored(&[("controller", "Blog"), ("area", "Blogs")])));
        assert!(live.matches(&RouteValues::new()));
        assert!(RouteValueDictionary::new().matches(&RouteValues::new()));
    }

    #[test]
    fn deserialized_keys_fold_case_like_insert() {
        let values: RouteValueDictionary =
            serde_json::from_str(r#"{ "Action": "Index", "action": "Item", "id": 7 }"#)
                .expect("dictionary should deserialize");

        assert_eq!(values.len(), 2);
        assert_eq!(values.get("ACTION").map(|value| value.to_string()), Some("Item".to_string()));
        assert_eq!(
            serde_json::to_value(&values).expect("dictionary should serialize"),
            serde_json::json!({ "action": "Item", "id": 7 })
        );
    }

    #[test]
    fn remove_ignores_key_case() {
        let mut values: RouteValueDictionary = [("Area", "Blogs")].into_iter().collect();

        assert_eq!(values.remove("area"), Some(RouteValue::from("Blogs")));
        assert!(values.is_empty());
    }
}
