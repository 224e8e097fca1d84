use std::collections::HashMap;

/// A single typed custom property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// `bool` property.
    Bool(bool),
    /// `int` or `object` property.
    I64(i64),
    /// `float` property.
    F32(f32),
    /// `string`, `file` or `color` property.
    String(String),
}

/// Custom properties attached to a map, layer, tileset or object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(HashMap<String, PropertyValue>);

impl Properties {
    /// No properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.0.insert(name.into(), value);
    }

    /// Raw value of `name`.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }

    /// `name` if it holds a bool.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// `name` if it holds an integer.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            PropertyValue::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// `None` when the value does not fit in an `i32`.
    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get_i64(name).and_then(|v| i32::try_from(v).ok())
    }

    /// `name` if it holds a float.
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            PropertyValue::F32(v) => Some(*v),
            _ => None,
        }
    }

    /// `name` if it holds a string.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            PropertyValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are none.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name and value pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_only_match_their_type() {
        let mut p = Properties::new();
        p.insert("solid", PropertyValue::Bool(true));
        p.insert("hp", PropertyValue::I64(12));
        p.insert("name", PropertyValue::String("door".into()));

        assert_eq!(p.get_bool("solid"), Some(true));
        assert_eq!(p.get_i32("hp"), Some(12));
        assert_eq!(p.get_f32("hp"), None);
        assert_eq!(p.get_string("name"), Some("door"));
        assert_eq!(p.get_bool("missing"), None);
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn get_i32_rejects_out_of_range() {
        let mut p = Properties::new();
        p.insert("big", PropertyValue::I64(i64::from(i32::MAX) + 1));
        assert_eq!(p.get_i32("big"), None);
        assert_eq!(p.get_i64("big"), Some(i64::from(i32::MAX) + 1));
    }
}
