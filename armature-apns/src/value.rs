//! Payload value types.

use indexmap::IndexMap;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use tracing::trace;

use crate::order::{self, KeyOrder, INITIAL_BUCKETS};

/// A JSON value inside a notification payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PayloadValue {
    /// JSON `null`.
    #[default]
    Null,
    /// JSON boolean.
    Bool(bool),
    /// Integral number.
    Integer(i64),
    /// Unsigned integral number above `i64::MAX`.
    UInteger(u64),
    /// Floating point number. Non-finite values are written as `null`.
    Real(f64),
    /// String.
    Text(String),
    /// Array.
    Array(Vec<PayloadValue>),
    /// Nested object.
    Object(PayloadMap),
}

impl PayloadValue {
    /// Check if this is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the string, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the unsigned integer, if this is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(n) => u64::try_from(*n).ok(),
            Self::UInteger(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the number, if this is a real.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the nested object, if this is one.
    pub fn as_object(&self) -> Option<&PayloadMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PayloadValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for PayloadValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for PayloadValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInteger(value), Self::Integer)
    }
}

impl From<f32> for PayloadValue {
    fn from(value: f32) -> Self {
        Self::Real(f64::from(value))
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<PayloadValue>> From<Vec<T>> for PayloadValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PayloadValue>> From<Option<T>> for PayloadValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<PayloadMap> for PayloadValue {
    fn from(map: PayloadMap) -> Self {
        Self::Object(map)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for PayloadValue {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::Object(map.into())
    }
}

impl From<serde_json::Value> for PayloadValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInteger(u)
                } else {
                    Self::Real(n.as_f64().unwrap_or_default())
                }
            }
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => Self::Object(map.into()),
        }
    }
}

/// An ordered JSON object inside a notification payload.
///
/// Entries keep their insertion order; overwriting a key keeps its slot and
/// removing a key forgets it. The map also tracks how large the legacy hash
/// table holding the same entries would have grown, which decides the
/// [`KeyOrder::Legacy`] serialization order.
#[derive(Debug, Clone)]
pub struct PayloadMap {
    entries: IndexMap<String, PayloadValue>,
    buckets: usize,
}

impl PayloadMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            buckets: INITIAL_BUCKETS,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.get(key)
    }

    /// Get a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut PayloadValue> {
        self.entries.get_mut(key)
    }

    /// Insert or overwrite `key`, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PayloadValue>,
    ) -> Option<PayloadValue> {
        let key = key.into();
        let value = value.into();

        if let Some(slot) = self.entries.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }

        self.buckets = order::grown_buckets(
            self.buckets,
            &key,
            self.entries.keys().map(String::as_str),
            self.entries.len() + 1,
        );
        self.entries.insert(key, value);
        None
    }

    /// Remove `key`, returning its value. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<PayloadValue> {
        self.entries.shift_remove(key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate entries in the order they are serialized under `order`.
    pub fn iter_ordered(&self, order: KeyOrder) -> impl Iterator<Item = (&str, &PayloadValue)> {
        order::ordered_positions(self.keys(), self.buckets, order)
            .into_iter()
            .filter_map(move |pos| self.entries.get_index(pos))
            .map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for PayloadMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PayloadMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K, V> FromIterator<(K, V)> for PayloadMap
where
    K: Into<String>,
    V: Into<PayloadValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for PayloadMap {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}

impl Serialize for PayloadValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ValueView::new(self, KeyOrder::Insertion).serialize(serializer)
    }
}

impl Serialize for PayloadMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MapView::new(self, KeyOrder::Insertion).serialize(serializer)
    }
}

/// Serializes a value with a chosen key order.
pub(crate) struct ValueView<'a> {
    value: &'a PayloadValue,
    order: KeyOrder,
}

impl<'a> ValueView<'a> {
    pub(crate) fn new(value: &'a PayloadValue, order: KeyOrder) -> Self {
        Self { value, order }
    }
}

impl Serialize for ValueView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            PayloadValue::Null => serializer.serialize_unit(),
            PayloadValue::Bool(b) => serializer.serialize_bool(*b),
            PayloadValue::Integer(n) => serializer.serialize_i64(*n),
            PayloadValue::UInteger(n) => serializer.serialize_u64(*n),
            PayloadValue::Real(n) if !n.is_finite() => {
                trace!(value = %n, "Writing non-finite number as null");
                serializer.serialize_unit()
            }
            PayloadValue::Real(n) => match self.order {
                KeyOrder::Legacy => match legacy_real(*n) {
                    Some(text) => RawValue::from_string(text)
                        .map_err(S::Error::custom)?
                        .serialize(serializer),
                    None => serializer.serialize_f64(*n),
                },
                KeyOrder::Insertion => serializer.serialize_f64(*n),
            },
            PayloadValue::Text(s) => serializer.serialize_str(s),
            PayloadValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&ValueView::new(item, self.order))?;
                }
                seq.end()
            }
            PayloadValue::Object(map) => MapView::new(map, self.order).serialize(serializer),
        }
    }
}

/// Scientific notation for reals the legacy clients wrote in exponent form.
///
/// Finite non-zero values with a magnitude outside `[1e-3, 1e7)` are written
/// as `<mantissa>E<exponent>` with at least one fractional digit (`1.0E-4`,
/// `1.5E20`). Everything else is left to the default formatting, which
/// already agrees with the legacy output.
fn legacy_real(n: f64) -> Option<String> {
    if !n.is_finite() || n == 0.0 || (1e-3..1e7).contains(&n.abs()) {
        return None;
    }

    let formatted = format!("{:e}", n);
    let (mantissa, exponent) = formatted.split_once('e')?;
    if mantissa.contains('.') {
        Some(format!("{}E{}", mantissa, exponent))
    } else {
        Some(format!("{}.0E{}", mantissa, exponent))
    }
}

/// Serializes a map with a chosen key order.
///
/// A spliced entry replaces whatever the map stores under its key with
/// another view, which is how the builder nests its trees without copying
/// them.
pub(crate) struct MapView<'a> {
    map: &'a PayloadMap,
    order: KeyOrder,
    splice: Option<(&'a str, Box<MapView<'a>>)>,
}

impl<'a> MapView<'a> {
    pub(crate) fn new(map: &'a PayloadMap, order: KeyOrder) -> Self {
        Self {
            map,
            order,
            splice: None,
        }
    }

    pub(crate) fn splice(mut self, key: &'a str, nested: MapView<'a>) -> Self {
        self.splice = Some((key, Box::new(nested)));
        self
    }
}

impl Serialize for MapView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.map.len()))?;
        for (key, value) in self.map.iter_ordered(self.order) {
            match &self.splice {
                Some((spliced, nested)) if *spliced == key => {
                    map.serialize_entry(key, nested.as_ref())?
                }
                _ => map.serialize_entry(key, &ValueView::new(value, self.order))?,
            }
        }
        map.end()
    }
}
