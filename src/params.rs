//! Ordered request parameters.
//!
//! [`VkParameters`] keeps insertion order because the query string is
//! compared byte-for-byte in request signatures and tests. Values are
//! normalized to strings on insertion through [`ParamValue`]; a value that
//! normalizes to nothing (`None`, `""`, empty list, empty flag set) is not
//! inserted at all.

use url::form_urlencoded;

use crate::errors::VkError;

/// Conversion of a single parameter value to its wire form.
///
/// Returning `None` means "omit this key".
pub trait ParamValue {
    fn to_param(&self) -> Option<String>;
}

impl ParamValue for str {
    fn to_param(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl ParamValue for String {
    fn to_param(&self) -> Option<String> {
        self.as_str().to_param()
    }
}

impl ParamValue for bool {
    fn to_param(&self) -> Option<String> {
        Some(if *self { "1" } else { "0" }.to_string())
    }
}

macro_rules! impl_param_value_for_int {
    ($($t:ty),+) => {
        $(
            impl ParamValue for $t {
                fn to_param(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )+
    };
}

impl_param_value_for_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl<T: ParamValue> ParamValue for Option<T> {
    fn to_param(&self) -> Option<String> {
        self.as_ref().and_then(ParamValue::to_param)
    }
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param(&self) -> Option<String> {
        (**self).to_param()
    }
}

/// Sequences are comma-joined in iteration order; empty elements are skipped.
impl<T: ParamValue> ParamValue for [T] {
    fn to_param(&self) -> Option<String> {
        let parts: Vec<String> = self.iter().filter_map(ParamValue::to_param).collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(","))
        }
    }
}

impl<T: ParamValue> ParamValue for Vec<T> {
    fn to_param(&self) -> Option<String> {
        self.as_slice().to_param()
    }
}

/// A parameter object whose fields are merged into an outer bag.
pub trait IntoParameters {
    fn to_parameters(&self) -> VkParameters;
}

/// Ordered key → value mapping for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VkParameters {
    entries: Vec<(String, String)>,
}

impl VkParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to the normalized `value`.
    ///
    /// An empty value is a no-op. Setting an existing key replaces its value
    /// in place, so the key keeps its original position.
    pub fn add<V: ParamValue + ?Sized>(&mut self, key: &str, value: &V) -> &mut Self {
        if let Some(value) = value.to_param() {
            self.insert_raw(key, value);
        }
        self
    }

    /// Builder form of [`add`](Self::add).
    pub fn with<V: ParamValue>(mut self, key: &str, value: V) -> Self {
        self.add(key, &value);
        self
    }

    /// Merge a parameter object at the current position.
    pub fn merge<P: IntoParameters + ?Sized>(&mut self, nested: &P) -> &mut Self {
        for (key, value) in nested.to_parameters().entries {
            self.insert_raw(&key, value);
        }
        self
    }

    /// Builder form of [`merge`](Self::merge).
    pub fn with_params<P: IntoParameters>(mut self, nested: &P) -> Self {
        self.merge(nested);
        self
    }

    fn insert_raw(&mut self, key: &str, value: String) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Form-encoded query string in insertion order.
    ///
    /// Commas stay raw so joined lists and flag sets read `a,b,c` on the wire.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// `application/x-www-form-urlencoded` with `,` left unescaped. A literal `%`
/// encodes as `%25`, so every `%2C` in the output came from a comma.
fn encode_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace("%2C", ",")
}

/// Fail with a precondition error when a required string argument is empty.
pub(crate) fn require_non_empty(name: &str, value: &str) -> Result<(), VkError> {
    if value.is_empty() {
        return Err(VkError::Precondition(format!("`{name}` must not be empty")));
    }
    Ok(())
}

impl IntoParameters for VkParameters {
    fn to_parameters(&self) -> VkParameters {
        self.clone()
    }
}

impl<'a> IntoIterator for &'a VkParameters {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
