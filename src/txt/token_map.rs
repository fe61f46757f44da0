/// The fields of a single TXT record in the order they first appeared. The leading record type
/// tag is stored under the reserved `type` key, so a later `type=...` pair replaces it like any
/// other repeated key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    fields: Vec<(String, String)>,
}

const TYPE_KEY: &str = "type";

impl TokenMap {
    /// The value of the `type` key: the first token of the record unless the body overrides it.
    #[must_use]
    pub fn record_type(&self) -> &str {
        self.get(TYPE_KEY).unwrap_or_default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The value of the first of `keys` present in the map.
    #[must_use]
    pub fn get_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // A repeated key keeps its original position and takes the latest value.
    fn with_field(mut self, key: &str, value: &str) -> Self {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((key.to_string(), value.to_string())),
        }
        self
    }
}

/// Split a normalized record into a [`TokenMap`].
///
/// Tokens are separated by single spaces. The first token is stored under the `type` key. Each
/// token after it is split on its first
/// `=` only, so `net=ethereum=classic` has the value `ethereum=classic`. Keys and values are
/// trimmed, and one trailing `;` is dropped from values. A token without `=` maps to an empty
/// value. Empty tokens left by repeated spaces are skipped.
#[must_use]
pub fn tokenize(record: &str) -> TokenMap {
    tracing::trace!("parsing record: {record}");
    let mut tokens = record.trim().split(' ');
    let record_type = tokens.next().unwrap_or_default();
    tokens
        .filter(|token| !token.is_empty())
        .fold(
            TokenMap::default().with_field(TYPE_KEY, record_type),
            |map, token| {
                let (key, value) = token.split_once('=').unwrap_or((token, ""));
                map.with_field(key.trim(), trim_value(value))
            },
        )
}

fn trim_value(value: &str) -> &str {
    let value = value.trim();
    value.strip_suffix(';').map_or(value, str::trim)
}
