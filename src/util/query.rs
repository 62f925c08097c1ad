use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Query string parameters, looked up leniently.
///
/// Browsers and older clients are not consistent about `q` vs `Q`, so a
/// lookup for a lowercase key also tries the capitalized form.
#[derive(Debug, Default)]
pub struct QueryParams {
    map: HashMap<String, String>,
}

impl<'de> Deserialize<'de> for QueryParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = HashMap::<String, String>::deserialize(deserializer)?;
        Ok(QueryParams { map })
    }
}

impl QueryParams {
    /// The value as sent. Blank values count as absent but are not trimmed
    /// otherwise.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = self.map.get(key).or_else(|| {
            let mut chars = key.chars();
            let first = chars.next().filter(char::is_ascii_lowercase)?;
            let capitalized = format!("{}{}", first.to_ascii_uppercase(), chars.as_str());
            self.map.get(&capitalized)
        })?;

        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// A count parameter. Negative counts clamp to zero; absent or
    /// unparseable values yield `None`.
    pub fn get_count(&self, key: &str) -> Option<usize> {
        let n = self.get(key)?.trim().parse::<i64>().ok()?;
        Some(usize::try_from(n).unwrap_or(0))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QueryParams {
            map: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
