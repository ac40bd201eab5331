//! application/x-www-form-urlencoded bodies
//!
//! The ordered `key=value&...` list that form bodies are made of. Escaping
//! goes through `url::form_urlencoded`, the same codec the transport uses.

use std::fmt;
use url::form_urlencoded;

/// Ordered query / form-body parameters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse query string (without leading ?)
    pub fn parse(s: &str) -> Self {
        let params = form_urlencoded::parse(s.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { params }
    }

    /// Get first value for key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append a value
    pub fn append(&mut self, key: &str, value: &str) {
        self.params.push((key.to_string(), value.to_string()));
    }

    /// Iterate over entries
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Display for Query {
    /// Serialize to query string (without leading ?)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        f.write_str(&encoded)
    }
}

/// Decode one `key=value` fragment
///
/// `None` unless the decoded text splits into exactly two parts around
/// `=`, so an escaped `%3D` counts as a separator too.
pub fn decode_pair(fragment: &str) -> Option<(String, String)> {
    if !fragment.contains('=') {
        return None;
    }
    let (key, value) = form_urlencoded::parse(fragment.as_bytes()).next()?;
    if key.contains('=') || value.contains('=') {
        return None;
    }
    Some((key.into_owned(), value.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plus_and_escapes() {
        let q = Query::parse("a+b%20c=b%5B0%5D%5Bx%5D");
        assert_eq!(q.get("a b c"), Some("b[0][x]"));
    }

    #[test]
    fn test_parse_utf8() {
        let q = Query::parse("k=%E4%BD%A0%E5%A5%BD");
        assert_eq!(q.get("k"), Some("你好"));
    }

    #[test]
    fn test_malformed_escapes_kept() {
        let q = Query::parse("a=100%&b=%zz");
        assert_eq!(q.get("a"), Some("100%"));
        assert_eq!(q.get("b"), Some("%zz"));
    }

    #[test]
    fn test_encode() {
        let mut q = Query::new();
        q.append("a b&c", "d=e");
        assert_eq!(q.to_string(), "a+b%26c=d%3De");
    }

    #[test]
    fn test_decode_pair() {
        assert_eq!(
            decode_pair("na+me=Ada%21"),
            Some(("na me".to_string(), "Ada!".to_string()))
        );
        assert_eq!(decode_pair("k="), Some(("k".to_string(), String::new())));
        assert_eq!(decode_pair("novalue"), None);
        assert_eq!(decode_pair("a=b=c"), None);
        assert_eq!(decode_pair("a=x%3Dy"), None);
        assert_eq!(decode_pair("a%3Db=1"), None);
    }

    #[test]
    fn test_query_roundtrip() {
        let mut q = Query::new();
        q.append("name", "Jane Doe");
        q.append("tags[0][x]", "a&b");

        let encoded = q.to_string();
        assert_eq!(encoded, "name=Jane+Doe&tags%5B0%5D%5Bx%5D=a%26b");

        let parsed = Query::parse(&encoded);
        assert_eq!(parsed.get("name"), Some("Jane Doe"));
        assert_eq!(parsed.get("tags[0][x]"), Some("a&b"));
        assert_eq!(parsed.len(), 2);
    }
}
