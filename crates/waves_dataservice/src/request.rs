use std::fmt;

/// Characters allowed verbatim in a path segment besides ASCII alphanumerics (RFC 3986 `pchar`).
const SEGMENT_SAFE: &str = "-._~!$&'()*+,;=:@";

/// A GET request relative to the data service root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRequest {
    path: String,
    query: Vec<(String, String)>,
}

impl DataRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn param_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Repeats `key` once per value, in iteration order.
    pub fn param_all<I>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        for value in values {
            self = self.param(key, value);
        }
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// All values sent under `key`, in order.
    pub fn query_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.query
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn relative_url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.path, query)
    }
}

impl fmt::Display for DataRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_url())
    }
}

/// Percent-encodes a path parameter. An absent value becomes an empty segment.
pub fn path_segment(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if value == "." || value == ".." {
        return value.replace('.', "%2E");
    }

    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() || SEGMENT_SAFE.contains(c) {
            encoded.push(c);
        } else {
            let mut buf = [0u8; 4];
            encoded.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_has_no_separator() {
        let request = DataRequest::get("v0/aliases/alice");
        assert_eq!(request.relative_url(), "v0/aliases/alice");
    }

    #[test]
    fn query_values_are_encoded_in_order() {
        let request = DataRequest::get("v0/pairs")
            .param("pairs", "A/B,C/D")
            .param_opt("search_by_asset", None::<String>)
            .param_all("search_by_assets", ["x y", "z"])
            .param("limit", 5);

        assert_eq!(
            request.to_string(),
            "v0/pairs?pairs=A%2FB%2CC%2FD&search_by_assets=x%20y&search_by_assets=z&limit=5"
        );
        assert_eq!(
            request.query_values("search_by_assets").collect::<Vec<_>>(),
            vec!["x y", "z"]
        );
    }

    #[test]
    fn segment_keeps_alias_characters() {
        assert_eq!(path_segment(Some("my-alias_1.@x")), "my-alias_1.@x");
        assert_eq!(path_segment(Some("a/b c")), "a%2Fb%20c");
        assert_eq!(path_segment(None), "");
    }

    #[test]
    fn dot_segments_are_escaped() {
        assert_eq!(path_segment(Some(".")), "%2E");
        assert_eq!(path_segment(Some("..")), "%2E%2E");
        assert_eq!(path_segment(Some("...")), "...");
        assert_eq!(path_segment(Some("a..b")), "a..b");
    }
}
