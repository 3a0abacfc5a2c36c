//! Envelopes shared by every data service response.
//!
//! Entities arrive as `{"__type": "<kind>", "data": ...}` and collections as
//! `{"__type": "list", "data": [...]}` with optional paging fields.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Typed<T> {
    #[serde(rename = "__type", default)]
    pub kind: String,
    pub data: T,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ListResponse<T> {
    #[serde(rename = "__type", default = "list_kind")]
    pub kind: String,
    #[serde(rename = "lastCursor", default, skip_serializing_if = "Option::is_none")]
    pub last_cursor: Option<String>,
    #[serde(rename = "isLastPage", default, skip_serializing_if = "Option::is_none")]
    pub is_last_page: Option<bool>,
    pub data: Vec<T>,
}

fn list_kind() -> String {
    "list".to_string()
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            kind: list_kind(),
            last_cursor: None,
            is_last_page: None,
            data: Vec::new(),
        }
    }
}

impl<T> ListResponse<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a ListResponse<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> IntoIterator for ListResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// Integer amounts sent either as a JSON number or as a decimal string. Keeps
/// the exact value beyond `f64` precision; fractional numbers are rejected.
pub(crate) fn opt_amount<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(i64),
        Text(String),
    }

    match Option::<Amount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Amount::Number(value)) => Ok(Some(value)),
        Some(Amount::Text(text)) => text.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_without_paging_fields() {
        let list: ListResponse<Typed<u32>> = serde_json::from_str(
            r#"{"__type":"list","data":[{"__type":"number","data":1},{"__type":"number","data":2}]}"#,
        )
        .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.last_cursor, None);
        assert_eq!(list.iter().map(|t| t.data).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn list_requires_data() {
        let result = serde_json::from_str::<ListResponse<Typed<u32>>>(r#"{"__type":"list"}"#);
        assert!(result.is_err());
    }
}
