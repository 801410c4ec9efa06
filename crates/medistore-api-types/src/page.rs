use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pagination metadata reported by list endpoints. Every field is optional
/// because domains report different subsets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default, alias = "totalPage")]
    pub total_pages: Option<u64>,
}

impl PageMeta {
    /// Total pages as reported, or derived from `total` and `limit`.
    pub fn total_pages(&self) -> Option<u64> {
        if self.total_pages.is_some() {
            return self.total_pages;
        }
        match (self.total, self.limit) {
            (Some(total), Some(limit)) if limit > 0 => Some(total.div_ceil(limit)),
            _ => None,
        }
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a list response body.
    ///
    /// Accepted shapes: a bare array, `{data: [..], meta?}`, and the same
    /// object nested once under `data`. `pagination` is accepted as an alias
    /// for `meta`.
    pub fn from_body(body: Value) -> Result<Self, serde_json::Error> {
        match body {
            Value::Array(items) => Ok(Self {
                data: decode_items(items)?,
                meta: None,
            }),
            Value::Object(mut map) => {
                let meta = map
                    .remove("meta")
                    .or_else(|| map.remove("pagination"))
                    .filter(|meta| !meta.is_null())
                    .map(serde_json::from_value::<PageMeta>)
                    .transpose()?;
                match map.remove("data") {
                    Some(Value::Array(items)) => Ok(Self {
                        data: decode_items(items)?,
                        meta,
                    }),
                    Some(nested @ Value::Object(_)) => {
                        let mut page = Self::from_body(nested)?;
                        if page.meta.is_none() {
                            page.meta = meta;
                        }
                        Ok(page)
                    }
                    _ => Err(serde_json::Error::custom(
                        "list response carries no `data` array",
                    )),
                }
            }
            other => Err(serde_json::Error::custom(format!(
                "list response must be an array or object, got {other}"
            ))),
        }
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, serde_json::Error> {
    items.into_iter().map(serde_json::from_value).collect()
}
