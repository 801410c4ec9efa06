use serde::{Deserialize, Serialize};
use serde_json::Value;

const VALUE_FIELDS: [&str; 3] = ["value", "id", "_id"];
const LABEL_FIELDS: [&str; 3] = ["label", "name", "title"];

/// A `{value, label}` pair for category dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
}

impl CategoryOption {
    /// Shape one raw dropdown entry.
    ///
    /// The value is the first non-empty of `value`, `id`, `_id`; the label is
    /// the first non-empty of `label`, `name`, `title`, falling back to the
    /// value. Strings and numbers are accepted. Entries without a usable value
    /// yield `None`.
    pub fn from_raw(raw: &Value) -> Option<Self> {
        let value = first_text(raw, &VALUE_FIELDS)?;
        let label = first_text(raw, &LABEL_FIELDS).unwrap_or_else(|| value.clone());
        Some(Self { value, label })
    }

    /// Shape a dropdown list, dropping entries without a usable value.
    pub fn from_list(raw: &[Value]) -> Vec<Self> {
        raw.iter().filter_map(Self::from_raw).collect()
    }
}

fn first_text(raw: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match raw.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn value_field_wins_over_id() {
        let option = CategoryOption::from_raw(&json!({"value": "v", "id": "i", "name": "Pain"}))
            .expect("option");
        assert_eq!(option.value, "v");
        assert_eq!(option.label, "Pain");
    }

    #[test]
    fn falls_back_to_id_and_underscore_id() {
        let by_id = CategoryOption::from_raw(&json!({"id": 7, "label": "Vitamins"})).expect("id");
        assert_eq!(by_id.value, "7");

        let by_mongo = CategoryOption::from_raw(&json!({"_id": "abc", "title": "Skin"}))
            .expect("_id");
        assert_eq!(by_mongo.value, "abc");
        assert_eq!(by_mongo.label, "Skin");
    }

    #[test]
    fn empty_value_is_skipped_and_label_defaults_to_value() {
        let option = CategoryOption::from_raw(&json!({"value": "", "id": "c9"})).expect("option");
        assert_eq!(option.value, "c9");
        assert_eq!(option.label, "c9");
    }

    #[test]
    fn entries_without_value_are_dropped() {
        let options = CategoryOption::from_list(&[
            json!({"name": "orphan"}),
            json!({"id": "c1", "name": "Cold & Flu"}),
            json!(null),
        ]);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label, "Cold & Flu");
    }
}
