//! CMS-supplied display fields.
//!
//! The content layer hands every field over as a string, either bare or
//! wrapped as `{"value": "..."}`. Parsing never fails: bad values fall back
//! to defaults.

use serde::{Deserialize, Serialize};

/// Items per page when the field is missing or unusable.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 6;

/// A single CMS text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawField", into = "RawField")]
pub struct TextField {
    pub value: String,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawField {
    Bare(String),
    Wrapped { value: String },
}

impl From<RawField> for TextField {
    fn from(raw: RawField) -> Self {
        match raw {
            RawField::Bare(value) | RawField::Wrapped { value } => TextField { value },
        }
    }
}

impl From<TextField> for RawField {
    fn from(field: TextField) -> Self {
        RawField::Wrapped { value: field.value }
    }
}

impl From<&str> for TextField {
    fn from(value: &str) -> Self {
        TextField {
            value: value.to_string(),
        }
    }
}

/// Fields the catalog component reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_filters: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_ratings: Option<TextField>,
}

/// Parsed, typed catalog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSettings {
    pub heading: String,
    pub description: String,
    pub items_per_page: usize,
    pub show_filters: bool,
    pub show_ratings: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self::from_fields(&CatalogFields::default())
    }
}

impl CatalogSettings {
    pub fn from_fields(fields: &CatalogFields) -> Self {
        let text = |f: &Option<TextField>| f.as_ref().map(|f| f.value.clone()).unwrap_or_default();
        Self {
            heading: text(&fields.heading),
            description: text(&fields.description),
            items_per_page: parse_items_per_page(value(&fields.items_per_page)),
            show_filters: parse_flag(value(&fields.show_filters)),
            show_ratings: parse_flag(value(&fields.show_ratings)),
        }
    }
}

fn value(field: &Option<TextField>) -> Option<&str> {
    field.as_ref().map(|f| f.value.as_str())
}

/// Leading decimal digits of the value; anything else (or zero) yields
/// [`DEFAULT_ITEMS_PER_PAGE`].
pub fn parse_items_per_page(value: Option<&str>) -> usize {
    let Some(value) = value else {
        return DEFAULT_ITEMS_PER_PAGE;
    };
    let digits: String = value
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    match digits.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => DEFAULT_ITEMS_PER_PAGE,
    }
}

/// On unless the value is `"false"` in any case.
pub fn parse_flag(value: Option<&str>) -> bool {
    value.map_or(true, |v| !v.eq_ignore_ascii_case("false"))
}
