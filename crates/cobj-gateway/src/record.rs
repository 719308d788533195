//! Custom object record shapes exchanged with the CRM API.
//!
//! The CRM owns identity and storage; these types only describe what goes
//! over the wire. Reads tolerate any property being absent, writes forward
//! exactly the fields the caller supplied.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Properties requested on every list call, in request order.
pub const RECORD_PROPERTIES: [&str; 3] = ["name", "publisher", "price"];

/// A property value as the CRM returns it: usually text, sometimes a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => f.write_str(s),
            PropertyValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

/// Properties of a stored record.
///
/// Anything the CRM sends beyond the three named attributes (for example
/// `hs_object_id`) lands in `other` and is passed along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PropertyValue>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// A record as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub properties: RecordProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Body of `GET /crm/v3/objects/{type}`. Paging is not followed.
#[derive(Debug, Deserialize)]
pub struct RecordPage {
    pub results: Vec<Record>,
}

/// The three user-supplied fields of a new record.
///
/// Filled from the `POST /update-cobj` body and sent as the `properties`
/// object of the create call. Nothing is validated: a field that was not
/// submitted stays `None` and is left out of the payload, an empty one is
/// sent as `""`. `price` keeps whatever JSON type it arrived with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PropertyValue>,
}

impl RecordFields {
    pub fn new(
        name: impl Into<String>,
        publisher: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            publisher: Some(publisher.into()),
            price: Some(PropertyValue::Text(price.into())),
        }
    }
}

/// Collect urlencoded key/value pairs. Unknown keys are ignored and the first
/// occurrence of a repeated key wins.
impl FromIterator<(String, String)> for RecordFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut fields = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" if fields.name.is_none() => fields.name = Some(value),
                "publisher" if fields.publisher.is_none() => fields.publisher = Some(value),
                "price" if fields.price.is_none() => fields.price = Some(value.into()),
                _ => {}
            }
        }
        fields
    }
}

/// Body of `POST /crm/v3/objects/{type}`.
#[derive(Debug, Serialize)]
pub struct CreateRecordRequest<'a> {
    pub properties: &'a RecordFields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_payload_wraps_fields_in_properties() {
        let fields = RecordFields::new("Dune", "Ace Books", "9.99");
        let body = serde_json::to_string(&CreateRecordRequest {
            properties: &fields,
        })
        .unwrap();
        assert_eq!(
            body,
            r#"{"properties":{"name":"Dune","publisher":"Ace Books","price":"9.99"}}"#
        );
    }

    #[test]
    fn unsubmitted_fields_are_omitted_and_empty_ones_kept() {
        let fields = RecordFields {
            name: Some(String::new()),
            publisher: None,
            price: Some("abc".into()),
        };
        let body = serde_json::to_value(CreateRecordRequest {
            properties: &fields,
        })
        .unwrap();
        assert_eq!(body, json!({ "properties": { "name": "", "price": "abc" } }));
    }

    #[test]
    fn numeric_price_is_sent_as_a_number() {
        let fields: RecordFields = serde_json::from_value(json!({
            "name": "Dune",
            "price": 9.99
        }))
        .unwrap();
        let body = serde_json::to_value(CreateRecordRequest {
            properties: &fields,
        })
        .unwrap();
        assert_eq!(body, json!({ "properties": { "name": "Dune", "price": 9.99 } }));
    }

    #[test]
    fn pairs_keep_first_value_and_ignore_unknown_keys() {
        let fields: RecordFields = [
            ("name", "Dune"),
            ("name", "Dune Messiah"),
            ("isbn", "0441172717"),
            ("price", ""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert_eq!(
            fields,
            RecordFields {
                name: Some("Dune".into()),
                publisher: None,
                price: Some("".into()),
            }
        );
    }

    #[test]
    fn sparse_records_deserialize() {
        let page: RecordPage = serde_json::from_value(json!({
            "results": [
                { "id": "1", "properties": { "name": "Dune" } },
                { "id": "2" },
                { "id": "3", "properties": { "price": 12.5, "publisher": null } }
            ],
            "paging": { "next": { "after": "3" } }
        }))
        .unwrap();

        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[0].properties.name.as_deref(), Some("Dune"));
        assert_eq!(page.results[0].properties.price, None);
        assert_eq!(page.results[1].properties, RecordProperties::default());
        assert_eq!(page.results[2].properties.publisher, None);
        assert_eq!(
            page.results[2].properties.price.as_ref().map(ToString::to_string),
            Some("12.5".to_string())
        );
    }

    #[test]
    fn unrequested_properties_survive_reserialization() {
        let raw = json!({
            "id": "101",
            "properties": {
                "name": "Neuromancer",
                "publisher": "Ace Books",
                "price": "7.99",
                "hs_object_id": "101",
                "hs_createdate": "2024-01-02T03:04:05Z"
            },
            "createdAt": "2024-01-02T03:04:05Z",
            "updatedAt": "2024-01-02T03:04:05Z",
            "archived": false
        });
        let record: Record = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.properties.other.len(), 2);
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn page_without_results_is_rejected() {
        assert!(serde_json::from_value::<RecordPage>(json!({ "status": "error" })).is_err());
    }
}
