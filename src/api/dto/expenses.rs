/*
 * Responsibility
 * - expense request DTO + structural validation (all five fields must be non-empty)
 * - detail / list-item / collection representations with their `_links`
 * - public ids are returned already encoded (internal ids never leak)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repos::{ExpenseFields, ExpenseRow};
use crate::services::links::{Link, LinkBuilder, PageLink};
use crate::services::pagination::PageWindow;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,
}

/// Raw inbound field value. Only text and numbers can carry data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

// Shortest decimal text; integral floats print without a fraction (9.0 -> "9").
fn canonical_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Normalize one field: text is trimmed, numbers become decimal text, anything else is empty.
pub fn normalize_field(value: Option<&FieldValue>) -> String {
    match value {
        Some(FieldValue::Text(s)) => s.trim().to_string(),
        Some(FieldValue::Number(n)) => canonical_number(n),
        Some(FieldValue::Other(_)) | None => String::new(),
    }
}

/// Body of `POST /expenses` and `PUT /expenses/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseRequest {
    #[serde(default)]
    pub title: Option<FieldValue>,
    #[serde(default)]
    pub description: Option<FieldValue>,
    #[serde(default)]
    pub amount: Option<FieldValue>,
    #[serde(default)]
    pub date: Option<FieldValue>,
    #[serde(default)]
    pub category: Option<FieldValue>,
}

impl ExpenseRequest {
    pub fn validate(&self) -> Result<ExpenseFields, ValidationError> {
        let fields = ExpenseFields {
            title: normalize_field(self.title.as_ref()),
            description: normalize_field(self.description.as_ref()),
            amount: normalize_field(self.amount.as_ref()),
            date: normalize_field(self.date.as_ref()),
            category: normalize_field(self.category.as_ref()),
        };

        let all_present = [
            &fields.title,
            &fields.description,
            &fields.amount,
            &fields.date,
            &fields.category,
        ]
        .iter()
        .all(|v| !v.is_empty());

        if all_present {
            Ok(fields)
        } else {
            Err(ValidationError::MissingFields)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetailLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub collection: Link,
}

#[derive(Debug, Serialize)]
pub struct ItemLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDetail {
    pub id: String, // encoded
    pub title: String,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    pub links: DetailLinks,
}

impl ExpenseDetail {
    pub fn new(public_id: String, row: ExpenseRow, links: &LinkBuilder) -> Self {
        Self {
            links: DetailLinks {
                self_link: links.expense(&public_id),
                collection: links.collection(),
            },
            id: public_id,
            title: row.title,
            description: row.description,
            amount: row.amount,
            date: row.date,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseListItem {
    pub id: String, // encoded
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: String,
    pub date: String,
    pub category: String,
    #[serde(rename = "_links")]
    pub links: ItemLinks,
}

impl ExpenseListItem {
    pub fn new(
        public_id: String,
        row: ExpenseRow,
        links: &LinkBuilder,
        include_description: bool,
    ) -> Self {
        Self {
            links: ItemLinks {
                self_link: links.expense(&public_id),
            },
            id: public_id,
            title: row.title,
            description: include_description.then_some(row.description),
            amount: row.amount,
            date: row.date,
            category: row.category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageLinks {
    pub first: PageLink,
    pub last: PageLink,
    pub previous: Option<PageLink>,
    pub next: Option<PageLink>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationBlock {
    pub current_page: u64,
    pub current_items: u64,
    pub total_pages: u64,
    pub total_items: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(rename = "_links")]
    pub links: PageLinks,
}

impl PaginationBlock {
    pub fn new(window: &PageWindow, current_items: u64, links: &LinkBuilder) -> Self {
        let page_links = match window.limit {
            Some(limit) => PageLinks {
                first: links.page(window.first(), limit),
                last: links.page(window.last(), limit),
                previous: window.previous().map(|p| links.page(p, limit)),
                next: window.next().map(|p| links.page(p, limit)),
            },
            None => PageLinks {
                first: links.unlimited_page(),
                last: links.unlimited_page(),
                previous: None,
                next: None,
            },
        };

        Self {
            current_page: window.current_page,
            current_items,
            total_pages: window.total_pages,
            total_items: window.total_items,
            limit: window.limit,
            links: page_links,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CollectionLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub collection: Link,
}

#[derive(Debug, Serialize)]
pub struct ExpenseListResponse {
    pub items: Vec<ExpenseListItem>,
    pub pagination: PaginationBlock,
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
}

impl ExpenseListResponse {
    pub fn new(items: Vec<ExpenseListItem>, window: &PageWindow, links: &LinkBuilder) -> Self {
        let self_link = match window.limit {
            Some(limit) => Link {
                href: links.page(window.current_page, limit).href,
            },
            None => links.collection(),
        };

        Self {
            pagination: PaginationBlock::new(window, items.len() as u64, links),
            items,
            links: CollectionLinks {
                self_link,
                collection: links.collection(),
            },
        }
    }
}

/// Body of `DELETE /expenses/{id}` when the message shape is enabled.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
    #[serde(rename = "_links")]
    pub links: CollectionOnlyLinks,
}

#[derive(Debug, Serialize)]
pub struct CollectionOnlyLinks {
    pub collection: Link,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> ExpenseRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn text_is_trimmed_and_numbers_become_text() {
        let fields = request(json!({
            "title": "  Lunch ",
            "description": "Cafe",
            "amount": 9.5,
            "date": "2026-02-01",
            "category": 12
        }))
        .validate()
        .unwrap();

        assert_eq!(fields.title, "Lunch");
        assert_eq!(fields.amount, "9.5");
        assert_eq!(fields.category, "12");
    }

    #[test]
    fn integral_floats_drop_the_fraction() {
        let value: FieldValue = serde_json::from_value(json!(45.0)).unwrap();
        assert_eq!(normalize_field(Some(&value)), "45");
        let value: FieldValue = serde_json::from_value(json!(-3)).unwrap();
        assert_eq!(normalize_field(Some(&value)), "-3");
    }

    #[test]
    fn other_json_types_normalize_to_empty() {
        for other in [json!(true), json!(null), json!([1]), json!({"a": 1})] {
            let value: Option<FieldValue> = serde_json::from_value(other).unwrap();
            assert_eq!(normalize_field(value.as_ref()), "");
        }
    }

    #[test]
    fn blank_or_missing_field_fails_validation() {
        let blank = request(json!({
            "title": "Lunch",
            "description": "   ",
            "amount": "9.50",
            "date": "2026-02-01",
            "category": "Food"
        }));
        assert_eq!(blank.validate(), Err(ValidationError::MissingFields));

        let missing = request(json!({
            "title": "Lunch",
            "description": "Cafe",
            "amount": "9.50",
            "date": "2026-02-01"
        }));
        assert_eq!(missing.validate(), Err(ValidationError::MissingFields));

        let wrong_type = request(json!({
            "title": "Lunch",
            "description": "Cafe",
            "amount": false,
            "date": "2026-02-01",
            "category": "Food"
        }));
        assert_eq!(wrong_type.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn validation_error_message_is_stable() {
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "All fields are required"
        );
    }
}
