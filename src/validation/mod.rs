//! # Input Validation
//!
//! Two validators with deliberately different error shapes:
//!
//! - [`validate_product`] collects *every* violated constraint of a product and
//!   fails once, with the violations joined by `"; "` and no field tag.
//! - [`validate_batch_request`] fails on the first missing batch parameter, tagged
//!   with that parameter's name.
//!
//! Callers tell request-configuration errors from data errors by the presence of
//! [`ContentError::field`].

use serde_json::Value;

use crate::error::ContentError;
use crate::model::{BatchRequest, Product, ProductRecord};

/// Validated batch parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTarget {
    pub source_id: String,
    pub input_range: String,
    pub output_range: String,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// `Ok(None)` when absent, `Err(())` when present but not a non-negative number.
fn parse_price(value: Option<&Value>) -> Result<Option<f64>, ()> {
    let price = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(None),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match price {
        Some(price) if price.is_finite() && price >= 0.0 => Ok(Some(price)),
        _ => Err(()),
    }
}

/// `Ok(None)` when absent or blank, `Err(())` when present but not text.
fn parse_text(value: Option<&Value>) -> Result<Option<String>, ()> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(non_blank(Some(text))),
        Some(_) => Err(()),
    }
}

/// Checks a product record and returns its validated form.
///
/// # Errors
/// [`ContentError::Validation`] listing all of:
/// - `name` missing, blank or not text
/// - `category` missing, blank or not text
/// - `price` present and not a non-negative number (numeric text is accepted)
/// - `features`, `sku`, `audience` or `useCase` present and not text
pub fn validate_product(record: &ProductRecord) -> Result<Product, ContentError> {
    let mut violations = Vec::new();

    let mut required = |value: Option<&Value>, field: &str| match parse_text(value) {
        Ok(Some(text)) => Some(text),
        Ok(None) => {
            violations.push(format!("{field} is required"));
            None
        }
        Err(()) => {
            violations.push(format!("{field} must be text"));
            None
        }
    };
    let name = required(record.name.as_ref(), "name");
    let category = required(record.category.as_ref(), "category");

    let price = parse_price(record.price.as_ref()).unwrap_or_else(|()| {
        violations.push("price must be a non-negative number".to_string());
        None
    });

    let mut optional = |value: Option<&Value>, field: &str| {
        parse_text(value).unwrap_or_else(|()| {
            violations.push(format!("{field} must be text"));
            None
        })
    };
    let features = optional(record.features.as_ref(), "features");
    let sku = optional(record.sku.as_ref(), "sku");
    let audience = optional(record.audience.as_ref(), "audience");
    let use_case = optional(record.use_case.as_ref(), "useCase");

    match (name, category) {
        (Some(name), Some(category)) if violations.is_empty() => Ok(Product {
            sku,
            name,
            category,
            features,
            price,
            audience,
            use_case,
        }),
        _ => Err(ContentError::invalid(&violations)),
    }
}

/// Checks that every batch parameter is present and non-blank.
///
/// # Errors
/// [`ContentError::Validation`] tagged with the first missing field, checked in
/// the order `sourceId`, `inputRange`, `outputRange`.
pub fn validate_batch_request(request: &BatchRequest) -> Result<BatchTarget, ContentError> {
    let require = |value: &Option<String>, field: &str| {
        non_blank(value.as_deref()).ok_or_else(|| ContentError::missing_field(field))
    };

    Ok(BatchTarget {
        source_id: require(&request.source_id, "sourceId")?,
        input_range: require(&request.input_range, "inputRange")?,
        output_range: require(&request.output_range, "outputRange")?,
    })
}
