use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Product metadata as supplied by a caller or a spreadsheet row.
///
/// # Validation
/// A `ProductRecord` is unchecked input. It becomes a [`Product`] only after
/// [`validate_product`](crate::validation::validate_product) accepts it, and only
/// a [`Product`] can be turned into prompts.
///
/// Every field is kept as a raw JSON value, so type mismatches (a numeric name, a
/// list of features) are reported by the validator together with every other
/// violation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub sku: Option<Value>,
    pub name: Option<Value>,
    pub category: Option<Value>,
    pub features: Option<Value>,
    pub price: Option<Value>,
    pub audience: Option<Value>,
    pub use_case: Option<Value>,
}

impl ProductRecord {
    /// Creates a record with the two required fields set.
    ///
    /// # Arguments
    /// * `name` - Product name
    /// * `category` - Product category
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            category: Some(Value::String(category.into())),
            ..Self::default()
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(Value::String(sku.into()));
        self
    }

    pub fn with_features(mut self, features: impl Into<String>) -> Self {
        self.features = Some(Value::String(features.into()));
        self
    }

    /// Sets the price. Non-finite values are kept as text so validation rejects them.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(
            serde_json::Number::from_f64(price)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(price.to_string())),
        );
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(Value::String(audience.into()));
        self
    }

    pub fn with_use_case(mut self, use_case: impl Into<String>) -> Self {
        self.use_case = Some(Value::String(use_case.into()));
        self
    }

    /// Maps a spreadsheet row onto a record by fixed column position:
    /// `[sku, name, category, features, price, audience, useCase]`.
    ///
    /// Missing trailing columns and blank cells become `None`. Cell text is kept
    /// verbatim (no numeric parsing) so the validator sees exactly what the
    /// sheet contained.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |index: usize| -> Option<Value> {
            row.get(index)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(|value| Value::String(value.to_string()))
        };

        Self {
            sku: cell(0),
            name: cell(1),
            category: cell(2),
            features: cell(3),
            price: cell(4),
            audience: cell(5),
            use_case: cell(6),
        }
    }

    /// Best-effort display name, used for reporting rows that failed validation.
    pub fn display_name(&self) -> String {
        text_of(self.name.as_ref()).unwrap_or("Unknown").to_string()
    }

    /// The SKU, when it is non-blank text.
    pub fn display_sku(&self) -> Option<String> {
        text_of(self.sku.as_ref()).map(str::to_string)
    }
}

fn text_of(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// A product that passed validation. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub sku: Option<String>,
    pub name: String,
    pub category: String,
    pub features: Option<String>,
    pub price: Option<f64>,
    pub audience: Option<String>,
    pub use_case: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_from_row_maps_columns_by_position() {
        let record = ProductRecord::from_row(&row(&[
            "SKU-1",
            "Trail Bottle",
            "Outdoors",
            "BPA free, 1L",
            "19.99",
            "Hikers",
            "Day hikes",
        ]));

        assert_eq!(record.display_sku().as_deref(), Some("SKU-1"));
        assert_eq!(record.display_name(), "Trail Bottle");
        assert_eq!(record.category, Some(Value::String("Outdoors".into())));
        assert_eq!(record.features, Some(Value::String("BPA free, 1L".into())));
        assert_eq!(record.price, Some(Value::String("19.99".into())));
        assert_eq!(record.audience, Some(Value::String("Hikers".into())));
        assert_eq!(record.use_case, Some(Value::String("Day hikes".into())));
    }

    #[test]
    fn test_from_row_defaults_missing_trailing_columns() {
        let record = ProductRecord::from_row(&row(&["", "Lamp", "Home"]));

        assert_eq!(record.sku, None);
        assert_eq!(record.display_name(), "Lamp");
        assert_eq!(record.features, None);
        assert_eq!(record.price, None);
        assert_eq!(record.use_case, None);
    }

    #[test]
    fn test_deserializes_camel_case_payload() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"name": "Desk", "category": "Office", "price": 120, "useCase": "Remote work"}"#,
        )
        .unwrap();

        assert_eq!(record.display_name(), "Desk");
        assert_eq!(record.use_case, Some(Value::String("Remote work".into())));
        assert!(record.price.as_ref().is_some_and(Value::is_number));
    }

    #[test]
    fn test_display_name_falls_back_for_blank_names() {
        assert_eq!(ProductRecord::default().display_name(), "Unknown");
        assert_eq!(ProductRecord::new("  ", "x").display_name(), "Unknown");
        assert_eq!(ProductRecord::new("Mug", "Kitchen").display_name(), "Mug");
    }

    #[test]
    fn test_wrong_typed_fields_still_deserialize() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"name": 42, "category": "", "sku": ["x"]}"#).unwrap();

        assert_eq!(record.name, Some(serde_json::json!(42)));
        assert_eq!(record.display_name(), "Unknown");
        assert_eq!(record.display_sku(), None);
    }

    #[test]
    fn test_non_finite_price_is_not_dropped() {
        let record = ProductRecord::new("Lamp", "Home").with_price(f64::NAN);
        assert_eq!(record.price, Some(Value::String("NaN".into())));

        let record = ProductRecord::new("Lamp", "Home").with_price(f64::INFINITY);
        assert_eq!(record.price, Some(Value::String("inf".into())));
    }
}
