use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned product identifier.
///
/// Kept as text: the list endpoint returns it as a JSON number, while update
/// payloads carry it back as a string read from the rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        text_or_number(deserializer).map(ProductId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub category_id: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub price: String,
}

impl Product {
    /// A product that has not been created yet; the service assigns the id.
    pub fn draft(
        name: impl Into<String>,
        category_id: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            product_id: None,
            name: name.into(),
            category_id: category_id.into(),
            price: price.into(),
        }
    }

    pub fn with_id(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn id(&self) -> Option<&ProductId> {
        self.product_id.as_ref()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

/// Accepts a JSON string, number, bool or null and keeps it as text.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        Some(TextOrNumber::Text(text)) => text,
        Some(TextOrNumber::Number(number)) => number.to_string(),
        Some(TextOrNumber::Bool(flag)) => flag.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numeric_id_and_price_as_text() {
        let product: Product = serde_json::from_str(
            r#"{"productId":1,"name":"Pen","categoryId":7,"price":1.5}"#,
        )
        .expect("decode");

        assert_eq!(product.product_id, Some(ProductId::new("1")));
        assert_eq!(product.category_id, "7");
        assert_eq!(product.price, "1.5");
    }

    #[test]
    fn keeps_string_price_verbatim() {
        let product: Product = serde_json::from_str(
            r#"{"productId":"1","name":"Pen","categoryId":"A","price":"1.50"}"#,
        )
        .expect("decode");

        assert_eq!(product.price, "1.50");
        assert_eq!(product.id().map(ProductId::as_str), Some("1"));
    }

    #[test]
    fn draft_serializes_without_product_id() {
        let body = serde_json::to_value(Product::draft("Book", "B", "9.99")).expect("encode");

        assert_eq!(
            body,
            serde_json::json!({"name": "Book", "categoryId": "B", "price": "9.99"})
        );
    }

    #[test]
    fn update_payload_carries_id_as_text() {
        let body = serde_json::to_value(
            Product::draft("Pen", "A", "not-a-number").with_id(ProductId::new("12")),
        )
        .expect("encode");

        assert_eq!(body["productId"], serde_json::json!("12"));
        assert_eq!(body["price"], serde_json::json!("not-a-number"));
    }

    #[test]
    fn null_or_missing_fields_decode_as_empty_text() {
        let product: Product =
            serde_json::from_str(r#"{"productId":null,"name":null,"price":"2"}"#).expect("decode");

        assert_eq!(product.product_id, None);
        assert_eq!(product.name, "");
        assert_eq!(product.category_id, "");
    }
}
