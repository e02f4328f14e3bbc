//! Request forms for the products API and their validated payloads.
//!
//! Conversion into a payload mirrors the upstream schema validation: every
//! failing field is collected (not just the first) and reported with a
//! human-readable message.

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::{Deserialize, Serialize};

use crate::domain::product::{NewProduct, ProductUpdate};
use crate::domain::types::{
    ImageRef, Price, ProductId, ProductName, Quantity, TypeConstraintError,
};

/// One failing field of a validated request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Multipart body shared by the create and update endpoints. Presence
/// requirements differ per operation, so everything is optional here.
/// Repeated parts are rejected: at most one file per request.
#[derive(Debug, MultipartForm)]
#[multipart(duplicate_field = "deny")]
pub struct ProductForm {
    pub name: Option<Text<String>>,
    pub quantity: Option<Text<String>>,
    pub price: Option<Text<String>>,
    // The 5MB contract is enforced by the image pipeline so that oversized
    // uploads get the documented JSON error rather than a truncated stream.
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

/// Strict payload: all fields required (create).
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductPayload {
    pub name: ProductName,
    pub quantity: Quantity,
    pub price: Price,
}

impl CreateProductPayload {
    pub fn into_new_product(self, image: Option<ImageRef>) -> NewProduct {
        NewProduct::new(self.name, self.quantity, self.price, image)
    }
}

impl TryFrom<&ProductForm> for CreateProductPayload {
    type Error = Vec<FieldError>;

    fn try_from(form: &ProductForm) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let name = match &form.name {
            Some(name) => collect(validate_name(name, true), &mut errors),
            None => {
                errors.push(FieldError::new("name", "Product name is required"));
                None
            }
        };
        let quantity = match &form.quantity {
            Some(quantity) => collect(validate_quantity(quantity), &mut errors),
            None => {
                errors.push(FieldError::new("quantity", "Quantity is required"));
                None
            }
        };
        let price = match &form.price {
            Some(price) => collect(validate_price(price), &mut errors),
            None => {
                errors.push(FieldError::new("price", "Price is required"));
                None
            }
        };

        match (name, quantity, price) {
            (Some(name), Some(quantity), Some(price)) if errors.is_empty() => Ok(Self {
                name,
                quantity,
                price,
            }),
            _ => Err(errors),
        }
    }
}

/// Partial payload: all fields optional (update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProductPayload {
    pub name: Option<ProductName>,
    pub quantity: Option<Quantity>,
    pub price: Option<Price>,
}

impl UpdateProductPayload {
    pub fn into_product_update(self, image: Option<ImageRef>) -> ProductUpdate {
        ProductUpdate {
            name: self.name,
            quantity: self.quantity,
            price: self.price,
            image,
        }
    }
}

impl TryFrom<&ProductForm> for UpdateProductPayload {
    type Error = Vec<FieldError>;

    fn try_from(form: &ProductForm) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let name = form
            .name
            .as_ref()
            .and_then(|name| collect(validate_name(name, false), &mut errors));
        let quantity = form
            .quantity
            .as_ref()
            .and_then(|quantity| collect(validate_quantity(quantity), &mut errors));
        let price = form
            .price
            .as_ref()
            .and_then(|price| collect(validate_price(price), &mut errors));

        if errors.is_empty() {
            Ok(Self {
                name,
                quantity,
                price,
            })
        } else {
            Err(errors)
        }
    }
}

/// JSON body of the bulk-delete endpoint.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteForm {
    #[serde(default)]
    pub ids: Option<Vec<i32>>,
}

impl BulkDeleteForm {
    /// Require a non-empty id array. Non-positive entries cannot match any
    /// row and are dropped, mirroring SQL `IN` semantics.
    pub fn into_ids(self) -> Result<Vec<ProductId>, Vec<FieldError>> {
        let ids = self.ids.unwrap_or_default();
        if ids.is_empty() {
            return Err(vec![FieldError::new(
                "ids",
                "Please provide an array of product IDs",
            )]);
        }
        Ok(ids.into_iter().filter_map(|id| ProductId::new(id).ok()).collect())
    }
}

fn collect<T>(result: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

fn validate_name(raw: &str, required: bool) -> Result<ProductName, FieldError> {
    ProductName::new(raw).map_err(|e| match e {
        TypeConstraintError::EmptyString(_) if required => {
            FieldError::new("name", "Product name is required")
        }
        TypeConstraintError::EmptyString(_) => {
            FieldError::new("name", "Product name cannot be empty")
        }
        TypeConstraintError::TooShort(..) => FieldError::new(
            "name",
            "Product name must be at least 2 characters long",
        ),
        _ => FieldError::new("name", "Product name must not exceed 255 characters"),
    })
}

fn validate_quantity(raw: &str) -> Result<Quantity, FieldError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| FieldError::new("quantity", "Quantity must be a number"))?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(FieldError::new("quantity", "Quantity must be an integer"));
    }
    if value < 0.0 {
        return Err(FieldError::new(
            "quantity",
            "Quantity must be a positive number",
        ));
    }
    if value > i32::MAX as f64 {
        return Err(FieldError::new("quantity", "Quantity must be a number"));
    }
    Quantity::new(value as i32)
        .map_err(|_| FieldError::new("quantity", "Quantity must be a positive number"))
}

fn validate_price(raw: &str) -> Result<Price, FieldError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| FieldError::new("price", "Price must be a number"))?;
    Price::new(value).map_err(|e| match e {
        TypeConstraintError::NegativeNumber(_) => {
            FieldError::new("price", "Price must be a positive number")
        }
        TypeConstraintError::TooPrecise(..) => {
            FieldError::new("price", "Price must have at most 2 decimal places")
        }
        _ => FieldError::new("price", "Price must be a number"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(
        name: Option<&str>,
        quantity: Option<&str>,
        price: Option<&str>,
    ) -> ProductForm {
        ProductForm {
            name: name.map(|v| Text(v.to_string())),
            quantity: quantity.map(|v| Text(v.to_string())),
            price: price.map(|v| Text(v.to_string())),
            image: None,
        }
    }

    #[test]
    fn create_payload_accepts_valid_fields() {
        let payload =
            CreateProductPayload::try_from(&form(Some("Widget"), Some("5"), Some("9.99")))
                .expect("valid form");
        assert_eq!(payload.name.as_str(), "Widget");
        assert_eq!(payload.quantity.get(), 5);
        assert_eq!(payload.price.get(), 9.99);
    }

    #[test]
    fn create_payload_collects_every_failing_field() {
        let errors = CreateProductPayload::try_from(&form(Some("x"), Some("-1"), Some("1.999")))
            .expect_err("invalid form");
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].field, "name");
        assert_eq!(
            errors[0].message,
            "Product name must be at least 2 characters long"
        );
        assert_eq!(errors[1].field, "quantity");
        assert_eq!(errors[1].message, "Quantity must be a positive number");
        assert_eq!(errors[2].field, "price");
        assert_eq!(errors[2].message, "Price must have at most 2 decimal places");
    }

    #[test]
    fn create_payload_requires_all_fields() {
        let errors = CreateProductPayload::try_from(&form(None, None, None))
            .expect_err("empty form");
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Product name is required",
                "Quantity is required",
                "Price is required"
            ]
        );
    }

    #[test]
    fn quantity_distinguishes_number_and_integer_failures() {
        let errors = CreateProductPayload::try_from(&form(Some("ok"), Some("abc"), Some("1")))
            .expect_err("bad quantity");
        assert_eq!(errors[0].message, "Quantity must be a number");
        let errors = CreateProductPayload::try_from(&form(Some("ok"), Some("1.5"), Some("1")))
            .expect_err("fractional quantity");
        assert_eq!(errors[0].message, "Quantity must be an integer");
    }

    #[test]
    fn update_payload_tolerates_missing_fields() {
        let payload = UpdateProductPayload::try_from(&form(None, Some("3"), None))
            .expect("partial form");
        assert!(payload.name.is_none());
        assert_eq!(payload.quantity.unwrap().get(), 3);
        assert!(payload.price.is_none());
    }

    #[test]
    fn update_payload_rejects_empty_name() {
        let errors = UpdateProductPayload::try_from(&form(Some("  "), None, None))
            .expect_err("blank name");
        assert_eq!(errors[0].message, "Product name cannot be empty");
    }

    #[test]
    fn bulk_delete_requires_non_empty_ids() {
        assert!(BulkDeleteForm { ids: None }.into_ids().is_err());
        assert!(BulkDeleteForm { ids: Some(vec![]) }.into_ids().is_err());
        let ids = BulkDeleteForm {
            ids: Some(vec![1, -2, 3]),
        }
        .into_ids()
        .expect("valid ids");
        assert_eq!(ids.len(), 2);
    }
}
