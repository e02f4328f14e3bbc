//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;
use validator::{ValidateLength, ValidateUrl};

/// Shortest accepted product name, in characters.
pub const NAME_MIN_CHARS: u64 = 2;
/// Longest accepted product name, in characters.
pub const NAME_MAX_CHARS: u64 = 255;
/// Number of fractional digits a price may carry.
pub const PRICE_SCALE: u32 = 2;

/// Path prefix under which locally stored images are served.
pub const UPLOADS_PREFIX: &str = "/uploads/";
/// Image path assigned to products created without an upload.
pub const PLACEHOLDER_IMAGE: &str = "/uploads/default-product.png";

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A numeric value was NaN or infinite.
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    /// A numeric value carried more fractional digits than allowed.
    #[error("{0} must have at most {1} decimal places")]
    TooPrecise(&'static str, u32),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string was shorter than the allowed minimum.
    #[error("{0} must be at least {1} characters")]
    TooShort(&'static str, u64),
    /// A string exceeded the allowed maximum length.
    #[error("{0} must not exceed {1} characters")]
    TooLong(&'static str, u64),
    /// A reference was neither an uploads path nor a valid URL.
    #[error("{0} must be an uploads path or a valid URL")]
    InvalidUrl(&'static str),
}

/// Identifier of a persisted product row. Always positive.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductId(i32);

impl ProductId {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId("product id"))
        }
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product display name. Trimmed, between 2 and 255 characters.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ProductName(String);

impl ProductName {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString("name"));
        }
        if !trimmed.validate_length(Some(NAME_MIN_CHARS), None, None) {
            return Err(TypeConstraintError::TooShort("name", NAME_MIN_CHARS));
        }
        if !trimmed.validate_length(None, Some(NAME_MAX_CHARS), None) {
            return Err(TypeConstraintError::TooLong("name", NAME_MAX_CHARS));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ProductName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Units in stock. Never negative.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("quantity"))
        }
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

/// Unit price. Non-negative, at most two fractional digits.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if !value.is_finite() {
            return Err(TypeConstraintError::NotFinite("price"));
        }
        if value < 0.0 {
            return Err(TypeConstraintError::NegativeNumber("price"));
        }
        let cents = value * 100.0;
        if (cents - cents.round()).abs() > 1e-6 {
            return Err(TypeConstraintError::TooPrecise("price", PRICE_SCALE));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

/// Reference to a product image: either a locally stored file under the
/// uploads directory or an absolute external URL.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(TypeConstraintError::EmptyString("image"));
        }
        if value.starts_with(UPLOADS_PREFIX) || value.validate_url() {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidUrl("image"))
        }
    }

    /// Reference to a file stored in the uploads directory.
    pub fn local(file_name: &str) -> Self {
        Self(format!("{UPLOADS_PREFIX}{file_name}"))
    }

    /// The shared placeholder assigned when no image was uploaded.
    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_IMAGE.to_string())
    }

    /// Whether this reference points into the local uploads directory.
    pub fn is_local(&self) -> bool {
        self.0.starts_with(UPLOADS_PREFIX)
    }

    /// File name under the uploads directory, or `None` for external URLs.
    pub fn local_file_name(&self) -> Option<&str> {
        self.0.strip_prefix(UPLOADS_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ImageRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
