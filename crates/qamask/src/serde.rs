//! JSON-deserializable product description.
//!
//! These types describe a quality band as data. They are intended to be read from a
//! JSON file shipped next to the application and then converted into a
//! [crate::product::Product]:
//!
//! ```json
//! {
//!   "name": "example",
//!   "word_bits": 16,
//!   "fields": [
//!     { "name": "fill", "offset_bits": 0, "len_bits": 1,
//!       "labels": [{ "label": "Image", "bits": "0" }, { "label": "Fill", "bits": "1" }] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    field::{FieldLayout, Label},
    product::Product,
};

/// Top-level product definition.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProductDef {
    /// Name used to refer to the product.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Width of the quality word in bits.
    pub word_bits: u32,
    /// Whether filters may be inverted; defaults to `false`.
    #[serde(default)]
    pub supports_inversion: bool,
    /// Fields of the quality word.
    pub fields: Vec<FieldDef>,
}

/// Description of a single field.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Offset of the lowest bit of the field (0 = least significant bit).
    pub offset_bits: u32,
    /// Width of the field in bits.
    pub len_bits: u32,
    /// Vocabulary of the field.
    pub labels: Vec<LabelDef>,
}

/// A label and its MSB-first bit string.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LabelDef {
    pub label: String,
    pub bits: String,
}

impl From<&Product> for ProductDef {
    fn from(value: &Product) -> Self {
        ProductDef {
            name: value.name.clone(),
            description: value.description.clone(),
            word_bits: value.word_bits,
            supports_inversion: value.supports_inversion,
            fields: value.fields.iter().map(Into::into).collect(),
        }
    }
}

impl From<&FieldLayout> for FieldDef {
    fn from(value: &FieldLayout) -> Self {
        FieldDef {
            name: value.name.clone(),
            description: value.description.clone(),
            offset_bits: value.offset_bits,
            len_bits: value.len_bits,
            labels: value.labels.iter().map(Into::into).collect(),
        }
    }
}

impl From<&Label> for LabelDef {
    fn from(value: &Label) -> Self {
        LabelDef {
            label: value.name.clone(),
            bits: value.bits.clone(),
        }
    }
}
