//! Error types for layout compilation, filter validation and classification.

use thiserror::Error;

/// Errors produced when compiling [crate::field::FieldLayout]s into a [crate::layout::Layout].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Word width is 0 or wider than a `u32` category.
    #[error("invalid word width: {0} bits (must be 1-32)")]
    InvalidWordBits(u32),
    /// Field name is empty.
    #[error("field name must not be empty")]
    EmptyFieldName,
    /// Two fields share a name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
    /// Field has zero width.
    #[error("field {0} has zero width")]
    InvalidFieldWidth(String),
    /// Field extends past the most significant bit of the word.
    #[error("field {field} (bits {offset}..{end}) does not fit a {word_bits}-bit word")]
    FieldOutOfRange {
        field: String,
        offset: u32,
        end: u32,
        word_bits: u32,
    },
    /// Two fields claim the same bit.
    #[error("fields {0} and {1} overlap")]
    OverlappingFields(String, String),
    /// Field has no labels to select from.
    #[error("field {0} has an empty vocabulary")]
    EmptyVocabulary(String),
    /// Label is empty.
    #[error("field {0} has an empty label")]
    EmptyLabel(String),
    /// Two labels of one field share a name.
    #[error("field {field} lists label {label} twice")]
    DuplicateLabel { field: String, label: String },
    /// Bit string is not exactly `len_bits` characters of `0`/`1`.
    #[error("field {field}: label {label} has invalid bit pattern {bits:?} (expected {len_bits} bits)")]
    InvalidPattern {
        field: String,
        label: String,
        bits: String,
        len_bits: u32,
    },
    /// Two labels of one field map to the same bit string.
    #[error("field {field}: labels {first} and {second} share a bit pattern")]
    DuplicatePattern {
        field: String,
        first: String,
        second: String,
    },
}

/// Configuration errors in a [crate::filter::FilterSet], detected before enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Every label of a field was selected, so no value would survive.
    #[error(
        "all conditions for {field} specified as unacceptable ({selected} of {available} labels), this will result in an empty map"
    )]
    OverBroad {
        field: String,
        selected: usize,
        available: usize,
    },
    /// Label is not part of the field's vocabulary.
    #[error("unknown label {label:?} for field {field}")]
    UnknownLabel { field: String, label: String },
    /// Field is not part of the layout.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// Field was given more than once.
    #[error("field {0} selected more than once")]
    DuplicateField(String),
    /// Inversion was requested for a product without an inversion toggle.
    #[error("product {0} does not support inverted filters")]
    InversionUnsupported(String),
}

/// Any error raised while deriving a rule list for a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_broad_names_field() {
        let err = FilterError::OverBroad {
            field: "fill".to_string(),
            selected: 2,
            available: 2,
        };
        assert!(err.to_string().contains("fill"));
        assert!(err.to_string().contains("empty map"));
    }

    #[test]
    fn test_unknown_label_names_field_and_label() {
        let err = FilterError::UnknownLabel {
            field: "cloud".to_string(),
            label: "Maybe".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("cloud"));
        assert!(message.contains("Maybe"));
    }

    #[test]
    fn test_error_is_transparent() {
        let err: Error = LayoutError::InvalidWordBits(0).into();
        assert_eq!(err.to_string(), "invalid word width: 0 bits (must be 1-32)");
    }
}
