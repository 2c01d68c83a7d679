use crate::{
    bits::{self, extract_bits, low_mask},
    errors::LayoutError,
    field::FieldLayout,
};

/// A validated field: bit position plus labels resolved to integer patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    pub name: String,
    pub description: String,
    pub offset_bits: u32,
    pub len_bits: u32,
    pub labels: Vec<CompiledLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledLabel {
    pub name: String,
    pub pattern: u32,
}

impl TryFrom<&FieldLayout> for CompiledField {
    type Error = LayoutError;

    fn try_from(value: &FieldLayout) -> Result<Self, Self::Error> {
        if value.name.is_empty() {
            return Err(LayoutError::EmptyFieldName);
        }
        if value.len_bits == 0 {
            return Err(LayoutError::InvalidFieldWidth(value.name.clone()));
        }
        if value.labels.is_empty() {
            return Err(LayoutError::EmptyVocabulary(value.name.clone()));
        }

        let mut labels: Vec<CompiledLabel> = Vec::with_capacity(value.labels.len());

        for label in &value.labels {
            if label.name.is_empty() {
                return Err(LayoutError::EmptyLabel(value.name.clone()));
            }
            if labels.iter().any(|l| l.name == label.name) {
                return Err(LayoutError::DuplicateLabel {
                    field: value.name.clone(),
                    label: label.name.clone(),
                });
            }

            let pattern = bits::parse_bit_string(&label.bits, value.len_bits).ok_or_else(|| {
                LayoutError::InvalidPattern {
                    field: value.name.clone(),
                    label: label.name.clone(),
                    bits: label.bits.clone(),
                    len_bits: value.len_bits,
                }
            })?;

            if let Some(other) = labels.iter().find(|l| l.pattern == pattern) {
                return Err(LayoutError::DuplicatePattern {
                    field: value.name.clone(),
                    first: other.name.clone(),
                    second: label.name.clone(),
                });
            }

            labels.push(CompiledLabel {
                name: label.name.clone(),
                pattern,
            });
        }

        Ok(CompiledField {
            name: value.name.clone(),
            description: value.description.clone(),
            offset_bits: value.offset_bits,
            len_bits: value.len_bits,
            labels,
        })
    }
}

impl CompiledField {
    /// Bits of the word covered by this field. Only valid once the field is known to fit.
    pub fn word_mask(&self) -> u32 {
        low_mask(self.len_bits) << self.offset_bits
    }

    /// Reads this field's value out of a quality word.
    pub fn decode(&self, word: u32) -> u32 {
        extract_bits(word, self.offset_bits, self.len_bits)
    }

    /// Resolves a label to its bit pattern.
    pub fn pattern(&self, label: &str) -> Option<u32> {
        self.labels
            .iter()
            .find(|l| l.name == label)
            .map(|l| l.pattern)
    }

    /// Label whose pattern equals `value`, if the vocabulary names it.
    pub fn label_for(&self, value: u32) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.pattern == value)
            .map(|l| l.name.as_str())
    }

    /// Number of labels in the vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::field::{Label, vocabulary};

    use super::*;

    fn confidence_field() -> FieldLayout {
        FieldLayout::new(
            "cloud_confidence",
            8,
            2,
            vocabulary(&[("No", "00"), ("Low", "01"), ("Medium", "10"), ("High", "11")]),
        )
    }

    #[test]
    fn test_compile_field() {
        let compiled = CompiledField::try_from(&confidence_field()).unwrap();
        assert_eq!(compiled.pattern("High"), Some(0b11));
        assert_eq!(compiled.pattern("Low"), Some(0b01));
        assert_eq!(compiled.pattern("Maybe"), None);
        assert_eq!(compiled.vocabulary_len(), 4);
        assert_eq!(compiled.word_mask(), 0b11_0000_0000);
    }

    #[test]
    fn test_decode_and_label_for() {
        let compiled = CompiledField::try_from(&confidence_field()).unwrap();
        let word = 0b10_0000_0001;
        assert_eq!(compiled.decode(word), 0b10);
        assert_eq!(compiled.label_for(compiled.decode(word)), Some("Medium"));
    }

    #[test]
    fn test_partial_vocabulary_has_unnamed_codes() {
        let field = FieldLayout::new("level", 0, 2, vocabulary(&[("Low", "01"), ("High", "11")]));
        let compiled = CompiledField::try_from(&field).unwrap();
        assert_eq!(compiled.label_for(0b10), None);
    }

    #[test]
    fn test_zero_width() {
        let field = FieldLayout::new("empty", 0, 0, vocabulary(&[("No", "")]));
        assert_eq!(
            CompiledField::try_from(&field).unwrap_err(),
            LayoutError::InvalidFieldWidth("empty".to_string())
        );
    }

    #[test]
    fn test_empty_vocabulary() {
        let field = FieldLayout::new("fill", 0, 1, vec![]);
        assert_eq!(
            CompiledField::try_from(&field).unwrap_err(),
            LayoutError::EmptyVocabulary("fill".to_string())
        );
    }

    #[test]
    fn test_pattern_of_wrong_width() {
        let field = FieldLayout::new("cloud", 3, 1, vocabulary(&[("No", "0"), ("Yes", "01")]));
        assert_eq!(
            CompiledField::try_from(&field).unwrap_err(),
            LayoutError::InvalidPattern {
                field: "cloud".to_string(),
                label: "Yes".to_string(),
                bits: "01".to_string(),
                len_bits: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_label() {
        let mut field = confidence_field();
        field.labels.push(Label::new("Low", "01"));
        assert_eq!(
            CompiledField::try_from(&field).unwrap_err(),
            LayoutError::DuplicateLabel {
                field: "cloud_confidence".to_string(),
                label: "Low".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_pattern() {
        let field = FieldLayout::new("water", 7, 1, vocabulary(&[("No", "0"), ("Land", "0")]));
        assert_eq!(
            CompiledField::try_from(&field).unwrap_err(),
            LayoutError::DuplicatePattern {
                field: "water".to_string(),
                first: "No".to_string(),
                second: "Land".to_string(),
            }
        );
    }
}
