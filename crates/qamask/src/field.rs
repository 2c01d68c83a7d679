//! Definition of the named bit ranges used to build a [crate::layout::Layout].

/// A single named field of a quality word and its closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    /// Name used to select the field in a [crate::filter::FilterSet].
    pub name: String,
    /// Human-readable description shown in listings.
    pub description: String,
    /// Offset of the lowest bit of the field (0 = least significant bit of the word).
    pub offset_bits: u32,
    /// Width of the field in bits.
    pub len_bits: u32,
    /// Labels this field can take, in presentation order.
    pub labels: Vec<Label>,
}

impl FieldLayout {
    pub fn new(name: &str, offset_bits: u32, len_bits: u32, labels: Vec<Label>) -> Self {
        FieldLayout {
            name: name.to_string(),
            description: String::new(),
            offset_bits,
            len_bits,
            labels,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::FieldDef> for FieldLayout {
    fn from(value: crate::serde::FieldDef) -> Self {
        FieldLayout {
            name: value.name,
            description: value.description,
            offset_bits: value.offset_bits,
            len_bits: value.len_bits,
            labels: value.labels.into_iter().map(Into::into).collect(),
        }
    }
}

/// One entry of a field vocabulary: a label and its MSB-first bit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub bits: String,
}

impl Label {
    pub fn new(name: &str, bits: &str) -> Self {
        Label {
            name: name.to_string(),
            bits: bits.to_string(),
        }
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::LabelDef> for Label {
    fn from(value: crate::serde::LabelDef) -> Self {
        Label {
            name: value.label,
            bits: value.bits,
        }
    }
}

/// Builds a vocabulary from `(label, bits)` pairs.
pub fn vocabulary(pairs: &[(&str, &str)]) -> Vec<Label> {
    pairs
        .iter()
        .map(|(name, bits)| Label::new(name, bits))
        .collect()
}
