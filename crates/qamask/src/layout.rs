//! Layout: compiled table of fields describing one quality word.

use crate::{
    bits::{self, format_bits},
    compiled::CompiledField,
    errors::LayoutError,
    field::FieldLayout,
};

/// A compiled layout table. Use [Layout::compile] to build one from [FieldLayout]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    word_bits: u32,
    /// Compiled fields in definition order.
    pub fields: Vec<CompiledField>,
}

/// One field of a quality word as rendered by [Layout::decode].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField<'a> {
    pub name: &'a str,
    pub bits: String,
    pub label: Option<&'a str>,
}

impl Layout {
    /// Compiles fields into a layout for a `word_bits` wide word. Fails if any field is
    /// invalid, out of range or overlapping another field.
    pub fn compile(word_bits: u32, fields: &[FieldLayout]) -> Result<Self, LayoutError> {
        if word_bits == 0 || word_bits > 32 {
            return Err(LayoutError::InvalidWordBits(word_bits));
        }

        let mut compiled_fields: Vec<CompiledField> = Vec::with_capacity(fields.len());

        for field in fields {
            let compiled_field = CompiledField::try_from(field)?;

            if compiled_fields.iter().any(|f| f.name == compiled_field.name) {
                return Err(LayoutError::DuplicateField(compiled_field.name));
            }

            let fits = compiled_field
                .offset_bits
                .checked_add(compiled_field.len_bits)
                .is_some_and(|end| end <= word_bits);
            if !fits {
                return Err(LayoutError::FieldOutOfRange {
                    field: compiled_field.name,
                    offset: compiled_field.offset_bits,
                    end: compiled_field.offset_bits.saturating_add(compiled_field.len_bits),
                    word_bits,
                });
            }

            if let Some(other) = compiled_fields
                .iter()
                .find(|f| f.word_mask() & compiled_field.word_mask() != 0)
            {
                return Err(LayoutError::OverlappingFields(
                    other.name.clone(),
                    compiled_field.name,
                ));
            }

            compiled_fields.push(compiled_field);
        }

        Ok(Self {
            word_bits,
            fields: compiled_fields,
        })
    }

    pub fn word_bits(&self) -> u32 {
        self.word_bits
    }

    /// Largest category value, `2^word_bits - 1`.
    pub fn max_category(&self) -> u32 {
        bits::max_category(self.word_bits)
    }

    /// Number of categories in the value space, `2^word_bits`.
    pub fn category_count(&self) -> u64 {
        1u64 << self.word_bits
    }

    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Bit offset and width of a field.
    pub fn position(&self, name: &str) -> Option<(u32, u32)> {
        self.field(name).map(|f| (f.offset_bits, f.len_bits))
    }

    /// Bit pattern of a label within a field.
    pub fn pattern(&self, name: &str, label: &str) -> Option<u32> {
        self.field(name).and_then(|f| f.pattern(label))
    }

    /// Splits `word` into its fields, with the label each field value carries.
    pub fn decode(&self, word: u32) -> Vec<DecodedField<'_>> {
        self.fields
            .iter()
            .map(|field| {
                let value = field.decode(word);
                DecodedField {
                    name: &field.name,
                    bits: format_bits(value, field.len_bits),
                    label: field.label_for(value),
                }
            })
            .collect()
    }
}
