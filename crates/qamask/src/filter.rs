//! User-selected unacceptable labels per field, and their validation against a [Layout].

use crate::{bits::extract_bits, errors::FilterError, layout::Layout};

/// Runtime selection of unacceptable labels, keyed by field name.
///
/// A field that is absent (or selected with no labels) is unconstrained. Build one with
/// [FilterSet::select] or [FilterSet::from_options], then call [FilterSet::validate].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    selections: Vec<Selection>,
}

/// The labels selected for one field, in the order they were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub field: String,
    pub labels: Vec<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a selection for `field`.
    pub fn select<I, S>(mut self, field: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selections.push(Selection {
            field: field.to_string(),
            labels: labels.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Builds a filter set from `(field, comma-joined labels)` options. Absent or empty
    /// values leave the field unconstrained.
    pub fn from_options<'a, I>(options: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        options
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .filter(|(_, value)| !value.trim().is_empty())
            .fold(Self::new(), |set, (field, value)| {
                set.select(field, split_labels(value))
            })
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn is_empty(&self) -> bool {
        self.selections.iter().all(|s| s.labels.is_empty())
    }

    /// Checks every selection against `layout` and resolves labels to bit patterns.
    ///
    /// Fails if a field is unknown or given twice, if a selection names every label of its
    /// field, or if a label is not in the field's vocabulary.
    pub fn validate(&self, layout: &Layout) -> Result<ActiveFilter, FilterError> {
        let mut active: Vec<(usize, ActiveField)> = Vec::new();

        for selection in self.selections.iter().filter(|s| !s.labels.is_empty()) {
            let index = layout
                .field_index(&selection.field)
                .ok_or_else(|| FilterError::UnknownField(selection.field.clone()))?;

            if active.iter().any(|(i, _)| *i == index) {
                return Err(FilterError::DuplicateField(selection.field.clone()));
            }

            let field = &layout.fields[index];

            let mut distinct: Vec<&str> = Vec::with_capacity(selection.labels.len());
            for label in &selection.labels {
                if !distinct.contains(&label.as_str()) {
                    distinct.push(label.as_str());
                }
            }

            let labels = distinct
                .into_iter()
                .map(|label| {
                    field
                        .pattern(label)
                        .map(|pattern| ActiveLabel {
                            name: label.to_string(),
                            pattern,
                        })
                        .ok_or_else(|| FilterError::UnknownLabel {
                            field: field.name.clone(),
                            label: label.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if labels.len() >= field.vocabulary_len() {
                return Err(FilterError::OverBroad {
                    field: field.name.clone(),
                    selected: labels.len(),
                    available: field.vocabulary_len(),
                });
            }

            active.push((
                index,
                ActiveField {
                    name: field.name.clone(),
                    offset_bits: field.offset_bits,
                    len_bits: field.len_bits,
                    labels,
                },
            ));
        }

        active.sort_by_key(|(index, _)| *index);

        Ok(ActiveFilter {
            fields: active.into_iter().map(|(_, field)| field).collect(),
        })
    }
}

/// Splits a comma-joined option value into trimmed labels.
pub fn split_labels(value: &str) -> Vec<String> {
    value.split(',').map(|label| label.trim().to_string()).collect()
}

/// A validated filter: constrained fields in layout order with resolved patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilter {
    pub fields: Vec<ActiveField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveField {
    pub name: String,
    pub offset_bits: u32,
    pub len_bits: u32,
    pub labels: Vec<ActiveLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLabel {
    pub name: String,
    pub pattern: u32,
}

impl ActiveFilter {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl ActiveField {
    pub fn decode(&self, word: u32) -> u32 {
        extract_bits(word, self.offset_bits, self.len_bits)
    }
}

#[cfg(test)]
mod tests {
    use crate::field::{FieldLayout, vocabulary};

    use super::*;

    fn layout() -> Layout {
        let confidence = vocabulary(&[
            ("No", "00"),
            ("Low", "01"),
            ("Medium", "10"),
            ("High", "11"),
        ]);
        Layout::compile(
            16,
            &[
                FieldLayout::new("fill", 0, 1, vocabulary(&[("Image", "0"), ("Fill", "1")])),
                FieldLayout::new("cloud", 3, 1, vocabulary(&[("No", "0"), ("Yes", "1")])),
                FieldLayout::new("cloud_confidence", 8, 2, confidence),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_options_skips_absent_and_empty() {
        let set = FilterSet::from_options([
            ("fill", Some("Fill")),
            ("cloud", None),
            ("cloud_confidence", Some("")),
        ]);
        assert_eq!(
            set.selections(),
            &[Selection {
                field: "fill".to_string(),
                labels: vec!["Fill".to_string()],
            }]
        );
    }

    #[test]
    fn test_split_labels() {
        assert_eq!(split_labels("Medium, High"), vec!["Medium", "High"]);
        assert_eq!(split_labels("Fill"), vec!["Fill"]);
    }

    #[test]
    fn test_empty_filter() {
        let set = FilterSet::new().select("cloud", Vec::<String>::new());
        assert!(set.is_empty());
        assert!(set.validate(&layout()).unwrap().is_empty());
    }

    #[test]
    fn test_validate_resolves_in_layout_order() {
        let set = FilterSet::new()
            .select("cloud_confidence", ["High", "Medium"])
            .select("fill", ["Fill"]);
        let active = set.validate(&layout()).unwrap();

        let names: Vec<&str> = active.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["fill", "cloud_confidence"]);

        let patterns: Vec<u32> = active.fields[1].labels.iter().map(|l| l.pattern).collect();
        assert_eq!(patterns, vec![0b11, 0b10]);
    }

    #[test]
    fn test_all_labels_selected_is_rejected() {
        let set = FilterSet::new().select("cloud", ["No", "Yes"]);
        assert_eq!(
            set.validate(&layout()).unwrap_err(),
            FilterError::OverBroad {
                field: "cloud".to_string(),
                selected: 2,
                available: 2,
            }
        );
    }

    #[test]
    fn test_repeated_labels_count_once() {
        let set = FilterSet::new().select("cloud", ["Yes", "Yes"]);
        let active = set.validate(&layout()).unwrap();
        assert_eq!(active.fields[0].labels.len(), 1);
    }

    #[test]
    fn test_unknown_label() {
        let set = FilterSet::new().select("cloud_confidence", ["Reserved"]);
        assert_eq!(
            set.validate(&layout()).unwrap_err(),
            FilterError::UnknownLabel {
                field: "cloud_confidence".to_string(),
                label: "Reserved".to_string(),
            }
        );
    }

    #[test]
    fn test_trailing_comma_is_unknown_label() {
        let set = FilterSet::from_options([("fill", Some("Fill,"))]);
        assert_eq!(
            set.validate(&layout()).unwrap_err(),
            FilterError::UnknownLabel {
                field: "fill".to_string(),
                label: String::new(),
            }
        );
    }

    #[test]
    fn test_unknown_label_on_single_bit_field() {
        let set = FilterSet::new().select("cloud", ["Yes", "Bogus"]);
        assert_eq!(
            set.validate(&layout()).unwrap_err(),
            FilterError::UnknownLabel {
                field: "cloud".to_string(),
                label: "Bogus".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_field() {
        let set = FilterSet::new().select("snow", ["Yes"]);
        assert_eq!(
            set.validate(&layout()).unwrap_err(),
            FilterError::UnknownField("snow".to_string())
        );
    }

    #[test]
    fn test_duplicate_field() {
        let set = FilterSet::new()
            .select("cloud", ["Yes"])
            .select("cloud", ["No"]);
        assert_eq!(
            set.validate(&layout()).unwrap_err(),
            FilterError::DuplicateField("cloud".to_string())
        );
    }

    #[test]
    fn test_active_field_decode() {
        let set = FilterSet::new().select("cloud_confidence", ["High"]);
        let active = set.validate(&layout()).unwrap();
        assert_eq!(active.fields[0].decode(0b11_0000_0000), 0b11);
        assert_eq!(active.fields[0].decode(0b01_1111_1111), 0b01);
    }
}
