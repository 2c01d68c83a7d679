//! Exhaustive classification of every quality word value against an [ActiveFilter].
//!
//! Every category in `0..=2^W - 1` is decoded field by field. In [InversionMode::Normal]
//! a category is excluded when any constrained field equals one of its selected labels.
//! In [InversionMode::Inverted] it is excluded when any constrained field differs from
//! one of its selected labels. The test is evaluated per label: a field with several
//! selected labels always differs from at least one of them, so inverting such a filter
//! excludes every category.

use log::{debug, info, warn};

use crate::{filter::ActiveFilter, layout::Layout, rules::RuleList};

/// Whether selected labels mark values to drop or values to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InversionMode {
    #[default]
    Normal,
    Inverted,
}

impl From<bool> for InversionMode {
    fn from(invert: bool) -> Self {
        if invert {
            InversionMode::Inverted
        } else {
            InversionMode::Normal
        }
    }
}

/// Decides whether a single category is unacceptable. The first matching field/label
/// pair decides; remaining fields are not examined.
pub fn is_excluded(filter: &ActiveFilter, category: u32, mode: InversionMode) -> bool {
    filter.fields.iter().any(|field| {
        let value = field.decode(category);
        field.labels.iter().any(|label| match mode {
            InversionMode::Normal => label.pattern == value,
            InversionMode::Inverted => label.pattern != value,
        })
    })
}

/// Enumerates the full value space of `layout` and collects the excluded categories
/// in ascending order.
pub fn classify(layout: &Layout, filter: &ActiveFilter, mode: InversionMode) -> RuleList {
    for field in &filter.fields {
        debug!(
            "filtering {} (bits {}..{}) on {:?}",
            field.name,
            field.offset_bits,
            field.offset_bits + field.len_bits,
            field.labels.iter().map(|l| l.name.as_str()).collect::<Vec<_>>()
        );

        if mode == InversionMode::Inverted && field.labels.len() > 1 {
            warn!(
                "inverted filter on {} selects {} labels, every value differs from one of them",
                field.name,
                field.labels.len()
            );
        }
    }

    let excluded: Vec<u32> = (0..=layout.max_category())
        .filter(|&category| is_excluded(filter, category, mode))
        .collect();

    info!(
        "{} of {} categories excluded ({} active fields, {:?})",
        excluded.len(),
        layout.category_count(),
        filter.fields.len(),
        mode
    );

    RuleList::new(excluded)
}
