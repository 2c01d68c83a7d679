//! Reclassification rules in the two-token `<value> = <action>` text grammar.
//!
//! Each excluded category renders as `<category> = NULL`; the list ends with the
//! catch-all `* = 1` mapping every remaining value to a kept indicator.

use std::{fmt, io};

/// A single reclassification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Map the category to no-data.
    Exclude(u32),
    /// Map every value not listed to 1.
    Default,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Exclude(category) => write!(f, "{category} = NULL"),
            Rule::Default => f.write_str("* = 1"),
        }
    }
}

/// Ordered exclusion list plus the trailing default rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleList {
    excluded: Vec<u32>,
}

impl RuleList {
    /// Wraps an exclusion list. Categories must be strictly ascending.
    pub fn new(excluded: Vec<u32>) -> Self {
        debug_assert!(excluded.windows(2).all(|w| w[0] < w[1]));
        RuleList { excluded }
    }

    pub fn excluded(&self) -> &[u32] {
        &self.excluded
    }

    /// Number of excluded categories (the default rule is not counted).
    pub fn len(&self) -> usize {
        self.excluded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }

    pub fn contains(&self, category: u32) -> bool {
        self.excluded.binary_search(&category).is_ok()
    }

    /// All rules in output order, ending with [Rule::Default].
    pub fn rules(&self) -> impl Iterator<Item = Rule> + '_ {
        self.excluded
            .iter()
            .map(|&category| Rule::Exclude(category))
            .chain(std::iter::once(Rule::Default))
    }

    /// Renders the rule list, one newline-terminated rule per line.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        for rule in self.rules() {
            writeln!(writer, "{rule}")?;
        }
        writer.flush()
    }
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in self.rules() {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}
