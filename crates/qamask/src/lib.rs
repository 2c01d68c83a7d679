//! # qamask
//!
//! Derive reclassification rules that mask unacceptable values of a bit-packed
//! quality word.
//!
//! A quality word is split into named fields (bit ranges), each with a closed
//! vocabulary of labels mapped to bit patterns. Given the labels a user finds
//! unacceptable, every possible word value is enumerated and the unacceptable ones are
//! emitted as `<value> = NULL` rules, followed by a catch-all `* = 1`.
//!
//! ## Example
//!
//! ```
//! use qamask::classify::InversionMode;
//! use qamask::filter::FilterSet;
//! use qamask::product::Product;
//!
//! let product = Product::landsat8_c2();
//! let filter = FilterSet::new().select("cloud_confidence", ["High"]);
//! let rules = product.rules(&filter, InversionMode::Normal).unwrap();
//!
//! assert_eq!(rules.len(), 16384);
//! assert!(rules.render().ends_with("* = 1\n"));
//! ```

pub mod bits;
pub mod classify;
pub mod compiled;
pub mod errors;
pub mod field;
pub mod filter;
pub mod layout;
pub mod product;
pub mod rules;
#[cfg(feature = "serde")]
pub mod serde;
pub mod sink;

pub use errors::Error;
