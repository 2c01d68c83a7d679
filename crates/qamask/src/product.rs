//! Product variants: a named layout table plus product-level switches.
//!
//! Two Landsat 8 quality bands are built in. Other products can be described as data
//! (see [crate::serde::ProductDef] with the `serde` feature) without touching the
//! classifier.

use log::debug;

use crate::{
    classify::{self, InversionMode},
    errors::{Error, FilterError, LayoutError},
    field::{FieldLayout, vocabulary},
    filter::{ActiveFilter, FilterSet},
    layout::Layout,
    rules::RuleList,
};

/// A quality band definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub description: String,
    /// Width of the quality word.
    pub word_bits: u32,
    /// Whether filters may be inverted for this product.
    pub supports_inversion: bool,
    pub fields: Vec<FieldLayout>,
}

#[cfg(feature = "serde")]
impl From<crate::serde::ProductDef> for Product {
    fn from(value: crate::serde::ProductDef) -> Self {
        Product {
            name: value.name,
            description: value.description,
            word_bits: value.word_bits,
            supports_inversion: value.supports_inversion,
            fields: value.fields.into_iter().map(Into::into).collect(),
        }
    }
}

const YES_NO: &[(&str, &str)] = &[("No", "0"), ("Yes", "1")];

impl Product {
    /// Landsat 8 Collection 2 Level-1/2 `QA_PIXEL` band.
    pub fn landsat8_c2() -> Self {
        let confidence: &[(&str, &str)] =
            &[("No", "00"), ("Low", "01"), ("Medium", "10"), ("High", "11")];
        let shadow_confidence: &[(&str, &str)] =
            &[("No", "00"), ("Low", "01"), ("Reserved", "10"), ("High", "11")];

        let flag = |name: &str, bit: u32, description: &str| {
            FieldLayout::new(name, bit, 1, vocabulary(YES_NO)).with_description(description)
        };

        Product {
            name: "landsat8-c2".to_string(),
            description: "Landsat 8 Collection 2 Level-1/2 QA_PIXEL".to_string(),
            word_bits: 16,
            supports_inversion: true,
            fields: vec![
                FieldLayout::new("fill", 0, 1, vocabulary(&[("Image", "0"), ("Fill", "1")]))
                    .with_description("Fill data or image data (bit 0)"),
                flag("dilated_cloud", 1, "Dilated cloud (bit 1)"),
                flag("cirrus", 2, "High confidence cirrus (bit 2)"),
                flag("cloud", 3, "High confidence cloud (bit 3)"),
                flag("cloud_shadow", 4, "High confidence cloud shadow (bit 4)"),
                flag("snow", 5, "High confidence snow (bit 5)"),
                flag("clear", 6, "No cloud and no dilated cloud (bit 6)"),
                flag("water", 7, "Water (bit 7)"),
                FieldLayout::new("cloud_confidence", 8, 2, vocabulary(confidence))
                    .with_description("Cloud confidence (bits 8-9)"),
                FieldLayout::new("cloud_shadow_confidence", 10, 2, vocabulary(shadow_confidence))
                    .with_description("Cloud shadow confidence (bits 10-11)"),
                FieldLayout::new("snow_ice_confidence", 12, 2, vocabulary(confidence))
                    .with_description("Snow/ice confidence (bits 12-13)"),
                FieldLayout::new("cirrus_confidence", 14, 2, vocabulary(confidence))
                    .with_description("Cirrus confidence (bits 14-15)"),
            ],
        }
    }

    /// Landsat 8 Collection 1 Level-1 `BQA` band.
    pub fn landsat8_c1() -> Self {
        let confidence: &[(&str, &str)] = &[
            ("Not Determined", "00"),
            ("Low", "01"),
            ("Medium", "10"),
            ("High", "11"),
        ];
        let reserved_confidence: &[(&str, &str)] = &[
            ("Not Determined", "00"),
            ("Low", "01"),
            ("Reserved", "10"),
            ("High", "11"),
        ];
        let saturation: &[(&str, &str)] = &[
            ("No bands", "00"),
            ("1-2 bands", "01"),
            ("3-4 bands", "10"),
            ("5+ bands", "11"),
        ];

        Product {
            name: "landsat8-c1".to_string(),
            description: "Landsat 8 Collection 1 Level-1 BQA".to_string(),
            word_bits: 16,
            supports_inversion: false,
            fields: vec![
                FieldLayout::new("designated_fill", 0, 1, vocabulary(YES_NO))
                    .with_description("Designated fill (bit 0)"),
                FieldLayout::new("terrain_occlusion", 1, 1, vocabulary(YES_NO))
                    .with_description("Terrain occlusion (bit 1)"),
                FieldLayout::new("radiometric_saturation", 2, 2, vocabulary(saturation))
                    .with_description("Radiometric saturation (bits 2-3)"),
                FieldLayout::new("cloud", 4, 1, vocabulary(YES_NO))
                    .with_description("Cloud (bit 4)"),
                FieldLayout::new("cloud_confidence", 5, 2, vocabulary(confidence))
                    .with_description("Cloud confidence (bits 5-6)"),
                FieldLayout::new("cloud_shadow_confidence", 7, 2, vocabulary(reserved_confidence))
                    .with_description("Cloud shadow confidence (bits 7-8)"),
                FieldLayout::new("snow_ice_confidence", 9, 2, vocabulary(reserved_confidence))
                    .with_description("Snow/ice confidence (bits 9-10)"),
                FieldLayout::new("cirrus_confidence", 11, 2, vocabulary(reserved_confidence))
                    .with_description("Cirrus confidence (bits 11-12)"),
            ],
        }
    }

    /// All built-in products.
    pub fn builtin() -> Vec<Product> {
        vec![Self::landsat8_c2(), Self::landsat8_c1()]
    }

    pub fn by_name(name: &str) -> Option<Product> {
        Self::builtin().into_iter().find(|p| p.name == name)
    }

    pub fn compile(&self) -> Result<Layout, LayoutError> {
        Layout::compile(self.word_bits, &self.fields)
    }

    /// Compiles the layout and checks `filter` and `mode` against it.
    pub fn validate(
        &self,
        filter: &FilterSet,
        mode: InversionMode,
    ) -> Result<(Layout, ActiveFilter), Error> {
        if mode == InversionMode::Inverted && !self.supports_inversion {
            return Err(FilterError::InversionUnsupported(self.name.clone()).into());
        }

        let layout = self.compile()?;
        let active = filter.validate(&layout)?;
        debug!("{}: {} active fields", self.name, active.fields.len());

        Ok((layout, active))
    }

    /// Validates `filter` and classifies the whole value space of this product.
    ///
    /// Nothing is enumerated unless the layout and the filter are both valid.
    pub fn rules(&self, filter: &FilterSet, mode: InversionMode) -> Result<RuleList, Error> {
        let (layout, active) = self.validate(filter, mode)?;
        Ok(classify::classify(&layout, &active, mode))
    }
}
