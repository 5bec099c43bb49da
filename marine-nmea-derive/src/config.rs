use proc_macro2::{Span, TokenStream};
use syn::{Error, Result};

use crate::meta::{MetaAttribute, MetaAttributeType};

/// Top-level settings of a derived sentence.
pub struct Config {
    /// Variant of `marine_nmea::SentenceId` the sentence is bound to
    pub sentence_id: TokenStream,
    /// Number of fields of a sentence built from scratch
    pub field_count: TokenStream,
}

impl Config {
    pub fn from_meta_attributes(attribute_list: &[MetaAttribute], span: Span) -> Result<Self> {
        let mut sentence_id = None;
        let mut field_count = None;

        for meta in attribute_list {
            match meta.r#type {
                MetaAttributeType::Id => sentence_id = Some(meta.arg().clone()),
                MetaAttributeType::Fields => field_count = Some(meta.arg().clone()),
            }
        }

        let sentence_id = sentence_id.ok_or_else(|| {
            Error::new(
                span,
                "marine-nmea-derive: Missing `#[nmea(id(..))]` attribute",
            )
        })?;
        let field_count = field_count.ok_or_else(|| {
            Error::new(
                span,
                "marine-nmea-derive: Missing `#[nmea(fields(..))]` attribute",
            )
        })?;

        Ok(Self {
            sentence_id,
            field_count,
        })
    }
}
