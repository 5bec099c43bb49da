//! # Derive macro for typed NMEA 0183 sentences
//!
//! `marine-nmea-derive` provides `#[derive(Sentence)]`, which turns a struct wrapping a
//! single `marine_nmea::RawSentence` into a typed sentence: it implements the
//! `marine_nmea::Sentence` trait, conversions from and to `RawSentence`, and `Display`.
//!
//! It is not meant to be used on its own, but re-exported by [`marine-nmea`].
//!
//! [`marine-nmea`]: https://crates.io/crates/marine-nmea

use generate::generate_sentence_impl;
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod config;
mod generate;
mod meta;

#[doc = include_str!("../README.md")]
#[proc_macro_derive(Sentence, attributes(nmea))]
pub fn derive_sentence(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_sentence_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
