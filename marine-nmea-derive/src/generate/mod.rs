use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Index, Member, Result};

use crate::{config::Config, meta::parse_top_level_attributes};

// Usage:
// #[derive(Sentence)]
// #[nmea(id(RMC), fields(12))]
// pub struct RMC {
//     raw: RawSentence,
// }

/// Finds the member holding the raw sentence: the only field of the struct.
fn raw_member(input: &DeriveInput) -> Result<Member> {
    let Data::Struct(datastruct) = &input.data else {
        return Err(Error::new(
            input.ident.span(),
            "marine-nmea-derive: Only structs can derive `Sentence`",
        ));
    };

    let member = match &datastruct.fields {
        Fields::Named(fields) if fields.named.len() == 1 => {
            fields
                .named
                .first()
                .and_then(|field| field.ident.clone())
                .map(Member::Named)
        }
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            Some(Member::Unnamed(Index::from(0)))
        }
        _ => None,
    };

    member.ok_or_else(|| {
        Error::new(
            input.ident.span(),
            "marine-nmea-derive: Expected a struct with a single `RawSentence` field",
        )
    })
}

pub fn generate_sentence_impl(input: &DeriveInput) -> Result<TokenStream> {
    let attributes = parse_top_level_attributes(&input.attrs)?;
    let config = Config::from_meta_attributes(&attributes, input.ident.span())?;
    let member = raw_member(input)?;

    let name = &input.ident;
    let sentence_id = &config.sentence_id;
    let field_count = &config.field_count;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let impl_tokens = quote! {
        impl #impl_generics marine_nmea::Sentence for #name #ty_generics #where_clause {
            const SENTENCE_ID: marine_nmea::SentenceId = marine_nmea::SentenceId::#sentence_id;
            const FIELD_COUNT: usize = #field_count;

            fn from_raw_unchecked(raw: marine_nmea::RawSentence) -> Self {
                Self { #member: raw }
            }

            fn raw(&self) -> &marine_nmea::RawSentence {
                &self.#member
            }

            fn raw_mut(&mut self) -> &mut marine_nmea::RawSentence {
                &mut self.#member
            }

            fn into_raw(self) -> marine_nmea::RawSentence {
                self.#member
            }
        }

        impl #impl_generics ::core::convert::TryFrom<marine_nmea::RawSentence>
            for #name #ty_generics #where_clause
        {
            type Error = marine_nmea::FramingError;

            fn try_from(
                raw: marine_nmea::RawSentence,
            ) -> ::core::result::Result<Self, Self::Error> {
                <Self as marine_nmea::Sentence>::from_raw(raw)
            }
        }

        impl #impl_generics ::core::convert::From<#name #ty_generics>
            for marine_nmea::RawSentence #where_clause
        {
            fn from(sentence: #name #ty_generics) -> Self {
                <#name #ty_generics as marine_nmea::Sentence>::into_raw(sentence)
            }
        }

        impl #impl_generics ::core::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(<Self as marine_nmea::Sentence>::raw(self), f)
            }
        }
    };

    Ok(impl_tokens)
}
