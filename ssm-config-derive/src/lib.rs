//! # ssm-config-derive
//!
//! `#[derive(SsmConfig)]` for the `ssm-config` crate.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use proc_macro::TokenStream;
use syn::{DeriveInput, Error, parse_macro_input};

mod ssm_config;

#[proc_macro_derive(SsmConfig, attributes(ssm))]
pub fn ssm_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    ssm_config::derive_ssm_config(&input).unwrap_or_else(Error::into_compile_error).into()
}
