use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DataEnum, DataStruct, DeriveInput, Error, Index, LitStr, Result,
    ext::IdentExt,
};

pub fn derive_ssm_config(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    reject_ssm_attrs(&input.attrs)?;

    let body = match &input.data {
        Data::Struct(s) => derive_struct(s)?,
        Data::Enum(e) => derive_enum(e)?,
        Data::Union(u) => {
            return Err(Error::new(u.union_token.span, "unions are unsupported"));
        }
    };

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::ssm_config::SsmConfig for #name #ty_generics #where_clause {
            fn layout(&mut self) -> ::ssm_config::Layout<'_> {
                #body
            }
        }
    })
}

/// One `Field` per annotated field, in declaration order. Field types without
/// an `AsFieldTarget` impl become unsupported targets named after the type.
fn derive_struct(s: &DataStruct) -> Result<TokenStream> {
    let mut entries = Vec::new();

    for (i, field) in s.fields.iter().enumerate() {
        let Some(parameter) = parameter_name(&field.attrs)? else {
            continue;
        };
        if parameter.value().is_empty() {
            continue;
        }

        let (member, name) = match &field.ident {
            Some(ident) => (quote!(#ident), ident.unraw().to_string()),
            None => {
                let index = Index::from(i);
                (quote!(#index), i.to_string())
            }
        };

        entries.push(quote! {
            ::ssm_config::Field::new(
                #name,
                #parameter,
                ::ssm_config::fields::__private::Wrap(&mut self.#member).__field_target(),
            )
        });
    }

    Ok(quote! {{
        #[allow(unused_imports)]
        use ::ssm_config::fields::__private::{TargetFallback as _, TargetViaTrait as _};
        ::ssm_config::Layout::Struct(::std::vec![#(#entries),*])
    }})
}

/// Enums have no fields to fill; they report themselves as a non-struct.
fn derive_enum(e: &DataEnum) -> Result<TokenStream> {
    for variant in &e.variants {
        reject_ssm_attrs(&variant.attrs)?;
        for field in &variant.fields {
            reject_ssm_attrs(&field.attrs)?;
        }
    }

    Ok(quote! {
        ::ssm_config::Layout::other::<Self>("enum")
    })
}

fn parameter_name(attrs: &[Attribute]) -> Result<Option<LitStr>> {
    let mut found = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("ssm")) {
        if found.is_some() {
            return Err(Error::new_spanned(attr, "duplicate #[ssm] attribute"));
        }
        let parameter: LitStr = attr.parse_args().map_err(|e| {
            Error::new(e.span(), "expected a parameter name: #[ssm(\"/path/to/parameter\")]")
        })?;
        found = Some(parameter);
    }

    Ok(found)
}

fn reject_ssm_attrs(attrs: &[Attribute]) -> Result<()> {
    match attrs.iter().find(|attr| attr.path().is_ident("ssm")) {
        Some(attr) => Err(Error::new_spanned(attr, "#[ssm] is only supported on struct fields")),
        None => Ok(()),
    }
}
