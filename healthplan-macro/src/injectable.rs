use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Fields, Type};

pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_injectable_impl(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn generate_injectable_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "#[derive(Injectable)] can only be applied to structs",
            ))
        }
    };

    let body = match &data.fields {
        Fields::Named(fields) => {
            let field_injections = fields.named.iter().map(|field| {
                let field_name = &field.ident;
                let field_type = extract_injectable_type(&field.ty);

                // `dyn Trait` goes through the trait binding table
                let resolve_method = match &field_type {
                    Type::TraitObject(_) => quote!(resolve_trait),
                    _ => quote!(resolve),
                };

                quote! {
                    #field_name: container.#resolve_method::<#field_type>()?
                }
            });
            quote! { Self { #(#field_injections),* } }
        }
        Fields::Unit => quote! { Self },
        Fields::Unnamed(_) => {
            return Err(syn::Error::new(
                data.fields.span(),
                "#[derive(Injectable)] only supports structs with named fields",
            ))
        }
    };

    Ok(quote! {
        impl #impl_generics ::healthplan::Injectable for #struct_name #ty_generics #where_clause {
            fn inject(
                container: &::healthplan::Container
            ) -> ::healthplan::Result<Self> {
                Ok(#body)
            }
        }
    })
}

/// Extract the inner type from `Arc<T>` or `Arc<dyn Trait>`
fn extract_injectable_type(ty: &Type) -> Type {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Arc" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner_type)) = args.args.first() {
                        return inner_type.clone();
                    }
                }
            }
        }
    }

    ty.clone()
}
