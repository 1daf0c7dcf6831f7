use darling::{ast, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

#[derive(FromField)]
#[darling(attributes(resource))]
struct EntityField {
    ident: Option<syn::Ident>,
    ty: syn::Type,
    #[darling(default)]
    id: bool,
}

#[derive(FromDeriveInput)]
#[darling(attributes(resource), supports(struct_named))]
struct EntityArgs {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<(), EntityField>,
    path: String,
    #[darling(default)]
    collection: Option<String>,
}

pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let args = match EntityArgs::from_derive_input(&input) {
        Ok(args) => args,
        Err(err) => return TokenStream::from(err.write_errors()),
    };

    match generate_entity_impl(&args) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.write_errors()),
    }
}

fn generate_entity_impl(args: &EntityArgs) -> darling::Result<TokenStream2> {
    let struct_name = &args.ident;
    let (impl_generics, ty_generics, where_clause) = args.generics.split_for_impl();

    if !args.path.starts_with('/') {
        return Err(darling::Error::custom(format!(
            "resource path `{}` must start with '/'",
            args.path
        ))
        .with_span(&args.ident));
    }
    let path = args.path.trim_end_matches('/');

    let collection = args
        .collection
        .clone()
        .unwrap_or_else(|| default_collection_relation(&struct_name.to_string()));

    let fields = args
        .data
        .as_ref()
        .take_struct()
        .ok_or_else(|| darling::Error::unsupported_shape("enum").with_span(&args.ident))?
        .fields;

    let id_field = fields
        .iter()
        .find(|f| f.id)
        .or_else(|| fields.iter().find(|f| f.ident.as_ref().is_some_and(|i| i == "id")))
        .ok_or_else(|| {
            darling::Error::custom("entity needs an `id` field or a field marked #[resource(id)]")
                .with_span(&args.ident)
        })?;

    if !is_option(&id_field.ty) {
        return Err(darling::Error::custom("the identifier field must be an `Option<i64>`")
            .with_span(&id_field.ty));
    }

    let id_ident = &id_field.ident;

    Ok(quote! {
        impl #impl_generics ::healthplan::entity::Entity for #struct_name #ty_generics #where_clause {
            const PATH: &'static str = #path;
            const COLLECTION_RELATION: &'static str = #collection;

            fn id(&self) -> ::core::option::Option<i64> {
                self.#id_ident
            }

            fn set_id(&mut self, id: i64) {
                self.#id_ident = ::core::option::Option::Some(id);
            }
        }
    })
}

/// `HealthPlan` -> `healthPlanList`
fn default_collection_relation(type_name: &str) -> String {
    let mut chars = type_name.chars();
    let mut relation = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    relation.push_str("List");
    relation
}

fn is_option(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}
