use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, Attribute, ItemStruct, Path, Token, Type,
};

struct ModuleItem {
    attrs: Vec<Attribute>,
    path: Path,
}

impl Parse for ModuleItem {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let path = input.parse()?;
        Ok(ModuleItem { attrs, path })
    }
}

/// `(dyn Trait => Impl)`
struct BindingItem {
    trait_type: Type,
    impl_type: Type,
}

impl Parse for BindingItem {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let content;
        syn::parenthesized!(content in input);

        let trait_type: Type = content.parse()?;
        content.parse::<Token![=>]>()?;
        let impl_type: Type = content.parse()?;

        Ok(BindingItem {
            trait_type,
            impl_type,
        })
    }
}

#[derive(Default)]
struct ModuleArgs {
    imports: Vec<ModuleItem>,
    bindings: Vec<BindingItem>,
    providers: Vec<ModuleItem>,
    controllers: Vec<ModuleItem>,
}

impl Parse for ModuleArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = ModuleArgs::default();

        while !input.is_empty() {
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            let content;
            syn::bracketed!(content in input);

            match name.to_string().as_str() {
                "imports" => {
                    args.imports = content
                        .parse_terminated(ModuleItem::parse, Token![,])?
                        .into_iter()
                        .collect();
                }
                "bindings" => {
                    args.bindings = content
                        .parse_terminated(BindingItem::parse, Token![,])?
                        .into_iter()
                        .collect();
                }
                "providers" => {
                    args.providers = content
                        .parse_terminated(ModuleItem::parse, Token![,])?
                        .into_iter()
                        .collect();
                }
                "controllers" => {
                    args.controllers = content
                        .parse_terminated(ModuleItem::parse, Token![,])?
                        .into_iter()
                        .collect();
                }
                other => {
                    return Err(syn::Error::new(
                        name.span(),
                        format!(
                            "unknown module section `{other}`, expected one of \
                             imports, bindings, providers, controllers"
                        ),
                    ))
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

pub fn module_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ModuleArgs);
    let input = parse_macro_input!(item as ItemStruct);
    let expanded = generate_module_impl(&args, &input);

    TokenStream::from(expanded)
}

fn generate_module_impl(args: &ModuleArgs, input: &ItemStruct) -> TokenStream2 {
    let module_name = &input.ident;

    let binding_registrations = args.bindings.iter().map(|binding| {
        let trait_type = &binding.trait_type;
        let impl_type = &binding.impl_type;
        quote! {
            container.register_trait::<#trait_type, #impl_type, _>(|i| {
                i as ::std::sync::Arc<#trait_type>
            });
        }
    });

    let import_registrations = args.imports.iter().map(|item| {
        let path = &item.path;
        let attrs = &item.attrs;
        quote! {
            #(#attrs)*
            <#path as ::healthplan::Module>::register(container)?;
        }
    });

    // Providers and controllers share the same registration, they only differ in order
    let instance_registrations = args
        .providers
        .iter()
        .chain(args.controllers.iter())
        .map(|item| {
            let path = &item.path;
            let attrs = &item.attrs;
            quote! {
                #(#attrs)*
                {
                    let instance = <#path as ::healthplan::Injectable>::inject(container)?;
                    container.register(instance);
                }
            }
        });

    quote! {
        #input

        impl ::healthplan::Module for #module_name {
            fn register(
                container: &mut ::healthplan::Container
            ) -> ::healthplan::Result<()> {
                #(#binding_registrations)*
                #(#import_registrations)*
                #(#instance_registrations)*
                Ok(())
            }
        }

        impl #module_name {
            /// Create a new container holding only this module's registrations
            pub fn create_container() -> ::healthplan::Result<::healthplan::Container> {
                let mut container = ::healthplan::Container::new();
                <Self as ::healthplan::Module>::register(&mut container)?;
                Ok(container)
            }
        }
    }
}
