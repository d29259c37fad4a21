use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error, Fields, Type};

#[proc_macro_derive(FromVariants)]
/// Generate `From<Node> for Enum` for every variant `Node(Node)` that wraps a node of the same name.
pub fn derive_from_variants(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return Error::new_spanned(name, "FromVariants can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let implementations = data_enum.variants.iter().filter_map(|variant| {
        let Fields::Unnamed(fields) = &variant.fields else {
            return None;
        };
        if fields.unnamed.len() != 1 {
            return None;
        }
        let field_type = &fields.unnamed[0].ty;
        // Compare on the last path segment so `nodes::Assignment` still pairs with `Assignment`.
        let Type::Path(type_path) = field_type else {
            return None;
        };
        let segment = type_path.path.segments.last()?;
        if segment.ident != variant.ident || !segment.arguments.is_empty() {
            return None;
        }
        let variant_name = &variant.ident;
        Some(quote! {
            impl From<#field_type> for #name {
                fn from(value: #field_type) -> Self {
                    #name::#variant_name(value)
                }
            }
        })
    });

    quote! {
        #(#implementations)*
    }
    .into()
}
