use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Registers the component types held by an enum's variants as a closed
/// component set. Variant order defines the tags.
#[proc_macro_derive(ComponentSet)]
pub fn derive_component_set_fn(input: TokenStream) -> TokenStream {
    let main_crate = quote!(::typed_collection);

    let DeriveInput {
        ident,
        vis,
        data,
        generics,
        ..
    } = parse_macro_input!(input as DeriveInput);

    if !generics.params.is_empty() {
        panic!("A component set can not be generic!");
    }

    let variants = if let Data::Enum(data) = data {
        data.variants
    } else {
        panic!("Not an enumeration!");
    };

    if variants.is_empty() {
        panic!("A component set needs at least one component!");
    }
    if variants.len() > 256 {
        panic!("A component set holds at most 256 components!");
    }

    let mut names = Vec::with_capacity(variants.len());
    let mut types = Vec::with_capacity(variants.len());

    for variant in &variants {
        match &variant.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                names.push(variant.ident.clone());
                types.push(fields.unnamed[0].ty.clone());
            }
            _ => panic!("Variant `{}` must hold exactly one component!", variant.ident),
        }
    }

    let count = names.len();
    let tags: Vec<u8> = (0..count).map(|i| i as u8).collect();
    let indices: Vec<usize> = (0..count).collect();
    let fields: Vec<_> = (0..count).map(|i| format_ident!("c{}", i)).collect();

    let arenas_ident = format_ident!("{}Arenas", ident);
    let ref_ident = format_ident!("{}Ref", ident);
    let mut_ident = format_ident!("{}Mut", ident);

    let arena_ty: Vec<_> = types
        .iter()
        .map(|ty| quote!(<A as #main_crate::ArenaKind>::Arena<#ty>))
        .collect();
    let arena_trait: Vec<_> = types
        .iter()
        .map(|ty| quote!(#main_crate::Arena<#ty>))
        .collect();

    let ref_doc = format!("A shared reference to one component of [`{}`].", ident);
    let mut_doc = format!("A mutable reference to one component of [`{}`].", ident);

    quote! {
        #[doc(hidden)]
        #vis struct #arenas_ident<A: #main_crate::ArenaKind> {
            #( #fields: #arena_ty, )*
        }

        #[doc = #ref_doc]
        #vis enum #ref_ident<'a> {
            #( #names(&'a #types), )*
        }

        #[doc = #mut_doc]
        #vis enum #mut_ident<'a> {
            #( #names(&'a mut #types), )*
        }

        impl #main_crate::ComponentSet for #ident {
            const COUNT: usize = #count;

            type Arenas<A: #main_crate::ArenaKind> = #arenas_ident<A>;
            type Ref<'a> = #ref_ident<'a> where Self: 'a;
            type Mut<'a> = #mut_ident<'a> where Self: 'a;

            fn new_arenas<A: #main_crate::ArenaKind>(capacities: &[usize]) -> Self::Arenas<A> {
                #arenas_ident {
                    #( #fields: <#arena_ty as #arena_trait>::with_capacity(capacities[#indices]), )*
                }
            }

            fn tag(&self) -> #main_crate::Tag {
                match self {
                    #( #ident::#names(_) => #tags, )*
                }
            }

            fn type_name(tag: #main_crate::Tag) -> &'static str {
                match tag {
                    #( #tags => ::core::any::type_name::<#types>(), )*
                    _ => "<unregistered>",
                }
            }

            fn occupancy<A: #main_crate::ArenaKind>(
                arenas: &Self::Arenas<A>,
                tag: #main_crate::Tag,
            ) -> (usize, usize) {
                match tag {
                    #( #tags => {
                        let arena = &arenas.#fields;
                        (
                            <#arena_ty as #arena_trait>::len(arena),
                            <#arena_ty as #arena_trait>::capacity(arena),
                        )
                    } )*
                    _ => #main_crate::__unregistered_tag(tag),
                }
            }

            fn insert_into<A: #main_crate::ArenaKind>(
                self,
                arenas: &mut Self::Arenas<A>,
                bucket: usize,
            ) -> u32 {
                match self {
                    #( #ident::#names(value) => <#arena_ty as #arena_trait>::insert(&mut arenas.#fields, value, bucket), )*
                }
            }

            fn get_ref<'a, A: #main_crate::ArenaKind>(
                arenas: &'a Self::Arenas<A>,
                tag: #main_crate::Tag,
                index: u32,
            ) -> ::core::option::Option<Self::Ref<'a>> {
                match tag {
                    #( #tags => <#arena_ty as #arena_trait>::get(&arenas.#fields, index).map(#ref_ident::#names), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn get_mut<'a, A: #main_crate::ArenaKind>(
                arenas: &'a mut Self::Arenas<A>,
                tag: #main_crate::Tag,
                index: u32,
            ) -> ::core::option::Option<Self::Mut<'a>> {
                match tag {
                    #( #tags => <#arena_ty as #arena_trait>::get_mut(&mut arenas.#fields, index).map(#mut_ident::#names), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn remove_from<A: #main_crate::ArenaKind>(
                arenas: &mut Self::Arenas<A>,
                tag: #main_crate::Tag,
                index: u32,
            ) -> ::core::option::Option<#main_crate::Removed<Self>> {
                match tag {
                    #( #tags => <#arena_ty as #arena_trait>::remove(&mut arenas.#fields, index)
                        .map(|removed| removed.map(#ident::#names)), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn clear<A: #main_crate::ArenaKind>(arenas: &mut Self::Arenas<A>) {
                #( <#arena_ty as #arena_trait>::clear(&mut arenas.#fields); )*
            }
        }

        #(
            impl #main_crate::Component<#ident> for #types {
                const TAG: #main_crate::Tag = #tags;

                fn arena<A: #main_crate::ArenaKind>(
                    arenas: &<#ident as #main_crate::ComponentSet>::Arenas<A>,
                ) -> &#arena_ty {
                    &arenas.#fields
                }

                fn arena_mut<A: #main_crate::ArenaKind>(
                    arenas: &mut <#ident as #main_crate::ComponentSet>::Arenas<A>,
                ) -> &mut #arena_ty {
                    &mut arenas.#fields
                }
            }

            impl ::core::convert::From<#types> for #ident {
                fn from(component: #types) -> Self {
                    #ident::#names(component)
                }
            }
        )*
    }
    .into()
}
