//! Procedural macros for the aoc-solver library

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{DeriveInput, Lit, LitInt, parse_macro_input};

/// Derive macro implementing `Solver` by dispatching to `PartSolver<N>` impls
///
/// # Attributes
///
/// - `#[aoc_solver(max_parts = N)]`: required, `N` in `1..=25`. Every part in
///   `1..=N` must have a matching `impl PartSolver<part> for Type`.
///
/// # Example
///
/// ```ignore
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 2)]
/// struct Day1;
///
/// impl AocParser for Day1 { /* ... */ }
/// impl PartSolver<1> for Day1 { /* ... */ }
/// impl PartSolver<2> for Day1 { /* ... */ }
/// ```
#[proc_macro_derive(AocSolver, attributes(aoc_solver))]
pub fn derive_aoc_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_aoc_solver(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_aoc_solver(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("aoc_solver"))
        .ok_or_else(|| {
            syn::Error::new_spanned(name, "AocSolver requires #[aoc_solver(max_parts = N)]")
        })?;

    let mut max_parts: Option<u8> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("max_parts") {
            let lit: LitInt = meta.value()?.parse()?;
            max_parts = Some(lit.base10_parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported aoc_solver attribute"))
        }
    })?;

    let max_parts = match max_parts {
        Some(n @ 1..=25) => n,
        Some(_) => {
            return Err(syn::Error::new_spanned(attr, "max_parts must be in 1..=25"));
        }
        None => return Err(syn::Error::new_spanned(attr, "missing max_parts")),
    };

    let arms = (1..=max_parts).map(|part| {
        let part_lit = LitInt::new(&part.to_string(), Span::call_site());
        quote! {
            #part_lit => <Self as ::aoc_solver::PartSolver<#part_lit>>::solve(shared),
        }
    });

    Ok(quote! {
        impl #impl_generics ::aoc_solver::Solver for #name #ty_generics #where_clause {
            const PARTS: u8 = #max_parts;

            fn solve_part(
                shared: &mut <Self as ::aoc_solver::AocParser>::SharedData<'_>,
                part: u8,
            ) -> ::core::result::Result<::std::string::String, ::aoc_solver::SolveError> {
                match part {
                    #(#arms)*
                    _ => ::core::result::Result::Err(
                        ::aoc_solver::SolveError::PartNotImplemented(part)
                    ),
                }
            }
        }
    })
}

/// Derive macro for automatically registering solvers with the plugin system
///
/// # Attributes
///
/// - `year`: Required. The Advent of Code year (e.g., 2023)
/// - `day`: Required. The day number (1-25)
/// - `tags`: Optional. Array of string literals for filtering (e.g., ["easy", "parsing"])
///
/// The type must be a unit struct implementing `Solver`; otherwise the
/// generated trait-bound check fails to compile with a pointer at the type.
///
/// # Example
///
/// ```ignore
/// #[derive(AocSolver, AutoRegisterSolver)]
/// #[aoc_solver(max_parts = 2)]
/// #[aoc(year = 2023, day = 1, tags = ["easy", "parsing"])]
/// pub struct Solver;
/// ```
#[proc_macro_derive(AutoRegisterSolver, attributes(aoc))]
pub fn derive_auto_register_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_auto_register(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_auto_register(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let aoc_attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("aoc"))
        .ok_or_else(|| {
            syn::Error::new_spanned(name, "AutoRegisterSolver requires #[aoc(year = .., day = ..)]")
        })?;

    let mut year: Option<u16> = None;
    let mut day: Option<u8> = None;
    let mut tags: Vec<String> = Vec::new();

    aoc_attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("year") {
            let lit: LitInt = meta.value()?.parse()?;
            year = Some(lit.base10_parse()?);
        } else if meta.path.is_ident("day") {
            let lit: LitInt = meta.value()?.parse()?;
            day = Some(lit.base10_parse()?);
        } else if meta.path.is_ident("tags") {
            // tags = ["a", "b"]
            let _ = meta.value()?;
            let content;
            syn::bracketed!(content in meta.input);
            while !content.is_empty() {
                match content.parse::<Lit>()? {
                    Lit::Str(lit_str) => tags.push(lit_str.value()),
                    other => return Err(syn::Error::new_spanned(other, "tags must be strings")),
                }
                if content.peek(syn::Token![,]) {
                    let _: syn::Token![,] = content.parse()?;
                }
            }
        } else {
            return Err(meta.error("unsupported aoc attribute"));
        }
        Ok(())
    })?;

    let year = year.ok_or_else(|| syn::Error::new_spanned(aoc_attr, "missing `year`"))?;
    let day = day.ok_or_else(|| syn::Error::new_spanned(aoc_attr, "missing `day`"))?;

    Ok(quote! {
        const _: () = {
            trait MustImplementSolver: ::aoc_solver::Solver {}
            impl MustImplementSolver for #name {}
        };

        ::aoc_solver::inventory::submit! {
            ::aoc_solver::SolverPlugin {
                year: #year,
                day: #day,
                solver: &#name,
                tags: &[#(#tags),*],
            }
        }
    })
}
