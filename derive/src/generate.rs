use proc_macro2::{Span, TokenStream};
use quote::quote;
use std::env;
use std::fs;
use std::path::Path;
use syn::{Attribute, DeriveInput, Ident, Lit, Meta};

use gbnf::{Element, ElementKind, Grammar};

use crate::error::{DeriveError, Result};

const GBNF_FILE_ATTR: &str = "gbnf_file";
const GBNF_INLINE_ATTR: &str = "gbnf_inline";

pub fn generate(ast: DeriveInput) -> TokenStream {
    let grammar = match grammar_from_ast(&ast) {
        Ok(grammar) => grammar,
        Err(e) => return syn::Error::new_spanned(&ast.ident, e).to_compile_error(),
    };
    let name = ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let symbols = generate_symbols(&grammar);
    let rules = generate_rules(&grammar);

    quote! {
        impl #impl_generics ::gbnf::StaticGrammar for #name #ty_generics #where_clause {
            const SYMBOLS: &'static [(&'static str, ::gbnf::RuleId)] = #symbols;
            const RULES: &'static [&'static [::gbnf::Element]] = #rules;
        }
    }
}

/// Load and compile a grammar from a derive attribute.
///
/// There must be exactly 1 attribute specifying the grammar source. The source
/// may either be written inline, or a path to a grammar file relative to the
/// crate root.
fn grammar_from_ast(ast: &DeriveInput) -> Result<Grammar> {
    let sources: Vec<&Attribute> = ast
        .attrs
        .iter()
        .filter(|attr| match attr.parse_meta() {
            Ok(Meta::NameValue(val)) => {
                val.path.is_ident(GBNF_FILE_ATTR) || val.path.is_ident(GBNF_INLINE_ATTR)
            }
            _ => false,
        })
        .collect();

    let source_attr = match sources.len() {
        0 => return Err(DeriveError::MissingGrammarSource),
        1 => sources[0],
        _ => return Err(DeriveError::MultipleGrammarSources),
    };

    let src = match source_attr.parse_meta()? {
        Meta::NameValue(val) => match val.lit {
            Lit::Str(s) if val.path.is_ident(GBNF_FILE_ATTR) => {
                let root = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
                let path = Path::new(&root).join(s.value());
                fs::read_to_string(&path).map_err(|e| {
                    DeriveError::ReadFile(format!("{}, {}", path.to_string_lossy(), e))
                })?
            }
            Lit::Str(s) => s.value(),
            _ => return Err(DeriveError::Other("attribute not a string".to_owned())),
        },
        _ => return Err(DeriveError::Other("attribute not a name value".to_owned())),
    };

    Ok(gbnf::compile(&src)?)
}

fn generate_symbols(grammar: &Grammar) -> TokenStream {
    let entries = grammar
        .symbols()
        .into_iter()
        .map(|(name, id)| quote! { (#name, #id) });
    quote! {
        &[ #( #entries ),* ]
    }
}

fn generate_rules(grammar: &Grammar) -> TokenStream {
    let bodies = grammar.rules().map(|body| {
        let elements = body.iter().map(generate_element);
        quote! { &[ #( #elements ),* ] }
    });
    quote! {
        &[ #( #bodies ),* ]
    }
}

fn generate_element(el: &Element) -> TokenStream {
    let kind = Ident::new(kind_name(el.kind), Span::call_site());
    let value = el.value;
    quote! { ::gbnf::Element::new(::gbnf::ElementKind::#kind, #value) }
}

fn kind_name(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::End => "End",
        ElementKind::Alt => "Alt",
        ElementKind::RuleRef => "RuleRef",
        ElementKind::Char => "Char",
        ElementKind::CharNot => "CharNot",
        ElementKind::CharRngUpper => "CharRngUpper",
        ElementKind::CharAlt => "CharAlt",
    }
}
