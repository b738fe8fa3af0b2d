//! Proc macro for compiling grammars at build time.
//!
//! ```ignore
//! #[derive(Grammar)]
//! #[gbnf_inline = "root ::= [0-9]+"]
//! struct Digits;
//!
//! assert_eq!(Digits::rule_id("root"), Some(0));
//! ```
//!
//! Grammar errors are reported as compile errors on the deriving type.

use syn::{parse_macro_input, DeriveInput};

mod error;
mod generate;

#[proc_macro_derive(Grammar, attributes(gbnf_file, gbnf_inline))]
pub fn derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    generate::generate(ast).into()
}
