//! Compiles BNF-like grammar source into flat rule tables for constrained
//! decoding.
//!
//! ```
//! let grammar = gbnf::compile("root ::= [0-9]+").unwrap();
//! assert_eq!(grammar.symbols(), vec![("root", 0), ("root_1", 1)]);
//! ```

pub mod grammar;
mod options;

pub use grammar::{
    desugar_quantifier, Compiler, Element, ElementKind, Error, Grammar, Position, Quantifier,
    Result, RuleId, Rules, SymbolTable, SyntaxError,
};
pub use options::{CompileOptions, DEFAULT_MAX_NESTING};

/// Compile grammar source with the default options.
pub fn compile(src: &str) -> Result<Grammar> {
    Compiler::default().compile(src)
}

/// A grammar compiled ahead of time into static tables, usually by
/// `#[derive(Grammar)]`.
pub trait StaticGrammar {
    /// (name, id) pairs sorted by name.
    const SYMBOLS: &'static [(&'static str, RuleId)];
    /// Rule bodies indexed by id.
    const RULES: &'static [&'static [Element]];

    fn rule_id(name: &str) -> Option<RuleId> {
        Self::SYMBOLS
            .binary_search_by(|(n, _)| n.cmp(&name))
            .ok()
            .map(|idx| Self::SYMBOLS[idx].1)
    }

    fn rule(id: RuleId) -> Option<&'static [Element]> {
        Self::RULES.get(id as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Digits;

    impl StaticGrammar for Digits {
        const SYMBOLS: &'static [(&'static str, RuleId)] = &[("root", 0), ("root_1", 1)];
        const RULES: &'static [&'static [Element]] = &[
            &[Element::rule_ref(1), Element::END],
            &[
                Element::new(ElementKind::Char, 48),
                Element::new(ElementKind::CharRngUpper, 57),
                Element::rule_ref(1),
                Element::ALT,
                Element::new(ElementKind::Char, 48),
                Element::new(ElementKind::CharRngUpper, 57),
                Element::END,
            ],
        ];
    }

    #[test]
    fn static_tables_match_compiled() {
        let g = compile("root ::= [0-9]+").unwrap();
        assert_eq!(g.symbols(), Digits::SYMBOLS.to_vec());
        for (id, body) in g.rules().enumerate() {
            assert_eq!(Some(body), Digits::rule(id as RuleId));
        }
    }

    #[test]
    fn static_lookup_by_name() {
        assert_eq!(Digits::rule_id("root_1"), Some(1));
        assert_eq!(Digits::rule_id("root"), Some(0));
        assert_eq!(Digits::rule_id("other"), None);
        assert_eq!(Digits::rule(2), None);
    }
}
