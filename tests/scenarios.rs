//! Compiles the expression grammars used by the reference parser tests and
//! checks the exact tables.

use anyhow::Result;
use gbnf::{Element, ElementKind, Grammar, RuleId};
use pretty_assertions::assert_eq;

use gbnf::ElementKind::*;

const EXPR_GRAMMAR: &str = r#"root  ::= (expr "=" term "\n")+
expr  ::= term ([-+*/] term)*
term  ::= [0-9]+"#;

const EXTRA_EXPR_GRAMMAR: &str = r#"
    root  ::= (expr "=" ws term "\n")+
    expr  ::= term ([-+*/] term)*
    term  ::= ident | num | "(" ws expr ")" ws
    ident ::= [a-z] [a-z0-9_]* ws
    num   ::= [0-9]+ ws
    ws    ::= [ \t\n]*
"#;

fn e(kind: ElementKind, value: u32) -> Element {
    Element::new(kind, value)
}

fn bodies(g: &Grammar) -> Vec<Vec<Element>> {
    g.rules().map(|body| body.to_vec()).collect()
}

/// Every reference points at a defined rule and every body ends with its
/// only END.
fn assert_well_formed(g: &Grammar) {
    for (id, body) in g.rules().enumerate() {
        assert!(!body.is_empty(), "rule {} has no body", id);
        let ends = body.iter().filter(|el| el.kind == End).count();
        assert_eq!(ends, 1, "rule {}: {:?}", id, body);
        assert_eq!(body.last().map(|el| el.kind), Some(End));
        for el in body.iter().filter(|el| el.kind == RuleRef) {
            assert!(g.rule(el.value).is_some(), "dangling ref in rule {}", id);
        }
    }
}

#[test]
fn expr_grammar_symbols() -> Result<()> {
    let g: Grammar = EXPR_GRAMMAR.parse()?;
    assert_eq!(
        g.symbols(),
        vec![
            ("expr", 2),
            ("expr_5", 5),
            ("expr_6", 6),
            ("root", 0),
            ("root_1", 1),
            ("root_4", 4),
            ("term", 3),
            ("term_7", 7),
        ]
    );
    assert_eq!(g.len(), 8);
    Ok(())
}

#[test]
fn expr_grammar_rules() -> Result<()> {
    let g: Grammar = EXPR_GRAMMAR.parse()?;
    let expected = vec![
        vec![e(RuleRef, 4), e(End, 0)],
        vec![e(RuleRef, 2), e(Char, 61), e(RuleRef, 3), e(Char, 10), e(End, 0)],
        vec![e(RuleRef, 3), e(RuleRef, 6), e(End, 0)],
        vec![e(RuleRef, 7), e(End, 0)],
        vec![e(RuleRef, 1), e(RuleRef, 4), e(Alt, 0), e(RuleRef, 1), e(End, 0)],
        vec![e(Char, 45), e(CharAlt, 43), e(CharAlt, 42), e(CharAlt, 47), e(RuleRef, 3), e(End, 0)],
        vec![e(RuleRef, 5), e(RuleRef, 6), e(Alt, 0), e(End, 0)],
        vec![e(Char, 48), e(CharRngUpper, 57), e(RuleRef, 7), e(Alt, 0), e(Char, 48), e(CharRngUpper, 57), e(End, 0)],
    ];
    assert_eq!(bodies(&g), expected);
    assert_well_formed(&g);
    Ok(())
}

#[test]
fn extra_expr_grammar_symbols() -> Result<()> {
    let g: Grammar = EXTRA_EXPR_GRAMMAR.parse()?;
    assert_eq!(
        g.symbols(),
        vec![
            ("expr", 2),
            ("expr_6", 6),
            ("expr_7", 7),
            ("ident", 8),
            ("ident_10", 10),
            ("num", 9),
            ("num_11", 11),
            ("root", 0),
            ("root_1", 1),
            ("root_5", 5),
            ("term", 4),
            ("ws", 3),
            ("ws_12", 12),
        ]
    );
    assert_eq!(g.symbol_id("ws"), Some(3));
    Ok(())
}

#[test]
fn extra_expr_grammar_rules() -> Result<()> {
    let g: Grammar = EXTRA_EXPR_GRAMMAR.parse()?;
    let expected = vec![
        vec![e(RuleRef, 5), e(End, 0)],
        vec![e(RuleRef, 2), e(Char, 61), e(RuleRef, 3), e(RuleRef, 4), e(Char, 10), e(End, 0)],
        vec![e(RuleRef, 4), e(RuleRef, 7), e(End, 0)],
        vec![e(RuleRef, 12), e(End, 0)],
        vec![e(RuleRef, 8), e(Alt, 0), e(RuleRef, 9), e(Alt, 0), e(Char, 40), e(RuleRef, 3), e(RuleRef, 2), e(Char, 41), e(RuleRef, 3), e(End, 0)],
        vec![e(RuleRef, 1), e(RuleRef, 5), e(Alt, 0), e(RuleRef, 1), e(End, 0)],
        vec![e(Char, 45), e(CharAlt, 43), e(CharAlt, 42), e(CharAlt, 47), e(RuleRef, 4), e(End, 0)],
        vec![e(RuleRef, 6), e(RuleRef, 7), e(Alt, 0), e(End, 0)],
        vec![e(Char, 97), e(CharRngUpper, 122), e(RuleRef, 10), e(RuleRef, 3), e(End, 0)],
        vec![e(RuleRef, 11), e(RuleRef, 3), e(End, 0)],
        vec![e(Char, 97), e(CharRngUpper, 122), e(CharAlt, 48), e(CharRngUpper, 57), e(CharAlt, 95), e(RuleRef, 10), e(Alt, 0), e(End, 0)],
        vec![e(Char, 48), e(CharRngUpper, 57), e(RuleRef, 11), e(Alt, 0), e(Char, 48), e(CharRngUpper, 57), e(End, 0)],
        vec![e(Char, 32), e(CharAlt, 9), e(CharAlt, 10), e(RuleRef, 12), e(Alt, 0), e(End, 0)],
    ];
    assert_eq!(bodies(&g), expected);
    assert_well_formed(&g);
    Ok(())
}

#[test]
fn ids_follow_first_appearance() -> Result<()> {
    let g = gbnf::compile("b ::= a c\nc ::= \"c\"\na ::= \"a\"")?;
    let by_id: Vec<(RuleId, &str)> = g
        .symbol_table()
        .iter()
        .map(|(name, id)| (id, name))
        .collect();
    assert_eq!(by_id, vec![(0, "b"), (1, "a"), (2, "c")]);
    Ok(())
}

#[test]
fn recompiling_is_stable() -> Result<()> {
    let a = gbnf::compile(EXTRA_EXPR_GRAMMAR)?;
    let b = gbnf::compile(EXTRA_EXPR_GRAMMAR)?;
    assert_eq!(a, b);
    assert_eq!(a.flatten(), b.flatten());
    Ok(())
}

#[test]
fn parts_handed_to_the_caller() -> Result<()> {
    let (symbols, rules) = gbnf::compile(EXPR_GRAMMAR)?.into_parts();
    assert_eq!(symbols.len(), rules.len());
    let term_7 = symbols.get("term_7").expect("synthetic rule");
    assert_eq!(
        rules.get(term_7),
        Some(&[e(Char, 48), e(CharRngUpper, 57), e(RuleRef, 7), e(Alt, 0), e(Char, 48), e(CharRngUpper, 57), e(End, 0)][..])
    );
    Ok(())
}

#[test]
fn missing_rule_is_reported() {
    let err = gbnf::compile("root ::= expr\nexpr ::= missing \"+\" expr").unwrap_err();
    assert_eq!(err, gbnf::Error::UndefinedRule("missing".to_owned()));
    assert_eq!(err.to_string(), "undefined rule identifier 'missing'");
}

#[test]
fn independent_compilations_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| gbnf::compile(EXTRA_EXPR_GRAMMAR)))
        .collect();
    let grammars: Vec<Grammar> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert!(grammars.windows(2).all(|w| w[0] == w[1]));
}
