use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

pub mod error;
mod lex;
mod parser;
mod position;
mod rules;
mod symbols;

pub use error::{Error, Result, SyntaxError};
pub use parser::{desugar_quantifier, Compiler, Quantifier};
pub use position::Position;
pub use rules::Rules;
pub use symbols::SymbolTable;

/// Numeric handle of a rule, named or synthetic.
pub type RuleId = u32;

/// What a grammar element matches. Discriminants are the tags the matching
/// engine expects.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ElementKind {
    /// End of a rule body.
    End = 0,
    /// Start of an alternate body of the same rule.
    Alt = 1,
    /// Non-terminal, value is the referenced rule id.
    RuleRef = 2,
    /// Terminal code point, or the lower bound of a range.
    Char = 3,
    /// Inverse of `Char`, starts a negated class.
    CharNot = 4,
    /// Upper bound (inclusive) of a range started by the previous element.
    CharRngUpper = 5,
    /// Another code point accepted at the same position.
    CharAlt = 6,
}

impl ElementKind {
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Kinds that describe a code point match.
    pub fn is_char(self) -> bool {
        matches!(
            self,
            ElementKind::Char
                | ElementKind::CharNot
                | ElementKind::CharRngUpper
                | ElementKind::CharAlt
        )
    }
}

impl TryFrom<u32> for ElementKind {
    type Error = u32;

    fn try_from(v: u32) -> std::result::Result<Self, u32> {
        Ok(match v {
            0 => ElementKind::End,
            1 => ElementKind::Alt,
            2 => ElementKind::RuleRef,
            3 => ElementKind::Char,
            4 => ElementKind::CharNot,
            5 => ElementKind::CharRngUpper,
            6 => ElementKind::CharAlt,
            other => return Err(other),
        })
    }
}

/// A single instruction of a compiled rule body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Element {
    pub kind: ElementKind,
    pub value: u32,
}

impl Element {
    pub const END: Element = Element::new(ElementKind::End, 0);
    pub const ALT: Element = Element::new(ElementKind::Alt, 0);

    pub const fn new(kind: ElementKind, value: u32) -> Self {
        Element { kind, value }
    }

    pub const fn rule_ref(id: RuleId) -> Self {
        Element::new(ElementKind::RuleRef, id)
    }

    pub const fn char(c: char) -> Self {
        Element::new(ElementKind::Char, c as u32)
    }
}

/// A compiled grammar: rule names with their ids, and a body per id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    symbols: SymbolTable,
    rules: Rules,
}

impl Grammar {
    pub(crate) fn from_parts(symbols: SymbolTable, rules: Rules) -> Self {
        Grammar { symbols, rules }
    }

    pub fn symbol_id(&self, name: &str) -> Option<RuleId> {
        self.symbols.get(name)
    }

    /// (name, id) pairs sorted by name.
    pub fn symbols(&self) -> Vec<(&str, RuleId)> {
        self.symbols.entries_sorted_by_name()
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn rule(&self, id: RuleId) -> Option<&[Element]> {
        self.rules.get(id)
    }

    /// Rule bodies in id order.
    pub fn rules(&self) -> impl Iterator<Item = &[Element]> {
        self.rules.iter()
    }

    /// Number of rule ids.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn into_parts(self) -> (SymbolTable, Rules) {
        (self.symbols, self.rules)
    }

    /// All bodies back to back, with the offset each rule starts at.
    pub fn flatten(&self) -> (Vec<Element>, Vec<usize>) {
        let mut elements = Vec::new();
        let mut offsets = Vec::with_capacity(self.rules.len());
        for body in self.rules.iter() {
            offsets.push(elements.len());
            elements.extend_from_slice(body);
        }
        (elements, offsets)
    }
}

impl FromStr for Grammar {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        crate::compile(s)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (id, body) in self.rules.iter().enumerate() {
            if body.is_empty() {
                continue;
            }
            let name = self.symbols.name(id as RuleId).unwrap_or("?");
            write!(f, "{} ::=", name)?;
            // Last element is always the END.
            let body = &body[..body.len() - 1];
            let mut empty_alt = true;
            for (i, elem) in body.iter().enumerate() {
                if elem.kind == ElementKind::Alt && empty_alt {
                    f.write_str(" \"\"")?;
                }
                empty_alt = elem.kind == ElementKind::Alt;
                match elem.kind {
                    ElementKind::End => return Err(fmt::Error),
                    ElementKind::Alt => f.write_str(" |")?,
                    ElementKind::RuleRef => {
                        let name = self.symbols.name(elem.value).unwrap_or("?");
                        write!(f, " {}", name)?
                    }
                    ElementKind::Char => f.write_str(" [")?,
                    ElementKind::CharNot => f.write_str(" [^")?,
                    ElementKind::CharRngUpper => f.write_char('-')?,
                    ElementKind::CharAlt => {}
                }
                if elem.kind.is_char() {
                    write_class_char(f, elem.value)?;
                    let continues = body.get(i + 1).map_or(false, |next| {
                        matches!(next.kind, ElementKind::CharAlt | ElementKind::CharRngUpper)
                    });
                    if !continues {
                        f.write_char(']')?;
                    }
                }
            }
            if empty_alt {
                f.write_str(" \"\"")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Write a code point so that it reads back the same inside a class.
fn write_class_char(f: &mut fmt::Formatter, value: u32) -> fmt::Result {
    match std::char::from_u32(value) {
        Some('\n') => f.write_str("\\n"),
        Some('\r') => f.write_str("\\r"),
        Some('\t') => f.write_str("\\t"),
        Some(c @ '\\') | Some(c @ '[') | Some(c @ ']') | Some(c @ '-') | Some(c @ '"') => {
            write!(f, "\\{}", c)
        }
        Some('^') => f.write_str("\\x5E"),
        Some(c) if !c.is_control() => f.write_char(c),
        _ if value <= 0xFF => write!(f, "\\x{:02X}", value),
        _ if value <= 0xFFFF => write!(f, "\\u{:04X}", value),
        _ => write!(f, "\\U{:08X}", value),
    }
}
