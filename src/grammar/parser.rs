use tracing::debug;

use crate::options::CompileOptions;

use super::error::{Error, Result, SyntaxError};
use super::lex;
use super::position::Cursor;
use super::{Element, ElementKind, Grammar, RuleId, Rules, SymbolTable};

/// Postfix repetition operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Quantifier {
    /// `?`
    Optional,
    /// `*`
    Many0,
    /// `+`
    Many1,
}

impl Quantifier {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '?' => Some(Quantifier::Optional),
            '*' => Some(Quantifier::Many0),
            '+' => Some(Quantifier::Many1),
            _ => None,
        }
    }
}

/// Body of the synthetic rule `id` that repeats `operand` according to `q`.
///
/// Repeating bodies are right recursive, with the recursive alternative
/// first:
///
/// - `?`: `E | <empty>`
/// - `*`: `E id | <empty>`
/// - `+`: `E id | E`
pub fn desugar_quantifier(q: Quantifier, operand: &[Element], id: RuleId) -> Vec<Element> {
    let mut body = operand.to_vec();
    if q != Quantifier::Optional {
        body.push(Element::rule_ref(id));
    }
    body.push(Element::ALT);
    if q == Quantifier::Many1 {
        body.extend_from_slice(operand);
    }
    body.push(Element::END);
    body
}

/// Compiles grammar source into a `Grammar`.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Compiler { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile `src`. Nothing is returned on failure; tables are only handed
    /// out once every referenced rule has a body.
    pub fn compile(&self, src: &str) -> Result<Grammar> {
        let mut state = ParseState::new(src, &self.options);
        state.parse_grammar()?;
        state.finish()
    }
}

/// State for one compilation.
struct ParseState<'a, 'o> {
    cursor: Cursor<'a>,
    symbols: SymbolTable,
    rules: Rules,
    options: &'o CompileOptions,
    depth: usize,
}

impl<'a, 'o> ParseState<'a, 'o> {
    fn new(src: &'a str, options: &'o CompileOptions) -> Self {
        ParseState {
            cursor: Cursor::new(src),
            symbols: SymbolTable::new(),
            rules: Rules::new(),
            options,
            depth: 0,
        }
    }

    fn error(&self, kind: SyntaxError) -> Error {
        self.error_at(kind, self.cursor.offset())
    }

    fn error_at(&self, kind: SyntaxError, offset: usize) -> Error {
        Error::Syntax {
            kind,
            pos: self.cursor.position_at(offset),
        }
    }

    fn skip_space(&mut self, newline_ok: bool) {
        let rest = lex::space(self.cursor.rest(), newline_ok);
        self.cursor.advance_to(rest);
    }

    fn parse_name(&mut self) -> Result<&'a str> {
        match lex::name(self.cursor.rest()) {
            Ok((rest, name)) => {
                self.cursor.advance_to(rest);
                Ok(name)
            }
            Err(_) => Err(self.error(SyntaxError::ExpectingName)),
        }
    }

    /// Decode the next char of a literal or class.
    fn parse_char(&mut self) -> Result<u32> {
        let start = self.cursor.offset();
        match lex::decode_char(self.cursor.rest()) {
            Ok((rest, c)) => {
                self.cursor.advance_to(rest);
                Ok(c)
            }
            Err(kind) => Err(self.error_at(kind, start)),
        }
    }

    fn parse_grammar(&mut self) -> Result<()> {
        self.skip_space(true);
        if self.cursor.is_empty() {
            return Err(Error::EmptyGrammar);
        }
        while !self.cursor.is_empty() {
            self.parse_rule()?;
        }
        Ok(())
    }

    /// `name ::= alternates`, terminated by a line break or the end of input.
    fn parse_rule(&mut self) -> Result<()> {
        let start = self.cursor.offset();
        let name = self.parse_name()?;
        self.skip_space(false);
        let id = self.symbols.id_of(name);
        if self.rules.is_defined(id) {
            return Err(Error::DuplicateRule {
                name: name.to_owned(),
                pos: self.cursor.position_at(start),
            });
        }

        if !self.cursor.match_str("::=") {
            return Err(self.error(SyntaxError::ExpectingDefinition));
        }
        self.skip_space(true);

        self.parse_alternates(name, id, false)?;

        if self.cursor.match_char('\r') {
            self.cursor.match_char('\n');
        } else if !self.cursor.match_char('\n') && !self.cursor.is_empty() {
            return Err(self.error(SyntaxError::ExpectingNewline));
        }
        self.skip_space(true);

        debug!(rule = name, id, "compiled rule");
        Ok(())
    }

    /// Sequences separated by `|`, stored as the body of `id`.
    fn parse_alternates(&mut self, rule_name: &'a str, id: RuleId, nested: bool) -> Result<()> {
        let start = self.cursor.offset();
        let mut body = Vec::new();
        self.parse_sequence(rule_name, &mut body, nested)?;
        while self.cursor.match_char('|') {
            body.push(Element::ALT);
            self.skip_space(true);
            self.parse_sequence(rule_name, &mut body, nested)?;
        }
        if body.is_empty() {
            return Err(self.error_at(SyntaxError::EmptyAlternation, start));
        }
        body.push(Element::END);
        self.rules.set(id, body);
        Ok(())
    }

    /// Atoms, each optionally followed by quantifiers, appended to `out`.
    fn parse_sequence(
        &mut self,
        rule_name: &'a str,
        out: &mut Vec<Element>,
        nested: bool,
    ) -> Result<()> {
        // Start of the elements emitted by the most recent atom.
        let mut last_sym_start = out.len();

        while let Some(c) = self.cursor.peek() {
            if c == '"' {
                last_sym_start = out.len();
                self.parse_literal(out)?;
            } else if c == '[' {
                last_sym_start = out.len();
                self.parse_class(out)?;
            } else if lex::is_word_char(c) {
                let name = self.parse_name()?;
                last_sym_start = out.len();
                out.push(Element::rule_ref(self.symbols.id_of(name)));
            } else if c == '(' {
                let sub_id = self.parse_group(rule_name)?;
                last_sym_start = out.len();
                out.push(Element::rule_ref(sub_id));
            } else if let Some(q) = Quantifier::from_char(c) {
                if last_sym_start == out.len() {
                    return Err(self.error(SyntaxError::MissingQuantifierOperand));
                }
                self.cursor.match_char(c);
                let sub_id = self.symbols.fresh_synthetic_id(rule_name);
                let operand = out.split_off(last_sym_start);
                self.rules
                    .set(sub_id, desugar_quantifier(q, &operand, sub_id));
                out.push(Element::rule_ref(sub_id));
            } else {
                break;
            }
            self.skip_space(nested);
        }
        Ok(())
    }

    /// `"..."`, one `Char` per decoded char.
    fn parse_literal(&mut self, out: &mut Vec<Element>) -> Result<()> {
        let start = self.cursor.offset();
        self.cursor.match_char('"');
        loop {
            match self.cursor.peek() {
                None => return Err(self.error_at(SyntaxError::UnterminatedLiteral, start)),
                Some('"') => break,
                Some(_) => {
                    let c = self.parse_char()?;
                    out.push(Element::new(ElementKind::Char, c));
                }
            }
        }
        self.cursor.match_char('"');
        Ok(())
    }

    /// `[...]` with an optional leading `^` and `a-z` ranges.
    fn parse_class(&mut self, out: &mut Vec<Element>) -> Result<()> {
        let start = self.cursor.offset();
        self.cursor.match_char('[');
        let start_kind = if self.cursor.match_char('^') {
            ElementKind::CharNot
        } else {
            ElementKind::Char
        };

        let class_start = out.len();
        loop {
            match self.cursor.peek() {
                None => return Err(self.error_at(SyntaxError::UnterminatedClass, start)),
                Some(']') => break,
                Some(_) => {}
            }
            let c = self.parse_char()?;
            let kind = if out.len() > class_start {
                ElementKind::CharAlt
            } else {
                start_kind
            };
            out.push(Element::new(kind, c));

            if self.cursor.peek() == Some('-') {
                match self.cursor.peek_second() {
                    Some(']') => {}
                    None => return Err(self.error(SyntaxError::MalformedRange)),
                    Some(_) => {
                        self.cursor.match_char('-');
                        let upper = self.parse_char()?;
                        out.push(Element::new(ElementKind::CharRngUpper, upper));
                    }
                }
            }
        }
        self.cursor.match_char(']');
        Ok(())
    }

    /// `( alternates )`, compiled into a new synthetic rule whose id is
    /// returned.
    fn parse_group(&mut self, rule_name: &'a str) -> Result<RuleId> {
        if self.depth >= self.options.max_nesting {
            return Err(self.error(SyntaxError::NestingTooDeep(self.options.max_nesting)));
        }
        self.cursor.match_char('(');
        self.skip_space(true);

        let sub_id = self.symbols.fresh_synthetic_id(rule_name);
        self.depth += 1;
        self.parse_alternates(rule_name, sub_id, true)?;
        self.depth -= 1;

        if !self.cursor.match_char(')') {
            let kind = if self.cursor.is_empty() {
                SyntaxError::UnexpectedEnd
            } else {
                SyntaxError::ExpectingCloseParen
            };
            return Err(self.error(kind));
        }
        Ok(sub_id)
    }

    /// Check that every referenced rule got a body and hand out the tables.
    fn finish(self) -> Result<Grammar> {
        for body in self.rules.iter() {
            for elem in body {
                if elem.kind == ElementKind::RuleRef && !self.rules.is_defined(elem.value) {
                    let name = self.symbols.name(elem.value).unwrap_or_default();
                    return Err(Error::UndefinedRule(name.to_owned()));
                }
            }
        }

        if let Some(start) = &self.options.start_rule {
            let defined = self
                .symbols
                .get(start)
                .map_or(false, |id| self.rules.is_defined(id));
            if !defined {
                return Err(Error::MissingStartRule(start.clone()));
            }
        }

        debug!(
            symbols = self.symbols.len(),
            rules = self.rules.len(),
            "compiled grammar"
        );
        Ok(Grammar::from_parts(self.symbols, self.rules))
    }
}
