//! Reading LaTeX math back into the shared tree
//!
//! The reader understands the LaTeX this crate writes plus the common hand written forms: bare
//! brace groups, `\left`/`\right` delimiters, `\frac`, `\sqrt` with or without an index, font
//! and accent commands, `\textcolor` and the `matrix` family of environments. Commands are
//! resolved through the catalog's LaTeX index, so any symbol the catalog can write, it can read.
//!
//! Command arguments in braces become whole expressions, while script arguments in braces stay
//! groups. Rendered as asciimath this gives `frac(a+b)(2)` for `\frac{a+b}{2}` but `(x)^(2)` for
//! `{x}^{2}`. Matrices become a `{: .. :}` group of bracketed rows.
//!
//! ```
//! use asciimath_translate::catalog::Dialect;
//! use asciimath_translate::{latex, transform};
//!
//! let tree = latex::parse("$\\sqrt[3]{x} \\leq \\pi$").unwrap();
//! assert_eq!(transform::transform(&tree, Dialect::AsciiMath), "root(3)(x) <= pi");
//! ```
use crate::catalog::{self, Category, SymbolRef};
use crate::parse::{Fault, Parsed};
use crate::tokenizer::strip_number;
use crate::tree::Node;
use crate::{SyntaxError, SyntaxErrorKind};
use std::iter::FusedIterator;
use tracing::debug;

/// A LaTeX token label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexToken {
    /// A backslash command, either `\` and letters or `\` and one other character
    Command,
    /// Digits with at most one decimal point
    Number,
    /// A single ascii letter
    Letter,
    /// Any other single character
    Punct,
}

/// An iterator over the tokens of a LaTeX string, skipping whitespace
#[derive(Debug, Clone)]
pub struct TexTokenizer<'a> {
    remaining: &'a str,
}

impl<'a> TexTokenizer<'a> {
    /// Create a tokenizer over LaTeX source
    pub fn new(inp: &'a str) -> Self {
        TexTokenizer { remaining: inp }
    }

    fn advance(&mut self, len: usize, token: TexToken) -> (&'a str, TexToken) {
        let (raw, rest) = self.remaining.split_at(len);
        self.remaining = rest;
        (raw, token)
    }
}

impl<'a> Iterator for TexTokenizer<'a> {
    type Item = (&'a str, TexToken);

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining = self.remaining.trim_start();
        let mut chars = self.remaining.chars();
        let first = chars.next()?;
        if first == '\\' {
            let name = chars
                .as_str()
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(chars.as_str().len());
            let len = match (name, chars.next()) {
                (0, Some(other)) => 1 + other.len_utf8(),
                (0, None) => return Some(self.advance(1, TexToken::Punct)),
                (name, _) => 1 + name,
            };
            Some(self.advance(len, TexToken::Command))
        } else if let Some((num, _)) = strip_number(self.remaining) {
            Some(self.advance(num.len(), TexToken::Number))
        } else if first.is_ascii_alphabetic() {
            Some(self.advance(1, TexToken::Letter))
        } else {
            Some(self.advance(first.len_utf8(), TexToken::Punct))
        }
    }
}

impl FusedIterator for TexTokenizer<'_> {}

/// Spacing commands with nothing to translate
const SPACING: [&str; 6] = ["\\null", "\\,", "\\;", "\\:", "\\!", "\\ "];

/// Environments read as matrices, with the delimiters they add
const ENVIRONMENTS: [(&str, Option<(&str, &str)>); 6] = [
    ("matrix", None),
    ("pmatrix", Some(("(", ")"))),
    ("bmatrix", Some(("[", "]"))),
    ("Bmatrix", Some(("{", "}"))),
    ("vmatrix", Some(("|:", ":|"))),
    ("Vmatrix", Some(("||:", ":||"))),
];

/// A catalog entry known to exist
fn entry<'a>(spelling: &str) -> Parsed<'a, SymbolRef> {
    catalog::lookup(spelling).ok_or(Fault::end(SyntaxErrorKind::UnexpectedToken))
}

fn is_close(raw: &str, token: TexToken) -> bool {
    match token {
        TexToken::Punct => matches!(raw, ")" | "]" | "}" | "&"),
        TexToken::Command => matches!(raw, "\\}" | "\\\\" | "\\right" | "\\end"),
        _ => false,
    }
}

/// Consume the next token if it is exactly `raw`
fn accept<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, TexToken)> + Clone),
    raw: &str,
) -> bool {
    let cloned = tokens.clone();
    match tokens.next() {
        Some((next, _)) if next == raw => true,
        _ => {
            *tokens = cloned; // rewind
            false
        }
    }
}

/// The raw text of a braced argument, e.g. a color name
fn raw_argument<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, TexToken)> + Clone),
    command: &'a str,
) -> Parsed<'a, String> {
    if !accept(tokens, "{") {
        return Err(Fault::at(
            SyntaxErrorKind::MissingOperand { expected: 2 },
            command,
        ));
    }
    let mut res = String::new();
    for (raw, _) in tokens.by_ref() {
        if raw == "}" {
            return Ok(res);
        }
        res.push_str(raw);
    }
    Err(Fault::at(SyntaxErrorKind::UnmatchedOpen, command))
}

/// A command argument, a braced argument is read as a whole expression
fn argument<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, TexToken)> + Clone),
    command: &'a str,
    expected: usize,
) -> Parsed<'a, Node> {
    let cloned = tokens.clone();
    match tokens.next() {
        Some((open, TexToken::Punct)) if open == "{" => {
            let body = next_interms(tokens)?;
            if accept(tokens, "}") {
                Ok(Node::Exp(body))
            } else {
                Err(Fault::at(SyntaxErrorKind::UnmatchedOpen, open))
            }
        }
        _ => {
            *tokens = cloned; // rewind
            next_simple(tokens)?.ok_or(Fault::at(
                SyntaxErrorKind::MissingOperand { expected },
                command,
            ))
        }
    }
}

/// A group opened by a bare `(`, `[`, `{` or `\{`
fn next_group<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, TexToken)> + Clone),
    open: &'a str,
) -> Parsed<'a, Node> {
    let body = next_interms(tokens)?;
    let closed = match tokens.next() {
        // braces only group
        Some(("}", _)) if open == "{" => Some((entry("(")?, entry(")")?)),
        Some((close, _)) if open != "{" => {
            let catalog = catalog::catalog();
            catalog
                .lookup_latex_left(open)
                .zip(catalog.lookup_latex_right(close))
        }
        _ => None,
    };
    match closed {
        Some((left, right)) => Ok(Node::Paren { left, body, right }),
        None => Err(Fault::at(SyntaxErrorKind::UnmatchedOpen, open)),
    }
}

/// A group written with `\left` and `\right`
fn next_delimited<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, TexToken)> + Clone),
    command: &'a str,
) -> Parsed<'a, Node> {
    let catalog = catalog::catalog();
    let left = match tokens.next() {
        Some((delim, _)) => catalog
            .lookup_latex_left(delim)
            .ok_or(Fault::at(SyntaxErrorKind::UnexpectedToken, delim))?,
        None => return Err(Fault::end(SyntaxErrorKind::UnexpectedEnd)),
    };
    let body = next_interms(tokens)?;
    if !accept(tokens, "\\right") {
        return Err(Fault::at(SyntaxErrorKind::UnmatchedOpen, command));
    }
    let right = match tokens.next() {
        Some((delim, _)) => catalog
            .lookup_latex_right(delim)
            .ok_or(Fault::at(SyntaxErrorKind::UnexpectedToken, delim))?,
        None => return Err(Fault::end(SyntaxErrorKind::UnexpectedEnd)),
    };
    Ok(Node::Paren { left, body, right })
}

/// A `\begin{..}` .. `\end{..}` matrix environment
fn next_environment<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, TexToken)> + Clone),
    command: &'a str,
) -> Parsed<'a, Node> {
    let name = raw_argument(tokens, command)?;
    let Some(&(_, wrapper)) = ENVIRONMENTS.iter().find(|(env, _)| *env == name) else {
        return Err(Fault::at(SyntaxErrorKind::UnexpectedToken, command));
    };
    let comma = entry(",")?;
    let row_open = entry("[")?;
    let row_close = entry("]")?;

    let mut rows = Vec::new();
    let mut cells = Vec::new();
    loop {
        cells.push(Node::Exp(next_interms(tokens)?));
        match tokens.next() {
            Some(("&", _)) => (),
            Some((sep, _)) if sep == "\\\\" || sep == "\\end" => {
                let cells = std::mem::take(&mut cells);
                // a trailing `\\` leaves one empty cell behind
                let empty = matches!(&cells[..], [Node::Exp(cell)] if cell.is_empty());
                if !(empty && sep == "\\end" && !rows.is_empty()) {
                    rows.push(cells);
                }
                if sep == "\\end" {
                    break;
                }
            }
            Some((other, _)) => return Err(Fault::at(SyntaxErrorKind::UnexpectedToken, other)),
            None => return Err(Fault::at(SyntaxErrorKind::UnmatchedOpen, command)),
        }
    }
    if raw_argument(tokens, command)? != name {
        return Err(Fault::at(SyntaxErrorKind::UnmatchedOpen, command));
    }
    debug!(env = name.as_str(), rows = rows.len(), "read matrix environment");

    let mut body = Vec::new();
    for (ind, row) in rows.into_iter().enumerate() {
        if ind > 0 {
            body.push(Node::Symbol(comma));
        }
        let mut row_body = Vec::new();
        for (ind, cell) in row.into_iter().enumerate() {
            if ind > 0 {
                row_body.push(Node::Symbol(comma));
            }
            row_body.push(cell);
        }
        body.push(Node::Exp(vec![Node::Paren {
            left: row_open,
            body: row_body,
            right: row_close,
        }]));
    }
    let table = Node::Paren {
        left: entry("{:")?,
        body,
        right: entry(":}")?,
    };
    match wrapper {
        Some((left, right)) => Ok(Node::Paren {
            left: entry(left)?,
            body: vec![Node::interm(table)],
            right: entry(right)?,
        }),
        None => Ok(table),
    }
}

fn next_command<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, TexToken)> + Clone),
    command: &'a str,
) -> Parsed<'a, Option<Node>> {
    let node = match command {
        "\\left" => next_delimited(tokens, command)?,
        "\\begin" => next_environment(tokens, command)?,
        "\\{" => next_group(tokens, command)?,
        "\\sqrt" if accept(tokens, "[") => {
            let index = next_interms(tokens)?;
            if !accept(tokens, "]") {
                return Err(Fault::at(SyntaxErrorKind::UnmatchedOpen, command));
            }
            Node::Binary {
                func: entry("root")?,
                first: Box::new(Node::Exp(index)),
                second: Box::new(argument(tokens, command, 2)?),
            }
        }
        spacing if SPACING.contains(&spacing) => return next_simple(tokens),
        _ => {
            let func = catalog::catalog()
                .lookup_latex(command)
                .ok_or(Fault::at(SyntaxErrorKind::UnexpectedToken, command))?;
            match func.category {
                Category::UnaryFn => Node::Unary {
                    func,
                    arg: Box::new(argument(tokens, command, 1)?),
                },
                Category::BinaryFn if func.spelling() == "color" => Node::Binary {
                    func,
                    first: Box::new(Node::constant(raw_argument(tokens, command)?)),
                    second: Box::new(argument(tokens, command, 2)?),
                },
                Category::BinaryFn => {
                    let first = argument(tokens, command, 2)?;
                    let second = argument(tokens, command, 2)?;
                    Node::Binary {
                        func,
                        first: Box::new(first),
                        second: Box::new(second),
                    }
                }
                _ => Node::Symbol(func),
            }
        }
    };
    Ok(Some(node))
}

fn next_simple<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, TexToken)> + Clone),
) -> Parsed<'a, Option<Node>> {
    let cloned = tokens.clone();
    let Some((raw, token)) = tokens.next() else {
        return Ok(None);
    };
    if is_close(raw, token) {
        *tokens = cloned; // rewind
        return Ok(None);
    }
    let node = match token {
        TexToken::Command => return next_command(tokens, raw),
        TexToken::Number => Node::constant(raw),
        TexToken::Letter => Node::constant(raw),
        TexToken::Punct if matches!(raw, "(" | "[" | "{") => next_group(tokens, raw)?,
        TexToken::Punct => catalog::catalog()
            .lookup_latex(raw)
            .map(Node::Symbol)
            .ok_or(Fault::at(SyntaxErrorKind::UnexpectedCharacter, raw))?,
    };
    Ok(Some(node))
}

fn next_interm<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, TexToken)> + Clone),
) -> Parsed<'a, Option<Node>> {
    let Some(base) = next_simple(tokens)? else {
        return Ok(None);
    };
    let mut sub = None;
    let mut sup = None;
    loop {
        let cloned = tokens.clone();
        match tokens.next() {
            Some((op, TexToken::Punct)) if op == "_" && sub.is_none() => {
                sub = Some(script(tokens, op)?);
            }
            Some((op, TexToken::Punct)) if op == "^" && sup.is_none() => {
                sup = Some(script(tokens, op)?);
            }
            _ => {
                *tokens = cloned; // rewind
                break;
            }
        }
    }
    let base = Box::new(base);
    let node = match (sub, sup) {
        (None, None) => Node::Interm(base),
        (Some(sub), None) => Node::Under(base, Box::new(sub)),
        (None, Some(sup)) => Node::Super(base, Box::new(sup)),
        (Some(sub), Some(sup)) => Node::UnderSuper(base, Box::new(sub), Box::new(sup)),
    };
    Ok(Some(node))
}

fn script<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, TexToken)> + Clone),
    operator: &'a str,
) -> Parsed<'a, Node> {
    next_simple(tokens)?.ok_or(Fault::at(
        SyntaxErrorKind::MissingOperand { expected: 1 },
        operator,
    ))
}

fn next_interms<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, TexToken)> + Clone),
) -> Parsed<'a, Vec<Node>> {
    let mut interms = Vec::new();
    while let Some(interm) = next_interm(tokens)? {
        interms.push(interm);
    }
    Ok(interms)
}

/// Remove `$..$`, `$$..$$` or `\[..\]` around the math
pub fn strip_math_delimiters(source: &str) -> &str {
    let trimmed = source.trim();
    [("$$", "$$"), ("$", "$"), ("\\[", "\\]")]
        .into_iter()
        .find_map(|(open, close)| {
            trimmed
                .strip_prefix(open)
                .and_then(|rest| rest.strip_suffix(close))
        })
        .unwrap_or(trimmed)
}

/// Parse LaTeX math into a tree rooted at a [`Node::Exp`]
///
/// Math mode delimiters around the source are optional. Commands the catalog doesn't know are
/// errors rather than being passed through.
///
/// ```
/// use asciimath_translate::{latex, SyntaxErrorKind};
///
/// assert!(latex::parse("\\[ x^{2} \\]").is_ok());
/// let err = latex::parse("$\\foo$").unwrap_err();
/// assert_eq!(err.kind, SyntaxErrorKind::UnexpectedToken);
/// assert_eq!(err.position, 1);
/// ```
pub fn parse(source: &str) -> Result<Node, SyntaxError> {
    let mut tokens = TexTokenizer::new(strip_math_delimiters(source));
    let parsed = next_interms(&mut tokens).and_then(|body| match tokens.next() {
        Some((close, token)) if is_close(close, token) && close != "&" && close != "\\\\" => {
            Err(Fault::at(SyntaxErrorKind::UnmatchedClose, close))
        }
        Some((other, _)) => Err(Fault::at(SyntaxErrorKind::UnexpectedToken, other)),
        None if body.is_empty() => Err(Fault::end(SyntaxErrorKind::UnexpectedEnd)),
        None => Ok(Node::Exp(body)),
    });
    match parsed {
        Ok(node) => {
            debug!("parsed latex");
            Ok(node)
        }
        Err(Fault { kind, fragment }) => Err(SyntaxError::locate(source, kind, fragment)),
    }
}
