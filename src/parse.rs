use crate::catalog::{self, Category, SymbolRef};
use crate::prefix_map::PrefixMap;
use crate::tree::Node;
use crate::{SyntaxError, SyntaxErrorKind, Token, Tokenizer};
use tracing::debug;

/// A parse failure that still borrows from the source
pub(crate) struct Fault<'a> {
    pub(crate) kind: SyntaxErrorKind,
    pub(crate) fragment: Option<&'a str>,
}

impl<'a> Fault<'a> {
    pub(crate) fn at(kind: SyntaxErrorKind, fragment: &'a str) -> Self {
        Fault {
            kind,
            fragment: Some(fragment),
        }
    }

    pub(crate) fn end(kind: SyntaxErrorKind) -> Self {
        Fault {
            kind,
            fragment: None,
        }
    }
}

pub(crate) type Parsed<'a, T> = Result<T, Fault<'a>>;

fn next_simple<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, Token)> + Clone),
) -> Parsed<'a, Option<Node>> {
    let cloned = tokens.clone();
    let Some((raw, token)) = tokens.next() else {
        return Ok(None);
    };
    let node = match token {
        Token::Symbol(sym) => match sym.category {
            Category::RightParen => {
                // always stop on close bracket
                *tokens = cloned; // rewind
                return Ok(None);
            }
            Category::LeftParen => next_paren(tokens, raw, sym)?,
            Category::UnaryFn => Node::Unary {
                func: sym,
                arg: Box::new(required(tokens, raw, 1)?),
            },
            Category::BinaryFn => {
                let first = required(tokens, raw, 2)?;
                let second = required(tokens, raw, 2)?;
                Node::Binary {
                    func: sym,
                    first: Box::new(first),
                    second: Box::new(second),
                }
            }
            _ => Node::Symbol(sym),
        },
        Token::Number => Node::Const {
            text: raw.to_owned(),
            is_numeric: true,
        },
        Token::Letter | Token::Differential => Node::Const {
            text: raw.to_owned(),
            is_numeric: false,
        },
        Token::Text => {
            let inner = &raw[1..raw.len() - 1];
            if inner.is_empty() {
                return Err(Fault::at(SyntaxErrorKind::UnexpectedToken, raw));
            }
            Node::QuotedString(inner.to_owned())
        }
        Token::Unterminated => return Err(Fault::at(SyntaxErrorKind::UnterminatedString, raw)),
        Token::Unknown => return Err(Fault::at(SyntaxErrorKind::UnexpectedCharacter, raw)),
    };
    Ok(Some(node))
}

/// The next atomic expression, which `operator` can't do without
fn required<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, Token)> + Clone),
    operator: &'a str,
    expected: usize,
) -> Parsed<'a, Node> {
    next_simple(tokens)?.ok_or(Fault::at(
        SyntaxErrorKind::MissingOperand { expected },
        operator,
    ))
}

fn next_paren<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, Token)> + Clone),
    open: &'a str,
    left: SymbolRef,
) -> Parsed<'a, Node> {
    let body = next_interms(tokens)?;
    match tokens.next() {
        Some((_, Token::Symbol(right))) if right.category == Category::RightParen => {
            Ok(Node::Paren { left, body, right })
        }
        _ => Err(Fault::at(SyntaxErrorKind::UnmatchedOpen, open)),
    }
}

fn is_operator(raw: &str, token: Token, op: &str) -> bool {
    matches!(token, Token::Symbol(_)) && raw == op
}

fn next_interm<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, Token)> + Clone),
) -> Parsed<'a, Option<Node>> {
    let Some(base) = next_simple(tokens)? else {
        return Ok(None);
    };
    let base = Box::new(base);
    let cloned = tokens.clone();
    let node = match tokens.next() {
        Some((op, token)) if is_operator(op, token, "/") => {
            Node::Frac(base, Box::new(required(tokens, op, 1)?))
        }
        Some((op, token)) if is_operator(op, token, "^") => {
            Node::Super(base, Box::new(required(tokens, op, 1)?))
        }
        Some((op, token)) if is_operator(op, token, "_") => {
            let sub = Box::new(required(tokens, op, 1)?);
            let cloned = tokens.clone();
            match tokens.next() {
                Some((op, token)) if is_operator(op, token, "^") => {
                    Node::UnderSuper(base, sub, Box::new(required(tokens, op, 1)?))
                }
                _ => {
                    *tokens = cloned; // rewind
                    Node::Under(base, sub)
                }
            }
        }
        _ => {
            *tokens = cloned; // rewind
            Node::Interm(base)
        }
    };
    Ok(Some(node))
}

fn next_interms<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, Token)> + Clone),
) -> Parsed<'a, Vec<Node>> {
    let mut interms = Vec::new();
    while let Some(interm) = next_interm(tokens)? {
        interms.push(interm);
    }
    Ok(interms)
}

fn parse_tokens<'a>(
    tokens: &mut (impl Iterator<Item = (&'a str, Token)> + Clone),
) -> Parsed<'a, Node> {
    let body = next_interms(tokens)?;
    match tokens.next() {
        // only a right delimiter stops the top level early
        Some((close, _)) => Err(Fault::at(SyntaxErrorKind::UnmatchedClose, close)),
        None if body.is_empty() => Err(Fault::end(SyntaxErrorKind::UnexpectedEnd)),
        None => Ok(Node::Exp(body)),
    }
}

/// Parse asciimath using a custom map from spellings to catalog entries
///
/// ```
/// use asciimath_translate::catalog::catalog;
/// use asciimath_translate::parse_with;
///
/// let tree = parse_with("a/b", catalog().token_map()).unwrap();
/// assert_eq!(tree.source_text(), "a/b");
/// ```
pub fn parse_with<T>(source: &str, token_map: &T) -> Result<Node, SyntaxError>
where
    T: PrefixMap<SymbolRef>,
{
    let mut tokens = Tokenizer::with_tokens(source, token_map);
    match parse_tokens(&mut tokens) {
        Ok(node) => {
            if let Node::Exp(children) = &node {
                debug!(intermediates = children.len(), "parsed asciimath");
            }
            Ok(node)
        }
        Err(Fault { kind, fragment }) => Err(SyntaxError::locate(source, kind, fragment)),
    }
}

/// Parse asciimath into a tree rooted at a [`Node::Exp`]
///
/// The whole input has to parse, nothing partial is returned on error.
///
/// ```
/// use asciimath_translate::parse;
/// use asciimath_translate::SyntaxErrorKind;
///
/// assert!(parse("x / y").is_ok());
/// assert_eq!(parse("x }").unwrap_err().kind, SyntaxErrorKind::UnmatchedClose);
/// ```
pub fn parse(source: &str) -> Result<Node, SyntaxError> {
    parse_with(source, catalog::catalog().token_map())
}
