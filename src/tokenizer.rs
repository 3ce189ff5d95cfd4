use crate::catalog::{self, DefaultTokens, SymbolRef};
use crate::prefix_map::PrefixMap;
use std::iter::FusedIterator;

/// A token label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A spelling from the symbol catalog
    Symbol(SymbolRef),
    /// Digits with at most one decimal point
    Number,
    /// A single ascii letter
    Letter,
    /// `d` followed by a letter, e.g. `dx`
    Differential,
    /// A quoted string, the slice includes both quotes
    Text,
    /// A quote that is never closed, the slice runs to the end of input
    Unterminated,
    /// A character that starts no token
    Unknown,
}

pub(crate) fn strip_number(inp: &str) -> Option<(&str, &str)> {
    let mut seen_decimal = false;
    let len = inp
        .char_indices()
        .find(|(_, c)| match c {
            '.' if !seen_decimal => {
                seen_decimal = true;
                false
            }
            '0'..='9' => false,
            _ => true,
        })
        .map(|(i, _)| i)
        .unwrap_or(inp.len());
    if len > 1 || (!seen_decimal && len > 0) {
        Some((&inp[..len], &inp[len..]))
    } else {
        None
    }
}

/// The longest constant at the start of `inp`
fn constant_len(inp: &str) -> Option<(usize, Token)> {
    if let Some((num, _)) = strip_number(inp) {
        return Some((num.len(), Token::Number));
    }
    let mut chars = inp.chars();
    match (chars.next()?, chars.next()) {
        ('d', Some(next)) if next.is_ascii_alphabetic() => Some((2, Token::Differential)),
        (first, _) if first.is_ascii_alphabetic() => Some((1, Token::Letter)),
        _ => None,
    }
}

/// Split a quoted string off the front of `inp`, quotes included
///
/// Returns `None` if `inp` doesn't start with a quote, and `Err` with the rest of the input if the
/// quote is never closed.
fn strip_text(inp: &str) -> Option<Result<(&str, &str), &str>> {
    let rest = inp.strip_prefix('"')?;
    Some(match rest.find('"') {
        // quote lengths are one byte
        Some(len) => Ok(inp.split_at(len + 2)),
        None => Err(inp),
    })
}

/// An iterator over the tokens of an asciimath string
///
/// At each position the longest spelling wins, whether it comes from the catalog or is a
/// constant. When a catalog spelling and a constant are the same length, the catalog wins.
/// Whitespace between tokens is skipped.
///
/// # Example
/// ```
/// use asciimath_translate::{Token, Tokenizer};
///
/// let kinds: Vec<_> = Tokenizer::new("ab dx").map(|(_, token)| token).collect();
/// assert_eq!(kinds, [Token::Letter, Token::Letter, Token::Differential]);
/// ```
#[derive(Debug)]
pub struct Tokenizer<'a, 'b, T> {
    remaining: &'a str,
    token_map: &'b T,
}

// the map is only borrowed, so cloning never needs `T: Clone`
impl<T> Clone for Tokenizer<'_, '_, T> {
    fn clone(&self) -> Self {
        Tokenizer {
            remaining: self.remaining,
            token_map: self.token_map,
        }
    }
}

impl<'a> Tokenizer<'a, 'static, DefaultTokens> {
    /// Create a tokenizer over the process-wide catalog
    pub fn new(inp: &'a str) -> Self {
        Self::with_tokens(inp, catalog::catalog().token_map())
    }
}

impl<'a, 'b, T> Tokenizer<'a, 'b, T> {
    /// Create a tokenizer with a custom map from spellings to catalog entries
    ///
    /// ```
    /// use asciimath_translate::catalog::lookup;
    /// use asciimath_translate::prefix_map::HashPrefixMap;
    /// use asciimath_translate::{Token, Tokenizer};
    ///
    /// let rarr = lookup("rarr").unwrap();
    /// let token_map = HashPrefixMap::from_iter([("rarr", rarr)]);
    /// let tokens: Vec<_> = Tokenizer::with_tokens("rarr r", &token_map).collect();
    /// assert_eq!(tokens, [("rarr", Token::Symbol(rarr)), ("r", Token::Letter)]);
    /// ```
    pub fn with_tokens(inp: &'a str, token_map: &'b T) -> Self {
        Tokenizer {
            remaining: inp,
            token_map,
        }
    }

    /// The input that hasn't been tokenized yet
    pub fn remaining(&self) -> &'a str {
        self.remaining
    }

    fn advance(&mut self, len: usize, token: Token) -> (&'a str, Token) {
        let (raw, rest) = self.remaining.split_at(len);
        self.remaining = rest;
        (raw, token)
    }
}

impl<'a, 'b, T> Iterator for Tokenizer<'a, 'b, T>
where
    T: PrefixMap<SymbolRef>,
{
    type Item = (&'a str, Token);

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining = self.remaining.trim_start();
        let symbol = self
            .token_map
            .get_longest_prefix(self.remaining)
            .filter(|&(len, _)| len > 0);
        let constant = constant_len(self.remaining);
        match (symbol, constant) {
            (Some((len, &entry)), Some((clen, _))) if len >= clen => {
                return Some(self.advance(len, Token::Symbol(entry)))
            }
            (_, Some((len, token))) => return Some(self.advance(len, token)),
            (Some((len, &entry)), None) => return Some(self.advance(len, Token::Symbol(entry))),
            (None, None) => (),
        }
        match strip_text(self.remaining) {
            Some(Ok((text, rest))) => {
                self.remaining = rest;
                Some((text, Token::Text))
            }
            Some(Err(text)) => {
                self.remaining = &self.remaining[self.remaining.len()..];
                Some((text, Token::Unterminated))
            }
            None => {
                let chr = self.remaining.chars().next()?;
                Some(self.advance(chr.len_utf8(), Token::Unknown))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining.len()))
    }
}

impl<'a, 'b, T> FusedIterator for Tokenizer<'a, 'b, T> where T: PrefixMap<SymbolRef> {}

#[cfg(test)]
mod tests {
    use crate::catalog::{lookup, SymbolRef};
    use crate::prefix_map::HashPrefixMap;
    use crate::{Token, Tokenizer};

    fn sym(spelling: &str) -> Token {
        Token::Symbol(lookup(spelling).unwrap())
    }

    #[test]
    fn mixed_tokens() {
        let tokens: Vec<_> =
            Tokenizer::new(r#"frac (abs x) xy / 7.5^2 "text with spaces""#).collect();
        assert_eq!(
            *tokens,
            [
                ("frac", sym("frac")),
                ("(", sym("(")),
                ("abs", sym("abs")),
                ("x", Token::Letter),
                (")", sym(")")),
                ("x", Token::Letter),
                ("y", Token::Letter),
                ("/", sym("/")),
                ("7.5", Token::Number),
                ("^", sym("^")),
                ("2", Token::Number),
                ("\"text with spaces\"", Token::Text),
            ]
        );
    }

    #[test]
    fn longest_spelling_wins() {
        let tokens: Vec<_> = Tokenizer::new("rarr r ->> - > |><| |").collect();
        assert_eq!(
            *tokens,
            [
                ("rarr", sym("rarr")),
                ("r", Token::Letter),
                ("->>", sym("->>")),
                ("-", sym("-")),
                (">", sym(">")),
                ("|><|", sym("|><|")),
                ("|", sym("|")),
            ]
        );
    }

    #[test]
    fn differential() {
        let tokens: Vec<_> = Tokenizer::new("dx det ddot(d) d2 delta").collect();
        assert_eq!(
            *tokens,
            [
                ("dx", Token::Differential),
                ("det", sym("det")),
                ("ddot", sym("ddot")),
                ("(", sym("(")),
                ("d", Token::Letter),
                (")", sym(")")),
                ("d", Token::Letter),
                ("2", Token::Number),
                ("delta", sym("delta")),
            ]
        );
    }

    #[test]
    fn catalog_beats_letters() {
        let tokens: Vec<_> = Tokenizer::new("in dt").collect();
        assert_eq!(*tokens, [("in", sym("in")), ("dt", Token::Differential)]);
    }

    #[test]
    fn bad_text() {
        let tokens: Vec<_> = Tokenizer::new(r#"x "open ended"#).collect();
        assert_eq!(
            *tokens,
            [("x", Token::Letter), ("\"open ended", Token::Unterminated)]
        );
        let tokens: Vec<_> = Tokenizer::new("a € b").collect();
        assert_eq!(
            *tokens,
            [("a", Token::Letter), ("€", Token::Unknown), ("b", Token::Letter)]
        );
    }

    #[test]
    fn custom_tokens() {
        let plus: SymbolRef = lookup("+").unwrap();
        let token_map = HashPrefixMap::from_iter([("plus", plus)]);
        let tokens: Vec<_> = Tokenizer::with_tokens(" 4 plus x ", &token_map).collect();
        assert_eq!(
            *tokens,
            [
                ("4", Token::Number),
                ("plus", Token::Symbol(plus)),
                ("x", Token::Letter),
            ]
        );
    }
}
