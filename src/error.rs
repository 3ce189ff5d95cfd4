//! Errors surfaced by parsing, catalog construction and translation
use crate::catalog::Dialect;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// The reason a source string could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A character that starts no token
    UnexpectedCharacter,
    /// A `"` without its closing quote
    UnterminatedString,
    /// A left delimiter that is never closed
    UnmatchedOpen,
    /// A right delimiter without a left one
    UnmatchedClose,
    /// A function or script operator that didn't get all of its operands
    MissingOperand {
        /// How many operands the function takes
        expected: usize,
    },
    /// A token that can't appear at its position
    UnexpectedToken,
    /// The input ended where more was required
    UnexpectedEnd,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxErrorKind::UnexpectedCharacter => f.write_str("unexpected character"),
            SyntaxErrorKind::UnterminatedString => f.write_str("unterminated quoted string"),
            SyntaxErrorKind::UnmatchedOpen => f.write_str("unmatched left delimiter"),
            SyntaxErrorKind::UnmatchedClose => f.write_str("unmatched right delimiter"),
            SyntaxErrorKind::MissingOperand { expected: 1 } => {
                f.write_str("function requires an operand")
            }
            SyntaxErrorKind::MissingOperand { expected } => {
                write!(f, "function requires {expected} operands")
            }
            SyntaxErrorKind::UnexpectedToken => f.write_str("unexpected token"),
            SyntaxErrorKind::UnexpectedEnd => f.write_str("unexpected end of input"),
        }
    }
}

/// Malformed source text
///
/// `position` is a byte offset into the source and `fragment` is the text found there, which is
/// empty when the input ended early.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {position}: {fragment:?}")]
pub struct SyntaxError {
    /// What went wrong
    pub kind: SyntaxErrorKind,
    /// The offending piece of source
    pub fragment: String,
    /// Byte offset of the fragment in the source
    pub position: usize,
}

impl SyntaxError {
    /// Build an error for a fragment that borrows from `source`
    ///
    /// Fragments that don't point into `source` are reported at its end.
    pub(crate) fn locate(source: &str, kind: SyntaxErrorKind, fragment: Option<&str>) -> Self {
        let start = source.as_ptr() as usize;
        match fragment {
            Some(frag) => {
                let position = (frag.as_ptr() as usize)
                    .checked_sub(start)
                    .filter(|&off| off <= source.len())
                    .unwrap_or(source.len());
                SyntaxError {
                    kind,
                    fragment: frag.to_owned(),
                    position,
                }
            }
            None => SyntaxError {
                kind,
                fragment: String::new(),
                position: source.len(),
            },
        }
    }
}

/// A symbol table that can't drive an unambiguous tokenizer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogIntegrityError {
    /// Two entries claim the same spelling
    #[error("spelling {spelling:?} is used by more than one entry")]
    DuplicateSpelling {
        /// The shared spelling
        spelling: &'static str,
    },
    /// An entry with no spellings, or with an empty one
    #[error("entry has an empty spelling")]
    EmptySpelling,
    /// A function template with the wrong number of placeholders
    #[error("template for {spelling:?} has {found} placeholders, expected {expected}")]
    MalformedTemplate {
        /// The entry's first spelling
        spelling: &'static str,
        /// Placeholders the entry's category requires
        expected: usize,
        /// Placeholders present in the template
        found: usize,
    },
}

/// Anything that stops a translation
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    /// The source didn't parse
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// There's no translator for this pair of dialects
    #[error("conversion from {from} to {to} is not supported")]
    Unsupported {
        /// Source dialect
        from: Dialect,
        /// Target dialect
        to: Dialect,
    },
    /// Reading the input or writing the output failed
    #[error("couldn't access {}: {source}", path.display())]
    Io {
        /// The file involved
        path: PathBuf,
        /// The underlying failure
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::{SyntaxError, SyntaxErrorKind, TranslationError};
    use crate::catalog::Dialect;

    #[test]
    fn locates_fragments() {
        let source = "a + }";
        let err = SyntaxError::locate(source, SyntaxErrorKind::UnmatchedClose, Some(&source[4..]));
        assert_eq!(err.position, 4);
        assert_eq!(err.fragment, "}");
        assert_eq!(err.to_string(), "unmatched right delimiter at byte 4: \"}\"");
    }

    #[test]
    fn end_of_input() {
        let err = SyntaxError::locate("sqrt", SyntaxErrorKind::UnexpectedEnd, None);
        assert_eq!(err.position, 4);
        assert!(err.fragment.is_empty());
    }

    #[test]
    fn unsupported_names_direction() {
        let err = TranslationError::Unsupported {
            from: Dialect::Latex,
            to: Dialect::MathML,
        };
        assert_eq!(
            err.to_string(),
            "conversion from LaTeX to MathML is not supported"
        );
    }
}
