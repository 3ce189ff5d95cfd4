//! Translate asciimath into LaTeX or MathML, and LaTeX back into asciimath
//!
//! Asciimath is a terse plain text way of writing math: `sum_(i=1)^n i^3` rather than
//! `\sum_{i = 1}^{n} i^{3}`. This crate parses it into a small tree and renders that tree as
//! LaTeX or presentation MathML. LaTeX can also be read into the same tree and written back out
//! as asciimath. There's no translator from LaTeX to MathML.
//!
//! ## Usage
//!
//! ```sh
//! cargo add asciimath-translate
//! ```
//!
//! then
//!
//! ```
//! use asciimath_translate::{asciimath_to_latex, asciimath_to_mathml, TranslateOptions};
//!
//! let options = TranslateOptions::default();
//! assert_eq!(asciimath_to_latex("x / y", &options).unwrap(), "$\\frac{x}{y}$");
//! assert_eq!(
//!     asciimath_to_mathml("a + b", &options).unwrap(),
//!     "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><mi>a</mi><mo>+</mo><mi>b</mi></math>",
//! );
//! ```
//!
//! With the `cli` feature the crate also builds an `asciimath-translate` binary.
//!
//! ## Grammar
//!
//! The grammar is small. Every terminal comes from the [symbol catalog][catalog], and at each
//! position the tokenizer takes the longest spelling it can, so `rarr` is never read as `r`
//! followed by `arr`.
//!
//! ```txt
//! c ::= number | letter | d letter | "text"     constants, `dx` is one differential
//! u ::= sqrt | text | bb | abs | ...            unary functions
//! b ::= frac | root | color | ...               binary functions
//! l ::= ( | [ | { | (: | {: | |: | ...          left delimiters
//! r ::= ) | ] | } | :) | :} | :| | ...          right delimiters
//! S ::= c | symbol | lE?r | uS | bSS            simple expression
//! I ::= S | S/S | S_S | S^S | S_S^S             intermediate expression
//! E ::= I | IE                                  expression
//! ```
//!
//! Any left delimiter closes with any right delimiter, so `{: x )` is a group. Fractions and
//! scripts bind single simple expressions: `a+b/c` is `a + (b/c)`, and `a_i^2/3` reads as
//! `a_i^2` followed by a stray `/`.
//!
//! ## Output
//!
//! [`transform`][transform::transform] renders a tree in any dialect. Brackets that only serve
//! to group the operand of a fraction or script are dropped, so `(a+b)/2` becomes
//! `\frac{a + b}{2}`. A bracket holding two or more comma separated rows of the same width is a
//! matrix:
//!
//! ```
//! use asciimath_translate::{asciimath_to_latex, TranslateOptions};
//!
//! let options = TranslateOptions::default();
//! assert_eq!(
//!     asciimath_to_latex("[(1,0),(0,1)]", &options).unwrap(),
//!     "$\\left[\\begin{matrix}1  &  0  \\\\  0  &  1\\end{matrix}\\right]$",
//! );
//! ```
//!
//! ## Customizing tokens
//!
//! The tokenizer is generic over a [`PrefixMap`][prefix_map::PrefixMap] from spellings to
//! catalog entries, so spellings can be added or removed without touching the parser.
//!
//! ```
//! use asciimath_translate::catalog::{lookup, Dialect};
//! use asciimath_translate::prefix_map::HashPrefixMap;
//! use asciimath_translate::{parse_with, transform};
//!
//! let token_map = HashPrefixMap::from_iter([("plus", lookup("+").unwrap())]);
//! let tree = parse_with("1 plus 2", &token_map).unwrap();
//! assert_eq!(transform::transform(&tree, Dialect::Latex), "1 + 2");
//! ```
#![warn(missing_docs)]
pub mod catalog;
mod error;
pub mod latex;
pub mod mathml;
pub mod matrix;
mod parse;
pub mod prefix_map;
mod tokenizer;
pub mod transform;
mod translate;
pub mod tree;

pub use error::{CatalogIntegrityError, SyntaxError, SyntaxErrorKind, TranslationError};
pub use parse::{parse, parse_with};
pub use tokenizer::{Token, Tokenizer};
pub use translate::{
    asciimath_to_latex, asciimath_to_mathml, latex_to_asciimath, translate, translate_file,
    TranslateOptions,
};
