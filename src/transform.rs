//! Rendering a parsed tree in one of the dialects
//!
//! Every node is rendered after its children. Scripts and both halves of a fraction drop one
//! redundant layer of brackets, so `(x)_(y)` renders as `\left(x\right)_{y}` in LaTeX rather than
//! `\left(x\right)_{\left(y\right)}`. The base of a script keeps its brackets: `(a+b)^2` is not
//! `a+b^2`. Bracket bodies that hold comma separated rows are rendered as matrices, see
//! [`matrix`][crate::matrix].
//!
//! ```
//! use asciimath_translate::catalog::Dialect;
//! use asciimath_translate::{parse, transform};
//!
//! let tree = parse("(x)_(y)").unwrap();
//! assert_eq!(transform::transform(&tree, Dialect::Latex), "\\left(x\\right)_{y}");
//! assert_eq!(transform::transform(&tree, Dialect::AsciiMath), "(x)_(y)");
//! let tree = parse("(x)/(y)").unwrap();
//! assert_eq!(transform::transform(&tree, Dialect::Latex), "\\frac{x}{y}");
//! ```
use crate::catalog::{Dialect, SymbolRef};
use crate::matrix;
use crate::tree::Node;

const LATEX_OPENS: [&str; 3] = ["\\left(", "\\left[", "\\left\\{"];
const LATEX_CLOSES: [&str; 3] = ["\\right)", "\\right]", "\\right\\}"];
const MATHML_OPENS: [&str; 3] = ["<mrow><mo>(</mo>", "<mrow><mo>[</mo>", "<mrow><mo>{</mo>"];
const MATHML_CLOSES: [&str; 3] = ["<mo>)</mo></mrow>", "<mo>]</mo></mrow>", "<mo>}</mo></mrow>"];

fn strip_any<'a>(text: &'a str, prefixes: &[&str], suffixes: &[&str]) -> Option<&'a str> {
    let inner = prefixes.iter().find_map(|pre| text.strip_prefix(pre))?;
    suffixes.iter().find_map(|suf| inner.strip_suffix(suf))
}

/// Whether `text` starts with `\left` or `\right` as a delimiter command rather than a longer
/// command like `\leftarrow`
fn delimiter_command(text: &str, command: &str) -> bool {
    text.strip_prefix(command)
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_alphabetic()))
}

/// Whether every `\left` in `text` is closed by a later `\right`
fn balanced_latex(text: &str) -> bool {
    let mut depth = 0_usize;
    for (ind, _) in text.match_indices('\\') {
        let rest = &text[ind..];
        if delimiter_command(rest, "\\left") {
            depth += 1;
        } else if delimiter_command(rest, "\\right") {
            match depth.checked_sub(1) {
                Some(next) => depth = next,
                None => return false,
            }
        }
    }
    depth == 0
}

/// Whether `text` is a single `<mrow>` element
fn single_mrow(text: &str) -> bool {
    if !text.starts_with("<mrow>") || !text.ends_with("</mrow>") {
        return false;
    }
    let mut depth = 0_usize;
    for (ind, _) in text.match_indices('<') {
        let rest = &text[ind..];
        if rest.starts_with("<mrow>") {
            depth += 1;
        } else if rest.starts_with("</mrow>") {
            depth -= 1;
            if depth == 0 {
                return ind + "</mrow>".len() == text.len();
            }
        }
    }
    false
}

/// Remove one rendered bracket pair that encloses all of `text`
///
/// Only round, square and curly brackets are removed, in any combination. The brackets must
/// belong together: `\left(a\right) + \left(b\right)` is returned unchanged, as is a bracketed
/// matrix. Asciimath output is never stripped.
///
/// ```
/// use asciimath_translate::catalog::Dialect;
/// use asciimath_translate::transform::strip_brackets;
///
/// assert_eq!(strip_brackets("\\left(x + 1\\right]", Dialect::Latex), "x + 1");
/// assert_eq!(strip_brackets("\\left(a\\right) + \\left(b\\right)", Dialect::Latex), "\\left(a\\right) + \\left(b\\right)");
/// assert_eq!(strip_brackets("<mrow><mo>(</mo><mrow><mi>x</mi></mrow><mo>)</mo></mrow>", Dialect::MathML), "<mrow><mi>x</mi></mrow>");
/// ```
pub fn strip_brackets(text: &str, dialect: Dialect) -> &str {
    let stripped = match dialect {
        Dialect::Latex => strip_any(text, &LATEX_OPENS, &LATEX_CLOSES)
            .filter(|inner| !inner.starts_with("\\begin{") && balanced_latex(inner)),
        Dialect::MathML => {
            strip_any(text, &MATHML_OPENS, &MATHML_CLOSES).filter(|inner| single_mrow(inner))
        }
        Dialect::AsciiMath => None,
    };
    stripped.unwrap_or(text)
}

fn mrow(inner: &str) -> String {
    format!("<mrow>{inner}</mrow>")
}

fn escape_xml(text: &str) -> String {
    let mut res = String::with_capacity(text.len());
    for chr in text.chars() {
        match chr {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            _ => res.push(chr),
        }
    }
    res
}

/// Escape the characters LaTeX treats specially inside `\text{..}`
fn escape_latex(text: &str) -> String {
    let mut res = String::with_capacity(text.len());
    for chr in text.chars() {
        match chr {
            '\\' => res.push_str("\\textbackslash{}"),
            '^' => res.push_str("\\^{}"),
            '~' => res.push_str("\\~{}"),
            '{' | '}' | '&' | '%' | '#' | '_' | '$' => {
                res.push('\\');
                res.push(chr);
            }
            _ => res.push(chr),
        }
    }
    res
}

/// A script or fraction operand with redundant brackets removed
fn operand(node: &Node, dialect: Dialect) -> String {
    let rendered = transform(node, dialect);
    strip_brackets(&rendered, dialect).to_owned()
}

/// A function operand, ready for a template slot
fn argument(node: &Node, dialect: Dialect) -> String {
    match dialect {
        Dialect::MathML => mrow(&operand(node, dialect)),
        _ => operand(node, dialect),
    }
}

/// The text of a color operand, taken as written
fn raw_text(node: &Node) -> String {
    match node {
        Node::Paren { body, .. } => body.iter().map(Node::source_text).collect(),
        _ => node.source_text(),
    }
}

/// The words of a `text` operand, taken as written
fn text_words(node: &Node) -> String {
    let word = |node: &Node| match node {
        Node::Interm(inner) => match &**inner {
            Node::QuotedString(text) => text.clone(),
            other => other.source_text(),
        },
        Node::QuotedString(text) => text.clone(),
        other => other.source_text(),
    };
    match node {
        Node::Paren { body, .. } => body.iter().map(word).collect::<Vec<_>>().join(" "),
        _ => word(node),
    }
}

fn function(func: SymbolRef, operands: &[&str], dialect: Dialect) -> String {
    match dialect {
        Dialect::MathML => mrow(&func.render(dialect, operands)),
        _ => func.render(dialect, operands),
    }
}

/// The script forms, `sub` and `sup` are optional but not both absent
fn scripts(
    base: &Node,
    sub: Option<&Node>,
    sup: Option<&Node>,
    dialect: Dialect,
) -> String {
    let rendered_base = transform(base, dialect);
    let sub = sub.map(|node| operand(node, dialect));
    let sup = sup.map(|node| operand(node, dialect));
    match dialect {
        Dialect::Latex => {
            let mut res = rendered_base;
            if let Some(sub) = sub {
                res.push_str(&format!("_{{{sub}}}"));
            }
            if let Some(sup) = sup {
                res.push_str(&format!("^{{{sup}}}"));
            }
            res
        }
        Dialect::MathML => {
            let tag = match (&sub, &sup) {
                (Some(_), Some(_)) => "msubsup",
                (Some(_), None) => "msub",
                _ => "msup",
            };
            let mut res = format!("<mrow><{tag}>{}", mrow(&rendered_base));
            for script in sub.iter().chain(sup.iter()) {
                res.push_str(&mrow(script));
            }
            res.push_str(&format!("</{tag}></mrow>"));
            res
        }
        Dialect::AsciiMath => {
            let mut res = rendered_base;
            if let Some(sub) = sub {
                res.push('_');
                res.push_str(&sub);
            }
            if let Some(sup) = sup {
                res.push('^');
                res.push_str(&sup);
            }
            res
        }
    }
}

fn paren(left: SymbolRef, body: &[Node], right: SymbolRef, dialect: Dialect) -> String {
    let left_text = left.render(dialect, &[]);
    let right_text = right.render(dialect, &[]);
    match dialect {
        Dialect::Latex => {
            let inner = join(body, dialect);
            let inner = if delimiter_command(&inner, "\\left") {
                matrix::detect(&inner, dialect).map_or(inner, |found| found.render(dialect))
            } else {
                inner
            };
            format!("{left_text}{inner}{right_text}")
        }
        Dialect::MathML => {
            let inner = join(body, dialect);
            let table = if inner.starts_with("<mrow><mo>") {
                matrix::detect(&inner, dialect)
            } else {
                None
            };
            match table {
                Some(found) => format!(
                    "<mrow><mo>{left_text}</mo>{}<mo>{right_text}</mo></mrow>",
                    found.render(dialect)
                ),
                None => format!(
                    "<mrow><mo>{left_text}</mo>{}<mo>{right_text}</mo></mrow>",
                    mrow(&inner)
                ),
            }
        }
        Dialect::AsciiMath => {
            // rows and cells read from a tabular environment sit directly in the body
            let separator = if body.iter().any(|node| matches!(node, Node::Exp(_))) {
                ""
            } else {
                " "
            };
            let inner = body
                .iter()
                .map(|node| transform(node, dialect))
                .collect::<Vec<_>>()
                .join(separator);
            format!("{left_text}{inner}{right_text}")
        }
    }
}

fn join(nodes: &[Node], dialect: Dialect) -> String {
    let separator = match dialect {
        Dialect::MathML => "",
        Dialect::Latex | Dialect::AsciiMath => " ",
    };
    nodes
        .iter()
        .map(|node| transform(node, dialect))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Render a tree in a dialect
///
/// MathML output is a sequence of elements without a `<math>` root, see
/// [`mathml::wrap`][crate::mathml::wrap]. LaTeX output has no math mode delimiters.
pub fn transform(node: &Node, dialect: Dialect) -> String {
    match node {
        Node::Exp(children) => join(children, dialect),
        Node::Interm(child) => transform(child, dialect),
        Node::Frac(num, den) => {
            let num = operand(num, dialect);
            let den = operand(den, dialect);
            match dialect {
                Dialect::Latex => format!("\\frac{{{num}}}{{{den}}}"),
                Dialect::MathML => {
                    format!("<mrow><mfrac>{}{}</mfrac></mrow>", mrow(&num), mrow(&den))
                }
                // asciimath operands are never stripped
                Dialect::AsciiMath => format!("{num}/{den}"),
            }
        }
        Node::Under(base, sub) => scripts(base, Some(sub), None, dialect),
        Node::Super(base, sup) => scripts(base, None, Some(sup), dialect),
        Node::UnderSuper(base, sub, sup) => scripts(base, Some(sub), Some(sup), dialect),
        Node::Paren { left, body, right } => paren(left, body, right, dialect),
        Node::Unary { func, arg } if func.spelling() == "text" => match dialect {
            Dialect::Latex => function(func, &[&escape_latex(&text_words(arg))], dialect),
            Dialect::MathML => function(func, &[&escape_xml(&text_words(arg))], dialect),
            Dialect::AsciiMath => function(func, &[&argument(arg, dialect)], dialect),
        },
        Node::Unary { func, arg } => {
            let arg = argument(arg, dialect);
            function(func, &[&arg], dialect)
        }
        Node::Binary {
            func,
            first,
            second,
        } => {
            let first = if func.spelling() == "color" {
                raw_text(first)
            } else {
                argument(first, dialect)
            };
            let second = argument(second, dialect);
            function(func, &[&first, &second], dialect)
        }
        Node::Symbol(sym) => match dialect {
            Dialect::MathML => format!("<mo>{}</mo>", sym.render(dialect, &[])),
            _ => sym.render(dialect, &[]),
        },
        Node::Const { text, is_numeric } => match dialect {
            Dialect::MathML if *is_numeric => format!("<mn>{text}</mn>"),
            Dialect::MathML => format!("<mi>{text}</mi>"),
            _ => text.clone(),
        },
        Node::QuotedString(text) => match dialect {
            Dialect::Latex => format!("\\text{{{}}}", escape_latex(text)),
            Dialect::MathML => format!("<mtext>{}</mtext>", escape_xml(text)),
            Dialect::AsciiMath => format!("\"{text}\""),
        },
    }
}
