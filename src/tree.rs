//! The parsed representation shared by every dialect
//!
//! A parse produces one [`Node::Exp`] at the root. Its children are intermediate expressions:
//! fractions and scripts at the top, wrapping atomic expressions. Atomic expressions are
//! parenthesized groups, function applications, catalog symbols, constants and quoted strings.
//!
//! Symbols are held as [`SymbolRef`]s into the catalog, so a tree never carries a spelling the
//! catalog can't render.
//!
//! ```
//! use asciimath_translate::catalog::lookup;
//! use asciimath_translate::tree::Node;
//!
//! let tree = Node::Exp(vec![Node::Frac(
//!     Box::new(Node::constant("1")),
//!     Box::new(Node::Symbol(lookup("oo").unwrap())),
//! )]);
//! assert_eq!(tree.source_text(), "1/oo");
//! ```
use crate::catalog::SymbolRef;
use std::fmt::Write;

/// A node of the parsed tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A sequence of intermediate expressions
    Exp(Vec<Node>),
    /// An atomic expression with no fraction or scripts
    Interm(Box<Node>),
    /// `num / den`
    Frac(Box<Node>, Box<Node>),
    /// `base _ sub`
    Under(Box<Node>, Box<Node>),
    /// `base ^ sup`
    Super(Box<Node>, Box<Node>),
    /// `base _ sub ^ sup`
    UnderSuper(Box<Node>, Box<Node>, Box<Node>),
    /// A bracketed group, the body may be empty
    Paren {
        /// The opening delimiter
        left: SymbolRef,
        /// The enclosed expressions
        body: Vec<Node>,
        /// The closing delimiter
        right: SymbolRef,
    },
    /// A unary function applied to its operand
    Unary {
        /// The function
        func: SymbolRef,
        /// Its operand
        arg: Box<Node>,
    },
    /// A binary function applied to its operands
    Binary {
        /// The function
        func: SymbolRef,
        /// First operand in source order
        first: Box<Node>,
        /// Second operand in source order
        second: Box<Node>,
    },
    /// Any other catalog symbol
    Symbol(SymbolRef),
    /// A number, letter or differential
    Const {
        /// The source text
        text: String,
        /// Whether this is a number rather than an identifier
        is_numeric: bool,
    },
    /// Quoted text, without its quotes
    QuotedString(String),
}

impl Node {
    /// A constant, numeric if it starts with a digit or a decimal point
    pub fn constant<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        let is_numeric = text
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == '.');
        Node::Const { text, is_numeric }
    }

    /// Wrap an atomic node as an intermediate expression
    pub fn interm(node: Node) -> Self {
        Node::Interm(Box::new(node))
    }

    /// The asciimath text of this node without any spacing
    ///
    /// This is how a color name reaches the output unchanged: `color(red)(x)` takes `red` as
    /// text rather than as an expression.
    pub fn source_text(&self) -> String {
        let mut res = String::new();
        self.write_source(&mut res);
        res
    }

    fn write_source(&self, out: &mut String) {
        match self {
            Node::Exp(children) => children.iter().for_each(|child| child.write_source(out)),
            Node::Interm(child) => child.write_source(out),
            Node::Frac(num, den) => {
                num.write_source(out);
                out.push('/');
                den.write_source(out);
            }
            Node::Under(base, sub) => {
                base.write_source(out);
                out.push('_');
                sub.write_source(out);
            }
            Node::Super(base, sup) => {
                base.write_source(out);
                out.push('^');
                sup.write_source(out);
            }
            Node::UnderSuper(base, sub, sup) => {
                base.write_source(out);
                out.push('_');
                sub.write_source(out);
                out.push('^');
                sup.write_source(out);
            }
            Node::Paren { left, body, right } => {
                out.push_str(left.spelling());
                body.iter().for_each(|child| child.write_source(out));
                out.push_str(right.spelling());
            }
            Node::Unary { func, arg } => {
                out.push_str(func.spelling());
                arg.write_source(out);
            }
            Node::Binary {
                func,
                first,
                second,
            } => {
                out.push_str(func.spelling());
                first.write_source(out);
                second.write_source(out);
            }
            Node::Symbol(sym) => out.push_str(sym.spelling()),
            Node::Const { text, .. } => out.push_str(text),
            Node::QuotedString(text) => {
                out.push('"');
                out.push_str(text);
                out.push('"');
            }
        }
    }

    /// An indented dump of the tree, one node per line
    ///
    /// ```
    /// use asciimath_translate::parse;
    ///
    /// let tree = parse("x^2").unwrap();
    /// assert_eq!(tree.pretty(), "exp\n  exp_super\n    const\tx\n    const\t2\n");
    /// ```
    pub fn pretty(&self) -> String {
        let mut res = String::new();
        self.write_pretty(&mut res, 0);
        res
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let children: Vec<&Node> = match self {
            Node::Exp(children) => {
                let _ = writeln!(out, "{indent}exp");
                children.iter().collect()
            }
            // intermediates only exist for the grammar
            Node::Interm(child) => return child.write_pretty(out, depth),
            Node::Frac(num, den) => {
                let _ = writeln!(out, "{indent}exp_frac");
                vec![&**num, &**den]
            }
            Node::Under(base, sub) => {
                let _ = writeln!(out, "{indent}exp_under");
                vec![&**base, &**sub]
            }
            Node::Super(base, sup) => {
                let _ = writeln!(out, "{indent}exp_super");
                vec![&**base, &**sup]
            }
            Node::UnderSuper(base, sub, sup) => {
                let _ = writeln!(out, "{indent}exp_under_super");
                vec![&**base, &**sub, &**sup]
            }
            Node::Paren { left, body, right } => {
                let _ = writeln!(
                    out,
                    "{indent}exp_par\t{}\t{}",
                    left.spelling(),
                    right.spelling()
                );
                body.iter().collect()
            }
            Node::Unary { func, arg } => {
                let _ = writeln!(out, "{indent}exp_unary\t{}", func.spelling());
                vec![&**arg]
            }
            Node::Binary {
                func,
                first,
                second,
            } => {
                let _ = writeln!(out, "{indent}exp_binary\t{}", func.spelling());
                vec![&**first, &**second]
            }
            Node::Symbol(sym) => {
                let _ = writeln!(out, "{indent}symbol\t{}", sym.spelling());
                Vec::new()
            }
            Node::Const { text, .. } => {
                let _ = writeln!(out, "{indent}const\t{text}");
                Vec::new()
            }
            Node::QuotedString(text) => {
                let _ = writeln!(out, "{indent}q_str\t{text}");
                Vec::new()
            }
        };
        for child in children {
            child.write_pretty(out, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Node;
    use crate::catalog::lookup;

    #[test]
    fn constants() {
        assert_eq!(
            Node::constant("3.5"),
            Node::Const {
                text: "3.5".into(),
                is_numeric: true
            }
        );
        assert_eq!(
            Node::constant("dx"),
            Node::Const {
                text: "dx".into(),
                is_numeric: false
            }
        );
    }

    #[test]
    fn source_text_of_groups() {
        let node = Node::Paren {
            left: lookup("(").unwrap(),
            body: vec![
                Node::interm(Node::constant("a")),
                Node::interm(Node::Symbol(lookup("cdot").unwrap())),
                Node::interm(Node::QuotedString("b c".into())),
            ],
            right: lookup(")").unwrap(),
        };
        assert_eq!(node.source_text(), "(a*\"b c\")");
    }

    #[test]
    fn pretty_nesting() {
        let node = Node::Exp(vec![Node::interm(Node::Unary {
            func: lookup("sqrt").unwrap(),
            arg: Box::new(Node::Paren {
                left: lookup("(").unwrap(),
                body: vec![Node::interm(Node::constant("x"))],
                right: lookup(")").unwrap(),
            }),
        })]);
        assert_eq!(
            node.pretty(),
            "exp\n  exp_unary\tsqrt\n    exp_par\t(\t)\n      const\tx\n"
        );
    }
}
