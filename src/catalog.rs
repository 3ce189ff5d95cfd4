//! The symbol catalog that drives tokenization and output
//!
//! Every token the asciimath grammar knows is a [`SymbolEntry`]: a set of accepted spellings, a
//! [`Category`] that decides how the parser treats it, and an output form for LaTeX and MathML.
//! The asciimath output of an entry is its first spelling.
//!
//! Unary and binary functions carry templates where `#1` and `#2` stand for the rendered operands
//! in source order. Templates may reorder them, e.g. MathML's `<mroot>` takes the radicand
//! first.
//!
//! The catalog is built once, on first use, and checked for spellings shared between entries.
//! ```
//! use asciimath_translate::catalog::{self, Category, Dialect};
//!
//! let rarr = catalog::lookup("rarr").unwrap();
//! assert_eq!(rarr.category, Category::Arrow);
//! assert_eq!(rarr.render(Dialect::Latex, &[]), "\\rightarrow");
//! ```
#[cfg(not(feature = "qp-trie"))]
use crate::prefix_map::HashPrefixMap;
use crate::prefix_map::PrefixMap;
#[cfg(feature = "qp-trie")]
use crate::prefix_map::QpTriePrefixMap;
use crate::CatalogIntegrityError;
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One of the supported math markup languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// The terse ascii markup
    AsciiMath,
    /// LaTeX math mode
    Latex,
    /// Presentation MathML
    MathML,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::AsciiMath => "AsciiMath",
            Dialect::Latex => "LaTeX",
            Dialect::MathML => "MathML",
        })
    }
}

/// The terminal class of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Arithmetic and set operators like `+` or `nn`
    Operator,
    /// Relations like `<=` or `in`
    Relation,
    /// Logical connectives and quantifiers
    Logical,
    /// Greek letters
    Greek,
    /// Arrows
    Arrow,
    /// Opening delimiters
    LeftParen,
    /// Closing delimiters
    RightParen,
    /// Functions that take one operand, e.g. `sqrt`
    UnaryFn,
    /// Functions that take two operands, e.g. `frac`
    BinaryFn,
    /// Named functions rendered upright, e.g. `sin`
    Function,
    /// Everything else
    Misc,
}

impl Category {
    /// How many operands entries of this category take
    pub fn arity(self) -> usize {
        match self {
            Category::UnaryFn => 1,
            Category::BinaryFn => 2,
            _ => 0,
        }
    }
}

/// How an entry is written in one dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputForm {
    /// Fixed text
    Literal(&'static str),
    /// Text with `#1`/`#2` operand placeholders
    Template(&'static str),
}

/// A catalog entry
#[derive(Debug, PartialEq, Eq)]
pub struct SymbolEntry {
    /// Accepted asciimath spellings, the first is canonical
    pub spellings: &'static [&'static str],
    /// The terminal class
    pub category: Category,
    latex: &'static str,
    mathml: &'static str,
}

/// A reference to an entry of the process-wide catalog
pub type SymbolRef = &'static SymbolEntry;

impl SymbolEntry {
    /// The canonical asciimath spelling
    pub fn spelling(&self) -> &'static str {
        self.spellings[0]
    }

    /// The output form for a dialect
    pub fn output(&self, dialect: Dialect) -> OutputForm {
        let text = match dialect {
            Dialect::AsciiMath => return OutputForm::Literal(self.spelling()),
            Dialect::Latex => self.latex,
            Dialect::MathML => self.mathml,
        };
        if self.category.arity() > 0 {
            OutputForm::Template(text)
        } else {
            OutputForm::Literal(text)
        }
    }

    /// Render this entry in a dialect
    ///
    /// Templates have their placeholders replaced by `operands`. A literal given operands renders
    /// call style, `name(a)(b)`, which is how asciimath spells function application.
    pub fn render(&self, dialect: Dialect, operands: &[&str]) -> String {
        match self.output(dialect) {
            OutputForm::Literal(text) => {
                let mut res = String::from(text);
                for operand in operands {
                    res.push('(');
                    res.push_str(operand);
                    res.push(')');
                }
                res
            }
            OutputForm::Template(template) => fill_template(template, operands),
        }
    }
}

fn fill_template(template: &str, operands: &[&str]) -> String {
    let mut res = String::with_capacity(template.len() + operands.iter().map(|o| o.len()).sum::<usize>());
    let mut rest = template;
    while let Some(ind) = rest.find('#') {
        res.push_str(&rest[..ind]);
        let after = &rest[ind + 1..];
        match after.chars().next().and_then(|c| c.to_digit(10)) {
            Some(num) if num > 0 => {
                res.push_str(operands.get(num as usize - 1).copied().unwrap_or_default());
                rest = &after[1..];
            }
            _ => {
                res.push('#');
                rest = after;
            }
        }
    }
    res.push_str(rest);
    res
}

fn placeholders(template: &str) -> usize {
    (1..=9)
        .filter(|num| template.contains(&format!("#{num}")))
        .count()
}

macro_rules! symbols {
    ($($category:ident { $([$($spelling:expr),+] => $latex:expr, $mathml:expr;)+ })+) => {
        &[
            $(
                $(
                    SymbolEntry {
                        spellings: &[$($spelling),+],
                        category: Category::$category,
                        latex: $latex,
                        mathml: $mathml,
                    },
                )+
            )+
        ]
    };
}

/// The standard asciimath symbol table
pub const SYMBOLS: &[SymbolEntry] = symbols!(
    Operator {
        ["+"] => "+", "+";
        ["-"] => "-", "-";
        ["*", "cdot"] => "\\cdot", "&sdot;";
        ["**", "ast"] => "\\ast", "&ast;";
        ["***", "star"] => "\\star", "&Star;";
        ["//"] => "/", "/";
        ["\\", "setminus"] => "\\setminus", "&setminus;";
        ["xx", "times"] => "\\times", "&times;";
        ["-:", "div"] => "\\div", "&div;";
        ["|><", "ltimes"] => "\\ltimes", "&ltimes;";
        ["><|", "rtimes"] => "\\rtimes", "&rtimes;";
        ["|><|", "bowtie"] => "\\bowtie", "&bowtie;";
        ["@", "circ"] => "\\circ", "&SmallCircle;";
        ["o+", "oplus"] => "\\oplus", "&oplus;";
        ["ox", "otimes"] => "\\otimes", "&otimes;";
        ["o.", "odot"] => "\\odot", "&odot;";
        ["sum"] => "\\sum", "&sum;";
        ["prod"] => "\\prod", "&prod;";
        ["^^", "wedge"] => "\\wedge", "&wedge;";
        ["^^^", "bigwedge"] => "\\bigwedge", "&bigwedge;";
        ["vv", "vee"] => "\\vee", "&vee;";
        ["vvv", "bigvee"] => "\\bigvee", "&bigvee;";
        ["nn", "cap"] => "\\cap", "&cap;";
        ["nnn", "bigcap"] => "\\bigcap", "&bigcap;";
        ["uu", "cup"] => "\\cup", "&cup;";
        ["uuu", "bigcup"] => "\\bigcup", "&bigcup;";
    }
    Relation {
        ["="] => "=", "=";
        ["!=", "ne"] => "\\ne", "&NotEqual;";
        [":="] => ":=", ":=";
        ["<", "lt"] => "<", "&lt;";
        [">", "gt"] => ">", "&gt;";
        ["<=", "le", "lt=", "leq"] => "\\le", "&leq;";
        [">=", "ge", "gt=", "geq"] => "\\ge", "&geq;";
        ["mlt", "ll"] => "\\ll", "&Lt;";
        ["mgt", "gg"] => "\\gg", "&Gt;";
        ["-<", "prec", "-lt"] => "\\prec", "&Precedes;";
        ["-<=", "preceq"] => "\\preceq", "&PrecedesEqual;";
        [">-", "succ"] => "\\succ", "&Succeeds;";
        [">-=", "succeq"] => "\\succeq", "&SucceedsEqual;";
        ["in"] => "\\in", "&in;";
        ["!in", "notin"] => "\\notin", "&notin;";
        ["sub", "subset"] => "\\subset", "&subset;";
        ["sup", "supset"] => "\\supset", "&supset;";
        ["sube", "subseteq"] => "\\subseteq", "&SubsetEqual;";
        ["supe", "supseteq"] => "\\supseteq", "&SupersetEqual;";
        ["-=", "equiv"] => "\\equiv", "&equiv;";
        ["~=", "cong"] => "\\cong", "&cong;";
        ["~~", "approx"] => "\\approx", "&approx;";
        ["~", "sim"] => "\\sim", "&sim;";
        ["prop", "propto"] => "\\propto", "&prop;";
    }
    Logical {
        ["and"] => "\\text{and}", "and";
        ["or"] => "\\text{or}", "or";
        ["not", "neg"] => "\\neg", "&not;";
        ["=>", "implies"] => "\\implies", "&Implies;";
        ["if"] => "\\text{if}", "if";
        ["<=>", "iff"] => "\\iff", "&iff;";
        ["AA", "forall"] => "\\forall", "&ForAll;";
        ["EE", "exists"] => "\\exists", "&Exists;";
        ["_|_", "bot"] => "\\bot", "&bot;";
        ["TT", "top"] => "\\top", "&top;";
        ["|--", "vdash"] => "\\vdash", "&RightTee;";
        ["|==", "models"] => "\\models", "&DoubleRightTee;";
    }
    Greek {
        ["alpha"] => "\\alpha", "&alpha;";
        ["beta"] => "\\beta", "&beta;";
        ["gamma"] => "\\gamma", "&gamma;";
        ["Gamma"] => "\\Gamma", "&Gamma;";
        ["delta"] => "\\delta", "&delta;";
        ["Delta"] => "\\Delta", "&Delta;";
        ["epsilon", "epsi"] => "\\epsilon", "&epsiv;";
        ["varepsilon"] => "\\varepsilon", "&varepsilon;";
        ["zeta"] => "\\zeta", "&zeta;";
        ["eta"] => "\\eta", "&eta;";
        ["theta"] => "\\theta", "&theta;";
        ["Theta"] => "\\Theta", "&Theta;";
        ["vartheta"] => "\\vartheta", "&vartheta;";
        ["iota"] => "\\iota", "&iota;";
        ["kappa"] => "\\kappa", "&kappa;";
        ["lambda", "lamda"] => "\\lambda", "&lambda;";
        ["Lambda", "Lamda"] => "\\Lambda", "&Lambda;";
        ["mu"] => "\\mu", "&mu;";
        ["nu"] => "\\nu", "&nu;";
        ["xi"] => "\\xi", "&xi;";
        ["Xi"] => "\\Xi", "&Xi;";
        ["pi"] => "\\pi", "&pi;";
        ["Pi"] => "\\Pi", "&Pi;";
        ["rho"] => "\\rho", "&rho;";
        ["sigma"] => "\\sigma", "&sigma;";
        ["Sigma"] => "\\Sigma", "&Sigma;";
        ["tau"] => "\\tau", "&tau;";
        ["upsilon"] => "\\upsilon", "&upsilon;";
        ["phi"] => "\\phi", "&phi;";
        ["Phi"] => "\\Phi", "&Phi;";
        ["varphi"] => "\\varphi", "&varphi;";
        ["chi"] => "\\chi", "&chi;";
        ["psi"] => "\\psi", "&psi;";
        ["Psi"] => "\\Psi", "&Psi;";
        ["omega"] => "\\omega", "&omega;";
        ["Omega"] => "\\Omega", "&Omega;";
    }
    Arrow {
        ["uarr", "uparrow"] => "\\uparrow", "&uarr;";
        ["darr", "downarrow"] => "\\downarrow", "&darr;";
        ["rarr", "rightarrow"] => "\\rightarrow", "&rarr;";
        ["->", "to"] => "\\to", "&rightarrow;";
        [">->", "rightarrowtail"] => "\\rightarrowtail", "&rightarrowtail;";
        ["->>", "twoheadrightarrow"] => "\\twoheadrightarrow", "&twoheadrightarrow;";
        [">->>", "twoheadrightarrowtail"] => "\\twoheadrightarrowtail", "&Rarrtl;";
        ["|->", "mapsto"] => "\\mapsto", "&mapsto;";
        ["larr", "leftarrow"] => "\\leftarrow", "&larr;";
        ["harr", "leftrightarrow"] => "\\leftrightarrow", "&leftrightarrow;";
        ["rArr", "Rightarrow"] => "\\Rightarrow", "&rArr;";
        ["lArr", "Leftarrow"] => "\\Leftarrow", "&lArr;";
        ["hArr", "Leftrightarrow"] => "\\Leftrightarrow", "&hArr;";
    }
    Function {
        ["sin"] => "\\sin", "sin";
        ["cos"] => "\\cos", "cos";
        ["tan"] => "\\tan", "tan";
        ["sec"] => "\\sec", "sec";
        ["csc"] => "\\csc", "csc";
        ["cot"] => "\\cot", "cot";
        ["arcsin"] => "\\arcsin", "arcsin";
        ["arccos"] => "\\arccos", "arccos";
        ["arctan"] => "\\arctan", "arctan";
        ["sinh"] => "\\sinh", "sinh";
        ["cosh"] => "\\cosh", "cosh";
        ["tanh"] => "\\tanh", "tanh";
        ["sech"] => "\\sech", "sech";
        ["csch"] => "\\csch", "csch";
        ["coth"] => "\\coth", "coth";
        ["exp"] => "\\exp", "exp";
        ["log"] => "\\log", "log";
        ["ln"] => "\\ln", "ln";
        ["det"] => "\\det", "det";
        ["dim"] => "\\dim", "dim";
        ["mod"] => "\\mod", "mod";
        ["gcd"] => "\\gcd", "gcd";
        ["lcm"] => "\\lcm", "lcm";
        ["lub"] => "\\lub", "lub";
        ["glb"] => "\\glb", "glb";
        ["min"] => "\\min", "min";
        ["max"] => "\\max", "max";
        ["lim"] => "\\lim", "lim";
    }
    Misc {
        ["^"] => "^", "&#x5E;";
        ["_"] => "_", "_";
        ["/"] => "/", "/";
        [","] => ",", ",";
        ["'"] => "'", "'";
        ["prime"] => "\\prime", "&prime;";
        ["|"] => "|", "|";
        [":"] => ":", ":";
        ["int", "integral"] => "\\int", "&Integral;";
        ["oint"] => "\\oint", "&conint;";
        ["del", "partial"] => "\\partial", "&part;";
        ["grad", "nabla"] => "\\nabla", "&Del;";
        ["+-", "pm"] => "\\pm", "&PlusMinus;";
        ["-+", "mp"] => "\\mp", "&MinusPlus;";
        ["O/", "emptyset"] => "\\emptyset", "&emptyset;";
        ["oo", "infty"] => "\\infty", "&infin;";
        ["aleph"] => "\\aleph", "&aleph;";
        [":.", "therefore"] => "\\therefore", "&therefore;";
        [":'", "because"] => "\\because", "&because;";
        ["...", "ldots"] => "\\ldots", "...";
        ["cdots"] => "\\cdots", "&ctdot;";
        ["vdots"] => "\\vdots", "&vellip;";
        ["ddots"] => "\\ddots", "&dtdot;";
        ["quad"] => "\\quad", "&nbsp;";
        ["qquad"] => "\\qquad", "&nbsp;&nbsp;";
        ["/_", "angle"] => "\\angle", "&angle;";
        ["frown"] => "\\frown", "&frown;";
        ["/_\\", "triangle"] => "\\triangle", "&bigtriangleup;";
        ["diamond"] => "\\diamond", "&diamond;";
        ["square"] => "\\square", "&square;";
        ["|__", "lfloor"] => "\\lfloor", "&lfloor;";
        ["__|", "rfloor"] => "\\rfloor", "&rfloor;";
        ["|~", "lceiling"] => "\\lceil", "&lceil;";
        ["~|", "rceiling"] => "\\rceil", "&rceil;";
        ["CC"] => "\\mathbb{C}", "&Copf;";
        ["NN"] => "\\mathbb{N}", "&Nopf;";
        ["QQ"] => "\\mathbb{Q}", "&Qopf;";
        ["RR"] => "\\mathbb{R}", "&Ropf;";
        ["ZZ"] => "\\mathbb{Z}", "&Zopf;";
        ["red"] => "red", "red";
    }
    LeftParen {
        ["("] => "\\left(", "(";
        ["["] => "\\left[", "[";
        ["{"] => "\\left\\{", "{";
        ["(:", "langle", "<<"] => "\\left\\langle ", "&langle;";
        ["{:"] => "\\left.", "";
        ["|:"] => "\\left\\vert", "|";
        ["||:"] => "\\left\\lVert", "&DoubleVerticalBar;";
    }
    RightParen {
        [")"] => "\\right)", ")";
        ["]"] => "\\right]", "]";
        ["}"] => "\\right\\}", "}";
        [":)", "rangle", ">>"] => " \\right\\rangle", "&rangle;";
        [":}"] => "\\right.", "";
        [":|"] => "\\right\\vert", "|";
        [":||"] => "\\right\\rVert", "&DoubleVerticalBar;";
    }
    UnaryFn {
        ["sqrt"] => "\\sqrt{#1}", "<msqrt>#1</msqrt>";
        ["text"] => "\\textrm{#1}", "<mtext>#1</mtext>";
        ["abs"] => "\\left| #1 \\right|", "<mo>|</mo>#1<mo>|</mo>";
        ["floor"] => "\\left\\lfloor #1 \\right\\rfloor", "<mo>&lfloor;</mo>#1<mo>&rfloor;</mo>";
        ["ceil"] => "\\left\\lceil #1 \\right\\rceil", "<mo>&lceil;</mo>#1<mo>&rceil;</mo>";
        ["norm"] => "\\left\\lVert #1 \\right\\rVert",
            "<mo>&DoubleVerticalBar;</mo>#1<mo>&DoubleVerticalBar;</mo>";
        ["ubrace", "underbrace"] => "\\underbrace{#1}", "<munder>#1<mo>&#x23DF;</mo></munder>";
        ["obrace", "overbrace"] => "\\overbrace{#1}", "<mover>#1<mo>&#x23DE;</mo></mover>";
        ["cancel"] => "\\cancel{#1}", "<menclose notation='updiagonalstrike'>#1</menclose>";
        ["bb"] => "\\boldsymbol{#1}", "<mstyle mathvariant='bold'>#1</mstyle>";
        ["bbb"] => "\\mathbb{#1}", "<mstyle mathvariant='double-struck'>#1</mstyle>";
        ["cc"] => "\\mathcal{#1}", "<mstyle mathvariant='script'>#1</mstyle>";
        ["tt"] => "\\texttt{#1}", "<mstyle mathvariant='monospace'>#1</mstyle>";
        ["fr"] => "\\mathfrak{#1}", "<mstyle mathvariant='fraktur'>#1</mstyle>";
        ["sf"] => "\\textsf{#1}", "<mstyle mathvariant='sans-serif'>#1</mstyle>";
        ["ul", "underline"] => "\\underline{#1}", "<munder>#1<mo>&#x332;</mo></munder>";
        ["bar", "overline"] => "\\overline{#1}", "<mover>#1<mo>&#xAF;</mo></mover>";
        ["hat"] => "\\hat{#1}", "<mover>#1<mo>^</mo></mover>";
        ["vec"] => "\\vec{#1}", "<mover>#1<mo stretchy='false'>&#x2192;</mo></mover>";
        ["dot"] => "\\dot{#1}", "<mover>#1<mo>.</mo></mover>";
        ["ddot"] => "\\ddot{#1}", "<mover>#1<mo>..</mo></mover>";
        ["tilde"] => "\\tilde{#1}", "<mover>#1<mo>~</mo></mover>";
        ["dstyle"] => "\\displaystyle{#1}", "<mstyle displaystyle='true'>#1</mstyle>";
    }
    BinaryFn {
        ["frac"] => "\\frac{#1}{#2}", "<mfrac>#1#2</mfrac>";
        ["root"] => "\\sqrt[#1]{#2}", "<mroot>#2#1</mroot>";
        ["stackrel"] => "\\stackrel{#1}{#2}", "<mover>#2#1</mover>";
        ["overset"] => "\\overset{#1}{#2}", "<mover>#2#1</mover>";
        ["underset"] => "\\underset{#1}{#2}", "<munder>#2#1</munder>";
        ["color"] => "\\textcolor{#1}{#2}", "<mstyle mathcolor='#1'>#2</mstyle>";
    }
);

/// LaTeX commands that read as an asciimath spelling without being any entry's output
pub const LATEX_ALIASES: &[(&str, &str)] = &[
    ("\\text", "text"),
    ("\\mathrm", "text"),
    ("\\mbox", "text"),
    ("\\mathbf", "bb"),
    ("\\leq", "le"),
    ("\\geq", "ge"),
    ("\\neq", "ne"),
    ("\\vert", "|"),
    ("\\mid", "|"),
    ("\\dots", "..."),
    ("\\lceiling", "lceiling"),
    ("\\rceiling", "rceiling"),
];

/// Delimiters written after `\left` or `\right` that no entry renders
const LATEX_DELIMITER_ALIASES: &[(&str, &str)] = &[
    ("|", "|:"),
    ("\\|", "||:"),
    ("\\lbrace", "{"),
    ("|", ":|"),
    ("\\|", ":||"),
    ("\\rbrace", "}"),
];

/// The prefix map the catalog indexes spellings with
#[cfg(feature = "qp-trie")]
pub type DefaultTokens = QpTriePrefixMap<&'static str, SymbolRef>;
/// The prefix map the catalog indexes spellings with
#[cfg(not(feature = "qp-trie"))]
pub type DefaultTokens = HashPrefixMap<&'static str, SymbolRef>;

/// An indexed, validated symbol table
#[derive(Debug)]
pub struct Catalog {
    entries: &'static [SymbolEntry],
    tokens: DefaultTokens,
    latex: HashMap<&'static str, SymbolRef>,
    latex_left: HashMap<&'static str, SymbolRef>,
    latex_right: HashMap<&'static str, SymbolRef>,
}

impl Catalog {
    /// Index a table, rejecting it if any spelling is ambiguous
    ///
    /// ```
    /// use asciimath_translate::catalog::{Catalog, SYMBOLS};
    ///
    /// let catalog = Catalog::build(SYMBOLS).unwrap();
    /// assert!(catalog.lookup("sum").is_some());
    /// ```
    pub fn build(entries: &'static [SymbolEntry]) -> Result<Self, CatalogIntegrityError> {
        let mut seen = HashSet::new();
        for entry in entries {
            if entry.spellings.is_empty() || entry.spellings.iter().any(|s| s.is_empty()) {
                return Err(CatalogIntegrityError::EmptySpelling);
            }
            for &spelling in entry.spellings {
                if !seen.insert(spelling) {
                    return Err(CatalogIntegrityError::DuplicateSpelling { spelling });
                }
            }
            let expected = entry.category.arity();
            for template in [entry.latex, entry.mathml] {
                let found = placeholders(template);
                if found != expected {
                    return Err(CatalogIntegrityError::MalformedTemplate {
                        spelling: entry.spelling(),
                        expected,
                        found,
                    });
                }
            }
        }

        let tokens = entries
            .iter()
            .flat_map(|entry| entry.spellings.iter().map(move |&s| (s, entry)))
            .collect();

        let mut latex = HashMap::new();
        let mut latex_left = HashMap::new();
        let mut latex_right = HashMap::new();
        for entry in entries {
            match entry.category {
                Category::LeftParen => {
                    if let Some(delim) = entry.latex.trim().strip_prefix("\\left") {
                        latex_left.entry(delim).or_insert(entry);
                    }
                }
                Category::RightParen => {
                    if let Some(delim) = entry.latex.trim().strip_prefix("\\right") {
                        latex_right.entry(delim).or_insert(entry);
                    }
                }
                Category::UnaryFn | Category::BinaryFn => {
                    let command = entry
                        .latex
                        .split(['{', '['])
                        .next()
                        .unwrap_or_default();
                    if !command.starts_with("\\left") {
                        latex.entry(command).or_insert(entry);
                    }
                }
                _ => {
                    latex.entry(entry.latex).or_insert(entry);
                }
            }
        }
        let mut catalog = Catalog {
            entries,
            tokens,
            latex,
            latex_left,
            latex_right,
        };
        for &(command, spelling) in LATEX_ALIASES {
            if let Some(entry) = catalog.lookup(spelling) {
                catalog.latex.entry(command).or_insert(entry);
            }
        }
        for &(delim, spelling) in LATEX_DELIMITER_ALIASES {
            match catalog.lookup(spelling) {
                Some(entry) if entry.category == Category::LeftParen => {
                    catalog.latex_left.entry(delim).or_insert(entry);
                }
                Some(entry) if entry.category == Category::RightParen => {
                    catalog.latex_right.entry(delim).or_insert(entry);
                }
                _ => (),
            }
        }
        Ok(catalog)
    }

    /// All entries in table order
    pub fn entries(&self) -> &'static [SymbolEntry] {
        self.entries
    }

    /// The entry with exactly this spelling
    pub fn lookup(&self, spelling: &str) -> Option<SymbolRef> {
        match self.tokens.get_longest_prefix(spelling) {
            Some((len, &entry)) if len == spelling.len() && len > 0 => Some(entry),
            _ => None,
        }
    }

    /// The longest spelling that prefixes `inp`, with its byte length
    pub fn longest_match(&self, inp: &str) -> Option<(usize, SymbolRef)> {
        self.tokens
            .get_longest_prefix(inp)
            .filter(|&(len, _)| len > 0)
            .map(|(len, &entry)| (len, entry))
    }

    /// The prefix map over every spelling
    pub fn token_map(&self) -> &DefaultTokens {
        &self.tokens
    }

    /// The spellings of one terminal class, longest first then lexicographic
    pub fn spellings(&self, category: Category) -> Vec<&'static str> {
        let mut res: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| entry.category == category)
            .flat_map(|entry| entry.spellings.iter().copied())
            .collect();
        res.sort_by(|left, right| {
            left.len()
                .cmp(&right.len())
                .reverse()
                .then_with(|| left.cmp(right))
        });
        res
    }

    /// The entry a LaTeX command or character reads as, e.g. `\int` or `+`
    pub fn lookup_latex(&self, command: &str) -> Option<SymbolRef> {
        self.latex.get(command).copied()
    }

    /// The left delimiter written after `\left`, e.g. `(` or `\langle`
    pub fn lookup_latex_left(&self, delim: &str) -> Option<SymbolRef> {
        self.latex_left.get(delim).copied()
    }

    /// The right delimiter written after `\right`
    pub fn lookup_latex_right(&self, delim: &str) -> Option<SymbolRef> {
        self.latex_right.get(delim).copied()
    }
}

lazy_static! {
    static ref CATALOG: Catalog = match Catalog::build(SYMBOLS) {
        Ok(catalog) => catalog,
        Err(err) => panic!("invalid symbol catalog: {err}"),
    };
}

/// The process-wide catalog built from [`SYMBOLS`]
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Find an entry by any of its spellings
pub fn lookup(spelling: &str) -> Option<SymbolRef> {
    CATALOG.lookup(spelling)
}

/// Render an entry in a dialect, see [`SymbolEntry::render`]
pub fn render(entry: SymbolRef, dialect: Dialect, operands: &[&str]) -> String {
    entry.render(dialect, operands)
}

#[cfg(test)]
mod tests {
    use super::{catalog, lookup, Catalog, Category, Dialect, OutputForm, SymbolEntry, SYMBOLS};
    use crate::CatalogIntegrityError;

    #[test]
    fn standard_catalog_builds() {
        assert!(Catalog::build(SYMBOLS).is_ok());
    }

    #[test]
    fn duplicate_spelling() {
        static DUPS: &[SymbolEntry] = symbols!(
            Relation {
                ["<=", "le"] => "\\le", "&leq;";
            }
            Arrow {
                ["<=", "lArr"] => "\\Leftarrow", "&lArr;";
            }
        );
        assert_eq!(
            Catalog::build(DUPS).unwrap_err(),
            CatalogIntegrityError::DuplicateSpelling { spelling: "<=" }
        );
    }

    #[test]
    fn empty_spelling() {
        static EMPTY: &[SymbolEntry] = symbols!(
            Misc {
                [""] => "", "";
            }
        );
        assert_eq!(
            Catalog::build(EMPTY).unwrap_err(),
            CatalogIntegrityError::EmptySpelling
        );
    }

    #[test]
    fn malformed_template() {
        static BAD: &[SymbolEntry] = symbols!(
            BinaryFn {
                ["frac"] => "\\frac{#1}", "<mfrac>#1#2</mfrac>";
            }
        );
        assert_eq!(
            Catalog::build(BAD).unwrap_err(),
            CatalogIntegrityError::MalformedTemplate {
                spelling: "frac",
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn aliases_share_entry() {
        let star = lookup("*").unwrap();
        assert!(std::ptr::eq(star, lookup("cdot").unwrap()));
        assert_eq!(star.spelling(), "*");
        assert_eq!(star.output(Dialect::MathML), OutputForm::Literal("&sdot;"));
    }

    #[test]
    fn no_single_letters() {
        for entry in SYMBOLS {
            for spelling in entry.spellings {
                let mut chars = spelling.chars();
                let single = chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
                    && chars.next().is_none();
                assert!(!single, "{spelling} shadows a constant");
            }
        }
    }

    #[test]
    fn longest_first() {
        let arrows = catalog().spellings(Category::Arrow);
        assert_eq!(arrows[0], "twoheadrightarrowtail");
        assert!(arrows
            .windows(2)
            .all(|pair| pair[0].len() > pair[1].len()
                || (pair[0].len() == pair[1].len() && pair[0] < pair[1])));
        assert_eq!(catalog().longest_match("rarr x"), Some((4, lookup("rarr").unwrap())));
    }

    #[test]
    fn exact_lookup() {
        assert!(lookup("ra").is_none());
        assert!(lookup("").is_none());
        assert_eq!(lookup("rightarrow").unwrap().spelling(), "rarr");
    }

    #[test]
    fn renders_templates() {
        let root = lookup("root").unwrap();
        assert_eq!(root.render(Dialect::Latex, &["3", "x"]), "\\sqrt[3]{x}");
        assert_eq!(
            root.render(Dialect::MathML, &["<mn>3</mn>", "<mi>x</mi>"]),
            "<mroot><mi>x</mi><mn>3</mn></mroot>"
        );
        assert_eq!(root.render(Dialect::AsciiMath, &["3", "x"]), "root(3)(x)");
        assert_eq!(lookup("oo").unwrap().render(Dialect::Latex, &[]), "\\infty");
    }

    #[test]
    fn latex_reverse_index() {
        let catalog = catalog();
        assert_eq!(catalog.lookup_latex("\\int").unwrap().spelling(), "int");
        assert_eq!(catalog.lookup_latex("\\frac").unwrap().spelling(), "frac");
        assert_eq!(catalog.lookup_latex("\\sqrt").unwrap().spelling(), "sqrt");
        assert_eq!(catalog.lookup_latex("\\mathrm").unwrap().spelling(), "text");
        assert_eq!(catalog.lookup_latex_left("\\langle").unwrap().spelling(), "(:");
        assert_eq!(catalog.lookup_latex_left(".").unwrap().spelling(), "{:");
        assert_eq!(catalog.lookup_latex_right("\\}").unwrap().spelling(), "}");
        assert_eq!(catalog.lookup_latex_right("|").unwrap().spelling(), ":|");
    }
}
