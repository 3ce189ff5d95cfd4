//! Recognizing matrices in rendered bracket bodies
//!
//! Asciimath has no matrix syntax of its own: `[[a,b],[c,d]]` is a bracket holding bracketed rows
//! separated by commas. Whether a group is a matrix is decided after its body is rendered, by a
//! single scan over the rendered text.
//!
//! The first `(` or `[` in the text fixes the row delimiters. A body is a matrix when it holds at
//! least two rows, rows are separated by exactly one comma, and every row has as many columns as
//! the first one. Commas directly inside a row separate its columns; anything nested deeper
//! belongs to a cell.
//!
//! ```
//! use asciimath_translate::catalog::Dialect;
//! use asciimath_translate::matrix;
//!
//! let found = matrix::detect("\\left[a , b\\right] , \\left[c , d\\right]", Dialect::Latex).unwrap();
//! assert_eq!(found.row_delimiter, ('[', ']'));
//! assert_eq!(found.latex_body(), "a  &  b  \\\\  c  &  d");
//! assert!(matrix::detect("\\left[a , b\\right] , \\left[c\\right]", Dialect::Latex).is_none());
//! ```
use crate::catalog::Dialect;
use std::mem;
use tracing::debug;

/// The rows and cells of a detected matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixCandidate {
    /// The delimiters that enclose each row
    pub row_delimiter: (char, char),
    /// Rendered cell text, row by row
    pub rows: Vec<Vec<String>>,
}

impl MatrixCandidate {
    /// The rows as LaTeX matrix content, `&` between columns and `\\` between rows
    ///
    /// Blank cells are filled with `\null` so no column disappears.
    pub fn latex_body(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.trim().is_empty() {
                            format!("{cell}\\null")
                        } else {
                            cell.clone()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" & ")
            })
            .collect::<Vec<_>>()
            .join("  \\\\  ")
    }

    /// The rows as a MathML `<mtable>`
    pub fn mathml_table(&self) -> String {
        let mut res = String::from("<mtable>");
        for row in &self.rows {
            res.push_str("<mtr>");
            for cell in row {
                res.push_str("<mtd>");
                res.push_str(cell);
                res.push_str("</mtd>");
            }
            res.push_str("</mtr>");
        }
        res.push_str("</mtable>");
        res
    }

    /// The tabular construct of a dialect
    ///
    /// Asciimath has no table construct, so the rows are written back the way they're typed.
    pub fn render(&self, dialect: Dialect) -> String {
        let (open, close) = self.row_delimiter;
        match dialect {
            Dialect::Latex => format!("\\begin{{matrix}}{}\\end{{matrix}}", self.latex_body()),
            Dialect::MathML => self.mathml_table(),
            Dialect::AsciiMath => self
                .rows
                .iter()
                .map(|row| format!("{open}{}{close}", row.join(",")))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

const DELIMITERS: [char; 5] = ['(', ')', '[', ']', ','];

/// The offset of the first delimiter outside every `{..}` group
///
/// A backslash escapes the character after it, so `\{` and `\}` neither open nor close a group.
fn latex_delimiter(text: &str) -> Option<usize> {
    let mut depth = 0_usize;
    let mut chars = text.char_indices();
    while let Some((ind, chr)) = chars.next() {
        match chr {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 && DELIMITERS.contains(&chr) => return Some(ind),
            _ => (),
        }
    }
    None
}

/// Split rendered text into delimiters and the text between them
///
/// In MathML only a whole `<mo>X</mo>` is a delimiter, in LaTeX only one outside braces.
fn lexemes(text: &str, dialect: Dialect) -> Vec<(Option<char>, &str)> {
    let mut res = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let (delim, len) = match dialect {
            Dialect::MathML => match mathml_delimiter(rest) {
                Some(delim) => (Some(delim), "<mo>X</mo>".len()),
                // text runs up to the next operator element
                None => {
                    let skip = rest.chars().next().map_or(0, char::len_utf8);
                    let len = rest[skip..]
                        .find("<mo>")
                        .map_or(rest.len(), |ind| ind + skip);
                    (None, len)
                }
            },
            Dialect::Latex => match latex_delimiter(rest) {
                Some(0) => (rest.chars().next(), 1),
                Some(ind) => (None, ind),
                None => (None, rest.len()),
            },
            Dialect::AsciiMath => match rest.find(DELIMITERS) {
                Some(0) => (rest.chars().next(), 1),
                Some(ind) => (None, ind),
                None => (None, rest.len()),
            },
        };
        let (raw, remaining) = rest.split_at(len);
        res.push((delim, raw));
        rest = remaining;
    }
    res
}

fn mathml_delimiter(text: &str) -> Option<char> {
    let mut chars = text.strip_prefix("<mo>")?.chars();
    let delim = chars.next().filter(|c| DELIMITERS.contains(c))?;
    chars.as_str().starts_with("</mo>").then_some(delim)
}

/// Whether text between rows is only markup left behind by the row groups
fn between_rows(text: &str, dialect: Dialect) -> bool {
    let mut rest = text.trim();
    loop {
        let stripped = match dialect {
            Dialect::Latex => rest.strip_prefix("\\left"),
            Dialect::MathML => rest
                .strip_prefix("<mrow>")
                .or_else(|| rest.strip_prefix("</mrow>")),
            Dialect::AsciiMath => None,
        };
        match stripped {
            Some(next) => rest = next.trim_start(),
            None => return rest.is_empty(),
        }
    }
}

/// Remove the markup a rendered group leaves inside its row delimiters
fn finish_row(row: &mut [String], dialect: Dialect) {
    match dialect {
        Dialect::Latex => {
            if let Some(last) = row.last_mut() {
                if let Some(cell) = last.strip_suffix("\\right") {
                    *last = cell.to_owned();
                }
            }
        }
        Dialect::MathML => {
            if let Some(first) = row.first_mut() {
                if let Some(cell) = first.strip_prefix("<mrow>") {
                    *first = cell.to_owned();
                }
            }
            if let Some(last) = row.last_mut() {
                if let Some(cell) = last.strip_suffix("</mrow>") {
                    *last = cell.to_owned();
                }
            }
        }
        Dialect::AsciiMath => (),
    }
}

fn reject(reason: &str) -> Option<MatrixCandidate> {
    debug!(reason, "not a matrix");
    None
}

/// Scan a rendered bracket body for matrix structure
///
/// Returns `None` for anything that isn't a matrix, which is most bracket bodies.
pub fn detect(text: &str, dialect: Dialect) -> Option<MatrixCandidate> {
    let lexemes = lexemes(text, dialect);
    let (open, close) = lexemes.iter().find_map(|&(delim, _)| match delim {
        Some('(') => Some(('(', ')')),
        Some('[') => Some(('[', ']')),
        _ => None,
    })?;

    let mut depth = 0_usize;
    let mut separators = 0_usize;
    let mut closed_rows = 0_usize;
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row = Vec::new();
    let mut cell = String::new();
    for (delim, raw) in lexemes {
        match delim {
            Some(c) if c == open => {
                if depth == 0 && closed_rows != separators {
                    return reject("row without a separating comma");
                } else if depth > 0 {
                    cell.push_str(raw);
                }
                depth += 1;
            }
            Some(c) if c == close => {
                if depth == 0 {
                    return reject("unmatched close");
                }
                depth -= 1;
                if depth == 0 {
                    closed_rows += 1;
                    row.push(mem::take(&mut cell));
                    finish_row(&mut row, dialect);
                    if rows.first().is_some_and(|first| first.len() != row.len()) {
                        return reject("column counts differ");
                    }
                    rows.push(mem::take(&mut row));
                } else {
                    cell.push_str(raw);
                }
            }
            Some(',') if depth == 1 => row.push(mem::take(&mut cell)),
            Some(',') if depth == 0 => {
                separators += 1;
                if closed_rows != separators {
                    return reject("no row between commas");
                }
            }
            _ if depth > 0 => cell.push_str(raw),
            _ => {
                if !between_rows(raw, dialect) {
                    return reject("text outside of rows");
                }
            }
        }
    }
    if depth != 0 {
        reject("unmatched open")
    } else if separators == 0 || closed_rows != separators + 1 {
        reject("missing comma or row")
    } else {
        debug!(
            rows = rows.len(),
            columns = rows[0].len(),
            "detected matrix"
        );
        Some(MatrixCandidate {
            row_delimiter: (open, close),
            rows,
        })
    }
}
