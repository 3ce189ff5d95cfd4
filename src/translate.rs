//! One call translations between dialects
//!
//! Three directions are supported: asciimath to LaTeX, asciimath to MathML, and LaTeX back to
//! asciimath. Every other pair is a [`TranslationError::Unsupported`].
//!
//! ```
//! use asciimath_translate::catalog::Dialect;
//! use asciimath_translate::{translate, TranslateOptions, TranslationError};
//!
//! let options = TranslateOptions::default();
//! assert_eq!(translate("x^2", Dialect::AsciiMath, Dialect::Latex, &options).unwrap(), "$x^{2}$");
//! assert!(matches!(
//!     translate("x^{2}", Dialect::Latex, Dialect::MathML, &options),
//!     Err(TranslationError::Unsupported { .. })
//! ));
//! ```
use crate::catalog::Dialect;
use crate::mathml::{self, Dtd};
use crate::transform::transform;
use crate::tree::Node;
use crate::{latex, parse, TranslationError};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// How translated output is dressed up
///
/// Options that don't apply to the target dialect are ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Display rather than inline math
    pub displaystyle: bool,
    /// Log an indented dump of the parsed tree
    pub pretty_print: bool,
    /// The MathML version of the document
    pub dtd: Option<Dtd>,
    /// Write the DOCTYPE of `dtd` before the MathML root
    pub doctype: bool,
    /// Start MathML documents with an XML declaration
    pub xml_declaration: bool,
}

impl TranslateOptions {
    /// Set display math
    pub fn with_displaystyle(mut self, displaystyle: bool) -> Self {
        self.displaystyle = displaystyle;
        self
    }

    /// Set tree dumps
    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    /// Set the MathML version
    pub fn with_dtd(mut self, dtd: Dtd) -> Self {
        self.dtd = Some(dtd);
        self
    }

    /// Set whether MathML gets a DOCTYPE
    pub fn with_doctype(mut self, doctype: bool) -> Self {
        self.doctype = doctype;
        self
    }

    /// Set whether MathML gets an XML declaration
    pub fn with_xml_declaration(mut self, xml_declaration: bool) -> Self {
        self.xml_declaration = xml_declaration;
        self
    }
}

fn dump(tree: &Node, options: &TranslateOptions) {
    if options.pretty_print {
        info!(tree = %tree.pretty(), "parsed tree");
    }
}

/// Translate `source` from one dialect to another
///
/// LaTeX output is wrapped in `$..$`, or `\[..\]` for display math. MathML output is a complete
/// `<math>` document, see [`mathml::wrap`]. Asciimath output is bare.
pub fn translate(
    source: &str,
    from: Dialect,
    to: Dialect,
    options: &TranslateOptions,
) -> Result<String, TranslationError> {
    debug!(%from, %to, len = source.len(), "translating");
    match (from, to) {
        (Dialect::AsciiMath, Dialect::Latex) => {
            let tree = parse(source)?;
            dump(&tree, options);
            let body = transform(&tree, Dialect::Latex);
            Ok(if options.displaystyle {
                format!("\\[{body}\\]")
            } else {
                format!("${body}$")
            })
        }
        (Dialect::AsciiMath, Dialect::MathML) => {
            let tree = parse(source)?;
            dump(&tree, options);
            Ok(mathml::wrap(&transform(&tree, Dialect::MathML), options))
        }
        (Dialect::Latex, Dialect::AsciiMath) => {
            let tree = latex::parse(source)?;
            dump(&tree, options);
            Ok(transform(&tree, Dialect::AsciiMath))
        }
        (from, to) => Err(TranslationError::Unsupported { from, to }),
    }
}

/// Translate asciimath into LaTeX
pub fn asciimath_to_latex(
    source: &str,
    options: &TranslateOptions,
) -> Result<String, TranslationError> {
    translate(source, Dialect::AsciiMath, Dialect::Latex, options)
}

/// Translate asciimath into a MathML document
pub fn asciimath_to_mathml(
    source: &str,
    options: &TranslateOptions,
) -> Result<String, TranslationError> {
    translate(source, Dialect::AsciiMath, Dialect::MathML, options)
}

/// Translate LaTeX into asciimath
pub fn latex_to_asciimath(
    source: &str,
    options: &TranslateOptions,
) -> Result<String, TranslationError> {
    translate(source, Dialect::Latex, Dialect::AsciiMath, options)
}

/// Translate the contents of a file, optionally writing the result to another
///
/// The translation is returned whether or not it was written.
pub fn translate_file(
    input: &Path,
    output: Option<&Path>,
    from: Dialect,
    to: Dialect,
    options: &TranslateOptions,
) -> Result<String, TranslationError> {
    let source = fs::read_to_string(input).map_err(|source| TranslationError::Io {
        path: input.to_owned(),
        source,
    })?;
    info!(path = %input.display(), "read source");
    let translated = translate(&source, from, to, options)?;
    if let Some(output) = output {
        fs::write(output, &translated).map_err(|source| TranslationError::Io {
            path: output.to_owned(),
            source,
        })?;
        info!(path = %output.display(), "wrote translation");
    }
    Ok(translated)
}
