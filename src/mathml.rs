//! MathML documents
//!
//! [`transform`][crate::transform::transform] renders MathML as a bare sequence of elements. This
//! module puts that sequence in a `<math>` root, with the optional display style container, XML
//! declaration and DOCTYPE. Documents aren't validated against their DTD.
use crate::translate::TranslateOptions;
use std::fmt;
use std::str::FromStr;

const NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";
const XML_DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8'?>";

/// A MathML version with a published DTD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dtd {
    /// MathML 1, which predates the MathML namespace
    MathML1,
    /// MathML 2.0
    MathML2,
    /// MathML 3.0
    MathML3,
}

impl Dtd {
    /// The DOCTYPE declaration for this version
    pub fn doctype(self) -> &'static str {
        match self {
            Dtd::MathML1 => {
                "<!DOCTYPE math SYSTEM \"http://www.w3.org/Math/DTD/mathml1/mathml.dtd\">"
            }
            Dtd::MathML2 => {
                "<!DOCTYPE math PUBLIC \"-//W3C//DTD MathML 2.0//EN\" \
                \"http://www.w3.org/Math/DTD/mathml2/mathml2.dtd\">"
            }
            Dtd::MathML3 => {
                "<!DOCTYPE math PUBLIC \"-//W3C//DTD MathML 3.0//EN\" \
                \"http://www.w3.org/Math/DTD/mathml3/mathml3.dtd\">"
            }
        }
    }
}

impl fmt::Display for Dtd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dtd::MathML1 => "mathml1",
            Dtd::MathML2 => "mathml2",
            Dtd::MathML3 => "mathml3",
        })
    }
}

/// A MathML version name that isn't `mathml1`, `mathml2` or `mathml3`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown MathML version {0:?}")]
pub struct UnknownDtd(pub String);

impl FromStr for Dtd {
    type Err = UnknownDtd;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "mathml1" => Ok(Dtd::MathML1),
            "mathml2" => Ok(Dtd::MathML2),
            "mathml3" => Ok(Dtd::MathML3),
            _ => Err(UnknownDtd(name.to_owned())),
        }
    }
}

/// Wrap rendered MathML elements in a document
///
/// MathML 1 documents get a bare `<math>` root, all others declare the MathML namespace. A
/// DOCTYPE is only written when both `doctype` and a `dtd` are set.
///
/// ```
/// use asciimath_translate::mathml::{wrap, Dtd};
/// use asciimath_translate::TranslateOptions;
///
/// let options = TranslateOptions::default().with_dtd(Dtd::MathML1).with_xml_declaration(true);
/// assert_eq!(
///     wrap("<mn>1</mn>", &options),
///     "<?xml version='1.0' encoding='UTF-8'?>\n<math><mn>1</mn></math>"
/// );
/// ```
pub fn wrap(inner: &str, options: &TranslateOptions) -> String {
    let mut res = String::new();
    if options.xml_declaration {
        res.push_str(XML_DECLARATION);
        res.push('\n');
    }
    let doctype = options.dtd.filter(|_| options.doctype);
    if let Some(dtd) = doctype {
        res.push_str(dtd.doctype());
        res.push('\n');
    }
    match (options.dtd, doctype) {
        (Some(Dtd::MathML1), _) => res.push_str("<math>"),
        // the published DTDs declare xlink for every root
        (_, Some(_)) => res.push_str(&format!(
            "<math xmlns=\"{NAMESPACE}\" xmlns:xlink=\"{XLINK_NAMESPACE}\">"
        )),
        _ => res.push_str(&format!("<math xmlns=\"{NAMESPACE}\">")),
    }
    if options.displaystyle {
        res.push_str("<mstyle displaystyle=\"true\">");
        res.push_str(inner);
        res.push_str("</mstyle>");
    } else {
        res.push_str(inner);
    }
    res.push_str("</math>");
    res
}
