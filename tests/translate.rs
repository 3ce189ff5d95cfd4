use asciimath_translate::catalog::Dialect;
use asciimath_translate::mathml::Dtd;
use asciimath_translate::{
    asciimath_to_latex, asciimath_to_mathml, latex_to_asciimath, translate_file,
    SyntaxErrorKind, TranslateOptions, TranslationError,
};
use rstest::rstest;
use std::fs;

const UUU: &str = "uuu_{2(x+1)=1)^{n}\n  min{\n  2x|x^{y+2} in bbb(N) wedge arccos root(3}(frac{1}{3x}) < i rarr Omega < b, 5=x\n }";

#[rstest]
#[case(
    "lim_(N->oo) sum_(i=0)^N int_0^1 f(x)dx",
    "\\lim_{N \\to \\infty} \\sum_{i = 0}^{N} \\int_{0}^{1} f \\left(x\\right) dx"
)]
#[case(
    "[[int x dx], [log(x+1)]]",
    "\\left[\\begin{matrix}\\int x dx  \\\\  \\log \\left(x + 1\\right)\\end{matrix}\\right]"
)]
#[case(
    "((1,2))int sin{x^2}/4pidxroot(5)(x_1^2+x_2^2)",
    "\\left(\\left(1 , 2\\right)\\right) \\int \\sin \\frac{x^{2}}{4} \\pi dx \\sqrt[5]{x_{1}^{2} + x_{2}^{2}}"
)]
#[case(
    UUU,
    "\\bigcup_{2 \\left(x + 1\\right) = 1}^{n} \\min \\left\\{2 x | x^{y + 2} \\in \\mathbb{N} \\wedge \\arccos \\sqrt[3]{\\frac{1}{3 x}} < i \\rightarrow \\Omega < b , 5 = x\\right\\}"
)]
#[case(
    "[(1,2), (2^|: 3 :|, (dstyle int x^{2(x-n)})), (2,4)]",
    "\\left[\\begin{matrix}1  &  2  \\\\  2^{\\left\\vert3\\right\\vert}  &  \\left(\\displaystyle{\\int} x^{2 \\left(x - n\\right)}\\right)  \\\\  2  &  4\\end{matrix}\\right]"
)]
#[case(
    "langle [1,2], [2,int[3(x+1)]dx]:}",
    "\\left\\langle \\begin{matrix}1  &  2  \\\\  2  &  \\int \\left[3 \\left(x + 1\\right)\\right] dx\\end{matrix}\\right."
)]
#[case("(a_2^3+b^2) * 2", "\\left(a_{2}^{3} + b^{2}\\right) \\cdot 2")]
#[case(
    "[(\"a,b\"), (c, d)]",
    "\\left[\\left(\\text{a,b}\\right) , \\left(c , d\\right)\\right]"
)]
#[case("(x)_(y)", "\\left(x\\right)_{y}")]
#[case("text(a b) \"{50%}\"", "\\textrm{a b} \\text{\\{50\\%\\}}")]
fn asciimath_into_latex(#[case] source: &str, #[case] expected: &str) {
    let options = TranslateOptions::default();
    assert_eq!(
        asciimath_to_latex(source, &options).unwrap(),
        format!("${expected}$")
    );
}

const FLOOR: &str = "floor root n (f(x)) times a / b sum_(i=1)^n i^3=(frac (n(n+1)_2) 2)^2";
const FLOOR_MATHML: &str = "<mrow><mo>&lfloor;</mo><mrow><mrow><mroot><mrow><mrow><mi>f</mi><mrow><mo>(</mo><mrow><mi>x</mi></mrow><mo>)</mo></mrow></mrow></mrow><mrow><mi>n</mi></mrow></mroot></mrow></mrow><mo>&rfloor;</mo></mrow><mo>&times;</mo><mrow><mfrac><mrow><mi>a</mi></mrow><mrow><mi>b</mi></mrow></mfrac></mrow><mrow><msubsup><mrow><mo>&sum;</mo></mrow><mrow><mrow><mi>i</mi><mo>=</mo><mn>1</mn></mrow></mrow><mrow><mi>n</mi></mrow></msubsup></mrow><mrow><msup><mrow><mi>i</mi></mrow><mrow><mn>3</mn></mrow></msup></mrow><mo>=</mo><mrow><msup><mrow><mrow><mo>(</mo><mrow><mrow><mfrac><mrow><mrow><mi>n</mi><mrow><msub><mrow><mrow><mo>(</mo><mrow><mi>n</mi><mo>+</mo><mn>1</mn></mrow><mo>)</mo></mrow></mrow><mrow><mn>2</mn></mrow></msub></mrow></mrow></mrow><mrow><mn>2</mn></mrow></mfrac></mrow></mrow><mo>)</mo></mrow></mrow><mrow><mn>2</mn></mrow></msup></mrow>";

#[test]
fn asciimath_into_mathml() {
    let options = TranslateOptions::default().with_dtd(Dtd::MathML2);
    assert_eq!(
        asciimath_to_mathml(FLOOR, &options).unwrap(),
        format!("<math xmlns=\"http://www.w3.org/1998/Math/MathML\">{FLOOR_MATHML}</math>")
    );

    let options = options.with_displaystyle(true);
    assert_eq!(
        asciimath_to_mathml(FLOOR, &options).unwrap(),
        format!(
            "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><mstyle displaystyle=\"true\">\
            {FLOOR_MATHML}</mstyle></math>"
        )
    );
}

#[test]
fn mathml_pieces_in_order() {
    let options = TranslateOptions::default();
    let mathml = asciimath_to_mathml("(a_2^3+b^2) * 2", &options).unwrap();
    let mut rest = mathml.as_str();
    for piece in [
        "<mo>(</mo>",
        "<msubsup><mrow><mi>a</mi></mrow><mrow><mn>2</mn></mrow><mrow><mn>3</mn></mrow></msubsup>",
        "<mo>+</mo>",
        "<msup><mrow><mi>b</mi></mrow><mrow><mn>2</mn></mrow></msup>",
        "<mo>)</mo>",
        "<mo>&sdot;</mo>",
        "<mn>2</mn>",
    ] {
        let ind = rest.find(piece).unwrap_or_else(|| panic!("{piece} missing from {mathml}"));
        rest = &rest[ind + piece.len()..];
    }
}

#[test]
fn mathml_text_holds_characters() {
    let options = TranslateOptions::default();
    assert_eq!(
        asciimath_to_mathml("text(a b)", &options).unwrap(),
        "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><mrow><mtext>a b</mtext></mrow></math>"
    );
    let mathml = asciimath_to_mathml("[(\"a,b\"), (c, d)]", &options).unwrap();
    assert!(!mathml.contains("<mtable>"), "{mathml}");
}

#[test]
fn mathml_tables() {
    let options = TranslateOptions::default()
        .with_dtd(Dtd::MathML1)
        .with_displaystyle(true);
    assert_eq!(
        asciimath_to_mathml("langle [1,2], [2,int[3(x+1)]dx]:}", &options).unwrap(),
        "<math><mstyle displaystyle=\"true\"><mrow><mo>&langle;</mo><mtable><mtr><mtd><mn>1</mn>\
        </mtd><mtd><mn>2</mn></mtd></mtr><mtr><mtd><mn>2</mn></mtd><mtd><mo>&Integral;</mo><mrow>\
        <mo>[</mo><mrow><mn>3</mn><mrow><mo>(</mo><mrow><mi>x</mi><mo>+</mo><mn>1</mn></mrow><mo>\
        )</mo></mrow></mrow><mo>]</mo></mrow><mi>dx</mi></mtd></mtr></mtable><mo></mo></mrow>\
        </mstyle></math>"
    );
}

#[test]
fn mathml_text_and_color() {
    let options = TranslateOptions::default().with_dtd(Dtd::MathML2);
    assert_eq!(
        asciimath_to_mathml(
            "\\ \"setminus with color\" color(red)(x) root(n)(x)",
            &options
        )
        .unwrap(),
        "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><mo>&setminus;</mo><mtext>setminus \
        with color</mtext><mrow><mstyle mathcolor='red'><mrow><mrow><mi>x</mi></mrow></mrow>\
        </mstyle></mrow><mrow><mroot><mrow><mrow><mi>x</mi></mrow></mrow><mrow><mrow><mi>n</mi>\
        </mrow></mrow></mroot></mrow></math>"
    );
}

#[test]
fn mathml_documents() {
    let options = TranslateOptions::default()
        .with_dtd(Dtd::MathML1)
        .with_xml_declaration(true);
    assert_eq!(
        asciimath_to_mathml("1", &options).unwrap(),
        "<?xml version='1.0' encoding='UTF-8'?>\n<math><mn>1</mn></math>"
    );
    let options = options.with_doctype(true);
    assert_eq!(
        asciimath_to_mathml("1", &options).unwrap(),
        "<?xml version='1.0' encoding='UTF-8'?>\n<!DOCTYPE math SYSTEM \
        \"http://www.w3.org/Math/DTD/mathml1/mathml.dtd\">\n<math><mn>1</mn></math>"
    );
    let options = TranslateOptions::default()
        .with_dtd(Dtd::MathML2)
        .with_doctype(true);
    assert_eq!(
        asciimath_to_mathml("1", &options).unwrap(),
        "<!DOCTYPE math PUBLIC \"-//W3C//DTD MathML 2.0//EN\" \
        \"http://www.w3.org/Math/DTD/mathml2/mathml2.dtd\">\n<math \
        xmlns=\"http://www.w3.org/1998/Math/MathML\" \
        xmlns:xlink=\"http://www.w3.org/1999/xlink\"><mn>1</mn></math>"
    );
}

#[rstest]
#[case(
    "$\\left[\\begin{matrix}\\int x \\mathrm{dx}  \\\\  \\log \\left(x + 1\\right)\\end{matrix}\\right]$",
    "[{:[int x text(d x)],[log (x + 1)]:}]"
)]
#[case(
    "\\[\\left(\\left(1 , 2\\right)\\right) \\int \\sin \\frac{{x}^{2}}{4} \\pi \\mathrm{dx} \\sqrt[5]{{x}_{1}^{2} + {x}_{2}^{2}}\\]",
    "((1 , 2)) int sin frac((x)^(2))(4) pi text(d x) root(5)((x)_(1)^(2) + (x)_(2)^(2))"
)]
fn latex_into_asciimath(#[case] source: &str, #[case] expected: &str) {
    let options = TranslateOptions::default();
    assert_eq!(latex_to_asciimath(source, &options).unwrap(), expected);
}

#[rstest]
#[case("a + }")]
#[case("(x")]
fn asciimath_errors(#[case] source: &str) {
    let options = TranslateOptions::default();
    assert!(matches!(
        asciimath_to_latex(source, &options),
        Err(TranslationError::Syntax(_))
    ));
}

#[test]
fn latex_errors() {
    let options = TranslateOptions::default();
    match latex_to_asciimath("x}", &options) {
        Err(TranslationError::Syntax(err)) => {
            assert_eq!(err.kind, SyntaxErrorKind::UnmatchedClose);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn files() {
    let options = TranslateOptions::default();
    let dir = std::env::temp_dir();
    let input = dir.join(format!("asciimath-translate-{}.txt", std::process::id()));
    let output = dir.join(format!("asciimath-translate-{}.xml", std::process::id()));
    fs::write(&input, "a + b").unwrap();

    let translated = translate_file(
        &input,
        Some(output.as_path()),
        Dialect::AsciiMath,
        Dialect::MathML,
        &options,
    )
    .unwrap();
    assert_eq!(
        translated,
        "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><mi>a</mi><mo>+</mo><mi>b</mi></math>"
    );
    assert_eq!(fs::read_to_string(&output).unwrap(), translated);

    fs::remove_file(&input).unwrap();
    fs::remove_file(&output).unwrap();

    match translate_file(&input, None, Dialect::AsciiMath, Dialect::Latex, &options) {
        Err(TranslationError::Io { path, .. }) => assert_eq!(path, input),
        other => panic!("expected an io error, got {other:?}"),
    }
}
