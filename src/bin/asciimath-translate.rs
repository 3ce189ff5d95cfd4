use asciimath_translate::catalog::Dialect;
use asciimath_translate::mathml::Dtd;
use asciimath_translate::{translate, translate_file, TranslateOptions, TranslationError};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Lang {
    Asciimath,
    Latex,
    Mathml,
}

impl From<Lang> for Dialect {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::Asciimath => Dialect::AsciiMath,
            Lang::Latex => Dialect::Latex,
            Lang::Mathml => Dialect::MathML,
        }
    }
}

#[derive(Parser)]
#[command(name = "asciimath-translate")]
#[command(about = "Translate asciimath into LaTeX or MathML, or LaTeX into asciimath")]
struct Args {
    /// Math to translate, or a path with --from-file
    input: String,
    /// Dialect of the input
    #[arg(long, value_enum, default_value = "asciimath")]
    from: Lang,
    /// Dialect of the output
    #[arg(long, value_enum, default_value = "latex")]
    to: Lang,
    /// Display rather than inline math
    #[arg(long)]
    displaystyle: bool,
    /// Log the parsed tree
    #[arg(long)]
    pretty_print: bool,
    /// MathML version: mathml1, mathml2 or mathml3
    #[arg(long)]
    dtd: Option<Dtd>,
    /// Write the MathML DOCTYPE of --dtd
    #[arg(long)]
    doctype: bool,
    /// Start MathML output with an XML declaration
    #[arg(long)]
    xml_declaration: bool,
    /// Read the input from the file it names
    #[arg(long)]
    from_file: bool,
    /// Write the translation to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Log each translation step
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), TranslationError> {
    let mut options = TranslateOptions::default()
        .with_displaystyle(args.displaystyle)
        .with_pretty_print(args.pretty_print)
        .with_doctype(args.doctype)
        .with_xml_declaration(args.xml_declaration);
    if let Some(dtd) = args.dtd {
        options = options.with_dtd(dtd);
    }
    let (from, to) = (args.from.into(), args.to.into());
    if args.from_file {
        let input = PathBuf::from(&args.input);
        let translated = translate_file(&input, args.output.as_deref(), from, to, &options)?;
        if args.output.is_none() {
            println!("{translated}");
        }
    } else {
        let translated = translate(&args.input, from, to, &options)?;
        match &args.output {
            Some(path) => std::fs::write(path, translated).map_err(|source| {
                TranslationError::Io {
                    path: path.clone(),
                    source,
                }
            })?,
            None => println!("{translated}"),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose {
        "debug"
    } else if args.pretty_print {
        "info"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
