//! qamask command line interface.
//!
//! Derives reclassification rules for user requested levels of quality conditions of
//! a bit-packed quality band.
//!
//! ```text
//! qamask fill=Fill cloud_confidence=Medium,High -o rules.txt
//! qamask --product landsat8-c1 "cloud_confidence=High" radiometric_saturation="5+ bands"
//! qamask --list
//! ```

use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use log::info;
use qamask::{
    classify::{self, InversionMode},
    filter::FilterSet,
    product::Product,
    serde::ProductDef,
    sink::Sink,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Built-in quality band to classify
    #[arg(short, long, default_value = "landsat8-c2", conflicts_with = "layout")]
    product: String,

    /// JSON product definition to use instead of a built-in product
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Invert output of the requested quality flags
    #[arg(short, long)]
    invert: bool,

    /// Output file with reclass rules (standard output if omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// List the fields and labels of the product and exit
    #[arg(long, conflicts_with_all = ["filters", "output", "explain", "invert"])]
    list: bool,

    /// Print the product definition as JSON and exit
    #[arg(long, conflicts_with_all = ["filters", "output", "explain", "invert", "list"])]
    dump_layout: bool,

    /// Decode a single quality word and exit
    #[arg(long, value_name = "WORD", conflicts_with = "output")]
    explain: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Unacceptable conditions, e.g. cloud_confidence=Medium,High
    #[arg(value_name = "FIELD=LABELS", value_parser = parse_filter)]
    filters: Vec<(String, String)>,
}

/// Parses a `FIELD=LABEL[,LABEL...]` argument.
fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (field, labels) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=LABELS, got {s:?}"))?;

    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in {s:?}"));
    }

    Ok((field.to_string(), labels.to_string()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_product(args: &Args) -> Result<Product> {
    if let Some(path) = &args.layout {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading layout file {}", path.display()))?;
        let def: ProductDef = serde_json::from_str(&text)
            .with_context(|| format!("parsing layout file {}", path.display()))?;
        info!("loaded product {} from {}", def.name, path.display());
        return Ok(def.into());
    }

    match Product::by_name(&args.product) {
        Some(product) => Ok(product),
        None => {
            let available: Vec<String> = Product::builtin().into_iter().map(|p| p.name).collect();
            bail!(
                "unknown product {:?} (available: {})",
                args.product,
                available.join(", ")
            )
        }
    }
}

fn filter_set(args: &Args) -> FilterSet {
    FilterSet::from_options(
        args.filters
            .iter()
            .map(|(field, labels)| (field.as_str(), Some(labels.as_str()))),
    )
}

fn print_listing(product: &Product) {
    println!("{}: {}", product.name, product.description);
    println!(
        "{}-bit word, inversion {}",
        product.word_bits,
        if product.supports_inversion {
            "supported"
        } else {
            "not supported"
        }
    );

    for field in &product.fields {
        println!();
        println!("{:<24} {}", field.name, field.description);
        for label in &field.labels {
            println!("    {:<16} {}", label.name, label.bits);
        }
    }
}

fn explain(product: &Product, word: u32, filter: &FilterSet, mode: InversionMode) -> Result<()> {
    let (layout, active) = product.validate(filter, mode)?;
    if word > layout.max_category() {
        bail!(
            "{word} does not fit a {}-bit quality word",
            layout.word_bits()
        );
    }

    println!(
        "{word} = {}",
        qamask::bits::format_bits(word, layout.word_bits())
    );
    for decoded in layout.decode(word) {
        println!(
            "    {:<24} {:>4}  {}",
            decoded.name,
            decoded.bits,
            decoded.label.unwrap_or("-")
        );
    }

    if !filter.is_empty() {
        let verdict = if classify::is_excluded(&active, word, mode) {
            "NULL"
        } else {
            "1"
        };
        println!("rule: {word} = {verdict}");
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let product = load_product(args)?;

    if args.list {
        print_listing(&product);
        return Ok(());
    }

    if args.dump_layout {
        let json = serde_json::to_string_pretty(&ProductDef::from(&product))?;
        println!("{json}");
        return Ok(());
    }

    let filter = filter_set(args);
    let mode = InversionMode::from(args.invert);

    if let Some(word) = args.explain {
        return explain(&product, word, &filter, mode);
    }

    let rules = product.rules(&filter, mode)?;

    let sink = Sink::from_path(args.output.as_deref());
    sink.write(&rules).with_context(|| match &sink {
        Sink::File(path) => format!("writing rules to {}", path.display()),
        Sink::Stdout => "writing rules to standard output".to_string(),
    })?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(&args)
}
