use confload::{Fields, FromDocument, Loader, SchemaError, logging};
use kdl::KdlDocument;
use std::path::PathBuf;

#[derive(Debug)]
#[allow(dead_code)]
struct Config {
    name: String,
    inputs: Inputs,
    output: Output,
}

#[derive(Debug)]
#[allow(dead_code)]
struct Inputs {
    path: PathBuf,
    formats: Vec<String>,
}

#[derive(Debug)]
#[allow(dead_code)]
struct Output {
    target_dir: PathBuf,
    strict: bool,
}

impl FromDocument for Config {
    fn from_document(doc: &KdlDocument) -> Result<Self, SchemaError> {
        let fields = Fields::new(doc, &["name", "inputs", "output"])?;
        Ok(Self {
            name: fields.string("name")?,
            inputs: fields.record("inputs")?,
            output: fields.record("output")?,
        })
    }
}

impl FromDocument for Inputs {
    fn from_document(doc: &KdlDocument) -> Result<Self, SchemaError> {
        let fields = Fields::new(doc, &["path", "formats"])?;
        Ok(Self {
            path: fields.string("path")?.into(),
            formats: fields.strings("formats")?,
        })
    }
}

impl FromDocument for Output {
    fn from_document(doc: &KdlDocument) -> Result<Self, SchemaError> {
        let fields = Fields::new(doc, &["target-dir", "strict"])?;
        Ok(Self {
            target_dir: fields.string("target-dir")?.into(),
            strict: fields.optional_boolean("strict")?.unwrap_or(false),
        })
    }
}

fn main() -> miette::Result<()> {
    logging::init_logging("debug")?;

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demos/assets/config.kdl"));

    let outcome = Loader::new().load::<Config>(&path);
    logging::report(&path, &outcome);

    let config = outcome?;
    println!("{:#?}", config);
    Ok(())
}
