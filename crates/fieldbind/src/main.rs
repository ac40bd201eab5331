//! fieldbind - command line entry point
//!
//! Offline helpers for inspecting how records and form bodies are read.

use anyhow::{Context, bail};
use fieldbind::{BoundValue, Settings, parse_form_body};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  fieldbind parse-form <body>   parse an urlencoded body into JSON
  fieldbind classify <json>     show how each top-level key would bind
  fieldbind config [file]       print the effective settings";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_default();

    match command.as_str() {
        "parse-form" => {
            let body = args.next().context("parse-form needs a body")?;
            let record = parse_form_body(&body)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        "classify" => {
            let text = args.next().context("classify needs a JSON document")?;
            let value: Value = serde_json::from_str(&text).context("invalid JSON")?;
            match &value {
                Value::Object(map) => {
                    for (key, sub) in map {
                        println!("{}: {}", key, BoundValue::classify(sub).kind_name());
                    }
                }
                other => println!("{}", BoundValue::classify(other).kind_name()),
            }
        }
        "config" => {
            let settings = match args.next() {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path))?;
                    Settings::from_json(&text)?
                }
                None => Settings::default(),
            };
            tracing::debug!("settings: {:?}", settings);
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        "" | "help" | "--help" | "-h" => println!("{}", USAGE),
        other => bail!("unknown command `{}`\n{}", other, USAGE),
    }

    Ok(())
}
