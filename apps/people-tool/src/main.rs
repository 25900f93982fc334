//! CLI tool for inspecting nested person form submissions.
//!
//! `decode` turns a raw form-encoded body into the structured record (or the
//! upstream payload shape); `fields` prints the field names a renderer must
//! emit for a given record. Both read from a file or stdin.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use people_form_core::codec;
use people_form_core::form::parse_form_urlencoded;
use people_form_core::model::PersonForm;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a form-encoded submission body into a structured record
    Decode {
        /// File containing the body; reads stdin when omitted
        input: Option<PathBuf>,

        /// Print the upstream payload shape (*_attributes collections)
        #[arg(long)]
        payload: bool,
    },
    /// Print the flat form fields for a person record given as JSON
    Fields {
        /// File containing the record JSON; reads stdin when omitted
        input: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Decode { input, payload } => {
            let body = read_input(input)?;
            let form = codec::decode(&parse_form_urlencoded(&body));
            let json = if payload {
                serde_json::to_string_pretty(&form.into_payload())?
            } else {
                serde_json::to_string_pretty(&form)?
            };
            println!("{}", json);
        }
        Command::Fields { input } => {
            let raw = read_input(input)?;
            let form: PersonForm =
                serde_json::from_slice(&raw).context("input is not a person record")?;
            for (name, value) in codec::encode(&form) {
                println!("{}={}", name, value);
            }
        }
    }

    Ok(())
}

fn read_input(input: Option<PathBuf>) -> anyhow::Result<Vec<u8>> {
    match input {
        Some(path) => {
            fs::read(&path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
