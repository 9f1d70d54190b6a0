//! Fill placeholders of a DOCX template from the command line.
//!
//! Usage:
//!   docx-fill --template in.docx [-o out.docx] \
//!     --set '{name}=Ann Lee' --set '{address}=1 Main St\nSpringfield' \
//!     --line '{items}=Apples' --line '{items}=Pears'

use clap::Parser;
use docx_template::{generate_docx, process_docx, Replacement};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "docx-fill", about = "Replace placeholders in a DOCX template")]
struct Cli {
    /// Template DOCX file
    #[arg(short, long)]
    template: PathBuf,

    /// Output DOCX file (default: unique output_<time>_<n>.docx in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Inline replacement "PLACEHOLDER=VALUE"; a literal \n in VALUE becomes a line break
    #[arg(long = "set", value_name = "PLACEHOLDER=VALUE", value_parser = parse_pair)]
    set: Vec<(String, String)>,

    /// Append one paragraph line to PLACEHOLDER's list, "PLACEHOLDER=LINE" (repeatable)
    #[arg(long = "line", value_name = "PLACEHOLDER=LINE", value_parser = parse_pair)]
    line: Vec<(String, String)>,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PLACEHOLDER=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err("placeholder must not be empty".into());
    }
    Ok((key.to_string(), value.to_string()))
}

fn build_replacements(cli: &Cli) -> Result<HashMap<String, Replacement>, String> {
    let mut replacements = HashMap::new();

    for (key, value) in &cli.set {
        let value = value.replace("\\n", "\n");
        if replacements
            .insert(key.clone(), Replacement::Text(value))
            .is_some()
        {
            return Err(format!("'{}' given more than once", key));
        }
    }

    for (key, line) in &cli.line {
        match replacements
            .entry(key.clone())
            .or_insert_with(|| Replacement::Lines(Vec::new()))
        {
            Replacement::Lines(lines) => lines.push(line.clone()),
            Replacement::Text(_) => {
                return Err(format!("'{}' used with both --set and --line", key));
            }
        }
    }

    Ok(replacements)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let replacements = match build_replacements(&cli) {
        Ok(r) => r,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.output {
        Some(output) => process_docx(&cli.template, output, &replacements).map(|_| output.clone()),
        None => generate_docx(&cli.template, &replacements),
    };

    match result {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
