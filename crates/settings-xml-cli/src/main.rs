//! xml-settings - print the settings tree an XML document produces

use anyhow::{Context, Result};
use clap::Parser;
use settings_xml::{XmlParseOptions, parse_with_options};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "xml-settings")]
#[command(version)]
#[command(about = "Print the settings tree an XML document produces", long_about = None)]
struct Cli {
    /// XML file to read (stdin when omitted or '-')
    input: Option<PathBuf>,

    /// Name for the root node instead of the root element's tag
    #[arg(long)]
    root_name: Option<String>,

    /// Trim whitespace around text values
    #[arg(long)]
    trim_text: bool,

    /// Print the tree as JSON instead of an outline
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn options(&self) -> XmlParseOptions {
        XmlParseOptions {
            root_name: self.root_name.clone(),
            trim_text: self.trim_text,
        }
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            _ => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read standard input")?;
                Ok(text)
            }
        }
    }
}

fn run(cli: &Cli, text: &str, out: &mut impl Write) -> Result<()> {
    let Some(settings) = parse_with_options(text, &cli.options())? else {
        info!("input is blank, no settings");
        return Ok(());
    };

    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &settings)?;
    } else {
        write!(out, "{}", settings)?;
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let text = cli.read_input()?;
    run(&cli, &text, &mut std::io::stdout().lock())
}
