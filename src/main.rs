use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use client_record::client::validate_field;
use client_record::config::{config_dir, init_config, load_settings};
use client_record::{ClientBrief, ClientRecord, Field, OutputFormat, Result, Settings};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "client")]
#[command(version, about = "Validated client records", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a settings template
    Init,

    /// Print a sample client record and its brief form
    Sample {
        /// Output format (default: from config.toml)
        #[arg(short, long, value_enum)]
        to: Option<OutputFormat>,
    },

    /// Parse a client record and print it in another form
    Parse {
        /// Record text, or '-' to read from stdin
        input: String,

        /// Input representation
        #[arg(short, long, value_enum, default_value_t = InputFormat::String)]
        from: InputFormat,

        /// Output format (default: from config.toml)
        #[arg(short, long, value_enum)]
        to: Option<OutputFormat>,
    },

    /// Check a single field value (client_id, name, ownership_type, address, phone)
    Check {
        field: String,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    /// "<id>, <name>, <ownership type>, <address>, <phone>"
    String,
    /// JSON object with client_id, name, ownership_type, address, phone
    Json,
    /// "<id>, <name>, <phone>"
    Legacy,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Sample { to } => cmd_sample(&cfg_dir, to),
        Commands::Parse { input, from, to } => cmd_parse(&cfg_dir, &input, from, to),
        Commands::Check { field, value } => cmd_check(&field, &value),
    }
}

fn cmd_init(cfg_dir: &Path) -> Result<()> {
    let path = init_config(cfg_dir)?;
    println!("Initialized client config at: {}", cfg_dir.display());
    println!("Edit output settings in: {}", path.display());
    Ok(())
}

fn cmd_sample(cfg_dir: &Path, to: Option<OutputFormat>) -> Result<()> {
    let settings = load_settings(cfg_dir)?;
    let format = to.unwrap_or(settings.output.format);

    let client = ClientRecord::new(
        1,
        "ООО Ромашка",
        "ООО",
        "г. Москва, ул. Ленина, д.10",
        "8 (123) 456-78-90",
    )?;
    println!("{}", render(&client, format, &settings)?);

    let brief = ClientBrief::from_record(&client);
    println!("{}", render_brief(&brief, format)?);
    Ok(())
}

fn cmd_parse(
    cfg_dir: &Path,
    input: &str,
    from: InputFormat,
    to: Option<OutputFormat>,
) -> Result<()> {
    let settings = load_settings(cfg_dir)?;
    let format = to.unwrap_or(settings.output.format);

    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        input.to_string()
    };

    let output = match from {
        InputFormat::String => render(&text.trim().parse::<ClientRecord>()?, format, &settings)?,
        InputFormat::Json => render(&ClientRecord::from_json(&text)?, format, &settings)?,
        InputFormat::Legacy => render_brief(&text.trim().parse::<ClientBrief>()?, format)?,
    };
    log::info!("parsed {from:?} input");

    println!("{output}");
    Ok(())
}

fn cmd_check(field: &str, value: &str) -> Result<()> {
    let field: Field = field.parse()?;
    validate_field(field, value)?;
    println!("valid");
    Ok(())
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "FIELD")]
    field: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

fn render(client: &ClientRecord, format: OutputFormat, settings: &Settings) -> Result<String> {
    match format {
        OutputFormat::Display => Ok(client.to_display_string()),
        OutputFormat::Json => client.to_json_with_indent(settings.output.indent),
        OutputFormat::String => client.to_delimited_string(),
        OutputFormat::Table => Ok(field_table(&client.to_mapping())),
    }
}

fn render_brief(brief: &ClientBrief, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Display => Ok(brief.to_string()),
        OutputFormat::Json => brief.to_json(),
        OutputFormat::String => brief.to_delimited_string(),
        OutputFormat::Table => Ok(field_table(&brief.to_mapping())),
    }
}

fn field_table(mapping: &Map<String, Value>) -> String {
    let rows: Vec<FieldRow> = mapping
        .iter()
        .map(|(key, value)| FieldRow {
            field: key.clone(),
            value: match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            },
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
