//! `reportity render`: load a data file and write the report

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use crate::config::ReportOptions;
use crate::error::{ReportError, ReportResult};
use crate::export::{ByteExporter, CsvRenderer, PdfRenderer, StringExporter};
use crate::input::load_file;

/// Output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Binary PDF document
    Pdf,
    /// PDF document as base64 text
    Base64,
    /// The same table as CSV
    Csv,
}

/// Arguments of the render command
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Input data file (.csv or .json)
    pub input: PathBuf,

    /// Output file, or "-" for stdout
    #[arg(short, long)]
    pub output: String,

    /// Output encoding
    #[arg(short, long, value_enum, default_value = "pdf")]
    pub format: OutputFormat,

    /// Document title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Logo image (.png or .jpg)
    #[arg(short, long)]
    pub logo: Option<String>,

    /// Field to total in the summary row
    #[arg(short, long)]
    pub summary: Option<String>,

    /// Header label override, FIELD=LABEL (repeatable)
    #[arg(long = "header", value_parser = parse_header_override)]
    pub headers: Vec<(String, String)>,

    /// JSON or YAML options file; flags take precedence
    #[arg(long, env = "REPORTITY_OPTIONS")]
    pub options: Option<PathBuf>,
}

impl RenderArgs {
    /// Options file values with command-line flags applied on top
    pub fn report_options(&self) -> ReportResult<ReportOptions> {
        let mut options = match &self.options {
            Some(path) => ReportOptions::load(path)?,
            None => ReportOptions::default(),
        };

        if let Some(title) = &self.title {
            options.title = title.clone();
        }
        if let Some(logo) = &self.logo {
            options.logo_path = logo.clone();
        }
        if let Some(summary) = &self.summary {
            options.summary_field = Some(summary.clone());
        }
        for (field, label) in &self.headers {
            options
                .header_overrides
                .insert(field.clone(), label.clone());
        }

        Ok(options)
    }
}

/// Parse a `FIELD=LABEL` pair
pub fn parse_header_override(s: &str) -> Result<(String, String), String> {
    let (field, label) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=LABEL, got '{}'", s))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", s));
    }
    Ok((field.to_string(), label.to_string()))
}

/// Handle the render command
pub fn handle_render_command(args: RenderArgs) -> ReportResult<()> {
    let options = args.report_options()?;
    let (schema, records) = load_file(&args.input)?;

    let bytes = match args.format {
        OutputFormat::Pdf => PdfRenderer::with_schema(schema, options).export_to_bytes(&records)?,
        OutputFormat::Base64 => PdfRenderer::with_schema(schema, options)
            .export_to_text(&records)?
            .into_bytes(),
        OutputFormat::Csv => CsvRenderer::with_schema(schema, options).export_to_bytes(&records)?,
    };

    write_output(&args.output, &bytes)?;
    info!(
        input = %args.input.display(),
        output = %args.output,
        output_format = ?args.format,
        records = records.len(),
        bytes = bytes.len(),
        "report written"
    );

    if args.output != "-" {
        println!("Report written to: {}", args.output);
    }
    Ok(())
}

fn write_output(output: &str, bytes: &[u8]) -> ReportResult<()> {
    let write_err = |e: io::Error| ReportError::Io(format!("Failed to write {}: {}", output, e));

    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(bytes).map_err(write_err)?;
        return handle.flush().map_err(write_err);
    }

    let file = File::create(output).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(write_err)?;
    writer.flush().map_err(write_err)
}
