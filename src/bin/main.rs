// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::{Parser, Subcommand, ValueEnum};
use csv::{ReaderBuilder, Trim, Writer};
use ips_qr::{
    Config, PaymentInstruction, PaymentType, PngRenderer, QrCodeView, RenderOptions,
    amount_in_words, render_instruction,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// IPS QR - NBS payment codes for tax and contribution payments
///
/// Reads payment rows from a CSV file and prints their IPS QR payloads,
/// renders them as PNG images, or spells out amounts for invoices.
#[derive(Parser, Debug)]
#[command(name = "ips-qr")]
#[command(about = "Builds NBS IPS QR payment codes from payment CSVs", long_about = None)]
struct Args {
    /// TOML file with render and log settings
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the IPS payload of every payment row
    ///
    /// Expected columns: payment_type,recipient,recipient_location,account_number,
    /// amount,payment_code,payment_purpose,model,reference_number
    Encode {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
    /// Render every payment row to `<out-dir>/payment-<row>.png`
    Render {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        /// Image size in pixels, overrides the config file
        #[arg(long)]
        size: Option<u32>,
    },
    /// Spell out an amount in Serbian
    Words {
        #[arg(allow_hyphen_values = true)]
        amount: Decimal,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match Config::from_toml_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };
    init_tracing(&config.log.filter);

    let result = match args.command {
        Command::Encode { input, format } => open(&input).and_then(|reader| {
            encode_payments(reader, std::io::stdout().lock(), format)
                .map(|summary| {
                    tracing::info!(
                        encoded = summary.succeeded,
                        failed = summary.failed,
                        skipped = summary.skipped,
                        "encode finished"
                    );
                })
                .map_err(|e| format!("Error encoding payments: {e}"))
        }),
        Command::Render {
            input,
            out_dir,
            size,
        } => {
            let mut options = config.render;
            if let Some(size) = size {
                options.size = size;
            }
            open(&input).and_then(|reader| {
                render_payments(reader, &out_dir, &options)
                    .map(|summary| {
                        tracing::info!(
                            rendered = summary.succeeded,
                            placeholders = summary.failed,
                            skipped = summary.skipped,
                            "render finished"
                        );
                    })
                    .map_err(|e| format!("Error rendering payments: {e}"))
            })
        }
        Command::Words { amount } => amount_in_words(amount)
            .map(|words| println!("{words}"))
            .map_err(|e| format!("Error: {e}")),
    };

    if let Err(message) = result {
        eprintln!("{message}");
        process::exit(1);
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open(path: &Path) -> Result<BufReader<File>, String> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| format!("Error opening file '{}': {}", path.display(), e))
}

/// Raw CSV payment row.
///
/// A row carrying only `payment_type` and `amount` uses the default payee
/// details of that type.
/// An unknown `payment_type` makes the row malformed.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(default)]
    payment_type: Option<PaymentType>,
    #[serde(default)]
    recipient: String,
    #[serde(default)]
    recipient_location: Option<String>,
    #[serde(default)]
    account_number: String,
    amount: Decimal,
    #[serde(default)]
    payment_code: Option<String>,
    #[serde(default)]
    payment_purpose: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    reference_number: String,
}

impl CsvRecord {
    fn into_instruction(self) -> PaymentInstruction {
        if self.recipient.is_empty() && self.account_number.is_empty() {
            if let Some(payment_type) = self.payment_type {
                return payment_type.default_details().instruction(self.amount);
            }
        }

        PaymentInstruction {
            recipient_name: self.recipient,
            recipient_location: self.recipient_location.filter(|l| !l.is_empty()),
            account_number: self.account_number,
            amount: self.amount,
            payment_code: self.payment_code,
            payment_purpose: self.payment_purpose,
            model: self.model,
            reference_number: self.reference_number,
        }
    }
}

/// One output row per readable input row.
#[derive(Debug, Serialize)]
struct OutputRow {
    row: usize,
    payload: Option<String>,
    error: Option<String>,
}

/// Counts of what happened to the input rows.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    succeeded: usize,
    failed: usize,
    skipped: usize,
}

/// Streams payment rows from `reader` and yields `(row, instruction)`.
///
/// Rows are numbered from 1, not counting the header. Malformed rows are
/// logged and skipped.
fn read_instructions<R: Read>(
    reader: R,
    summary: &mut Summary,
) -> impl Iterator<Item = (usize, PaymentInstruction)> {
    let rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    rdr.into_deserialize::<CsvRecord>()
        .enumerate()
        .filter_map(move |(index, result)| {
            let row = index + 1;
            match result {
                Ok(record) => Some((row, record.into_instruction())),
                Err(e) => {
                    tracing::warn!(row, error = %e, "skipping malformed row");
                    summary.skipped += 1;
                    None
                }
            }
        })
}

/// Encodes every payment row and writes `row,payload,error` records.
///
/// Rows that cannot be encoded get an empty payload and the error message.
///
/// # Errors
///
/// Returns a CSV error if writing the output fails.
fn encode_payments<R: Read, W: Write>(
    reader: R,
    writer: W,
    format: OutputFormat,
) -> Result<Summary, csv::Error> {
    let mut summary = Summary::default();
    let mut rows = Vec::new();
    for (row, instruction) in read_instructions(reader, &mut summary) {
        rows.push(match instruction.encode() {
            Ok(payload) => OutputRow {
                row,
                payload: Some(payload.into_string()),
                error: None,
            },
            Err(e) => OutputRow {
                row,
                payload: None,
                error: Some(e.to_string()),
            },
        });
    }

    for row in &rows {
        if row.payload.is_some() {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
        }
    }

    match format {
        OutputFormat::Csv => {
            let mut wtr = Writer::from_writer(writer);
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => {
            let mut writer = writer;
            for row in &rows {
                serde_json::to_writer(&mut writer, row).map_err(std::io::Error::from)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
    }
    Ok(summary)
}

/// Renders every payment row to a PNG in `out_dir`.
///
/// # Errors
///
/// Returns an I/O error if the output directory cannot be created.
fn render_payments<R: Read>(
    reader: R,
    out_dir: &Path,
    options: &RenderOptions,
) -> Result<Summary, std::io::Error> {
    std::fs::create_dir_all(out_dir)?;

    let mut summary = Summary::default();
    let mut views = Vec::new();
    for (row, instruction) in read_instructions(reader, &mut summary) {
        let renderer = PngRenderer::new(out_dir.join(format!("payment-{row}.png")));
        views.push((row, render_instruction(&renderer, &instruction, options)));
    }

    for (row, view) in views {
        match view {
            QrCodeView::Rendered(path) => {
                summary.succeeded += 1;
                println!("{row}\t{}", path.display());
            }
            QrCodeView::Placeholder => {
                summary.failed += 1;
                println!("{row}\tplaceholder");
            }
        }
    }
    Ok(summary)
}
