//! Record formatting shared by the process and batch commands.

use cardscan_core::{BusinessCard, ParseReport};

/// Header of the per-record CSV output.
pub const CSV_HEADER: [&str; 7] = [
    "name",
    "job_title",
    "company",
    "phone",
    "email",
    "website",
    "address",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for batch outputs.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_card(card: &BusinessCard, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(card)?),
        OutputFormat::Csv => format_csv(card),
        OutputFormat::Text => Ok(format_text(card)),
    }
}

fn format_csv(card: &BusinessCard) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(card.fields().map(|(_, value)| value))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(card: &BusinessCard) -> String {
    let mut output = String::new();

    for (key, value) in card.fields() {
        let label = format!("{}:", key.replace('_', " "));
        output.push_str(&format!("{label:<11}{value}\n"));
    }

    output
}

/// Human-readable account of how the record was derived.
pub fn format_explain(report: &ParseReport) -> String {
    let mut output = String::new();

    output.push_str("Lines:\n");
    for (i, line) in report.lines.iter().enumerate() {
        output.push_str(&format!("  {:>2} {} {}\n", i, line.tags, line.text));
    }
    output.push('\n');

    output.push_str(&format!("Emails:   {}\n", report.emails.join(", ")));
    output.push_str(&format!("Phones:   {}\n", report.phones.join(", ")));
    output.push_str(&format!("Websites: {}\n", report.websites.join(", ")));

    output
}
