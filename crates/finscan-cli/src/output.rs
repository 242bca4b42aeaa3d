//! Record persistence and terminal summaries.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use csv::{QuoteStyle, WriterBuilder};

use finscan_core::models::document::{DocumentRecord, SummaryRow};

/// Columns of the flattened per-document CSV.
const FLAT_HEADER: [&str; 12] = [
    "document_type",
    "processing_time",
    "total_amounts",
    "tax_amounts",
    "dates",
    "document_ids",
    "organizations",
    "persons",
    "locations",
    "sentiment",
    "sentiment_score",
    "urgency",
];

/// Paths of the files written for one record.
pub struct SavedPaths {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

/// `<DocType>_<input stem>_<YYYYmmdd_HHMMSS>`.
pub fn base_filename(record: &DocumentRecord, input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    format!(
        "{}_{}_{}",
        record.metadata.document_type.file_stem(),
        stem,
        record.metadata.processing_time.format("%Y%m%d_%H%M%S")
    )
}

/// Write the record as pretty JSON and/or flattened CSV under `dir`.
pub fn save_record(
    record: &DocumentRecord,
    dir: &Path,
    base: &str,
    write_json: bool,
    write_csv: bool,
) -> anyhow::Result<SavedPaths> {
    fs::create_dir_all(dir)?;

    let json = if write_json {
        let path = dir.join(format!("{}.json", base));
        fs::write(&path, serde_json::to_string_pretty(record)?)?;
        Some(path)
    } else {
        None
    };

    let csv = if write_csv {
        let path = dir.join(format!("{}.csv", base));
        fs::write(&path, flatten_csv(record)?)?;
        Some(path)
    } else {
        None
    };

    Ok(SavedPaths { json, csv })
}

fn join(set: &BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// One-row CSV with every field quoted.
pub fn flatten_csv(record: &DocumentRecord) -> anyhow::Result<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(vec![]);

    wtr.write_record(FLAT_HEADER)?;

    wtr.write_record([
        record.metadata.document_type.to_string(),
        record.metadata.processing_time.to_rfc3339(),
        join(&record.financial_data.totals),
        join(&record.financial_data.taxes),
        join(&record.financial_data.dates),
        join(&record.financial_data.ids),
        join(&record.entities.organizations),
        join(&record.entities.persons),
        join(&record.entities.locations),
        record.sentiment.label.to_string(),
        record.sentiment.score.to_string(),
        record.sentiment.urgency.to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Write `summary_report.csv` rows.
pub fn write_summary(path: &Path, rows: &[SummaryRow]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    if rows.is_empty() {
        wtr.write_record([
            "document_type",
            "processing_time",
            "total_amount",
            "tax_amount",
            "date",
            "sentiment",
            "urgency",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Human-readable summary of a successful record.
pub fn format_summary(record: &DocumentRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n",
        style("Document type:").bold(),
        record.metadata.document_type
    ));

    let fields = [
        ("Total amounts", &record.financial_data.totals),
        ("Tax amounts", &record.financial_data.taxes),
        ("Document IDs", &record.financial_data.ids),
    ];
    for (label, set) in fields {
        if !set.is_empty() {
            output.push_str(&format!("{}: {}\n", label, join(set)));
        }
    }

    output.push_str(&format!(
        "Sentiment: {} (score: {:.2})\n",
        record.sentiment.label, record.sentiment.score
    ));
    output.push_str(&format!("Urgency: {}\n", record.sentiment.urgency));

    output
}
