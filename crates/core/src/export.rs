//! CSV export of the reading log.
//!
//! Columns follow the persisted record layout: date, time, value, context
//! label, feedback message, tone, note.

use chrono::NaiveDate;

use crate::reading::Reading;

/// Header row, in column order.
pub const CSV_HEADERS: [&str; 7] = [
    "Data",
    "Ora",
    "Valoare",
    "Tip Măsurare",
    "Feedback",
    "Ton",
    "Note",
];

/// Escape a value for CSV: wrap in quotes if it contains comma, quote, or newline.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Build a CSV document from readings, one row per reading in the given order.
pub fn build_csv(readings: &[Reading]) -> String {
    let mut lines = Vec::with_capacity(readings.len() + 1);
    lines.push(
        CSV_HEADERS
            .iter()
            .map(|h| csv_escape(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for reading in readings {
        let row = [
            reading.date_string(),
            reading.time_string(),
            reading.value().to_string(),
            csv_escape(reading.context().label()),
            csv_escape(reading.message()),
            reading.tone().as_str().to_string(),
            csv_escape(reading.note().unwrap_or_default()),
        ];
        lines.push(row.join(","));
    }

    let mut csv = lines.join("\n");
    csv.push('\n');
    csv
}

/// Download file name for an export produced on `today`.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("glicemie_{}.csv", today.format("%Y%m%d"))
}
