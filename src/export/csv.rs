//! CSV renderings with fixed column order
//!
//! Rows are joined with `\n` after the header line, without a trailing
//! newline. Fields holding a comma, quote or line break are quoted so every
//! row splits into exactly as many fields as the header.

use std::borrow::Cow;

use crate::dataset::ward::Ward;
use crate::export::grievance::GrievanceStat;

pub const WARD_CSV_HEADER: &str = "ward_id,ward_name,district,population,fund_allocated,fund_utilized,utilization_rate,complaint_count,resolution_rate,sla_score,governance_score,risk_level";

pub const GRIEVANCE_CSV_HEADER: &str =
    "ward_id,district,complaint_count,resolution_rate,population,complaint_ratio";

pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn render(header: &str, rows: impl Iterator<Item = String>) -> String {
    let mut out = String::from(header);
    for row in rows {
        out.push('\n');
        out.push_str(&row);
    }
    out
}

pub fn wards_csv<'a>(wards: impl IntoIterator<Item = &'a Ward>) -> String {
    render(
        WARD_CSV_HEADER,
        wards.into_iter().map(|w| {
            format!(
                "{},{},{},{},{},{},{},{},{},{},{},{}",
                csv_field(&w.id),
                csv_field(&w.name),
                csv_field(&w.district),
                w.population,
                w.fund_allocated,
                w.fund_utilized,
                w.utilization_rate,
                w.complaint_count,
                w.resolution_rate,
                w.sla_score,
                w.governance_score,
                w.risk_level,
            )
        }),
    )
}

pub fn grievance_csv(stats: &[GrievanceStat]) -> String {
    render(
        GRIEVANCE_CSV_HEADER,
        stats.iter().map(|g| {
            format!(
                "{},{},{},{},{},{}",
                csv_field(&g.ward_id),
                csv_field(&g.district),
                g.complaint_count,
                g.resolution_rate,
                g.population,
                g.complaint_ratio,
            )
        }),
    )
}

/// Split one CSV line into fields, honoring quotes
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', _) => quoted = !quoted,
            (',', false) => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
