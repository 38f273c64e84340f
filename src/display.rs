//! # display
//!
//! Renders API payloads and part summaries for the terminal.
//!
//! Everything is written to a caller supplied writer so the loop and the tests
//! can share the same code.

use crate::client::Payload;
use crate::services::{analyze_ownership, list_managing_services, OwnershipRecord};
use crate::summary::PartSummary;
use crate::table::Table;

use std::io::Write;

use serde_json::Value;

const WIDTH: usize = 60;
const ITEM_RULE: usize = 40;

fn banner(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", "=".repeat(WIDTH))
}

fn rule(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", "-".repeat(WIDTH))
}

/// Writes a JSON value without quotes around bare strings.
fn write_scalar(out: &mut impl Write, value: &Value) -> std::io::Result<()> {
    match value {
        Value::String(s) => writeln!(out, "{}", s),
        other            => writeln!(out, "{}", other),
    }
}

fn write_pretty(out: &mut impl Write, value: &Value) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Prints what came back from one table query.
///
/// `None` means the query failed and has already been reported. A JSON
/// `null` body is treated the same way.
pub fn display_payload(out: &mut impl Write, payload: Option<&Payload>) -> std::io::Result<()> {
    let payload = match payload {
        None | Some(Payload::Json(Value::Null)) => return writeln!(out, "No data received from API"),
        Some(payload) => payload,
    };

    writeln!(out)?;
    banner(out)?;
    writeln!(out, "NIIN DATA FROM OPENFLIS API")?;
    banner(out)?;

    match payload {
        Payload::Json(value @ Value::Object(_)) => {
            write_pretty(out, value)?;
            if payload.table_name() == Some(Table::MoeRule.upstream()) {
                let records: Vec<OwnershipRecord> =
                    payload.records().iter().map(OwnershipRecord::from_record).collect();
                if !records.is_empty() {
                    display_ownership(out, &records)?;
                }
            }
        }
        Payload::Json(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                writeln!(out, "Item {}:", i + 1)?;
                match item {
                    Value::Object(_) => write_pretty(out, item)?,
                    other            => write_scalar(out, other)?,
                }
                writeln!(out, "{}", "-".repeat(ITEM_RULE))?;
            }
        }
        Payload::Json(other) => write_scalar(out, other)?,
        Payload::Text(text)  => writeln!(out, "{}", text)?,
    }

    banner(out)
}

/// Managing services and ownership analysis blocks for MOE_RULE records.
pub fn display_ownership(out: &mut impl Write, records: &[OwnershipRecord]) -> std::io::Result<()> {
    let services = list_managing_services(records);
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "MANAGING SERVICES SUMMARY:")?;
    writeln!(out, "Managing Services for this NIIN: {}", services.join(", "))?;
    rule(out)?;

    let ownership = analyze_ownership(records);
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "SERVICE OWNERSHIP ANALYSIS:")?;
    writeln!(out, "Managed by: {}", ownership.managing_service)?;
    if ownership.user_services.is_empty() {
        writeln!(out, "Used by: None specified")?;
    } else {
        writeln!(out, "Used by: {}", ownership.user_services.join(", "))?;
    }
    rule(out)
}

pub fn display_part_summary(out: &mut impl Write, summary: &PartSummary) -> std::io::Result<()> {
    writeln!(out)?;
    banner(out)?;
    writeln!(out, "PART SUMMARY")?;
    banner(out)?;

    match &summary.details {
        Some(d) => {
            writeln!(out, "Part Number: {}", d.part_number)?;
            writeln!(out, "NSN: {}", d.nsn)?;
            writeln!(out, "FSC: {}", d.fsc)?;
            writeln!(out, "NIIN: {}", d.niin)?;
            writeln!(out, "Description: {}", d.description)?;
            writeln!(out, "Managing Service: {}", d.managing_service)?;
            if !d.end_item_application.is_empty() {
                writeln!(out, "End Item Application: {}", d.end_item_application)?;
            }
        }
        None => {
            for label in ["Part Number", "NSN", "FSC", "NIIN", "Description", "Managing Service"] {
                writeln!(out, "{}: N/A", label)?;
            }
        }
    }
    banner(out)?;

    if !summary.errors.is_empty() {
        writeln!(out, "\nErrors encountered:")?;
        for e in summary.errors.iter() {
            writeln!(out, "  {}", e)?;
        }
    }

    Ok(())
}
