//! CSV output formatting.
//!
//! Findings are flattened to `field,value` rows. Modes with a fan-out
//! follow them with a second table holding one row per endpoint checked.

use crate::probe::ProbeOutcome;
use crate::recon::Findings;
use serde_json::Value;
use std::io::{self, Write};

/// Keys carrying fan-out results; written as their own table.
const FAN_OUT_KEYS: [&str; 3] = ["probes", "subdomain_probes", "port_probes"];

/// Write findings in CSV format.
pub fn write_csv<W: Write>(out: &mut W, findings: &Findings) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);

    let mut value = serde_json::to_value(findings).map_err(io::Error::other)?;
    if let Value::Object(map) = &mut value {
        for key in FAN_OUT_KEYS {
            map.remove(key);
        }
    }
    let mut rows = Vec::new();
    flatten("", &value, &mut rows);

    wtr.write_record(["field", "value"])?;
    for (field, value) in rows {
        wtr.write_record([field, value])?;
    }

    let probes = findings.probes();
    if !probes.is_empty() {
        wtr.write_record(["label", "endpoint", "status", "reason", "detail", "elapsed_ms"])?;
        for result in probes {
            let (status, reason) = match &result.outcome {
                ProbeOutcome::Found => ("found", ""),
                ProbeOutcome::NotFound => ("not_found", ""),
                ProbeOutcome::Error(reason) => ("error", reason.as_str()),
            };
            wtr.write_record([
                result.label.as_str(),
                result.endpoint.as_str(),
                status,
                reason,
                result.detail.as_deref().unwrap_or(""),
                result.elapsed_ms.to_string().as_str(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Flatten nested JSON into dotted paths (`hashes.md5`, `mx_records.0.exchange`).
fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten(&join(key), value, rows);
            }
        }
        Value::Array(items) => {
            for (i, value) in items.iter().enumerate() {
                flatten(&join(&i.to_string()), value, rows);
            }
        }
        Value::String(s) => rows.push((prefix.to_string(), s.clone())),
        Value::Null => rows.push((prefix.to_string(), String::new())),
        other => rows.push((prefix.to_string(), other.to_string())),
    }
}
