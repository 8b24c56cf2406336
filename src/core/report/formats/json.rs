//! JSON report generator

use crate::core::report::{round2, AnalyticsReport, ReportGenerator};
use crate::core::error::Result;
use serde::Serialize;
use serde_json::{Number, Value};

/// JSON report generator
///
/// Emits the report value as pretty-printed JSON with every float rounded to
/// two decimals. Field names follow the serialized analytics types.
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn round_floats(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(rounded) = n.as_f64().map(round2).and_then(Number::from_f64) {
                *n = rounded;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(round_floats),
        Value::Object(map) => map.values_mut().for_each(round_floats),
        _ => {}
    }
}

fn to_value(data: &impl Serialize) -> Result<Value> {
    let mut value = serde_json::to_value(data)?;
    round_floats(&mut value);
    Ok(value)
}

impl ReportGenerator for JsonReporter {
    fn render(&self, report: &AnalyticsReport) -> Result<String> {
        let value = match report {
            AnalyticsReport::MinorRecommendations(r) => to_value(r)?,
            AnalyticsReport::CourseRecommendations(r) => to_value(r)?,
            AnalyticsReport::Gaps(r) => to_value(r)?,
            AnalyticsReport::WhatIf(r) => to_value(r)?,
            AnalyticsReport::Orbit { orbit, .. } => to_value(orbit)?,
            AnalyticsReport::Resume(r) => to_value(r)?,
            AnalyticsReport::SkillTree(nodes) => to_value(nodes)?,
        };
        Ok(serde_json::to_string_pretty(&value)? + "\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_floats_nested() {
        let mut value = json!({
            "score": 1.666_666,
            "items": [{"pct": 33.333_333}, {"count": 3}],
            "name": "x"
        });
        round_floats(&mut value);
        assert_eq!(value["score"], json!(1.67));
        assert_eq!(value["items"][0]["pct"], json!(33.33));
        assert_eq!(value["items"][1]["count"], json!(3));
        assert_eq!(value["name"], json!("x"));
    }

    #[test]
    fn test_no_active_minor_json() {
        let report = AnalyticsReport::Orbit {
            student_id: crate::core::models::StudentId(1),
            orbit: crate::core::analytics::Orbit::NoActiveMinor,
        };
        let rendered = JsonReporter::new().render(&report).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, json!({"status": "no_active_minor"}));
    }
}
