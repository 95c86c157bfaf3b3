use std::fmt;
use std::io::{BufRead, Write};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::MError;

/// The effect order of a Sobol' sensitivity index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOrder {
    First,
    Total,
    Second,
}

impl EffectOrder {
    /// The section header announcing this order in a report.
    fn section(&self) -> &'static str {
        match self {
            EffectOrder::First => "First-Order Effects",
            EffectOrder::Total => "Total-Order Effects",
            EffectOrder::Second => "Second-Order Effects",
        }
    }

    fn from_section(line: &str) -> Option<Self> {
        [EffectOrder::First, EffectOrder::Total, EffectOrder::Second]
            .into_iter()
            .find(|order| order.section() == line)
    }
}

impl fmt::Display for EffectOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EffectOrder::First => "First",
            EffectOrder::Total => "Total",
            EffectOrder::Second => "Second",
        };
        write!(f, "{}", name)
    }
}

/// One sensitivity index scraped from a Sobol' analysis report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRecord {
    /// The algorithm input (parameter) the index refers to.
    pub input: String,
    /// The interaction partner, present only for second-order entries.
    pub interaction: Option<String>,
    pub order: EffectOrder,
    pub sensitivity: f64,
    /// The bootstrap confidence bound printed in brackets after the index.
    pub confidence: f64,
}

/// The run a report belongs to, used to tag its records in the combined table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportIdentity {
    pub algo: String,
    pub problem: String,
    pub stat: String,
    pub metric: String,
}

/// Header of the combined sensitivity table.
pub static SENSITIVITY_HEADER: &str =
    "algo problem stat metric input interaction order sensitivity confidence";

/// Parse the text report printed by the external Sobol' analysis tool.
///
/// The first line is a title and is skipped. Section headers (`First-Order Effects` and so on)
/// select the effect order of the entries that follow; an entry line is two spaces of indent,
/// the input name, an optional ` * partner` interaction, the sensitivity index and a bracketed
/// confidence bound. Lines matching neither shape are ignored. An entry before any section
/// header is a format error.
///
/// # Arguments
///
/// * `stream`: The report to parse.
///
/// returns: `Result<Vec<SensitivityRecord>, MError>`
pub fn read_report<R: BufRead>(stream: R) -> Result<Vec<SensitivityRecord>, MError> {
    let entry = Regex::new(
        r"^  ([a-zA-Z0-9.]+)( \* [a-zA-Z0-9.]+)? (-?[0-9]+\.[0-9]+(E-[0-9]+)?) \[(.*)\]",
    )
    .expect("valid entry pattern");
    let parse_float = |field: &str| {
        field
            .parse::<f64>()
            .map_err(|_| MError::Parse(field.to_string(), "float".to_string()))
    };

    let mut order: Option<EffectOrder> = None;
    let mut records = Vec::new();
    for (index, line) in stream.lines().enumerate() {
        let line = line.map_err(|e| MError::Read("the report".to_string(), e.to_string()))?;
        if index == 0 {
            continue;
        }
        if let Some(section) = EffectOrder::from_section(line.trim()) {
            order = Some(section);
            continue;
        }
        if let Some(captures) = entry.captures(&line) {
            let order = order.ok_or_else(|| MError::OrphanEntry(line.clone()))?;
            let input = captures
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            // the interaction capture includes its " * " marker
            let interaction = captures
                .get(2)
                .map(|m| m.as_str().trim()[2..].to_string());
            let sensitivity = captures.get(3).map(|m| m.as_str()).unwrap_or_default();
            let confidence = captures.get(5).map(|m| m.as_str()).unwrap_or_default();
            records.push(SensitivityRecord {
                input,
                interaction,
                order,
                sensitivity: parse_float(sensitivity)?,
                confidence: parse_float(confidence.trim())?,
            });
        }
    }
    Ok(records)
}

/// Write several reports' records as a single space-separated table, each row tagged with its
/// report's identity. The interaction column is empty for first- and total-order entries.
///
/// # Arguments
///
/// * `output`: The table sink.
/// * `reports`: The tagged record collections, in the order they should appear.
///
/// returns: `Result<(), MError>`
pub fn write_table<W: Write>(
    output: &mut W,
    reports: &[(ReportIdentity, Vec<SensitivityRecord>)],
) -> Result<(), MError> {
    let write_err =
        |e: std::io::Error| MError::Write("the sensitivity table".to_string(), e.to_string());

    writeln!(output, "{}", SENSITIVITY_HEADER).map_err(write_err)?;
    for (identity, records) in reports {
        for record in records {
            writeln!(
                output,
                "{} {} {} {} {} {} {} {} {}",
                identity.algo,
                identity.problem,
                identity.stat,
                identity.metric,
                record.input,
                record.interaction.as_deref().unwrap_or(""),
                record.order,
                record.sensitivity,
                record.confidence
            )
            .map_err(write_err)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use float_cmp::assert_approx_eq;

    use crate::sensitivity::report::{
        read_report, write_table, EffectOrder, ReportIdentity, SensitivityRecord,
    };

    const REPORT: &str = "Parameter Sensitivities\n\
        First-Order Effects\n\
        \x20 populationSize 0.412345 [0.031234]\n\
        \x20 maxEvaluations 0.101010 [0.020000]\n\
        Total-Order Effects\n\
        \x20 populationSize 0.601000 [0.045000]\n\
        Second-Order Effects\n\
        \x20 populationSize * maxEvaluations 0.050000 [0.010000]\n";

    #[test]
    fn test_read_report() {
        let records = read_report(Cursor::new(REPORT)).unwrap();
        assert_eq!(records.len(), 4);

        assert_eq!(records[0].input, "populationSize");
        assert_eq!(records[0].order, EffectOrder::First);
        assert!(records[0].interaction.is_none());
        assert_approx_eq!(f64, records[0].sensitivity, 0.412345);
        assert_approx_eq!(f64, records[0].confidence, 0.031234);

        assert_eq!(records[2].order, EffectOrder::Total);

        let second = &records[3];
        assert_eq!(second.order, EffectOrder::Second);
        assert_eq!(second.input, "populationSize");
        assert_eq!(second.interaction.as_deref(), Some("maxEvaluations"));
    }

    #[test]
    fn test_scientific_sensitivity() {
        let report = "title\nFirst-Order Effects\n  populationSize 1.234567E-5 [0.000001]\n";
        let records = read_report(Cursor::new(report)).unwrap();
        assert_approx_eq!(f64, records[0].sensitivity, 1.234567e-5);
    }

    #[test]
    /// The first line is a title: a section header there does not select an order.
    fn test_entry_before_any_section() {
        let report = "First-Order Effects\n  populationSize 0.4 [0.1]\n";
        assert!(read_report(Cursor::new(report)).is_err());

        let report = "title\n  populationSize 0.412345 [0.031234]\n";
        let err = read_report(Cursor::new(report)).unwrap_err();
        assert!(err.to_string().contains("before any effects section"));
    }

    #[test]
    fn test_unindented_lines_are_ignored() {
        let report = "title\nFirst-Order Effects\nsome note\n";
        assert!(read_report(Cursor::new(report)).unwrap().is_empty());
    }

    #[test]
    fn test_write_table() {
        let identity = ReportIdentity {
            algo: "Borg".to_string(),
            problem: "27_10_1.0".to_string(),
            stat: "mean".to_string(),
            metric: "Hypervolume".to_string(),
        };
        let records = vec![
            SensitivityRecord {
                input: "populationSize".to_string(),
                interaction: None,
                order: EffectOrder::First,
                sensitivity: 0.41,
                confidence: 0.03,
            },
            SensitivityRecord {
                input: "populationSize".to_string(),
                interaction: Some("maxEvaluations".to_string()),
                order: EffectOrder::Second,
                sensitivity: 0.05,
                confidence: 0.01,
            },
        ];

        let mut output = Vec::new();
        write_table(&mut output, &[(identity, records)]).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "algo problem stat metric input interaction order sensitivity confidence"
        );
        assert_eq!(
            lines[1],
            "Borg 27_10_1.0 mean Hypervolume populationSize  First 0.41 0.03"
        );
        assert_eq!(
            lines[2],
            "Borg 27_10_1.0 mean Hypervolume populationSize maxEvaluations Second 0.05 0.01"
        );
    }
}
