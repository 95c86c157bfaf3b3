use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use log::info;
use ordered_float::OrderedFloat;

use crate::core::MError;
use crate::stats::parameters::ParameterSamples;
use crate::stats::statistic::Statistic;

/// One row of an aggregate metrics file.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    /// The seed identifier. Seeds are opaque labels; they are never parsed as numbers.
    pub seed: String,
    /// The 0-based solution-set index, which is also the parameterisation index.
    pub set: usize,
    /// One value per metric column, in header order.
    pub values: Vec<f64>,
}

/// An aggregate metrics file parsed into memory, ready for grouping and summarising.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateTable {
    metrics: Vec<String>,
    rows: Vec<AggregateRow>,
}

/// One row of a summary table: the group key columns, then one statistic value per metric.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub key: Vec<f64>,
    pub values: Vec<f64>,
}

/// A grouped summary of an aggregate table for one statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    /// Tag naming the summary, e.g. `Set_mean` or `populationSize_maxEvaluations_q90`. Used by
    /// callers to name output files.
    pub tag: String,
    /// The group-key column labels (`Set`, parameter names, or `grid_<name>` when binned).
    pub group: Vec<String>,
    /// The metric column names, in aggregate-file order.
    pub metrics: Vec<String>,
    /// Rows in ascending group-key order.
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Write the summary as a space-separated table with a header line.
    pub fn write<W: Write>(&self, output: &mut W) -> Result<(), MError> {
        let write_err =
            |e: std::io::Error| MError::Write("the summary stream".to_string(), e.to_string());

        let mut header: Vec<&str> = self.group.iter().map(String::as_str).collect();
        header.extend(self.metrics.iter().map(String::as_str));
        writeln!(output, "{}", header.join(" ")).map_err(write_err)?;

        for row in &self.rows {
            let mut fields: Vec<String> = row.key.iter().map(|v| v.to_string()).collect();
            fields.extend(row.values.iter().map(|v| v.to_string()));
            writeln!(output, "{}", fields.join(" ")).map_err(write_err)?;
        }
        Ok(())
    }
}

type Groups = BTreeMap<Vec<OrderedFloat<f64>>, Vec<Vec<f64>>>;

impl AggregateTable {
    /// Parse an aggregate metrics file. The header must start with the `Seed` and `Set` columns;
    /// the remaining header fields name the metric columns. `Inf` parses to positive infinity,
    /// so placeholder rows for empty sets come back as written.
    ///
    /// # Arguments
    ///
    /// * `stream`: The aggregate stream to parse.
    ///
    /// returns: `Result<AggregateTable, MError>`
    pub fn read<R: BufRead>(stream: R) -> Result<Self, MError> {
        let read_err =
            |e: std::io::Error| MError::Read("the aggregate stream".to_string(), e.to_string());

        let mut lines = stream.lines();
        let header = lines
            .next()
            .ok_or_else(|| MError::WrongHeader(String::new(), "Seed Set".to_string()))?
            .map_err(read_err)?;
        let columns: Vec<&str> = header.split_whitespace().collect();
        if columns.len() < 3 || columns[0] != "Seed" || columns[1] != "Set" {
            return Err(MError::WrongHeader(header.clone(), "Seed Set".to_string()));
        }
        let metrics: Vec<String> = columns[2..].iter().map(|c| c.to_string()).collect();

        let mut rows = Vec::new();
        for line in lines {
            let line = line.map_err(read_err)?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() != metrics.len() + 2 {
                return Err(MError::ShortDataRow(
                    line.clone(),
                    fields.len(),
                    metrics.len() + 2,
                ));
            }
            let set = fields[1]
                .parse::<usize>()
                .map_err(|_| MError::Parse(fields[1].to_string(), "set index".to_string()))?;
            let values: Result<Vec<f64>, MError> = fields[2..]
                .iter()
                .map(|f| {
                    f.parse::<f64>()
                        .map_err(|_| MError::Parse(f.to_string(), "float".to_string()))
                })
                .collect();
            rows.push(AggregateRow {
                seed: fields[0].to_string(),
                set,
                values: values?,
            });
        }
        Ok(AggregateTable { metrics, rows })
    }

    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn rows(&self) -> &[AggregateRow] {
        &self.rows
    }

    /// Summarise every metric grouped by set index, producing one table per statistic. This is
    /// the per-parameterisation summary: each row pools one set index across all seeds.
    pub fn summarise_by_set(&self, stats: &[Statistic]) -> Vec<SummaryTable> {
        let mut groups = Groups::new();
        for row in &self.rows {
            let key = vec![OrderedFloat(row.set as f64)];
            push_row(&mut groups, key, row, self.metrics.len());
        }
        self.build_tables("Set", vec!["Set".to_string()], &groups, stats)
    }

    /// Summarise every metric grouped by the values of the chosen parameters, producing one
    /// table per statistic. Each row's set index selects its parameterisation from the Sobol'
    /// sample matrix; a set index with no sample row is an error. Where a delta is given for a
    /// group parameter, its values are binned onto a grid (`floor(value / delta) * delta`) and
    /// the key column is labelled `grid_<name>`; `deltas` may be shorter than `group`, leaving
    /// the remaining parameters at their point values.
    ///
    /// # Arguments
    ///
    /// * `samples`: The Sobol' sample matrix for the algorithm under study.
    /// * `group`: The parameter names to group by.
    /// * `deltas`: Grid widths for the leading group parameters; empty for point grouping.
    /// * `stats`: The statistics to compute.
    ///
    /// returns: `Result<Vec<SummaryTable>, MError>`
    pub fn summarise_by_parameters(
        &self,
        samples: &ParameterSamples,
        group: &[String],
        deltas: &[f64],
        stats: &[Statistic],
    ) -> Result<Vec<SummaryTable>, MError> {
        let columns: Vec<usize> = group
            .iter()
            .map(|name| samples.column(name))
            .collect::<Result<_, _>>()?;

        let mut groups = Groups::new();
        for row in &self.rows {
            let mut key = Vec::with_capacity(columns.len());
            for (position, column) in columns.iter().enumerate() {
                let mut value = samples.value(row.set, *column)?;
                if let Some(delta) = deltas.get(position) {
                    value = (value / delta).floor() * delta;
                }
                key.push(OrderedFloat(value));
            }
            push_row(&mut groups, key, row, self.metrics.len());
        }

        let labels: Vec<String> = group
            .iter()
            .enumerate()
            .map(|(position, name)| {
                if position < deltas.len() {
                    format!("grid_{}", name)
                } else {
                    name.clone()
                }
            })
            .collect();
        Ok(self.build_tables(&group.join("_"), labels, &groups, stats))
    }

    fn build_tables(
        &self,
        tag_prefix: &str,
        labels: Vec<String>,
        groups: &Groups,
        stats: &[Statistic],
    ) -> Vec<SummaryTable> {
        let mut tables = Vec::with_capacity(stats.len());
        for stat in stats {
            info!("Computing {} grouped by {}", stat.name(), labels.join(", "));
            let rows = groups
                .iter()
                .map(|(key, columns)| SummaryRow {
                    key: key.iter().map(|v| v.into_inner()).collect(),
                    values: columns.iter().map(|values| stat.compute(values)).collect(),
                })
                .collect();
            tables.push(SummaryTable {
                tag: format!("{}_{}", tag_prefix, stat.name()),
                group: labels.clone(),
                metrics: self.metrics.clone(),
                rows,
            });
        }
        tables
    }
}

fn push_row(groups: &mut Groups, key: Vec<OrderedFloat<f64>>, row: &AggregateRow, width: usize) {
    let columns = groups.entry(key).or_insert_with(|| vec![Vec::new(); width]);
    for (column, value) in columns.iter_mut().zip(&row.values) {
        column.push(*value);
    }
}
