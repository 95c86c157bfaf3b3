use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::core::MError;

/// One algorithm parameter varied by the study, with the range sampled by the Sobol' sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub low: f64,
    pub high: f64,
}

fn parse_float(field: &str) -> Result<f64, MError> {
    field
        .parse::<f64>()
        .map_err(|_| MError::Parse(field.to_string(), "float".to_string()))
}

/// Read a parameter-description file: one `name low high` row per parameter, space-separated.
/// Blank lines are skipped.
pub fn read_parameters<R: BufRead>(stream: R) -> Result<Vec<Parameter>, MError> {
    let mut parameters = Vec::new();
    for line in stream.lines() {
        let line =
            line.map_err(|e| MError::Read("the parameters stream".to_string(), e.to_string()))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 3 {
            return Err(MError::ShortDataRow(line.clone(), fields.len(), 3));
        }
        parameters.push(Parameter {
            name: fields[0].to_string(),
            low: parse_float(fields[1])?,
            high: parse_float(fields[2])?,
        });
    }
    Ok(parameters)
}

/// The Sobol' sample matrix: one row of parameter values per set index, one column per
/// parameter. Row `i` is the parameterisation that produced set `i` in every seed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSamples {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ParameterSamples {
    /// Read the sample matrix. Every row must have exactly one value per described parameter.
    ///
    /// # Arguments
    ///
    /// * `parameters`: The parameter descriptions naming the columns.
    /// * `stream`: The matrix stream, whitespace-separated.
    ///
    /// returns: `Result<ParameterSamples, MError>`
    pub fn read<R: BufRead>(parameters: &[Parameter], stream: R) -> Result<Self, MError> {
        let names: Vec<String> = parameters.iter().map(|p| p.name.clone()).collect();
        let mut rows = Vec::new();
        for line in stream.lines() {
            let line = line
                .map_err(|e| MError::Read("the samples stream".to_string(), e.to_string()))?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() != names.len() {
                return Err(MError::ShortDataRow(line.clone(), fields.len(), names.len()));
            }
            let row: Result<Vec<f64>, MError> = fields.iter().map(|f| parse_float(f)).collect();
            rows.push(row?);
        }
        Ok(ParameterSamples { names, rows })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of parameterisations (rows) in the matrix.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The column index of a parameter. This returns an error when no parameter has that name.
    pub fn column(&self, name: &str) -> Result<usize, MError> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| MError::NonExistingName("parameter".to_string(), name.to_string()))
    }

    /// The value of a parameter column for one set index. This returns an error when the matrix
    /// has no row for that set.
    pub fn value(&self, set: usize, column: usize) -> Result<f64, MError> {
        let row = self.rows.get(set).ok_or_else(|| {
            MError::NonExistingIndex("parameterization".to_string(), set)
        })?;
        row.get(column).copied().ok_or_else(|| {
            MError::NonExistingIndex("parameter column".to_string(), column)
        })
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use crate::stats::parameters::{read_parameters, ParameterSamples};

    const PARAMS: &str = "populationSize 10 1000\nmaxEvaluations 10000 1000000\n";

    #[test]
    fn test_read_parameters() {
        let parameters = read_parameters(Cursor::new(PARAMS)).unwrap();
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[0].name, "populationSize");
        assert_eq!(parameters[1].low, 10000.0);
        assert_eq!(parameters[1].high, 1000000.0);
    }

    #[test]
    fn test_bad_parameter_rows() {
        assert!(read_parameters(Cursor::new("populationSize 10\n"))
            .unwrap_err()
            .to_string()
            .contains("has 2 fields but 3 are required"));
        assert_eq!(
            read_parameters(Cursor::new("populationSize ten 1000\n"))
                .unwrap_err()
                .to_string(),
            "Cannot parse 'ten' as a float"
        );
    }

    #[test]
    fn test_read_samples() {
        let parameters = read_parameters(Cursor::new(PARAMS)).unwrap();
        let samples =
            ParameterSamples::read(&parameters, Cursor::new("100 20000\n200 50000\n")).unwrap();
        assert_eq!(samples.len(), 2);
        let column = samples.column("maxEvaluations").unwrap();
        assert_eq!(samples.value(1, column).unwrap(), 50000.0);
        assert!(samples
            .value(2, column)
            .unwrap_err()
            .to_string()
            .contains("The parameterization index 2 does not exist"));
        assert!(samples.column("epsilon").is_err());
    }

    #[test]
    fn test_sample_row_width_must_match() {
        let parameters = read_parameters(Cursor::new(PARAMS)).unwrap();
        assert!(ParameterSamples::read(&parameters, Cursor::new("100\n")).is_err());
    }
}
