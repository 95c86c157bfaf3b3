use std::io::{BufRead, Write};

use regex::Regex;

use crate::core::MError;

/// Reducer that strips decision variables from a solution-sets stream.
///
/// A raw sets file stores `ndv` decision-variable columns followed by `nobj` objective columns
/// on every solution row. The external evaluator only needs the objectives, so this pass copies
/// the set boundaries verbatim, rewrites each solution row down to its objective columns, and
/// drops everything else (banners, blank lines). The scanner is normally run on the reduced
/// stream, which therefore contains only bare or slash separators and objective rows.
pub struct SetReducer {
    ndv: usize,
    nobj: usize,
    bare_separator: Regex,
    slash_separator: Regex,
    data: Regex,
}

impl SetReducer {
    /// Build a reducer for a problem geometry.
    ///
    /// # Arguments
    ///
    /// * `ndv`: The number of decision-variable columns at the start of each solution row.
    /// * `nobj`: The number of objective columns following the decision variables.
    pub fn new(ndv: usize, nobj: usize) -> Self {
        SetReducer {
            ndv,
            nobj,
            bare_separator: Regex::new(r"^# *$").expect("valid bare separator pattern"),
            slash_separator: Regex::new(r"^# */").expect("valid slash separator pattern"),
            data: Regex::new(r"^[0-9][^a-z]*$").expect("valid data pattern"),
        }
    }

    /// Reduce one line to its output form.
    ///
    /// returns: `Result<Option<String>, MError>` The line to write, or `None` when the line is
    /// dropped. A solution row with fewer than `ndv + nobj` fields is a format error.
    fn reduce_line(&self, line: &str) -> Result<Option<String>, MError> {
        if self.bare_separator.is_match(line) || self.slash_separator.is_match(line) {
            return Ok(Some(line.to_string()));
        }
        if self.data.is_match(line) {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let required = self.ndv + self.nobj;
            if fields.len() < required {
                return Err(MError::ShortDataRow(
                    line.to_string(),
                    fields.len(),
                    required,
                ));
            }
            return Ok(Some(fields[self.ndv..required].join(" ")));
        }
        Ok(None)
    }

    /// Strip decision variables from a sets stream.
    ///
    /// # Arguments
    ///
    /// * `stream`: The raw sets stream.
    /// * `output`: The sink for the reduced stream.
    ///
    /// returns: `Result<usize, MError>` The number of solution rows written.
    pub fn reduce<R: BufRead, W: Write>(
        &self,
        stream: R,
        output: &mut W,
    ) -> Result<usize, MError> {
        let mut rows: usize = 0;
        for line in stream.lines() {
            let line =
                line.map_err(|e| MError::Read("the sets stream".to_string(), e.to_string()))?;
            if let Some(reduced) = self.reduce_line(&line)? {
                if !reduced.starts_with('#') {
                    rows += 1;
                }
                writeln!(output, "{}", reduced).map_err(|e| {
                    MError::Write("the reduced sets stream".to_string(), e.to_string())
                })?;
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use crate::sets::reduce::SetReducer;

    fn reduce(ndv: usize, nobj: usize, text: &str) -> (String, usize) {
        let mut output = Vec::new();
        let rows = SetReducer::new(ndv, nobj)
            .reduce(Cursor::new(text), &mut output)
            .unwrap();
        (String::from_utf8(output).unwrap(), rows)
    }

    #[test]
    fn test_strips_decision_variables() {
        let (reduced, rows) = reduce(2, 2, "0.1 0.2 3.0 4.0\n#\n0.5 0.6 7.0 8.0\n#\n");
        assert_eq!(reduced, "3.0 4.0\n#\n7.0 8.0\n#\n");
        assert_eq!(rows, 2);
    }

    #[test]
    fn test_separators_copied_banners_dropped() {
        let text = "# NFE 1000\n# /\n1 2 3\n#  \n";
        let (reduced, rows) = reduce(1, 2, text);
        assert_eq!(reduced, "# /\n2 3\n#  \n");
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_blank_and_alphabetic_rows_dropped() {
        let (reduced, _) = reduce(1, 1, "\n1.0e-2 feasible\n1.0 2.0\n");
        assert_eq!(reduced, "2.0\n");
    }

    #[test]
    fn test_short_row_is_an_error() {
        let err = SetReducer::new(2, 2)
            .reduce(Cursor::new("0.1 0.2 3.0\n"), &mut Vec::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The data row '0.1 0.2 3.0' has 3 fields but 4 are required"
        );
    }

    #[test]
    fn test_extra_columns_are_truncated() {
        // rows may carry trailing annotations beyond the objectives
        let (reduced, _) = reduce(1, 2, "9 1.5 2.5 0 0\n");
        assert_eq!(reduced, "1.5 2.5\n");
    }
}
