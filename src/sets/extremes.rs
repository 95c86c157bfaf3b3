use std::io::BufRead;

use regex::Regex;

use crate::core::MError;

/// The best (minimum) and worst (maximum) value seen for each objective column across all
/// solutions in all sets of a stream. Extremes from several files merge element-wise into the
/// study-wide utopia and nadir points.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveExtremes {
    pub best: Vec<f64>,
    pub worst: Vec<f64>,
    /// Number of solution rows that contributed to the extremes.
    pub solutions: usize,
}

impl ObjectiveExtremes {
    /// Merge another set of extremes into this one, taking the minimum of the bests and the
    /// maximum of the worsts. This returns an error when the objective counts differ.
    pub fn merge(&mut self, other: &ObjectiveExtremes) -> Result<(), MError> {
        if other.best.len() != self.best.len() {
            return Err(MError::ExtremesMismatch(other.best.len(), self.best.len()));
        }
        for (mine, theirs) in self.best.iter_mut().zip(&other.best) {
            *mine = mine.min(*theirs);
        }
        for (mine, theirs) in self.worst.iter_mut().zip(&other.worst) {
            *mine = mine.max(*theirs);
        }
        self.solutions += other.solutions;
        Ok(())
    }
}

/// Scan a solution-sets stream for the best and worst value of every objective in the inclusive
/// column range `first..=last`. Rows that do not look numeric, have too few fields or fail to
/// parse are skipped; boundary and banner lines never contribute.
///
/// # Arguments
///
/// * `stream`: The sets stream to scan.
/// * `first`: The 0-based column index of the first objective.
/// * `last`: The 0-based column index of the last objective.
///
/// returns: `Result<Option<ObjectiveExtremes>, MError>` The extremes, or `None` when the stream
/// contains no eligible row.
pub fn scan_extremes<R: BufRead>(
    stream: R,
    first: usize,
    last: usize,
) -> Result<Option<ObjectiveExtremes>, MError> {
    let numeric = Regex::new(r"^[0-9.\-eE ]+").expect("valid numeric pattern");
    let mut extremes: Option<ObjectiveExtremes> = None;

    for line in stream.lines() {
        let line = line.map_err(|e| MError::Read("the sets stream".to_string(), e.to_string()))?;
        if !numeric.is_match(&line) {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < last + 1 {
            continue;
        }
        let row: Vec<f64> = match fields[first..=last]
            .iter()
            .map(|field| field.parse::<f64>())
            .collect()
        {
            Ok(row) => row,
            Err(_) => continue,
        };

        match extremes.as_mut() {
            None => {
                extremes = Some(ObjectiveExtremes {
                    best: row.clone(),
                    worst: row,
                    solutions: 1,
                });
            }
            Some(extremes) => {
                for (best, value) in extremes.best.iter_mut().zip(&row) {
                    *best = best.min(*value);
                }
                for (worst, value) in extremes.worst.iter_mut().zip(&row) {
                    *worst = worst.max(*value);
                }
                extremes.solutions += 1;
            }
        }
    }

    Ok(extremes)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use crate::sets::extremes::{scan_extremes, ObjectiveExtremes};

    #[test]
    fn test_scan_extremes() {
        let text = "#\n1.0 5.0 3.0\n2.0 1.0 9.0\n#\n0.5 8.0 4.0\n#\n";
        let extremes = scan_extremes(Cursor::new(text), 1, 2).unwrap().unwrap();
        assert_eq!(extremes.best, vec![1.0, 3.0]);
        assert_eq!(extremes.worst, vec![8.0, 9.0]);
        assert_eq!(extremes.solutions, 3);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let text = "1.0 2.0\n1.0 4.0 6.0\n";
        let extremes = scan_extremes(Cursor::new(text), 1, 2).unwrap().unwrap();
        assert_eq!(extremes.best, vec![4.0, 6.0]);
        assert_eq!(extremes.solutions, 1);
    }

    #[test]
    fn test_no_eligible_rows() {
        assert!(scan_extremes(Cursor::new("#\n# banner\n"), 0, 1)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_merge() {
        let mut global = ObjectiveExtremes {
            best: vec![1.0, 3.0],
            worst: vec![8.0, 9.0],
            solutions: 3,
        };
        let other = ObjectiveExtremes {
            best: vec![0.5, 4.0],
            worst: vec![6.0, 11.0],
            solutions: 2,
        };
        global.merge(&other).unwrap();
        assert_eq!(global.best, vec![0.5, 3.0]);
        assert_eq!(global.worst, vec![8.0, 11.0]);
        assert_eq!(global.solutions, 5);
    }

    #[test]
    fn test_merge_size_mismatch() {
        let mut global = ObjectiveExtremes {
            best: vec![1.0, 3.0],
            worst: vec![8.0, 9.0],
            solutions: 1,
        };
        let other = ObjectiveExtremes {
            best: vec![0.5],
            worst: vec![6.0],
            solutions: 1,
        };
        assert!(global
            .merge(&other)
            .unwrap_err()
            .to_string()
            .contains("Cannot merge extremes"));
    }
}
