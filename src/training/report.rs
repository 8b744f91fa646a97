//! Held-out evaluation report.

use std::fmt;

/// Precision, recall and F1 for one label.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus overall accuracy.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub total: usize,
}

impl ClassificationReport {
    /// Compare `predicted` against `expected` for each label in `labels`.
    pub fn compute(labels: &[String], expected: &[String], predicted: &[String]) -> Self {
        let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };

        let classes = labels
            .iter()
            .map(|label| {
                let pairs = || expected.iter().zip(predicted);
                let tp = pairs().filter(|(e, p)| *e == label && *p == label).count();
                let predicted_count = predicted.iter().filter(|p| *p == label).count();
                let support = expected.iter().filter(|e| *e == label).count();

                let precision = ratio(tp, predicted_count);
                let recall = ratio(tp, support);
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };

                ClassMetrics {
                    label: label.clone(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        let correct = expected.iter().zip(predicted).filter(|(e, p)| e == p).count();

        Self {
            classes,
            accuracy: ratio(correct, expected.len()),
            total: expected.len(),
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>14} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>14} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        write!(
            f,
            "{:>14} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.total
        )
    }
}
