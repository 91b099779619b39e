use std::fmt::Display;

use crate::compute::Compute;

/// One column of the thermo table
#[derive(Clone, Debug, PartialEq)]
pub enum OutputSpec {
    Step,
    Compute(Compute),
}
impl Display for OutputSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputSpec::Step => "step",
            OutputSpec::Compute(c) => c.name(),
        };
        s.fmt(f)
    }
}

/// Thermo table: the columns, how often a row is taken, and the rows so far
#[derive(Clone, Debug)]
pub struct Output {
    pub every: usize,
    pub values: Vec<OutputSpec>,
    rows: Vec<Vec<Value>>,
}
impl Output {
    pub fn new() -> Self {
        Self {
            every: 100,
            values: vec![
                OutputSpec::Step,
                OutputSpec::Compute(Compute::Temperature),
                OutputSpec::Compute(Compute::PotentialE),
                OutputSpec::Compute(Compute::TotalE),
                OutputSpec::Compute(Compute::VirialPressure),
            ],
            rows: Vec::new(),
        }
    }
    pub fn with_values(every: usize, values: Vec<OutputSpec>) -> Self {
        Self {
            every,
            values,
            rows: Vec::new(),
        }
    }
    pub fn should_output(&self, step: usize) -> bool {
        step % self.every == 0
    }
    pub fn rows(&self) -> &Vec<Vec<Value>> {
        &self.rows
    }
    pub(crate) fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }
    /// Column names separated by spaces
    pub fn header(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
    pub fn format_row(row: &[Value]) -> String {
        row.iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Usize(usize),
    Float(f64),
}
impl Value {
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Usize(v) => *v as f64,
            Value::Float(v) => *v,
        }
    }
}
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{:.6e}", v),
            Value::Usize(v) => v.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_rows() {
        let mut output = Output::with_values(
            10,
            vec![OutputSpec::Step, OutputSpec::Compute(Compute::KineticE)],
        );
        assert_eq!(output.header(), "step ke");
        assert!(output.should_output(20));
        assert!(!output.should_output(25));
        output.push_row(vec![Value::Usize(10), Value::Float(1.5)]);
        assert_eq!(Output::format_row(&output.rows()[0]), "10 1.500000e0");
    }
}
