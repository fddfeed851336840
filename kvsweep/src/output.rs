use thiserror::Error;

/// Fields printed by the benchmark, one per line, in this order.
pub const FIELDS: [&str; 5] = [
    "num_writes",
    "num_reads",
    "time_taken",
    "time_to_add_a_node",
    "time_to_remove_a_node",
];

#[derive(Debug, Error, PartialEq)]
pub enum OutputError {
    #[error("output is not valid utf-8")]
    NotUtf8,

    #[error("expected {expected} fields but found {found}; missing {missing:?}")]
    MissingFields {
        expected: usize,
        found: usize,
        missing: Vec<&'static str>,
    },

    #[error("expected {expected} fields but found {found}; extra {extra:?}")]
    ExtraFields {
        expected: usize,
        found: usize,
        extra: Vec<String>,
    },

    #[error("field `{field}` is empty")]
    EmptyField { field: &'static str },

    #[error("field `{field}` is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },
}

/// Metrics reported by one benchmark run. Values are kept as printed so that
/// the results file reproduces them exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchOutput {
    pub num_writes: String,
    pub num_reads: String,
    pub time_taken: String,
    pub time_to_add_a_node: String,
    pub time_to_remove_a_node: String,
}

impl BenchOutput {
    /// Parses the standard output of a benchmark run. It should contain
    /// exactly one line per field in `FIELDS`; a single trailing newline is
    /// allowed but not required.
    pub fn parse(stdout: &[u8]) -> Result<Self, OutputError> {
        let stdout =
            std::str::from_utf8(stdout).map_err(|_| OutputError::NotUtf8)?;
        let stdout = stdout.strip_suffix('\n').unwrap_or(stdout);

        let lines: Vec<&str> = if stdout.is_empty() {
            Vec::new()
        } else {
            stdout
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect()
        };

        let expected = FIELDS.len();
        let found = lines.len();
        if found < expected {
            return Err(OutputError::MissingFields {
                expected,
                found,
                missing: FIELDS[found..].to_vec(),
            });
        }
        if found > expected {
            return Err(OutputError::ExtraFields {
                expected,
                found,
                extra: lines[expected..]
                    .iter()
                    .map(|line| line.to_string())
                    .collect(),
            });
        }

        Ok(Self {
            num_writes: Self::field(FIELDS[0], lines[0])?,
            num_reads: Self::field(FIELDS[1], lines[1])?,
            time_taken: Self::field(FIELDS[2], lines[2])?,
            time_to_add_a_node: Self::field(FIELDS[3], lines[3])?,
            time_to_remove_a_node: Self::field(FIELDS[4], lines[4])?,
        })
    }

    fn field(field: &'static str, line: &str) -> Result<String, OutputError> {
        let value = line.trim();
        if value.is_empty() {
            return Err(OutputError::EmptyField { field });
        }
        if value.parse::<f64>().is_err() {
            return Err(OutputError::NotNumeric {
                field,
                value: value.to_string(),
            });
        }
        Ok(value.to_string())
    }

    /// Values in `FIELDS` order.
    pub fn into_values(self) -> [String; 5] {
        [
            self.num_writes,
            self.num_reads,
            self.time_taken,
            self.time_to_add_a_node,
            self.time_to_remove_a_node,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let output = BenchOutput::parse(b"100\n50\n1.23\n0.01\n0.02\n")
            .expect("output should be valid");
        assert_eq!(output.num_writes, "100");
        assert_eq!(output.num_reads, "50");
        assert_eq!(output.time_taken, "1.23");
        assert_eq!(output.time_to_add_a_node, "0.01");
        assert_eq!(output.time_to_remove_a_node, "0.02");
        assert_eq!(
            output.into_values(),
            ["100", "50", "1.23", "0.01", "0.02"].map(String::from)
        );
    }

    #[test]
    fn parse_without_trailing_newline() {
        // the last field must not be mistaken for a trailing newline
        let output = BenchOutput::parse(b"10\n20\n3.5\n0.4\n0.6")
            .expect("output should be valid");
        assert_eq!(output.time_to_remove_a_node, "0.6");
    }

    #[test]
    fn parse_crlf() {
        let output = BenchOutput::parse(b"10\r\n20\r\n3.5\r\n0.4\r\n0.6\r\n")
            .expect("output should be valid");
        assert_eq!(
            output.into_values(),
            ["10", "20", "3.5", "0.4", "0.6"].map(String::from)
        );
    }

    #[test]
    fn missing_fields() {
        assert_eq!(
            BenchOutput::parse(b"10\n20\n3.5\n"),
            Err(OutputError::MissingFields {
                expected: 5,
                found: 3,
                missing: vec!["time_to_add_a_node", "time_to_remove_a_node"],
            })
        );
        assert_eq!(
            BenchOutput::parse(b""),
            Err(OutputError::MissingFields {
                expected: 5,
                found: 0,
                missing: FIELDS.to_vec(),
            })
        );
    }

    #[test]
    fn extra_fields() {
        assert_eq!(
            BenchOutput::parse(b"1\n2\n3\n4\n5\n6\n"),
            Err(OutputError::ExtraFields {
                expected: 5,
                found: 6,
                extra: vec![String::from("6")],
            })
        );
        // a blank line at the end is an extra (empty) field
        assert!(matches!(
            BenchOutput::parse(b"1\n2\n3\n4\n5\n\n"),
            Err(OutputError::ExtraFields { found: 6, .. })
        ));
    }

    #[test]
    fn invalid_fields() {
        assert_eq!(
            BenchOutput::parse(b"1\n\n3\n4\n5\n"),
            Err(OutputError::EmptyField { field: "num_reads" })
        );
        assert_eq!(
            BenchOutput::parse(b"1\n2\nslow\n4\n5\n"),
            Err(OutputError::NotNumeric {
                field: "time_taken",
                value: String::from("slow"),
            })
        );
        assert_eq!(
            BenchOutput::parse(&[0xff, b'\n']),
            Err(OutputError::NotUtf8)
        );
    }
}
