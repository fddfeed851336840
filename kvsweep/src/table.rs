use crate::grid::SweepPoint;
use crate::output::BenchOutput;
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 8] = [
    "num_servers",
    "num_clients",
    "ratio",
    "num_writes",
    "num_reads",
    "time_taken",
    "time_to_add_a_node",
    "time_to_remove_a_node",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub point: SweepPoint,
    pub output: BenchOutput,
}

impl ResultRow {
    pub fn new(point: SweepPoint, output: BenchOutput) -> Self {
        Self { point, output }
    }

    /// The row's fields, in `HEADER` order.
    pub fn record(&self) -> Vec<String> {
        let mut record = self.point.to_args();
        record.extend(self.output.clone().into_values());
        record
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> writes = {} | reads = {} | time = {} | add = {} | remove = {}",
            self.point,
            self.output.num_writes,
            self.output.num_reads,
            self.output.time_taken,
            self.output.time_to_add_a_node,
            self.output.time_to_remove_a_node,
        )
    }
}

/// Rows of a sweep in sweep order. The header is implicit and always written
/// first.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the table as CSV: header first, then one line per row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), Report> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        writer.write_record(HEADER).wrap_err("csv header")?;
        for row in &self.rows {
            writer.write_record(row.record()).wrap_err("csv row")?;
        }
        writer.flush().wrap_err("csv flush")?;
        Ok(())
    }

    /// Saves the table to `path`, replacing any existing file. The table is
    /// first written to a temporary file next to `path` and then renamed, so
    /// `path` never holds a partially written table.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Report> {
        let path = path.as_ref();
        let tmp = tmp_path(path);

        let result = std::fs::File::create(&tmp)
            .wrap_err_with(|| format!("create {}", tmp.display()))
            .and_then(|file| {
                let mut buf = std::io::BufWriter::new(file);
                self.write_csv(&mut buf)?;
                let file = buf.into_inner().wrap_err("flush results")?;
                file.sync_all().wrap_err("sync results")?;
                Ok(())
            })
            .and_then(|()| {
                std::fs::rename(&tmp, path).wrap_err_with(|| {
                    format!("rename {} to {}", tmp.display(), path.display())
                })
            });

        if result.is_err() {
            // the table was not saved; don't leave the temporary file behind
            let _ = std::fs::remove_file(&tmp);
        }
        result
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
