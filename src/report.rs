//! Console tables and line charts.
//!
//! Charts go to a [`PlotSink`]. [`GnuplotSink`] writes one `<name>.tsv` data file and one
//! `<name>.gnuplot` script per chart, render them with:
//!
//! ```text
//! cd <out-dir> && gnuplot *.gnuplot
//! ```

use std::fmt::{self, Write as _};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    /// Reference curves are drawn dashed and without markers.
    pub reference: bool,
}

impl Series {
    pub fn measured(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
            reference: false,
        }
    }

    pub fn reference(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
            reference: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    /// File stem, must be unique per run.
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

pub trait PlotSink {
    fn line_chart(&mut self, chart: &LineChart) -> io::Result<()>;
}

/// Discards every chart.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl PlotSink for NoopSink {
    fn line_chart(&mut self, _chart: &LineChart) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct GnuplotSink {
    dir: PathBuf,
}

impl GnuplotSink {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PlotSink for GnuplotSink {
    fn line_chart(&mut self, chart: &LineChart) -> io::Result<()> {
        let data_file = format!("{}.tsv", chart.name);
        fs::write(self.dir.join(&data_file), gnuplot_data(chart))?;
        fs::write(
            self.dir.join(format!("{}.gnuplot", chart.name)),
            gnuplot_script(chart, &data_file),
        )?;

        tracing::debug!(chart = %chart.name, dir = %self.dir.display(), "wrote chart");
        Ok(())
    }
}

/// One gnuplot data block per series, blocks separated by two blank lines so `index N` selects
/// series N.
fn gnuplot_data(chart: &LineChart) -> String {
    let mut out = String::new();
    for (i, series) in chart.series.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        let _ = writeln!(out, "# {}", series.label);
        for (x, y) in &series.points {
            let _ = writeln!(out, "{x}\t{y}");
        }
    }
    out
}

fn gnuplot_script(chart: &LineChart, data_file: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "set terminal pngcairo size 900,600");
    let _ = writeln!(out, "set output '{}.png'", chart.name);
    let _ = writeln!(out, "set title {}", quoted(&chart.title));
    let _ = writeln!(out, "set xlabel {}", quoted(&chart.x_label));
    let _ = writeln!(out, "set ylabel {}", quoted(&chart.y_label));
    let _ = writeln!(out, "set grid");
    let _ = writeln!(out, "set key left top");

    let plots = chart
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let style = if series.reference {
                "with lines dashtype 2 linewidth 2"
            } else {
                "with linespoints linewidth 2 pointtype 7"
            };
            let file = if i == 0 { quoted(data_file) } else { "''".into() };
            format!("{file} index {i} using 1:2 {style} title {}", quoted(&series.label))
        })
        .collect::<Vec<_>>();

    let _ = writeln!(out, "plot {}", plots.join(", \\\n     "));
    out
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Fixed width console table, columns right aligned.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain([self.headers.len()])
            .max()
            .unwrap_or(0);

        let mut widths = vec![0; columns];
        for line in [&self.headers].into_iter().chain(&self.rows) {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let write_line = |f: &mut fmt::Formatter<'_>, line: &[String]| -> fmt::Result {
            for (i, &width) in widths.iter().enumerate() {
                let cell = line.get(i).map(String::as_str).unwrap_or("");
                if i > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{cell:>width$}")?;
            }
            writeln!(f)
        };

        write_line(f, &self.headers)?;
        let rule_len = widths.iter().sum::<usize>() + 2 * columns.saturating_sub(1);
        writeln!(f, "{}", "-".repeat(rule_len))?;
        for row in &self.rows {
            write_line(f, row)?;
        }
        Ok(())
    }
}

/// `12345678` -> `12,345,678`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_secs(d: Duration) -> String {
    format!("{:.6}s", d.as_secs_f64())
}

pub fn format_percent(p: f64) -> String {
    format!("{p:.2}%")
}

/// Writes `value` as pretty printed JSON to `path`.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
}
