use std::{
    io::{self, Write},
    time::Duration,
};

use dirreader_fs::{AggregatedError, FileRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn parse(s: &str) -> Self {
        match s {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Whether to print the trailing summary on stderr.
    pub show_summary: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: ColorChoice::Auto,
            show_summary: true,
        }
    }
}

/// Static context about one scan being printed.
#[derive(Debug)]
pub struct ScanPrintContext<'a> {
    pub root: &'a str,
    /// Name of the hash algorithm, if digests were requested.
    pub hash: Option<&'a str>,
    pub total: usize,
    pub elapsed: Duration,
}

/// Formats scan outcomes.
pub trait RecordPrinter {
    fn print_record(&mut self, record: &FileRecord, ctx: &ScanPrintContext) -> io::Result<()>;

    /// Called once after all records are printed.
    fn finish(&mut self, ctx: &ScanPrintContext) -> io::Result<()>;

    /// Called instead of the record stream when the scan failed.
    fn print_failure(&mut self, err: &AggregatedError, ctx: &ScanPrintContext) -> io::Result<()>;
}

pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        // Without a concrete stdout we cannot detect a TTY, so Auto means off.
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    #[inline]
    fn format_path(&self, path: &str) -> String {
        if self.use_color {
            format!("\x1b[32m{}\x1b[0m", path)
        } else {
            path.to_owned()
        }
    }
}

impl<W: Write, E: Write> RecordPrinter for HumanPrinter<W, E> {
    fn print_record(&mut self, record: &FileRecord, _ctx: &ScanPrintContext) -> io::Result<()> {
        let rel = record.relative_file_path();
        let path = self.format_path(&rel.to_string_lossy());

        match &record.digest {
            Some(digest) => writeln!(self.out, "{}\t{}\t{}", path, record.meta.size, digest),
            None => writeln!(self.out, "{}\t{}", path, record.meta.size),
        }
    }

    fn finish(&mut self, ctx: &ScanPrintContext) -> io::Result<()> {
        if self.cfg.show_summary {
            writeln!(
                self.err,
                "\n[scan] {} files under {} in {:.2}ms{}",
                ctx.total,
                ctx.root,
                ctx.elapsed.as_secs_f64() * 1000.0,
                ctx.hash.map(|h| format!(" ({h})")).unwrap_or_default(),
            )?;
        }
        Ok(())
    }

    fn print_failure(&mut self, err: &AggregatedError, ctx: &ScanPrintContext) -> io::Result<()> {
        for e in err.errors() {
            writeln!(self.err, "[error] {e}")?;
        }
        writeln!(
            self.err,
            "[scan] {} error(s) under {}; no results reported",
            err.len(),
            ctx.root
        )
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }
}

impl<W: Write, E: Write> RecordPrinter for JsonPrinter<W, E> {
    fn print_record(&mut self, record: &FileRecord, _ctx: &ScanPrintContext) -> io::Result<()> {
        let line = serde_json::to_string(record).map_err(io::Error::other)?;
        writeln!(self.out, "{}", line)
    }

    fn finish(&mut self, ctx: &ScanPrintContext) -> io::Result<()> {
        if self.cfg.show_summary {
            let obj = serde_json::json!({
                "type": "summary",
                "root": ctx.root,
                "hash": ctx.hash,
                "total": ctx.total,
                "elapsed_ms": ctx.elapsed.as_secs_f64() * 1000.0,
            });
            writeln!(self.err, "{}", obj)?;
        }
        Ok(())
    }

    fn print_failure(&mut self, err: &AggregatedError, ctx: &ScanPrintContext) -> io::Result<()> {
        let errors: Vec<_> = err
            .errors()
            .iter()
            .map(|e| {
                serde_json::json!({
                    "kind": format!("{:?}", e.kind()).to_lowercase(),
                    "path": e.path().to_string_lossy(),
                    "message": e.to_string(),
                })
            })
            .collect();

        let obj = serde_json::json!({
            "type": "error",
            "root": ctx.root,
            "errors": errors,
        });
        writeln!(self.err, "{}", obj)
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
