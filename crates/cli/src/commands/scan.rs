use std::{io, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use clap::Args;
use dirreader_fs::{HashAlgorithm, Scanner};
use dirreader_runtime::default_scan_root;
use log::{debug, error};

use crate::printer::{
    ColorChoice, HumanPrinter, JsonPrinter, OutputFormat, PrinterConfig, RecordPrinter,
    ScanPrintContext,
};

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress the summary line
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn make_printer(&self) -> Box<dyn RecordPrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        let cfg = PrinterConfig {
            format,
            color: ColorChoice::parse(&self.color),
            show_summary: !self.quiet,
        };

        match cfg.format {
            OutputFormat::Human => Box::new(HumanPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
        }
    }
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to scan; defaults to the current directory
    pub root: Option<PathBuf>,

    /// Filename suffix to match, e.g. ".rs" (repeatable)
    #[arg(long = "mask", short = 'm', value_name = "SUFFIX")]
    pub masks: Vec<String>,

    /// Keep files that do not match any mask instead of those that do
    #[arg(long, short = 'x')]
    pub exclude: bool,

    /// Hash file contents: sha256, sha512, blake3 or crc32
    #[arg(long, value_name = "ALG")]
    pub hash: Option<HashAlgorithm>,

    /// Number of worker threads (defaults to DIRREADER_THREADS or the CPU count)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub output: OutputOptions,
}

impl ScanArgs {
    fn scanner(&self, root: PathBuf) -> Scanner {
        let mut scanner = Scanner::new(root)
            .suffixes(self.masks.iter().cloned())
            .include(!self.exclude);

        if let Some(alg) = self.hash {
            scanner = scanner.algorithm(alg);
        }
        if let Some(n) = self.threads {
            scanner = scanner.threads(n);
        }
        scanner
    }
}

pub fn run(args: ScanArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("[scan] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ScanArgs) -> Result<ExitCode> {
    let root = args.root.clone().unwrap_or_else(default_scan_root);
    let root_display = root.display().to_string();
    let hash = args.hash.map(HashAlgorithm::name);

    debug!(
        "[scan] root={} masks={:?} exclude={} hash={:?}",
        root_display, args.masks, args.exclude, hash
    );

    let mut printer = args.output.make_printer();
    let started = Instant::now();
    let outcome = args.scanner(root).run();

    match outcome {
        Ok(mut records) => {
            records.sort_by_key(|r| r.relative_file_path());

            let ctx = ScanPrintContext {
                root: &root_display,
                hash,
                total: records.len(),
                elapsed: started.elapsed(),
            };

            for record in &records {
                printer
                    .print_record(record, &ctx)
                    .context("failed to write scan output")?;
            }
            printer.finish(&ctx).context("failed to write scan summary")?;

            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let ctx = ScanPrintContext {
                root: &root_display,
                hash,
                total: 0,
                elapsed: started.elapsed(),
            };
            printer
                .print_failure(&err, &ctx)
                .context("failed to write scan errors")?;

            Ok(ExitCode::from(1))
        }
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
