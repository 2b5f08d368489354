pub mod scan;

use clap::Subcommand;
pub use scan::ScanArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every file under a directory.
    ///
    /// Example:
    ///   dirreader scan ~/projects --mask .rs --hash blake3
    ///   dirreader scan /data --mask .tmp --mask .bak --exclude --json
    Scan(ScanArgs),
}
