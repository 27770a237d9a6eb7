use std::path::PathBuf;

/// Output options resolved once in `main` and passed explicitly into the
/// command handlers. The library crate never sees this.
pub struct Config {
    /// Destination file for results; stdout when unset.
    pub output_file: Option<PathBuf>,
    /// Open the output file in append mode instead of truncating.
    pub append: bool,
    /// Render tabular results as CSV.
    pub csv: bool,
}
