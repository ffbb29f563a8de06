mod progress;
mod styling;
mod summary;
mod tables;

pub use progress::LiveLine;
pub use styling::{dim, magenta_bold};
pub use summary::{print_pipelines, render_live_line};

/// Prints the `pipeview` banner to stderr.
///
/// Displays the tool name, version, and description at the start of execution.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("🕒 pipeview"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("CI/CD Pipeline Viewer")
    );
}
