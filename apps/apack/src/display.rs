//! Final result rendering

use crate::error::CliError;
use apack_ops::PackageReport;
use console::style;

/// Renders the final build report as JSON or human-readable text
pub struct OutputRenderer {
    json: bool,
    colors_enabled: bool,
}

impl OutputRenderer {
    /// Create a new renderer
    pub fn new(json: bool, colors_enabled: bool) -> Self {
        Self {
            json,
            colors_enabled,
        }
    }

    /// Render the build report to stdout
    pub fn render_report(&self, report: &PackageReport) -> Result<(), CliError> {
        if self.json {
            println!("{}", report.to_json()?);
            return Ok(());
        }

        let heading = format!(
            "Agent package for {} ready: {}",
            report.distribution,
            report.package_path.display()
        );
        if self.colors_enabled {
            println!("{}", style(heading).green().bold());
        } else {
            println!("{heading}");
        }

        println!("  environment: {}", report.venv_path.display());
        if !report.plugins.is_empty() {
            println!("  plugins: {}", report.plugins.join(", "));
        }
        println!("  modules installed: {}", report.modules.len());
        println!("  took: {}ms", report.duration_ms);

        Ok(())
    }
}
