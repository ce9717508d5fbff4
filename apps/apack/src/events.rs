//! Event handling and progress display

use apack_events::Event;
use console::style;

/// Event handler for progress display and user feedback
pub struct EventHandler {
    colors_enabled: bool,
    verbose: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(colors_enabled: bool, verbose: bool) -> Self {
        Self {
            colors_enabled,
            verbose,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::DownloadStarted { url, size } => match size {
                Some(size) => self.show_status(&format!("Downloading {url} ({size} bytes)")),
                None => self.show_status(&format!("Downloading {url}")),
            },
            Event::DownloadProgress { .. } => {
                // Byte-level progress is only interesting when debugging
            }
            Event::DownloadCompleted { url, size } => {
                if self.verbose {
                    self.show_status(&format!("Downloaded {url} ({size} bytes)"));
                }
            }

            Event::VenvCreating { path } => {
                self.show_status(&format!("Creating environment at {}", path.display()));
            }
            Event::VenvCreated { path } => {
                self.show_status(&format!("Created environment at {}", path.display()));
            }
            Event::VenvRemoved { path } => {
                self.show_status(&format!("Removed environment at {}", path.display()));
            }
            Event::ModuleInstalling { name } => {
                self.show_status(&format!("Installing module {name}"));
            }
            Event::ModuleInstalled { name } => {
                if self.verbose {
                    self.show_status(&format!("Installed module {name}"));
                }
            }
            Event::PluginInstalling { name, source } => {
                self.show_status(&format!(
                    "Installing plugin {name} from {}",
                    source.display()
                ));
            }
            Event::PluginInstalled { name } => {
                if self.verbose {
                    self.show_status(&format!("Installed plugin {name}"));
                }
            }

            Event::ArchiveExtracting { archive, dest } => {
                if self.verbose {
                    self.show_status(&format!(
                        "Extracting {} to {}",
                        archive.display(),
                        dest.display()
                    ));
                }
            }
            Event::ArchiveCreating { source, dest } => {
                self.show_status(&format!(
                    "Archiving {} to {}",
                    source.display(),
                    dest.display()
                ));
            }
            Event::ArchiveCreated { dest, size } => {
                self.show_status(&format!("Wrote {} ({size} bytes)", dest.display()));
            }

            Event::OperationStarted { operation } => {
                self.show_status(&operation);
            }
            Event::OperationCompleted { operation, success } => {
                if success {
                    self.show_status(&operation);
                } else {
                    self.show_error(&operation);
                }
            }
            Event::Warning { message } => self.show_warning(&message),
            Event::DebugLog { message } => {
                if self.verbose {
                    eprintln!("  {message}");
                }
            }
        }
    }

    fn show_status(&self, message: &str) {
        if self.colors_enabled {
            eprintln!("{} {message}", style("==>").cyan().bold());
        } else {
            eprintln!("==> {message}");
        }
    }

    fn show_warning(&self, message: &str) {
        if self.colors_enabled {
            eprintln!("{} {message}", style("warning:").yellow().bold());
        } else {
            eprintln!("warning: {message}");
        }
    }

    fn show_error(&self, message: &str) {
        if self.colors_enabled {
            eprintln!("{} {message}", style("error:").red().bold());
        } else {
            eprintln!("error: {message}");
        }
    }
}
