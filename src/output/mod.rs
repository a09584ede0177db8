// src/output/mod.rs
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::config::Config;
use crate::models::{KeyStyle, ProvisionedAccount, WriteMode};

#[derive(Debug, Error)]
#[error("Failed to write {}: {}", .path.display(), .source)]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

// Outcome of writing a batch; failed targets are skipped, not fatal
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<WriteError>,
}

impl WriteReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

// Renders credentials as KEY=VALUE lines for env loaders
#[derive(Debug, Clone)]
pub struct EnvFileWriter {
    key_style: KeyStyle,
    export_prefix: bool,
    mode: WriteMode,
}

impl EnvFileWriter {
    pub fn new(key_style: KeyStyle, export_prefix: bool, mode: WriteMode) -> Self {
        Self {
            key_style,
            export_prefix,
            mode,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.key_style, config.export_prefix, config.write_mode)
    }

    pub fn render(&self, entries: &[&ProvisionedAccount]) -> String {
        let prefix = if self.export_prefix { "export " } else { "" };
        let mut out = String::new();

        for entry in entries {
            let id = &entry.account.id;
            out.push_str(&format!(
                "{}{}{}={}\n",
                prefix,
                id,
                self.key_style.user_suffix(),
                shell_value(&entry.credential.username)
            ));
            out.push_str(&format!(
                "{}{}{}={}\n",
                prefix,
                id,
                self.key_style.pass_suffix(),
                shell_value(&entry.credential.password)
            ));
        }

        out
    }

    pub fn write_file(&self, path: &Path, entries: &[&ProvisionedAccount]) -> Result<(), WriteError> {
        let to_error = |source: io::Error| WriteError {
            path: path.to_path_buf(),
            source,
        };

        let mut options = OpenOptions::new();
        options.create(true);
        match self.mode {
            WriteMode::Overwrite => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };

        let mut file = options.open(path).map_err(to_error)?;
        file.write_all(self.render(entries).as_bytes()).map_err(to_error)?;
        file.flush().map_err(to_error)?;

        Ok(())
    }

    // Group by target so every file is opened once, accounts kept in configuration order
    pub fn write_all(&self, provisioned: &[ProvisionedAccount], global_output: Option<&Path>) -> WriteReport {
        // (resolved key, path as first configured, accounts)
        let mut targets: Vec<(PathBuf, PathBuf, Vec<&ProvisionedAccount>)> = Vec::new();

        for entry in provisioned {
            let paths: Vec<PathBuf> = if entry.account.output_files.is_empty() {
                global_output.map(Path::to_path_buf).into_iter().collect()
            } else {
                entry.account.output_files.clone()
            };

            if paths.is_empty() {
                log::warn!("No output target for account {}, skipping", entry.account.id);
            }

            for path in paths {
                let key = target_key(&path);
                match targets.iter_mut().find(|(k, _, _)| *k == key) {
                    Some((_, _, group)) => {
                        if !group.iter().any(|e| e.account.id == entry.account.id) {
                            group.push(entry);
                        }
                    }
                    None => targets.push((key, path, vec![entry])),
                }
            }
        }

        let mut report = WriteReport::default();
        for (_, path, entries) in targets {
            match self.write_file(&path, &entries) {
                Ok(()) => {
                    log::info!("Wrote {} credential(s) to {}", entries.len(), path.display());
                    report.written.push(path);
                }
                Err(e) => {
                    log::error!("{}", e);
                    report.failed.push(e);
                }
            }
        }

        report
    }
}

// Values made only of these are written bare; anything else is single-quoted
fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_-.,:/@%+=^*!?".contains(c)
}

// Single-quoted values read back verbatim under `source` and dotenv loaders.
// An embedded quote closes the string, adds an escaped quote and reopens it.
fn shell_value(value: &str) -> String {
    if value.chars().all(is_bare_char) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r"'\''"))
}

// Two spellings of the same file must share one write, or the second
// overwrite would drop the first group's lines
fn target_key(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        // Unresolvable directory: the write will fail anyway, just drop `.` segments
        _ => path.components().collect(),
    }
}
