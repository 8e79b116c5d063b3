use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use time::{OffsetDateTime, format_description};

/// Plain-text transcript of one match: `< ` for received lines, `> ` for sent commands
pub struct ReplayFile {
    path: PathBuf,
    file: File,
}

impl ReplayFile {
    pub fn new(replays_folder: impl AsRef<Path>) -> io::Result<Self> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let format = format_description::parse("[year][month][day]-[hour][minute][second]")
            .map_err(io::Error::other)?;
        let date_time_str = now.format(&format).map_err(io::Error::other)?;

        let path = replays_folder
            .as_ref()
            .join(format!("sonarbot - {}.log", date_time_str));
        Self::create(path)
    }

    pub fn create(path: PathBuf) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;
        Ok(ReplayFile { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record_input(&mut self, line: &str) -> io::Result<()> {
        self.write_line("<", line)
    }

    pub fn record_output(&mut self, line: &str) -> io::Result<()> {
        self.write_line(">", line)
    }

    fn write_line(&mut self, marker: &str, line: &str) -> io::Result<()> {
        writeln!(self.file, "{} {}", marker, line)?;
        self.file.flush()
    }
}
