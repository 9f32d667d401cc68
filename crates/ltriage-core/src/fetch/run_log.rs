//! Sinks for run-log lines (the triage contract, not diagnostics).

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Destination of run-log lines. One call per line, without terminator.
pub trait RunLog {
    fn record(&mut self, line: &str) -> io::Result<()>;
}

impl<L: RunLog + ?Sized> RunLog for &mut L {
    fn record(&mut self, line: &str) -> io::Result<()> {
        (**self).record(line)
    }
}

/// Appends lines to a file, flushing after each so the log survives
/// interruption.
#[derive(Debug)]
pub struct FileRunLog {
    path: PathBuf,
    file: File,
}

impl FileRunLog {
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RunLog for FileRunLog {
    fn record(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{}", line)?;
        self.file.flush()
    }
}

/// Keeps lines in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryRunLog {
    pub lines: Vec<String>,
}

impl RunLog for MemoryRunLog {
    fn record(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_run_log_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("log.txt");
        FileRunLog::open(&path).unwrap().record("one").unwrap();
        let mut log = FileRunLog::open(&path).unwrap();
        log.record("two").unwrap();
        assert_eq!(log.path(), path.as_path());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
