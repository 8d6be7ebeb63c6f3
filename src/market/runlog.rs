//! Append-only plain-text record of every initialization action attempted.
//!
//! Owned by the sequencer for the duration of a run. The file is truncated
//! when opened, so it only ever describes the current run; on failure it
//! shows exactly how far the run progressed.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::BootResult;

pub const RUN_LOG_FILE: &str = "bank_migrations_init.log";

pub struct RunLog {
    file: File,
}

impl RunLog {
    /// Open a fresh log for this run, discarding any previous run's content.
    pub fn create(path: &Path) -> BootResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self { file })
    }

    pub fn line(&mut self, line: &str) -> BootResult<()> {
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_appended_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RUN_LOG_FILE);

        let mut log = RunLog::create(&path).unwrap();
        log.line("init for network: test").unwrap();
        log.line("symbol: USDC, address: 0xA, discount: 50000000000000000").unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "init for network: test\nsymbol: USDC, address: 0xA, discount: 50000000000000000\n"
        );
    }

    #[test]
    fn reopening_truncates_the_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RUN_LOG_FILE);

        let mut log = RunLog::create(&path).unwrap();
        log.line("stale entry from an earlier run").unwrap();
        drop(log);

        let mut log = RunLog::create(&path).unwrap();
        log.line("init for network: test").unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "init for network: test\n");
    }
}
