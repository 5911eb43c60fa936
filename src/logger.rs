use std::fmt;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use log::Level;
use log::LevelFilter;
use log::Log;
use log::Metadata;
use log::Record;

use crate::error::Result;

////////////////////////////////////////////////////////////
// File logger
////////////////////////////////////////////////////////////
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Appends one line per record: `<local time>   <LEVEL>:\t<message>`.
///
/// It is never installed as the global logger. Callers pass it explicitly,
/// e.g. `log::info!(logger: &file_logger, ...)`. The `log` macros still gate
/// on `log::max_level()`, so the process has to raise it with
/// `log::set_max_level` first.
pub struct FileLogger {
    file: File,
    level: LevelFilter,
}

impl FileLogger {
    pub fn open<P: AsRef<Path>>(path: P, level: LevelFilter) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file, level })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(
            &chrono::Local::now().format(TIME_FORMAT),
            record.level(),
            *record.args(),
        );
        // Nowhere left to report a failed log write.
        let _ = (&self.file).write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = (&self.file).flush();
    }
}

fn format_line(time: &dyn fmt::Display, level: Level, args: fmt::Arguments<'_>) -> String {
    format!("{}   {:.5}:\t{}\n", time, level, args)
}

////////////////////////////////////////////////////////////
// Memory logger
////////////////////////////////////////////////////////////
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryLogger {
    lines: std::sync::Mutex<Vec<(Level, String)>>,
}

#[cfg(test)]
impl MemoryLogger {
    pub(crate) fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, level: Level, needle: &str) -> usize {
        self.lines()
            .iter()
            .filter(|(l, msg)| *l == level && msg.contains(needle))
            .count()
    }
}

#[cfg(test)]
impl Log for MemoryLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.lines
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}
