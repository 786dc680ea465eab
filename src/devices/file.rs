//! File device implementation

use crate::core::{
    GenericFormat, LogDevice, LogLevel, LoggerError, Result, Timestamp, TimestampFormat,
};
#[cfg(feature = "file")]
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one formatted line per message to a file.
///
/// Writes are buffered; call [`LogDevice::flush`] (or drop the device) to
/// push them to disk. With [`FileDevice::with_file_lock`] every line is
/// written under an exclusive advisory lock and flushed immediately, so
/// several processes can share one log file.
pub struct FileDevice {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    format: GenericFormat,
    lock_file: bool,
}

impl FileDevice {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.is_dir() {
            return Err(LoggerError::file_device(
                path.display().to_string(),
                "path is a directory",
            ));
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    format!("opening {}", path.display()),
                    "cannot open log file",
                    e,
                )
            })?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            format: GenericFormat::default(),
            lock_file: false,
        })
    }

    /// Set the timestamp format for this device
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use device_logger::devices::FileDevice;
    /// use device_logger::TimestampFormat;
    ///
    /// let device = FileDevice::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.format = GenericFormat::new(format);
        self
    }

    /// Hold an exclusive advisory lock on the file while writing each line
    #[cfg(feature = "file")]
    #[must_use]
    pub fn with_file_lock(mut self, lock_file: bool) -> Self {
        self.lock_file = lock_file;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(feature = "file")]
    fn write_locked(&self, writer: &mut BufWriter<File>, line: &str) -> Result<()> {
        writer
            .get_ref()
            .lock_exclusive()
            .map_err(|_| LoggerError::file_lock(self.path.display().to_string()))?;
        let written = writeln!(writer, "{}", line).and_then(|()| writer.flush());
        let unlocked = writer.get_ref().unlock();
        written?;
        unlocked.map_err(|_| LoggerError::file_lock(self.path.display().to_string()))
    }

    #[cfg(not(feature = "file"))]
    fn write_locked(&self, writer: &mut BufWriter<File>, line: &str) -> Result<()> {
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

impl LogDevice for FileDevice {
    fn log(&self, message: &str, context: &str, time: &Timestamp, level: LogLevel) -> Result<()> {
        let line = self.format.render(message, context, time, level);
        let mut writer = self.writer.lock();
        if self.lock_file {
            return self.write_locked(&mut writer, &line);
        }
        writeln!(writer, "{}", line).map_err(|e| {
            LoggerError::io_operation(
                format!("writing {}", self.path.display()),
                "cannot append log line",
                e,
            )
        })
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileDevice {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.get_mut().flush();
    }
}
