//! Logger setup for the panel binary

use std::fs::{File, OpenOptions};
use std::io::{self, Write};

use chrono::Local;
use env_logger::{Builder, Env, Target};

use crate::config::LogConfig;
use crate::panel::PanelResult;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes every line to stderr and to a log file
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Build a logger from config. `RUST_LOG` wins over `config.level`.
pub fn builder(config: &LogConfig) -> PanelResult<Builder> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(config.level.as_str()));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format(TIMESTAMP_FORMAT),
            record.target(),
            record.level(),
            record.args()
        )
    });

    if let Some(path) = &config.file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(TeeWriter { file })));
    }

    Ok(builder)
}

/// Install the global logger. Calling it again is a no-op.
pub fn init(config: &LogConfig) -> PanelResult<()> {
    builder(config)?.try_init().ok();
    Ok(())
}
