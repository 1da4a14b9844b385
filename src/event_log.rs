//! JSON-lines event log: one serialized [`GameEvent`] per line.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::{EventSink, GameEvent};

pub struct EventLog<W: Write> {
    out: W,
    buf: Vec<u8>,
    failed: bool,
}

impl EventLog<Box<dyn Write>> {
    /// Open `path` for appending, creating it if needed
    pub fn append_to(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::new(Box::new(BufWriter::new(file))))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(1024),
            failed: false,
        }
    }

    pub fn record(&mut self, event: &GameEvent) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, event)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for EventLog<W> {
    fn emit(&mut self, event: GameEvent) {
        // Report the first failure only; the match goes on without a log.
        if let Err(e) = self.record(&event) {
            if !self.failed {
                eprintln!("[EventLog] write failed: {:#}", e);
                self.failed = true;
            }
        }
    }
}
