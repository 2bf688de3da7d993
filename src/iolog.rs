//! Device I/O log writer, canonical fio-trace format.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const DEVICE_NAME: &str = "/dev/nvme0n1";
pub const SECTOR_SIZE: u64 = 512;
pub const SECTORS_PER_PAGE: u64 = 8;
pub const PAGE_SIZE: u64 = SECTOR_SIZE * SECTORS_PER_PAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoKind {
    Read,
    Write,
}

impl IoKind {
    fn as_str(self) -> &'static str {
        match self {
            IoKind::Read => "read",
            IoKind::Write => "write",
        }
    }
}

/// Appends device I/O records in the `fio version 2 iolog` line format.
pub struct IoLogWriter {
    out: BufWriter<File>,
    closed: bool,
}

impl IoLogWriter {
    pub fn create(path: impl AsRef<Path>) -> io::Result<IoLogWriter> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        writeln!(out, "fio version 2 iolog")?;
        writeln!(out, "{} add", DEVICE_NAME)?;
        writeln!(out, "{} open", DEVICE_NAME)?;
        Ok(IoLogWriter { out, closed: false })
    }

    /// Emit one device I/O record for `num_pages` pages starting at `page_id`.
    pub fn write_io(&mut self, kind: IoKind, page_id: u64, num_pages: u64) -> io::Result<()> {
        let byte_offset = page_id * PAGE_SIZE;
        let byte_length = num_pages * PAGE_SIZE;
        writeln!(
            self.out,
            "{} {} {} {}",
            DEVICE_NAME,
            kind.as_str(),
            byte_offset,
            byte_length
        )
    }

    pub fn close(&mut self) -> io::Result<()> {
        if !self.closed {
            writeln!(self.out, "{} close", DEVICE_NAME)?;
            self.out.flush()?;
            self.closed = true;
        }
        Ok(())
    }
}

impl Drop for IoLogWriter {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read as _;

    #[test]
    fn writes_header_body_and_footer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.fio.log");
        {
            let mut w = IoLogWriter::create(&path).unwrap();
            w.write_io(IoKind::Read, 0, 1).unwrap();
            w.write_io(IoKind::Write, 1, 1).unwrap();
            w.close().unwrap();
        }
        let mut contents = String::new();
        File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "fio version 2 iolog");
        assert_eq!(lines[1], format!("{} add", DEVICE_NAME));
        assert_eq!(lines[2], format!("{} open", DEVICE_NAME));
        assert_eq!(lines[3], format!("{} read 0 4096", DEVICE_NAME));
        assert_eq!(lines[4], format!("{} write 4096 4096", DEVICE_NAME));
        assert_eq!(lines[5], format!("{} close", DEVICE_NAME));
    }
}
