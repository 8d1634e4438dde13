//! `std::io` adapters.

use std::io::{self, Read, Seek, SeekFrom, Write};

use super::ops::StreamOps;
use super::volatile::VolatileStream;

impl Read for VolatileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(StreamOps::read(self, buf)?)
    }
}

impl Write for VolatileStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = StreamOps::write(self, buf)?;
        if n == 0 && !buf.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::OutOfMemory,
                "volatile stream buffer cannot grow",
            ));
        }
        Ok(n)
    }

    /// Nothing is buffered at this level.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for VolatileStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(StreamOps::seek(self, pos)?)
    }
}
