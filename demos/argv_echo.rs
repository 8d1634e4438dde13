//! Writes each command-line argument as a line into a volatile stream, then
//! reads the stream back one byte at a time. NUL bytes print as `.`.
//!
//! Run with:
//!     cargo run --example argv_echo -- one two three

use std::io::{self, Read, SeekFrom, Write};

use volstream::VolatileStream;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut stream = VolatileStream::open()?;

    for arg in std::env::args().skip(1) {
        writeln!(stream, "{}", arg)?;
    }

    // Leave a small hole to show the zero fill
    stream.seek(SeekFrom::End(4))?;
    writeln!(stream)?;

    stream.seek(SeekFrom::Start(0))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for byte in Read::bytes(&mut stream) {
        let byte = byte?;
        out.write_all(&[if byte == 0 { b'.' } else { byte }])?;
    }

    println!("({} bytes)", stream.len()?);
    stream.close()?;
    Ok(())
}
