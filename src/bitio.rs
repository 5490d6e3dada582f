//! Bit-granular input and output over byte streams.
//!
//! The codec only ever talks to [`BitSource`] and [`BitSink`]. End of stream
//! is reported as `Ok(None)` rather than an error so callers can decide
//! whether exhaustion is expected (the counting pass) or fatal (the header).

use std::io::{self, Read, Seek, SeekFrom, Write};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::Result;

pub trait BitSource {
    /// Read `bits` (at most 32) as an unsigned MSB-first integer.
    /// Returns `None` once the stream cannot supply all of them.
    fn read_bits(&mut self, bits: u32) -> Result<Option<u32>>;

    fn read_bit(&mut self) -> Result<Option<bool>> {
        Ok(self.read_bits(1)?.map(|b| b == 1))
    }

    fn bits_read(&self) -> u64;
}

/// A source the compressor can scan twice.
pub trait Rewind: BitSource {
    /// Reposition at the first bit of the stream and reset `bits_read`.
    fn rewind(&mut self) -> Result<()>;
}

pub trait BitSink {
    /// Write the low `bits` (at most 64) of `value`, MSB first.
    fn write_bits(&mut self, bits: u32, value: u64) -> Result<()>;

    fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(1, bit as u64)
    }

    /// Zero-pad any partial final byte and flush the underlying writer.
    fn flush(&mut self) -> Result<()>;

    fn bits_written(&self) -> u64;
}

/// [`BitSource`] backed by a `bitstream_io` big-endian reader.
pub struct BitInput<R: Read> {
    reader: BitReader<R, BigEndian>,
    bits_read: u64,
    /// Byte offset `rewind` returns to.
    start: u64,
}

impl<R: Read> BitInput<R> {
    /// Wrap `inner`. A rewind on a seekable reader built this way goes to
    /// offset 0; use [`BitInput::seekable`] to start mid-stream.
    pub fn new(inner: R) -> Self {
        Self {
            reader: BitReader::endian(inner, BigEndian),
            bits_read: 0,
            start: 0,
        }
    }
}

impl<R: Read + Seek> BitInput<R> {
    /// Wrap `inner` so that `rewind` returns to its current position.
    pub fn seekable(mut inner: R) -> Result<Self> {
        let start = inner.stream_position()?;
        let mut input = Self::new(inner);
        input.start = start;
        Ok(input)
    }

    fn seek_start(&mut self) -> io::Result<()> {
        self.reader.byte_align();
        let start = self.start;
        match self.reader.reader() {
            Some(inner) => inner.seek(SeekFrom::Start(start)).map(|_| ()),
            None => Err(io::Error::new(
                io::ErrorKind::Other,
                "bit reader not byte aligned after align",
            )),
        }
    }
}

impl<R: Read> BitSource for BitInput<R> {
    fn read_bits(&mut self, bits: u32) -> Result<Option<u32>> {
        if bits == 0 {
            return Ok(Some(0));
        }
        match self.reader.read::<u32>(bits) {
            Ok(value) => {
                self.bits_read += u64::from(bits);
                Ok(Some(value))
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn bits_read(&self) -> u64 {
        self.bits_read
    }
}

impl<R: Read + Seek> Rewind for BitInput<R> {
    fn rewind(&mut self) -> Result<()> {
        self.seek_start()?;
        self.bits_read = 0;
        Ok(())
    }
}

/// [`BitSink`] backed by a `bitstream_io` big-endian writer.
pub struct BitOutput<W: Write> {
    writer: BitWriter<W, BigEndian>,
    bits_written: u64,
}

impl<W: Write> BitOutput<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BitWriter::endian(inner, BigEndian),
            bits_written: 0,
        }
    }
}

impl<W: Write> BitSink for BitOutput<W> {
    fn write_bits(&mut self, bits: u32, value: u64) -> Result<()> {
        if bits == 0 {
            return Ok(());
        }
        self.writer.write::<u64>(bits, value)?;
        self.bits_written += u64::from(bits);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.byte_align()?;
        if let Some(inner) = self.writer.writer() {
            inner.flush()?;
        }
        Ok(())
    }

    fn bits_written(&self) -> u64 {
        self.bits_written
    }
}
