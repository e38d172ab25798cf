use thiserror::Error;

/// Byte order applied by the cursor until it is switched again.
///
/// The shapefile format mixes orders inside a single buffer (record headers
/// and the legacy header fields are big-endian, record bodies are
/// little-endian), so the order has to be mutable cursor state rather than a
/// property of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Err {
    #[error("Not enough data to read")]
    NotEnoughData,
}

/// Writes integers and floats into a fixed-capacity byte buffer.
/// Mostly used by the encoder.
///
/// The capacity is computed up front from the total record byte count and the
/// cursor never grows; writing past the end is a bug in the layout
/// arithmetic, not a data error, and panics.
#[derive(Debug)]
pub struct BinWriter {
    buf: Vec<u8>,
    pos: usize,
    endian: Endian,
}

impl BinWriter {
    /// Allocates the full capacity up front, zero-filled, big-endian.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: vec![0; cap],
            pos: 0,
            endian: Endian::Big,
        }
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn seek(&mut self, pos: usize) {
        assert!(pos <= self.buf.len(), "seek past end of cursor");
        self.pos = pos;
    }

    /// Skips `n` bytes, leaving them as written (zero unless overwritten).
    pub fn skip(&mut self, n: usize) {
        self.seek(self.pos + n);
    }

    fn put(&mut self, bytes: &[u8]) {
        assert!(
            self.pos + bytes.len() <= self.buf.len(),
            "write past end of cursor"
        );
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    pub fn write_i32(&mut self, value: i32) {
        match self.endian {
            Endian::Big => self.put(&value.to_be_bytes()),
            Endian::Little => self.put(&value.to_le_bytes()),
        }
    }

    pub fn write_f64(&mut self, value: f64) {
        match self.endian {
            Endian::Big => self.put(&value.to_be_bytes()),
            Endian::Little => self.put(&value.to_le_bytes()),
        }
    }

    /// Appends raw bytes at the current position.
    pub fn write_bytes(&mut self, src: &[u8]) {
        self.put(src);
    }

    /// Copies `src` verbatim at an absolute offset without moving the cursor.
    /// Used for header templating (the .shx header is a patched copy of the
    /// .shp header).
    pub fn copy_from(&mut self, src: &[u8], at: usize) {
        assert!(
            at + src.len() <= self.buf.len(),
            "copy past end of cursor"
        );
        self.buf[at..at + src.len()].copy_from_slice(src);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads integers and floats out of a borrowed byte buffer.
/// Mostly used by the decoder; all reads are data-driven, so running off the
/// end is an input error, not a panic.
#[derive(Debug)]
pub struct BinReader<'a> {
    buf: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> BinReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            endian: Endian::Big,
        }
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn seek(&mut self, pos: usize) -> Result<(), Err> {
        if pos > self.buf.len() {
            return Err(Err::NotEnoughData);
        }
        self.pos = pos;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<(), Err> {
        self.seek(self.pos + n)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], Err> {
        if self.pos + n > self.buf.len() {
            return Err(Err::NotEnoughData);
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn read_i32(&mut self) -> Result<i32, Err> {
        let b = self.take(4)?;
        let bytes = [b[0], b[1], b[2], b[3]];
        Ok(match self.endian {
            Endian::Big => i32::from_be_bytes(bytes),
            Endian::Little => i32::from_le_bytes(bytes),
        })
    }

    pub fn read_f64(&mut self) -> Result<f64, Err> {
        let b = self.take(8)?;
        let bytes = [b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]];
        Ok(match self.endian {
            Endian::Big => f64::from_be_bytes(bytes),
            Endian::Little => f64::from_le_bytes(bytes),
        })
    }
}
