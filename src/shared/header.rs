use crate::core::cursor::{self, BinReader, BinWriter, Endian};
use crate::core::geometry::Bounds;

/// Magic number at byte 0 of both the geometry file and its index,
/// big-endian.
pub const FILE_CODE: i32 = 9994;

/// Format version, little-endian, at byte 28.
pub const VERSION: i32 = 1000;

/// Both file headers are exactly 100 bytes.
pub const HEADER_BYTES: usize = 100;

/// Byte offset of the big-endian file-length-in-words field.
pub const FILE_LENGTH_OFFSET: usize = 24;

/// Every shape record starts with an 8-byte big-endian header
/// (record number, content length in 16-bit words).
pub const RECORD_HEADER_BYTES: usize = 8;

/// The raw fields of a 100-byte file header. Validation is the reader's job;
/// this layer only mirrors the bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileHeader {
    pub file_code: i32,
    pub file_length_words: i32,
    pub version: i32,
    pub shape_code: i32,
    pub bounds: Bounds,
}

pub fn read_file_header(bin: &mut BinReader<'_>) -> Result<FileHeader, cursor::Err> {
    bin.set_endian(Endian::Big);
    let file_code = bin.read_i32()?;
    bin.skip(5 * 4)?;
    let file_length_words = bin.read_i32()?;
    bin.set_endian(Endian::Little);
    let version = bin.read_i32()?;
    let shape_code = bin.read_i32()?;
    let bounds = Bounds {
        xmin: bin.read_f64()?,
        ymin: bin.read_f64()?,
        xmax: bin.read_f64()?,
        ymax: bin.read_f64()?,
    };
    // unused Z and M ranges
    bin.skip(4 * 8)?;
    Ok(FileHeader {
        file_code,
        file_length_words,
        version,
        shape_code,
        bounds,
    })
}

/// Writes the 100-byte header and leaves the cursor at the first record
/// position, little-endian.
pub fn write_file_header(
    bin: &mut BinWriter,
    file_bytes: usize,
    shape_code: i32,
    bounds: &Bounds,
) {
    bin.set_endian(Endian::Big);
    bin.write_i32(FILE_CODE);
    bin.skip(5 * 4);
    bin.write_i32((file_bytes / 2) as i32);
    bin.set_endian(Endian::Little);
    bin.write_i32(VERSION);
    bin.write_i32(shape_code);
    bin.write_f64(bounds.xmin);
    bin.write_f64(bounds.ymin);
    bin.write_f64(bounds.xmax);
    bin.write_f64(bounds.ymax);
    // unused Z and M ranges
    bin.skip(4 * 8);
}
