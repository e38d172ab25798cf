use crate::core::cursor::{self, BinReader, Endian};
use crate::core::geometry::ShapeType;
use crate::shared::header::{self, HEADER_BYTES, RECORD_HEADER_BYTES};

#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("Not a shapefile: bad file code {0}")]
    BadFileCode(i32),
    #[error("Bad index file: {0}")]
    BadIndexFile(&'static str),
    #[error("Malformed record {record}: {reason}")]
    MalformedRecord {
        record: usize,
        reason: &'static str,
    },
    #[error("Not enough data: {0}")]
    NotEnoughData(#[from] cursor::Err),
    #[error("Only polygon and polyline (type 5 and 3) shapefiles are supported, got type {0}")]
    UnsupportedType(i32),
}

/// Totals gathered by the counting pre-scan, so the decoder can allocate its
/// flat arrays exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub point_count: usize,
    pub part_count: usize,
    pub shape_count: usize,
}

/// One shape's geometry as stored in the file: per-part point counts plus the
/// flat interleaved x,y sequence for the whole shape.
#[derive(Debug, Clone)]
pub struct ShapeRec {
    pub part_count: usize,
    pub point_count: usize,
    pub part_sizes: Vec<usize>,
    pub coords: Vec<f64>,
}

/// Byte-level record metadata read during the pre-scan. Only the fixed-size
/// fields are touched; coordinate payloads are skipped via the content
/// length.
#[derive(Debug, Clone, Copy)]
struct RecordMeta {
    content_bytes: usize,
    part_count: usize,
    point_count: usize,
}

/// Wraps a raw `.shp` buffer: validates the header, pre-scans record counts,
/// and exposes the shapes as a lazy iterator.
#[derive(Debug)]
pub struct ShpReader<'a> {
    buf: &'a [u8],
    shape_type: ShapeType,
    counts: Counts,
    /// byte offset of each record header, in file order
    record_offsets: Vec<usize>,
}

impl<'a> ShpReader<'a> {
    /// Validates the file header and pre-scans the records by chaining their
    /// content lengths.
    pub fn new(buf: &'a [u8]) -> Result<Self, Err> {
        let shape_type = read_shape_type(buf)?;
        let mut bin = BinReader::new(buf);
        let mut counts = Counts {
            point_count: 0,
            part_count: 0,
            shape_count: 0,
        };
        let mut record_offsets = Vec::new();
        let mut pos = HEADER_BYTES;
        while pos < buf.len() {
            let meta = read_record_meta(&mut bin, pos, shape_type, counts.shape_count)?;
            record_offsets.push(pos);
            counts.shape_count += 1;
            counts.part_count += meta.part_count;
            counts.point_count += meta.point_count;
            pos += RECORD_HEADER_BYTES + meta.content_bytes;
        }
        if pos != buf.len() {
            // the last record claims more content than the buffer holds
            return Err(Err::NotEnoughData(cursor::Err::NotEnoughData));
        }
        Ok(Self {
            buf,
            shape_type,
            counts,
            record_offsets,
        })
    }

    /// Sidecar form: takes record positions from the `.shx` index instead of
    /// chaining content lengths. The index is consulted read-only.
    pub fn with_index(buf: &'a [u8], shx: &[u8]) -> Result<Self, Err> {
        let shape_type = read_shape_type(buf)?;
        if shx.len() < HEADER_BYTES {
            return Err(Err::BadIndexFile("index shorter than its header"));
        }
        if (shx.len() - HEADER_BYTES) % 8 != 0 {
            return Err(Err::BadIndexFile("index entries are not 8 bytes each"));
        }
        let mut idx = BinReader::new(shx);
        let index_header = header::read_file_header(&mut idx)?;
        if index_header.file_code != header::FILE_CODE {
            return Err(Err::BadIndexFile("bad file code"));
        }
        idx.set_endian(Endian::Big);

        let shape_count = (shx.len() - HEADER_BYTES) / 8;
        let mut bin = BinReader::new(buf);
        let mut counts = Counts {
            point_count: 0,
            part_count: 0,
            shape_count: 0,
        };
        let mut record_offsets = Vec::with_capacity(shape_count);
        for record in 0..shape_count {
            let offset_words = idx.read_i32()?;
            let length_words = idx.read_i32()?;
            let pos = offset_words as usize * 2;
            let meta = read_record_meta(&mut bin, pos, shape_type, record)?;
            if meta.content_bytes != length_words as usize * 2 {
                return Err(Err::BadIndexFile("entry length disagrees with the record header"));
            }
            record_offsets.push(pos);
            counts.shape_count += 1;
            counts.part_count += meta.part_count;
            counts.point_count += meta.point_count;
        }
        Ok(Self {
            buf,
            shape_type,
            counts,
            record_offsets,
        })
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    /// Lazy sequence of per-shape geometry records, in file order.
    pub fn shapes(&self) -> Shapes<'_, 'a> {
        Shapes {
            reader: self,
            next: 0,
        }
    }

    fn read_shape(&self, record: usize) -> Result<ShapeRec, Err> {
        let pos = self.record_offsets[record];
        let mut bin = BinReader::new(self.buf);
        let meta = read_record_meta(&mut bin, pos, self.shape_type, record)?;
        if meta.part_count == 0 {
            // null record
            return Ok(ShapeRec {
                part_count: 0,
                point_count: 0,
                part_sizes: Vec::new(),
                coords: Vec::new(),
            });
        }

        // read_record_meta leaves the cursor just past the point count
        let mut starts = Vec::with_capacity(meta.part_count);
        for _ in 0..meta.part_count {
            starts.push(bin.read_i32()?);
        }
        if starts[0] != 0 {
            return Err(Err::MalformedRecord {
                record,
                reason: "first part does not start at point 0",
            });
        }
        let mut part_sizes = Vec::with_capacity(meta.part_count);
        for i in 0..meta.part_count {
            let start = starts[i] as i64;
            let end = if i + 1 < meta.part_count {
                starts[i + 1] as i64
            } else {
                meta.point_count as i64
            };
            if end < start || start < 0 || end > meta.point_count as i64 {
                return Err(Err::MalformedRecord {
                    record,
                    reason: "part start offsets are not monotonic",
                });
            }
            part_sizes.push((end - start) as usize);
        }

        let mut coords = Vec::with_capacity(meta.point_count * 2);
        for _ in 0..meta.point_count * 2 {
            coords.push(bin.read_f64()?);
        }
        Ok(ShapeRec {
            part_count: meta.part_count,
            point_count: meta.point_count,
            part_sizes,
            coords,
        })
    }
}

/// Iterator over a reader's shapes, yielding them lazily in file order.
#[derive(Debug)]
pub struct Shapes<'r, 'a> {
    reader: &'r ShpReader<'a>,
    next: usize,
}

impl Iterator for Shapes<'_, '_> {
    type Item = Result<ShapeRec, Err>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.reader.record_offsets.len() {
            return None;
        }
        let out = self.reader.read_shape(self.next);
        self.next += 1;
        Some(out)
    }
}

/// File-level validation, done before any geometry parsing.
fn read_shape_type(buf: &[u8]) -> Result<ShapeType, Err> {
    let mut bin = BinReader::new(buf);
    let file_header = header::read_file_header(&mut bin)?;
    if file_header.file_code != header::FILE_CODE {
        return Err(Err::BadFileCode(file_header.file_code));
    }
    ShapeType::from_code(file_header.shape_code)
        .ok_or(Err::UnsupportedType(file_header.shape_code))
}

/// Reads one record's header and count fields at `pos`, validating the
/// content length against them. Leaves the cursor just past the point-count
/// field (or past the type field for a null record).
fn read_record_meta(
    bin: &mut BinReader<'_>,
    pos: usize,
    file_type: ShapeType,
    record: usize,
) -> Result<RecordMeta, Err> {
    bin.seek(pos)?;
    bin.set_endian(Endian::Big);
    let _record_number = bin.read_i32()?;
    let content_words = bin.read_i32()?;
    if content_words < 2 {
        return Err(Err::MalformedRecord {
            record,
            reason: "content length smaller than a shape type field",
        });
    }
    let content_bytes = content_words as usize * 2;

    bin.set_endian(Endian::Little);
    let type_code = bin.read_i32()?;
    if type_code == 0 {
        // null record: the content is the type field alone
        if content_bytes != 4 {
            return Err(Err::MalformedRecord {
                record,
                reason: "null record with trailing content",
            });
        }
        return Ok(RecordMeta {
            content_bytes,
            part_count: 0,
            point_count: 0,
        });
    }
    if type_code != file_type.code() {
        return Err(Err::MalformedRecord {
            record,
            reason: "record shape type differs from the file header",
        });
    }

    // record bbox, unused by the decoder
    bin.skip(4 * 8)?;
    let part_count = bin.read_i32()?;
    let point_count = bin.read_i32()?;
    if part_count <= 0 || point_count <= 0 {
        return Err(Err::MalformedRecord {
            record,
            reason: "non-positive part or point count",
        });
    }
    let part_count = part_count as usize;
    let point_count = point_count as usize;
    let expected = 4 + 32 + 4 + 4 + 4 * part_count + 16 * point_count;
    if expected != content_bytes {
        return Err(Err::MalformedRecord {
            record,
            reason: "content length disagrees with part and point counts",
        });
    }
    Ok(RecordMeta {
        content_bytes,
        part_count,
        point_count,
    })
}
