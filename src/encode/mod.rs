pub(crate) mod record;

use crate::core::cursor::{BinWriter, Endian};
use crate::core::geometry::{Bounds, ShapeType};
use crate::core::shared::ConfigType;
use crate::core::topology::{ArcPool, TopoShape};
use crate::shared::header;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub shape_type: ShapeType,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            shape_type: ShapeType::Polygon,
        }
    }
}

#[remain::sorted]
#[derive(Error, Debug)]
pub enum Err {
    #[error("Missing exportable data")]
    MissingExportData,
    #[error("Record encoding error: {0}")]
    RecordError(#[from] record::Err),
}

/// The two emitted buffers: the primary geometry file and its offset index.
#[derive(Debug, Clone)]
pub struct ShpFile {
    pub shp: Vec<u8>,
    pub shx: Vec<u8>,
}

/// Encodes the shapes into a `.shp`/`.shx` pair, resolving their parts
/// through the arc pool.
///
/// Records are laid down first so the total file length and the global
/// bounding box are known before the header is written; the index header is
/// a byte copy of the primary header with its own length patched in.
pub fn encode<P: ArcPool + ?Sized>(
    shapes: &[TopoShape],
    pool: &P,
    cfg: Config,
) -> Result<ShpFile, Err> {
    if shapes.is_empty() {
        return Err(Err::MissingExportData);
    }

    let mut file_bytes = header::HEADER_BYTES;
    let mut bounds: Option<Bounds> = None;
    let mut records = Vec::with_capacity(shapes.len());
    for (i, shape) in shapes.iter().enumerate() {
        let (rec_bounds, bytes) = record::encode_record(shape, pool, i as i32 + 1, cfg.shape_type)?;
        file_bytes += bytes.len();
        if let Some(b) = rec_bounds {
            match bounds.as_mut() {
                Some(acc) => acc.merge(&b),
                None => bounds = Some(b),
            }
        }
        records.push(bytes);
    }
    // zeroed box when every shape is null
    let bounds = bounds.unwrap_or_default();

    // .shp header section
    let mut shp = BinWriter::with_capacity(file_bytes);
    header::write_file_header(&mut shp, file_bytes, cfg.shape_type.code(), &bounds);

    // .shx header: the .shp header with the length field re-patched
    let shx_bytes = header::HEADER_BYTES + records.len() * 8;
    let mut shx = BinWriter::with_capacity(shx_bytes);
    shx.copy_from(&shp.as_bytes()[..header::HEADER_BYTES], 0);
    shx.seek(header::FILE_LENGTH_OFFSET);
    shx.set_endian(Endian::Big);
    shx.write_i32((shx_bytes / 2) as i32);
    shx.seek(header::HEADER_BYTES);

    // record sections of .shp and .shx
    for rec in &records {
        shx.write_i32((shp.position() / 2) as i32);
        shx.write_i32(((rec.len() - 8) / 2) as i32);
        shp.write_bytes(rec);
    }

    Ok(ShpFile {
        shp: shp.into_bytes(),
        shx: shx.into_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::topology::ArcRef;

    fn identity_shapes(arcs: &[(Vec<f64>, Vec<f64>)]) -> Vec<TopoShape> {
        arcs.iter()
            .enumerate()
            .map(|(i, _)| TopoShape::new(vec![vec![ArcRef::forward(i)]]))
            .collect()
    }

    fn ccw_square(ox: f64, oy: f64, size: f64) -> (Vec<f64>, Vec<f64>) {
        (
            vec![ox, ox + size, ox + size, ox, ox],
            vec![oy, oy, oy + size, oy + size, oy],
        )
    }

    #[test]
    fn test_empty_export_is_fatal() {
        let arcs: Vec<(Vec<f64>, Vec<f64>)> = Vec::new();
        assert!(matches!(
            encode(&[], &arcs[..], Config::default()),
            Err(Err::MissingExportData)
        ));
    }

    #[test]
    fn test_header_fields_and_global_bounds() {
        let arcs = vec![ccw_square(0.0, 0.0, 2.0), ccw_square(10.0, 10.0, 1.0)];
        let shapes = identity_shapes(&arcs);
        let out = encode(&shapes, &arcs[..], Config::default()).unwrap();

        assert_eq!(&out.shp[0..4], &9994_i32.to_be_bytes());
        let len_words = i32::from_be_bytes([out.shp[24], out.shp[25], out.shp[26], out.shp[27]]);
        assert_eq!(len_words as usize * 2, out.shp.len());
        assert_eq!(&out.shp[28..32], &1000_i32.to_le_bytes());
        assert_eq!(&out.shp[32..36], &5_i32.to_le_bytes());
        assert_eq!(&out.shp[36..44], &0.0_f64.to_le_bytes()); // xmin
        assert_eq!(&out.shp[52..60], &11.0_f64.to_le_bytes()); // xmax
    }

    #[test]
    fn test_index_entries_track_record_offsets() {
        let arcs = vec![ccw_square(0.0, 0.0, 2.0), ccw_square(5.0, 5.0, 3.0)];
        let shapes = identity_shapes(&arcs);
        let out = encode(&shapes, &arcs[..], Config::default()).unwrap();

        assert_eq!(out.shx.len(), 100 + 2 * 8);
        // header copied from .shp except for the patched length field
        assert_eq!(&out.shx[0..24], &out.shp[0..24]);
        assert_eq!(&out.shx[28..100], &out.shp[28..100]);
        let shx_words = i32::from_be_bytes([out.shx[24], out.shx[25], out.shx[26], out.shx[27]]);
        assert_eq!(shx_words as usize * 2, out.shx.len());

        let rec0_bytes = 52 + 4 + 16 * 5;
        let entry = |i: usize, word: usize| {
            let at = 100 + i * 8 + word * 4;
            i32::from_be_bytes([out.shx[at], out.shx[at + 1], out.shx[at + 2], out.shx[at + 3]])
        };
        assert_eq!(entry(0, 0), 50); // first record starts right after the header
        assert_eq!(entry(0, 1) as usize, (rec0_bytes - 8) / 2);
        assert_eq!(entry(1, 0) as usize, (100 + rec0_bytes) / 2);
        // entry length matches the length stored in the record's own header
        let rec1_at = 100 + rec0_bytes;
        let stored = i32::from_be_bytes([
            out.shp[rec1_at + 4],
            out.shp[rec1_at + 5],
            out.shp[rec1_at + 6],
            out.shp[rec1_at + 7],
        ]);
        assert_eq!(entry(1, 1), stored);
    }

    #[test]
    fn test_all_null_shapes() {
        let arcs: Vec<(Vec<f64>, Vec<f64>)> = Vec::new();
        let shapes = vec![TopoShape::null(), TopoShape::null()];
        let out = encode(&shapes, &arcs[..], Config::default()).unwrap();
        assert_eq!(out.shp.len(), 100 + 2 * 12);
        // zeroed global bounds
        assert_eq!(&out.shp[36..68], &[0; 32]);
    }
}
