pub mod reader;

use crate::core::geometry::{GeometryData, Info};
use crate::shared::ring;
use reader::ShpReader;
use thiserror::Error;

#[remain::sorted]
#[derive(Error, Debug)]
pub enum Err {
    #[error("Counting problem: pre-scanned totals disagree with the decoded stream")]
    CountingProblem,
    #[error("A ring in shape {shape} has zero area or is not closed")]
    DegenerateRing { shape: usize },
    #[error("Shape {shape} only contains a hole")]
    LoneHole { shape: usize },
    #[error("Shape part mismatch in shape {shape}")]
    PartCountMismatch { shape: usize },
    #[error("Shape reading error: {0}")]
    Reader(#[from] reader::Err),
}

/// Decodes every shape in the file into flat coordinate arrays plus per-part
/// classification flags, ready for the topology builder.
///
/// Single pass over the coordinate stream: the arrays are sized up front from
/// the reader's pre-scanned counts, then filled in file order. Polygon rings
/// are classified as soon as their points are written, since the classifier
/// only needs the just-written slice. Any failure aborts the whole decode;
/// there is no partial output.
pub fn decode(reader: &ShpReader<'_>) -> Result<GeometryData, Err> {
    let counts = reader.counts();
    let expect_rings = reader.shape_type().expects_rings();

    let mut xx = vec![0.0; counts.point_count];
    let mut yy = vec![0.0; counts.point_count];
    let mut part_ids = vec![0_u32; counts.point_count];
    let mut shape_ids = Vec::with_capacity(counts.part_count);
    let mut max_part_flags = expect_rings.then(|| vec![false; counts.part_count]);
    let mut hole_flags = expect_rings.then(|| vec![false; counts.part_count]);

    let mut point_id = 0_usize;
    let mut part_id = 0_usize;
    let mut shape_id = 0_usize;

    for shp in reader.shapes() {
        let shp = shp?;
        if shp.part_count != shp.part_sizes.len() {
            return Err(Err::PartCountMismatch { shape: shape_id });
        }

        let mut max_part: Option<usize> = None;
        let mut max_part_area = 0.0_f64;
        let mut offs = 0_usize;
        for &points_in_part in &shp.part_sizes {
            for _ in 0..points_in_part {
                xx[point_id] = shp.coords[offs];
                yy[point_id] = shp.coords[offs + 1];
                offs += 2;
                part_ids[point_id] = part_id as u32;
                point_id += 1;
            }

            if expect_rings {
                let area = ring::signed_area(&xx, &yy, point_id - points_in_part, points_in_part);
                if area == 0.0 {
                    return Err(Err::DegenerateRing { shape: shape_id });
                }
                if area.abs() > max_part_area {
                    max_part = Some(part_id);
                    max_part_area = area.abs();
                }
                if area < 0.0 {
                    if shp.part_count == 1 {
                        return Err(Err::LoneHole { shape: shape_id });
                    }
                    if let Some(flags) = hole_flags.as_mut() {
                        flags[part_id] = true;
                    }
                }
            }

            shape_ids.push(shape_id as u32);
            part_id += 1;
        }

        if let (Some(flags), Some(id)) = (max_part_flags.as_mut(), max_part) {
            flags[id] = true;
        }
        shape_id += 1;
    }

    if counts.point_count != point_id
        || counts.part_count != part_id
        || counts.shape_count != shape_id
    {
        return Err(Err::CountingProblem);
    }

    let info = Info {
        input_point_count: point_id,
        input_part_count: part_id,
        input_shape_count: shape_id,
        input_geometry_type: reader.shape_type(),
    };
    Ok(GeometryData {
        xx,
        yy,
        part_ids,
        shape_ids,
        max_part_flags,
        hole_flags,
        info,
    })
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::core::cursor::{BinWriter, Endian};

    /// Builds a whole file byte-for-byte from nested (shape, part, point)
    /// vectors. Bounding boxes are left zeroed; the decoder never reads them.
    pub(crate) fn build_file(type_code: i32, shapes: &[Vec<Vec<(f64, f64)>>]) -> Vec<u8> {
        let mut records: Vec<Vec<u8>> = Vec::new();
        for (i, parts) in shapes.iter().enumerate() {
            let part_count = parts.len();
            let point_count: usize = parts.iter().map(|p| p.len()).sum();
            let rec_bytes = 52 + 4 * part_count + 16 * point_count;
            let mut bin = BinWriter::with_capacity(rec_bytes);
            bin.write_i32(i as i32 + 1);
            bin.write_i32(((rec_bytes - 8) / 2) as i32);
            bin.set_endian(Endian::Little);
            bin.write_i32(type_code);
            bin.skip(4 * 8);
            bin.write_i32(part_count as i32);
            bin.write_i32(point_count as i32);
            let mut start = 0;
            for part in parts {
                bin.write_i32(start as i32);
                start += part.len();
            }
            for part in parts {
                for &(x, y) in part {
                    bin.write_f64(x);
                    bin.write_f64(y);
                }
            }
            records.push(bin.into_bytes());
        }

        let file_bytes = 100 + records.iter().map(|r| r.len()).sum::<usize>();
        let mut bin = BinWriter::with_capacity(file_bytes);
        bin.write_i32(9994);
        bin.skip(5 * 4);
        bin.write_i32((file_bytes / 2) as i32);
        bin.set_endian(Endian::Little);
        bin.write_i32(1000);
        bin.write_i32(type_code);
        bin.skip(8 * 8);
        for rec in &records {
            bin.write_bytes(rec);
        }
        bin.into_bytes()
    }
}
