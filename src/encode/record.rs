use crate::core::cursor::{BinWriter, Endian};
use crate::core::geometry::{Bounds, ShapeType};
use crate::core::topology::{ArcPool, TopoShape};

#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("Arc {0} is not present in the pool")]
    MissingArc(usize),
    #[error("Record point count mismatch; wrote {written}, declared {declared}")]
    PointCountMismatch { written: usize, declared: usize },
}

/// Byte offset of the part-start table within a record, counting from the
/// record header: 8 header + 4 type + 32 bbox + 4 part count + 4 point count.
const PARTS_OFFSET: usize = 52;

/// Encodes one topological shape as one binary record, returning the shape's
/// bounding box (None for a null shape) along with the record bytes.
///
/// A null shape becomes the fixed 12-byte record {id, content length 2,
/// type 0}. Everything past the big-endian record header is little-endian.
pub(crate) fn encode_record<P: ArcPool + ?Sized>(
    shape: &TopoShape,
    pool: &P,
    id: i32,
    shape_type: ShapeType,
) -> Result<(Option<Bounds>, Vec<u8>), Err> {
    let parts = if shape.is_null() {
        Vec::new()
    } else {
        resolve_parts(shape, pool)?
    };
    let point_count: usize = parts.iter().map(|(xx, _)| xx.len()).sum();
    if point_count == 0 {
        return Ok((None, null_record(id)));
    }

    let mut bounds: Option<Bounds> = None;
    for (xx, yy) in &parts {
        for (&x, &y) in xx.iter().zip(yy) {
            match bounds.as_mut() {
                Some(b) => b.add_point(x, y),
                None => bounds = Some(Bounds::of_point(x, y)),
            }
        }
    }
    // point_count > 0, so at least one point seeded the box
    let bounds = bounds.unwrap_or_default();

    let part_count = parts.len();
    let points_offset = PARTS_OFFSET + 4 * part_count;
    let record_bytes = points_offset + 16 * point_count;

    let mut bin = BinWriter::with_capacity(record_bytes);
    bin.write_i32(id);
    bin.write_i32(((record_bytes - 8) / 2) as i32);
    bin.set_endian(Endian::Little);
    bin.write_i32(shape_type.code());
    bin.write_f64(bounds.xmin);
    bin.write_f64(bounds.ymin);
    bin.write_f64(bounds.xmax);
    bin.write_f64(bounds.ymax);
    bin.write_i32(part_count as i32);
    bin.write_i32(point_count as i32);

    let mut written = 0_usize;
    for (i, (xx, yy)) in parts.iter().enumerate() {
        bin.seek(PARTS_OFFSET + i * 4);
        bin.write_i32(written as i32);
        bin.seek(points_offset + written * 16);
        for (&x, &y) in xx.iter().zip(yy) {
            bin.write_f64(x);
            bin.write_f64(y);
        }
        written += xx.len();
    }
    if written != point_count {
        return Err(Err::PointCountMismatch {
            written,
            declared: point_count,
        });
    }

    Ok((Some(bounds), bin.into_bytes()))
}

fn null_record(id: i32) -> Vec<u8> {
    let mut bin = BinWriter::with_capacity(12);
    bin.write_i32(id);
    bin.write_i32(2);
    bin.set_endian(Endian::Little);
    bin.write_i32(0);
    bin.into_bytes()
}

/// Resolves each part's arc chain against the pool into one concrete
/// coordinate run per part, honoring per-arc reversal.
fn resolve_parts<P: ArcPool + ?Sized>(
    shape: &TopoShape,
    pool: &P,
) -> Result<Vec<(Vec<f64>, Vec<f64>)>, Err> {
    let mut parts = Vec::with_capacity(shape.parts.len());
    for part in &shape.parts {
        let mut px = Vec::new();
        let mut py = Vec::new();
        for arc in part {
            let (ax, ay) = pool.arc(arc.index).ok_or(Err::MissingArc(arc.index))?;
            if arc.reversed {
                extend_part(
                    &mut px,
                    &mut py,
                    ax.iter().rev().copied().zip(ay.iter().rev().copied()),
                );
            } else {
                extend_part(&mut px, &mut py, ax.iter().copied().zip(ay.iter().copied()));
            }
        }
        parts.push((px, py));
    }
    Ok(parts)
}

/// Consecutive arcs in a part share their junction vertex; it is emitted
/// once.
fn extend_part<I>(px: &mut Vec<f64>, py: &mut Vec<f64>, mut points: I)
where
    I: Iterator<Item = (f64, f64)>,
{
    if let Some((x, y)) = points.next() {
        if px.last() != Some(&x) || py.last() != Some(&y) {
            px.push(x);
            py.push(y);
        }
    }
    for (x, y) in points {
        px.push(x);
        py.push(y);
    }
}
