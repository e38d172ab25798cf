use std::fs;
use std::path::Path;

use crate::core::geometry::GeometryData;
use crate::core::topology::{ArcPool, TopoShape};
use crate::decode::{self, reader::ShpReader};
use crate::encode::{self, ShpFile};

#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("Decoding error: {0}")]
    Decode(#[from] decode::Err),
    #[error("Encoding error: {0}")]
    Encode(#[from] encode::Err),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Shape reading error: {0}")]
    Reader(#[from] decode::reader::Err),
}

/// Reads a `.shp` file and decodes it. A sibling `.shx` index, when present,
/// is picked up for the record pre-scan; its absence is not an error.
/// Other sidecars (attribute table, projection, encoding descriptors) are the
/// caller's concern.
pub fn load<P: AsRef<Path>>(path: P) -> Result<GeometryData, Err> {
    let path = path.as_ref();
    let shp = fs::read(path)?;
    let shx_path = path.with_extension("shx");
    let reader = if shx_path.is_file() {
        let shx = fs::read(&shx_path)?;
        ShpReader::with_index(&shp, &shx)?
    } else {
        ShpReader::new(&shp)?
    };
    Ok(decode::decode(&reader)?)
}

/// Encodes the shapes and writes the `.shp`/`.shx` pair side by side.
pub fn save<Q, P>(path: Q, shapes: &[TopoShape], pool: &P, cfg: encode::Config) -> Result<(), Err>
where
    Q: AsRef<Path>,
    P: ArcPool + ?Sized,
{
    let path = path.as_ref();
    let ShpFile { shp, shx } = encode::encode(shapes, pool, cfg)?;
    fs::write(path, &shp)?;
    fs::write(path.with_extension("shx"), &shx)?;
    Ok(())
}
