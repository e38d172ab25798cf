// lib.rs

/// Contains the interface between the codec and `.shp`/`.shx` files
/// on the filesystem.
pub mod io;

/// Contains the format pieces shared by the encoder and the decoder.
pub(crate) mod shared;

/// Defines the shapefile encoder.
pub mod encode;

/// Defines the shapefile decoder.
pub mod decode;

/// Contains the shared definitions, native objects, and the binary cursor.
pub mod core;

/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::cursor::{BinReader, BinWriter, Endian};
    pub use crate::core::geometry::{Bounds, GeometryData, Info, ShapeType};
    pub use crate::core::shared::ConfigType;
    pub use crate::core::topology::{ArcPool, ArcRef, TopoShape};
    pub use crate::decode::{self, decode, reader::ShpReader};
    pub use crate::encode::{self, encode, ShpFile};
}
