use serde::Serialize;

/// Geometry types supported by the codec. The discriminants are the
/// on-disk type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShapeType {
    #[serde(rename = "polyline")]
    Polyline = 3,
    #[serde(rename = "polygon")]
    Polygon = 5,
}

impl ShapeType {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            3 => Some(ShapeType::Polyline),
            5 => Some(ShapeType::Polygon),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Polygon parts are rings and get area classification; polyline parts
    /// are open paths and skip it.
    pub fn expects_rings(self) -> bool {
        matches!(self, ShapeType::Polygon)
    }
}

/// Axis-aligned bounding box, stored the way the format stores it
/// (xmin, ymin, xmax, ymax).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Bounds {
    pub fn of_point(x: f64, y: f64) -> Self {
        Self {
            xmin: x,
            ymin: y,
            xmax: x,
            ymax: y,
        }
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        if x < self.xmin {
            self.xmin = x;
        }
        if x > self.xmax {
            self.xmax = x;
        }
        if y < self.ymin {
            self.ymin = y;
        }
        if y > self.ymax {
            self.ymax = y;
        }
    }

    pub fn merge(&mut self, other: &Bounds) {
        self.add_point(other.xmin, other.ymin);
        self.add_point(other.xmax, other.ymax);
    }
}

/// Diagnostic totals carried alongside the decoded arrays. Propagated to the
/// topology builder for reporting, not consulted for correctness.
#[derive(Debug, Clone, Serialize)]
pub struct Info {
    pub input_point_count: usize,
    pub input_part_count: usize,
    pub input_shape_count: usize,
    pub input_geometry_type: ShapeType,
}

/// Flat decode output, ready for arc deduplication.
///
/// `xx`/`yy`/`part_ids` are positionally aligned, one entry per point;
/// `part_ids` carries the 0-based global part index a point belongs to and is
/// monotonically non-decreasing within a shape. `shape_ids` has one entry per
/// part, mapping part index to owning shape index. `max_part_flags` marks
/// each shape's dominant ring (greatest absolute area) and `hole_flags` marks
/// negative-area rings; both are `None` for polyline files.
#[derive(Debug, Clone)]
pub struct GeometryData {
    pub xx: Vec<f64>,
    pub yy: Vec<f64>,
    pub part_ids: Vec<u32>,
    pub shape_ids: Vec<u32>,
    pub max_part_flags: Option<Vec<bool>>,
    pub hole_flags: Option<Vec<bool>>,
    pub info: Info,
}
