//! High-level writing of point shapefiles.
//!
//! A small convenience layer over the [`shapefile`] crate for the common task
//! of dumping 2D point records with double-typed attributes. All binary
//! encoding of the [shapefile format](https://en.wikipedia.org/wiki/Shapefile)
//! is delegated to the underlying library; this crate adds the `.prj` sidecar
//! (WGS 84), the DBF column setup, and a linear create → write → close API.
//!
//! ## Use
//!
//! ```no_run
//! use pointshp::PointShapefileWriter;
//!
//! // Pass the destination path without an extension; .shp, .shx, .dbf and
//! // .prj are created next to each other.
//! let mut writer = PointShapefileWriter::create("stations", &["elev", "temp"]).unwrap();
//! // Latitude and longitude in radians; stored in degrees.
//! writer.write_point(0.85521, -2.13752, &[113.0, 21.5]).unwrap();
//! writer.close().unwrap();
//! ```

pub mod errors;
mod field;
mod writer;

pub use crate::field::{AttributeDefn, DEFAULT_PRECISION, DEFAULT_WIDTH, MAX_FIELD_NAME_LEN};
pub use crate::writer::PointShapefileWriter;

pub mod test_utils;

/// Assert numerical difference between two expressions is less than
/// 64-bit machine epsilon or a specified epsilon.
///
/// # Examples:
/// ```rust, no_run
/// use pointshp::assert_near;
/// use std::f64::consts::{PI, E};
/// assert_near!(PI / E, 1.1557273497909217);
/// // with specified epsilon
/// assert_near!(PI / E, 1.15572734, epsilon = 1e-8);
/// ```
#[macro_export]
macro_rules! assert_near {
    ($left:expr, $right:expr) => {
        assert_near!($left, $right, epsilon = f64::EPSILON)
    };
    ($left:expr, $right:expr, epsilon = $ep:expr) => {
        assert!(
            ($left - $right).abs() < $ep,
            "|{} - {}| = {} is greater than epsilon {:.4e}",
            $left,
            $right,
            ($left - $right).abs(),
            $ep
        )
    };
}
