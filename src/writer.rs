use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use geo_types::Point;
use shapefile::dbase::{FieldValue, Record, TableWriterBuilder};
use shapefile::Writer;

use crate::errors::{PointShpError, Result};
use crate::field::AttributeDefn;

/// WKT written to the `.prj` sidecar: WGS 84 geographic coordinates in degrees.
const WGS84_PRJ: &str = "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",\
                         SPHEROID[\"WGS_1984\",6378137,298.257223563]],\
                         PRIMEM[\"Greenwich\",0],\
                         UNIT[\"Degree\",0.017453292519943295]]";

/// Writer for a point shapefile with double-typed attribute columns.
///
/// The lifecycle is linear: [`create`](Self::create), any number of
/// [`write_point`](Self::write_point) calls, then [`close`](Self::close).
/// All binary encoding of the `.shp`, `.shx` and `.dbf` files is delegated
/// to the [`shapefile`] crate; this type only writes the `.prj` sidecar and
/// maps attribute slices onto DBF records.
///
/// ```no_run
/// use pointshp::PointShapefileWriter;
///
/// let mut writer = PointShapefileWriter::create("stations", &["elev", "temp"]).unwrap();
/// writer.write_point(0.85521, -2.13752, &[113.0, 21.5]).unwrap();
/// writer.close().unwrap();
/// ```
pub struct PointShapefileWriter {
    inner: Writer<BufWriter<File>>,
    path_base: PathBuf,
    field_names: Vec<String>,
    record_count: usize,
}

impl PointShapefileWriter {
    /// Creates the `.shp`, `.shx`, `.dbf` and `.prj` files for a point
    /// shapefile with one numeric column per attribute name, using the
    /// default column width and precision.
    ///
    /// `path_base` is the destination path without any extension; the four
    /// extensions are appended to it. Files left over from an earlier run
    /// are removed first.
    pub fn create<P: AsRef<Path>>(
        path_base: P,
        attribute_names: &[&str],
    ) -> Result<PointShapefileWriter> {
        let fields: Vec<AttributeDefn> = attribute_names
            .iter()
            .map(|name| AttributeDefn::new(name))
            .collect();
        Self::create_with_fields(path_base, &fields)
    }

    /// Like [`create`](Self::create), but with explicit column definitions.
    pub fn create_with_fields<P: AsRef<Path>>(
        path_base: P,
        fields: &[AttributeDefn],
    ) -> Result<PointShapefileWriter> {
        let path_base = path_base.as_ref().to_path_buf();

        // Names are checked after truncation; distinct inputs can collide.
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|other| other.name() == field.name()) {
                return Err(PointShpError::DuplicateFieldName {
                    name: field.name().to_string(),
                });
            }
        }

        for ext in ["shp", "shx", "dbf", "prj"] {
            remove_if_present(&sibling_path(&path_base, ext))?;
        }

        let mut table_builder = TableWriterBuilder::new();
        for field in fields {
            table_builder = field.add_to_table(table_builder)?;
        }
        let inner = Writer::from_path(sibling_path(&path_base, "shp"), table_builder)?;

        fs::write(sibling_path(&path_base, "prj"), WGS84_PRJ)?;

        Ok(PointShapefileWriter {
            inner,
            path_base,
            field_names: fields.iter().map(|f| f.name().to_string()).collect(),
            record_count: 0,
        })
    }

    /// Appends one point record. `lat` and `lon` are in radians and are
    /// converted to degrees before being written.
    ///
    /// `attributes` must hold one value per column, in creation order.
    pub fn write_point(&mut self, lat: f64, lon: f64, attributes: &[f64]) -> Result<()> {
        self.write_point_degrees(Point::new(lon.to_degrees(), lat.to_degrees()), attributes)
    }

    /// Appends one point record already expressed in degrees
    /// (`x` = longitude, `y` = latitude).
    pub fn write_point_degrees(&mut self, point: Point<f64>, attributes: &[f64]) -> Result<()> {
        if attributes.len() != self.field_names.len() {
            return Err(PointShpError::AttributeCountMismatch {
                expected: self.field_names.len(),
                got: attributes.len(),
            });
        }

        let mut record = Record::default();
        for (name, value) in self.field_names.iter().zip(attributes) {
            record.insert(name.clone(), FieldValue::Numeric(Some(*value)));
        }

        let shape = shapefile::Point::new(point.x(), point.y());
        self.inner.write_shape_and_record(&shape, &record)?;
        self.record_count += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Column names of the attribute table, in creation order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// The destination path, without extension.
    pub fn path_base(&self) -> &Path {
        &self.path_base
    }

    /// Finalizes the file headers and closes all files.
    ///
    /// The underlying writer finalizes when dropped; `close` makes the end
    /// of the lifecycle explicit and consumes the writer, so no record can
    /// be appended to a closed shapefile.
    pub fn close(self) -> Result<()> {
        drop(self.inner);
        Ok(())
    }
}

/// Appends `.ext` to `base` without replacing an existing extension, so a
/// base of `a.b` yields `a.b.shp` rather than `a.shp`.
pub(crate) fn sibling_path(base: &Path, ext: &str) -> PathBuf {
    let mut os = base.as_os_str().to_os_string();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other.map_err(Into::into),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TempFixture;

    #[test]
    fn test_create_writes_all_four_files() {
        let fixture = TempFixture::empty("points");
        let writer = PointShapefileWriter::create(&fixture, &["elev"]).unwrap();
        writer.close().unwrap();

        for ext in ["shp", "shx", "dbf", "prj"] {
            let path = sibling_path(fixture.path(), ext);
            assert!(path.exists(), "missing {}", path.display());
        }
    }

    #[test]
    fn test_prj_contains_wgs84_wkt() {
        let fixture = TempFixture::empty("points");
        PointShapefileWriter::create(&fixture, &[])
            .unwrap()
            .close()
            .unwrap();

        let prj = fs::read_to_string(sibling_path(fixture.path(), "prj")).unwrap();
        assert_eq!(
            prj,
            "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",SPHEROID[\"WGS_1984\",\
             6378137,298.257223563]],PRIMEM[\"Greenwich\",0],\
             UNIT[\"Degree\",0.017453292519943295]]"
        );
    }

    #[test]
    fn test_field_names_are_truncated() {
        let fixture = TempFixture::empty("points");
        let writer =
            PointShapefileWriter::create(&fixture, &["ground_elevation", "temp"]).unwrap();
        assert_eq!(writer.field_names(), &["ground_elev", "temp"]);
    }

    #[test]
    fn test_duplicate_field_names_rejected() {
        let fixture = TempFixture::empty("points");
        // Distinct inputs that collide after truncation to eleven bytes.
        let err = PointShapefileWriter::create(&fixture, &["temperature_c", "temperature_f"])
            .err()
            .expect("expected duplicate-name error");
        assert!(matches!(
            err,
            PointShpError::DuplicateFieldName { name } if name == "temperature"
        ));
    }

    #[test]
    fn test_attribute_count_mismatch() {
        let fixture = TempFixture::empty("points");
        let mut writer = PointShapefileWriter::create(&fixture, &["elev", "temp"]).unwrap();

        let err = writer.write_point(0.1, 0.2, &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            PointShpError::AttributeCountMismatch {
                expected: 2,
                got: 1
            }
        ));
        assert_eq!(writer.record_count(), 0);

        writer.write_point(0.1, 0.2, &[1.0, 2.0]).unwrap();
        assert_eq!(writer.record_count(), 1);
        writer.close().unwrap();
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let fixture = TempFixture::empty("no_such_dir/points");
        assert!(PointShapefileWriter::create(&fixture, &["elev"]).is_err());
    }

    #[test]
    fn test_sibling_path_appends_extension() {
        assert_eq!(
            sibling_path(Path::new("out/run.1"), "shp"),
            Path::new("out/run.1.shp")
        );
        assert_eq!(
            sibling_path(Path::new("points"), "dbf"),
            Path::new("points.dbf")
        );
    }
}
