use shapefile::dbase::{FieldName, TableWriterBuilder};

use crate::errors::{PointShpError, Result};

/// Maximum length of a DBF field name, in bytes. Longer names are truncated.
pub const MAX_FIELD_NAME_LEN: usize = 11;

/// Default total width of a numeric column, in characters.
pub const DEFAULT_WIDTH: u8 = 12;

/// Default number of digits after the decimal point in a numeric column.
pub const DEFAULT_PRECISION: u8 = 6;

/// Definition of one numeric (double) attribute column in the DBF table.
///
/// The DBF header stores at most eleven bytes per field name, so names are
/// truncated on construction.
///
/// ```
/// use pointshp::AttributeDefn;
///
/// let defn = AttributeDefn::new("ground_elevation");
/// assert_eq!(defn.name(), "ground_elev");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefn {
    name: String,
    width: u8,
    precision: u8,
}

impl AttributeDefn {
    /// Creates a column definition with the default width and precision.
    pub fn new(name: &str) -> AttributeDefn {
        AttributeDefn {
            name: truncate_field_name(name),
            width: DEFAULT_WIDTH,
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn set_width(&mut self, width: u8) {
        self.width = width;
    }

    pub fn set_precision(&mut self, precision: u8) {
        self.precision = precision;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Registers this column with the underlying table builder.
    pub(crate) fn add_to_table(&self, builder: TableWriterBuilder) -> Result<TableWriterBuilder> {
        let field_name = FieldName::try_from(self.name.as_str()).map_err(|_| {
            PointShpError::InvalidFieldName {
                name: self.name.clone(),
            }
        })?;
        Ok(builder.add_numeric_field(field_name, self.width, self.precision))
    }
}

fn truncate_field_name(name: &str) -> String {
    if name.len() <= MAX_FIELD_NAME_LEN {
        return name.to_string();
    }
    // Back off to a char boundary so multi-byte names stay valid UTF-8.
    let mut end = MAX_FIELD_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}
