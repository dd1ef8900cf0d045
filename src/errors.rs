use thiserror::Error;

pub type Result<T> = std::result::Result<T, PointShpError>;

/// Error diagnostics from writing a point shapefile.
#[derive(Debug, Error)]
pub enum PointShpError {
    /// The underlying shapefile library reported an error while encoding
    /// the `.shp`, `.shx` or `.dbf` file.
    #[error("shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The underlying library rejected a DBF field name.
    #[error("invalid DBF field name '{name}'")]
    InvalidFieldName { name: String },
    /// Two attribute columns share the same name after truncation to the
    /// eleven-byte DBF limit.
    #[error("duplicate DBF field name '{name}'")]
    DuplicateFieldName { name: String },
    /// A record was appended with the wrong number of attribute values.
    #[error("expected {expected} attribute values, got {got}")]
    AttributeCountMismatch { expected: usize, got: usize },
}
