//! Scalar, vector and matrix types.
//!
//! These are the only types that resolve from a bare name without a
//! declaration; the name tables below are the single source of truth for
//! that resolution.

use core::fmt;

/// Scalar element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarType {
    Void,
    Bool,
    Int,
    UInt,
    Long,
    ULong,
    Half,
    Float,
    Double,
}

impl ScalarType {
    /// Scalars resolvable by name. `void` is resolved separately, after
    /// vectors and matrices.
    pub const TABLE: [ScalarType; 8] = [
        ScalarType::Bool,
        ScalarType::Int,
        ScalarType::UInt,
        ScalarType::Long,
        ScalarType::ULong,
        ScalarType::Half,
        ScalarType::Float,
        ScalarType::Double,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Void => "void",
            ScalarType::Bool => "bool",
            ScalarType::Int => "int",
            ScalarType::UInt => "uint",
            ScalarType::Long => "long",
            ScalarType::ULong => "ulong",
            ScalarType::Half => "half",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
        }
    }

    /// Look up a scalar in [`ScalarType::TABLE`] by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::TABLE.iter().copied().find(|s| s.name() == name)
    }

    /// Int, uint, long, ulong, half, float or double.
    pub fn is_numeric(self) -> bool {
        !matches!(self, ScalarType::Void | ScalarType::Bool)
    }

    pub fn is_float(self) -> bool {
        matches!(self, ScalarType::Half | ScalarType::Float | ScalarType::Double)
    }

    pub fn is_unsigned(self) -> bool {
        matches!(self, ScalarType::UInt | ScalarType::ULong)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Component counts for vectors and matrix dimensions.
const SIZES: [u32; 3] = [2, 3, 4];

/// Element types that can form vectors.
const VECTOR_BASES: [ScalarType; 8] = ScalarType::TABLE;

/// Element types that can form matrices.
const MATRIX_BASES: [ScalarType; 3] = [ScalarType::Half, ScalarType::Float, ScalarType::Double];

/// A vector of 2 to 4 scalars, named `<base><size>` (`float4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VectorType {
    pub base: ScalarType,
    pub size: u32,
}

impl VectorType {
    pub fn new(base: ScalarType, size: u32) -> Self {
        Self { base, size }
    }

    /// Every nameable vector type.
    pub fn table() -> impl Iterator<Item = VectorType> {
        VECTOR_BASES
            .into_iter()
            .flat_map(|base| SIZES.into_iter().map(move |size| VectorType::new(base, size)))
    }

    pub fn from_name(name: &str) -> Option<Self> {
        VECTOR_BASES.into_iter().find_map(|base| {
            let rest = name.strip_prefix(base.name())?;
            let size = single_size(rest)?;
            Some(VectorType::new(base, size))
        })
    }
}

impl fmt::Display for VectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.size)
    }
}

/// A matrix named `<base><rows>x<columns>` (`float4x4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatrixType {
    pub base: ScalarType,
    pub rows: u32,
    pub columns: u32,
}

impl MatrixType {
    pub fn new(base: ScalarType, rows: u32, columns: u32) -> Self {
        Self {
            base,
            rows,
            columns,
        }
    }

    /// Every nameable matrix type.
    pub fn table() -> impl Iterator<Item = MatrixType> {
        MATRIX_BASES.into_iter().flat_map(|base| {
            SIZES.into_iter().flat_map(move |rows| {
                SIZES
                    .into_iter()
                    .map(move |columns| MatrixType::new(base, rows, columns))
            })
        })
    }

    pub fn from_name(name: &str) -> Option<Self> {
        MATRIX_BASES.into_iter().find_map(|base| {
            let rest = name.strip_prefix(base.name())?;
            let (rows, columns) = rest.split_once('x')?;
            Some(MatrixType::new(
                base,
                single_size(rows)?,
                single_size(columns)?,
            ))
        })
    }

    /// The column vector type: `rows` components of the base scalar.
    pub fn column(&self) -> VectorType {
        VectorType::new(self.base, self.rows)
    }
}

impl fmt::Display for MatrixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}x{}", self.base, self.rows, self.columns)
    }
}

/// Parse exactly one digit in 2..=4, so names stay canonical.
fn single_size(text: &str) -> Option<u32> {
    let mut chars = text.chars();
    let size = chars.next()?.to_digit(10)?;
    if chars.next().is_some() || !SIZES.contains(&size) {
        return None;
    }
    Some(size)
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;

    #[test]
    fn test_scalar_names() {
        assert_eq!(ScalarType::from_name("uint"), Some(ScalarType::UInt));
        assert_eq!(ScalarType::from_name("void"), None);
        assert_eq!(ScalarType::from_name("Float"), None);
    }

    #[test]
    fn test_vector_names() {
        assert_eq!(
            VectorType::from_name("float4"),
            Some(VectorType::new(ScalarType::Float, 4))
        );
        assert_eq!(
            VectorType::from_name("uint2"),
            Some(VectorType::new(ScalarType::UInt, 2))
        );
        assert_eq!(VectorType::from_name("float1"), None);
        assert_eq!(VectorType::from_name("float5"), None);
        assert_eq!(VectorType::from_name("float04"), None);
        assert_eq!(VectorType::from_name("float4x4"), None);
    }

    #[test]
    fn test_matrix_names() {
        assert_eq!(
            MatrixType::from_name("float4x3"),
            Some(MatrixType::new(ScalarType::Float, 4, 3))
        );
        assert_eq!(MatrixType::from_name("int2x2"), None);
        assert_eq!(MatrixType::from_name("float4x"), None);
    }

    #[test]
    fn test_tables_have_unique_names() {
        let mut names: Vec<_> = VectorType::table()
            .map(|v| v.to_string())
            .chain(MatrixType::table().map(|m| m.to_string()))
            .collect();
        let count = names.len();
        assert_eq!(count, 8 * 3 + 3 * 9);
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }
}
