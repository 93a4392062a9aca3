//! Type system definitions.
//!
//! CACT types are a basic element kind plus an ordered list of array
//! dimensions. An empty dimension list is a scalar. Types are compared by
//! exact identity: there are no implicit conversions anywhere in the
//! language, so assignment, return and argument passing all require
//! `Type` equality after indexing has stripped leading dimensions.

use std::fmt::Display;

/// Element kind of a value or array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    Int32,
    Bool,
    Float,
    Double,
    Void,
}

impl BasicType {
    pub fn name(&self) -> &'static str {
        match self {
            BasicType::Int32 => "int32",
            BasicType::Bool => "bool",
            BasicType::Float => "float",
            BasicType::Double => "double",
            BasicType::Void => "void",
        }
    }

    /// Int32, float and double take part in arithmetic; bool and void do not.
    pub fn is_numeric(&self) -> bool {
        matches!(self, BasicType::Int32 | BasicType::Float | BasicType::Double)
    }
}

impl Display for BasicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A resolved type: element kind plus array shape.
///
/// Dimensions are always positive, except that a function parameter may
/// carry a leading `0` for an unsized outer dimension (`int32 a[][3]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    pub basic_type: BasicType,
    pub array_dims: Vec<u32>,
}

impl Type {
    pub fn scalar(basic_type: BasicType) -> Self {
        Type {
            basic_type,
            array_dims: vec![],
        }
    }

    pub fn array(basic_type: BasicType, array_dims: Vec<u32>) -> Self {
        Type {
            basic_type,
            array_dims,
        }
    }

    pub fn add_dim(&mut self, dim: u32) {
        self.array_dims.push(dim);
    }

    pub fn equals(&self, other: &Type) -> bool {
        self == other
    }

    pub fn is_array(&self) -> bool {
        !self.array_dims.is_empty()
    }

    /// Number of array dimensions; zero for scalars.
    pub fn dim(&self) -> usize {
        self.array_dims.len()
    }

    /// Operands of unary and binary operators are non-void scalars.
    pub fn is_valid_operand(&self) -> bool {
        !self.is_array() && self.basic_type != BasicType::Void
    }

    pub fn is_valid_array_index(&self) -> bool {
        !self.is_array() && self.basic_type == BasicType::Int32
    }

    /// Whether a value of type `argument` may be passed for a parameter of
    /// this type.
    ///
    /// Types must match exactly, except that an unsized outer dimension
    /// (`int32 a[]`) accepts any outer extent.
    pub fn accepts_argument(&self, argument: &Type) -> bool {
        if self == argument {
            return true;
        }

        self.array_dims.first() == Some(&0)
            && self.basic_type == argument.basic_type
            && self.dim() == argument.dim()
            && self.array_dims[1..] == argument.array_dims[1..]
    }

    /// The type left after applying `count` index operations.
    ///
    /// Callers check `count <= self.dim()` first.
    pub fn indexed(&self, count: usize) -> Type {
        Type {
            basic_type: self.basic_type,
            array_dims: self.array_dims[count.min(self.dim())..].to_vec(),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.basic_type)?;
        for dim in self.array_dims.iter() {
            if *dim == 0 {
                write!(f, "[]")?;
            } else {
                write!(f, "[{}]", dim)?;
            }
        }
        Ok(())
    }
}
