// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The type arena and coercion rules.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::coercion::CoercionCost;

/// A handle to a type in a [`TypeTable`].
///
/// Types are never removed, so handles stay valid for the table's lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    /// Returns the raw arena index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Structural category of a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Fixed-size array of a single element type.
    Array,
    /// Placeholder standing for a fixed list of concrete types.
    Generic,
    /// Column-major matrix of a scalar component.
    Matrix,
    /// Opaque non-data type (externally defined).
    Other,
    /// Texture sampler.
    Sampler,
    /// Scalar number or boolean.
    Scalar,
    /// Nominal aggregate with named fields.
    Struct,
    /// Column vector of a scalar component.
    Vector,
    /// The unit type of statements.
    Void,
}

/// Value category of a scalar type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Floating point.
    Float,
    /// Signed integer.
    Signed,
    /// Unsigned integer.
    Unsigned,
    /// Boolean.
    Boolean,
}

/// A named struct member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    /// Member name.
    pub name: String,
    /// Member type.
    pub ty: TypeId,
}

#[derive(Clone, Debug)]
enum TypeData {
    None,
    Alias {
        target: TypeId,
    },
    Scalar {
        scalar: ScalarKind,
        priority: u8,
        bit_width: u8,
        literal: bool,
    },
    Vector {
        component: TypeId,
        columns: u8,
    },
    Matrix {
        component: TypeId,
        columns: u8,
        rows: u8,
    },
    Array {
        element: TypeId,
        size: u32,
    },
    Struct {
        fields: Vec<Field>,
    },
    Generic {
        coercible: Vec<TypeId>,
    },
}

#[derive(Clone, Debug)]
struct TypeEntry {
    name: String,
    abbrev: String,
    kind: TypeKind,
    data: TypeData,
}

/// Arena holding every type of a compilation.
///
/// Names are unique; equivalence ([`matches`](Self::matches)) compares the
/// names of alias-resolved types, so an alias and its target are the same
/// type for coercion purposes. Each type carries an abbreviated name used
/// for symbol mangling; for scalars, vectors, and matrices the abbreviation
/// is at most 3 characters.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    entries: Vec<TypeEntry>,
}

impl TypeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Registration --

    /// Registers the void type.
    pub fn add_void(&mut self, name: &str, abbrev: &str) -> TypeId {
        self.intern(name, abbrev, TypeKind::Void, TypeData::None, true)
    }

    /// Registers an opaque non-data type.
    pub fn add_other(&mut self, name: &str, abbrev: &str) -> TypeId {
        self.intern(name, abbrev, TypeKind::Other, TypeData::None, true)
    }

    /// Registers a sampler type.
    pub fn add_sampler(&mut self, name: &str, abbrev: &str) -> TypeId {
        self.intern(name, abbrev, TypeKind::Sampler, TypeData::None, true)
    }

    /// Registers a scalar type.
    ///
    /// `priority` is the conversion rank: coercing to a higher-priority
    /// scalar of the same kind is a normal conversion, to a lower-priority
    /// one a narrowing conversion.
    pub fn add_scalar(
        &mut self,
        name: &str,
        abbrev: &str,
        scalar: ScalarKind,
        priority: u8,
        bit_width: u8,
    ) -> TypeId {
        self.intern(
            name,
            abbrev,
            TypeKind::Scalar,
            TypeData::Scalar {
                scalar,
                priority,
                bit_width,
                literal: false,
            },
            true,
        )
    }

    /// Registers a literal scalar type: the compile-time type of numeric
    /// literals. Integer literals coerce to any numeric type for free.
    pub fn add_literal(
        &mut self,
        name: &str,
        abbrev: &str,
        scalar: ScalarKind,
        priority: u8,
        bit_width: u8,
    ) -> TypeId {
        self.intern(
            name,
            abbrev,
            TypeKind::Scalar,
            TypeData::Scalar {
                scalar,
                priority,
                bit_width,
                literal: true,
            },
            true,
        )
    }

    /// Registers a column vector over a scalar component.
    ///
    /// The abbreviation is derived from the component's: `float2` over
    /// `f` becomes `f2`.
    ///
    /// # Panics
    ///
    /// Panics if `component` is not a scalar or `columns` is outside 2..=4.
    pub fn add_vector(&mut self, name: &str, component: TypeId, columns: u8) -> TypeId {
        assert!(
            self.kind(component) == TypeKind::Scalar,
            "vector component must be a scalar"
        );
        assert!((2..=4).contains(&columns), "vector arity must be 2..=4");
        let abbrev = format!("{}{columns}", self.abbrev(component));
        self.intern(
            name,
            &abbrev,
            TypeKind::Vector,
            TypeData::Vector { component, columns },
            true,
        )
    }

    /// Registers a column-major matrix from a column vector type.
    ///
    /// The component is the column's scalar; the row count is the column's
    /// arity. `float2x2` over column `f2` abbreviates to `f22`.
    ///
    /// # Panics
    ///
    /// Panics if `column` is not a vector or `columns` is outside 2..=4.
    pub fn add_matrix(&mut self, name: &str, column: TypeId, columns: u8) -> TypeId {
        assert!(
            self.kind(column) == TypeKind::Vector,
            "matrix column must be a vector"
        );
        assert!((2..=4).contains(&columns), "matrix arity must be 2..=4");
        let (component, rows) = match self.entries[column.0 as usize].data {
            TypeData::Vector { component, columns } => (component, columns),
            _ => unreachable!(),
        };
        let abbrev = format!("{}{columns}{rows}", self.abbrev(component));
        self.intern(
            name,
            &abbrev,
            TypeKind::Matrix,
            TypeData::Matrix {
                component,
                columns,
                rows,
            },
            true,
        )
    }

    /// Registers a fixed-size array; name and abbreviation derive from the
    /// element's (`float[4]`, `f[4]`).
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn add_array(&mut self, element: TypeId, size: u32) -> TypeId {
        assert!(size != 0, "array type needs at least one element");
        let name = format!("{}[{size}]", self.name(element));
        let abbrev = format!("{}[{size}]", self.abbrev(element));
        self.intern(
            &name,
            &abbrev,
            TypeKind::Array,
            TypeData::Array { element, size },
            false,
        )
    }

    /// Registers a nominal struct type.
    pub fn add_struct(&mut self, name: &str, fields: Vec<Field>) -> TypeId {
        self.intern(name, name, TypeKind::Struct, TypeData::Struct { fields }, false)
    }

    /// Registers a generic placeholder over an ordered list of concrete
    /// types it can stand for.
    pub fn add_generic(&mut self, name: &str, coercible: &[TypeId]) -> TypeId {
        self.intern(
            name,
            name,
            TypeKind::Generic,
            TypeData::Generic {
                coercible: coercible.to_vec(),
            },
            false,
        )
    }

    /// Registers an alias: a second name for `target`, equal to it under
    /// [`matches`](Self::matches).
    ///
    /// # Panics
    ///
    /// Panics if `target` is itself an alias; aliases resolve in one step.
    pub fn add_alias(&mut self, name: &str, target: TypeId) -> TypeId {
        assert!(
            !matches!(self.entries[target.0 as usize].data, TypeData::Alias { .. }),
            "alias target must be a resolved type"
        );
        let abbrev = self.abbrev(target).to_string();
        self.intern(name, &abbrev, self.kind(target), TypeData::Alias { target }, false)
    }

    // -- Accessors --

    /// Display name.
    #[must_use]
    pub fn name(&self, ty: TypeId) -> &str {
        &self.entries[ty.0 as usize].name
    }

    /// Abbreviated name used for symbol mangling.
    #[must_use]
    pub fn abbrev(&self, ty: TypeId) -> &str {
        &self.entries[ty.0 as usize].abbrev
    }

    /// Structural kind. Aliases report their target's kind.
    #[must_use]
    pub fn kind(&self, ty: TypeId) -> TypeKind {
        self.entries[ty.0 as usize].kind
    }

    /// Follows an alias to its target; non-aliases resolve to themselves.
    #[must_use]
    pub fn resolve(&self, ty: TypeId) -> TypeId {
        match self.entries[ty.0 as usize].data {
            TypeData::Alias { target } => target,
            _ => ty,
        }
    }

    /// Whether two handles denote the same type after alias resolution.
    #[must_use]
    pub fn matches(&self, a: TypeId, b: TypeId) -> bool {
        self.name(self.resolve(a)) == self.name(self.resolve(b))
    }

    /// Scalar kind of a (resolved) scalar type.
    #[must_use]
    pub fn scalar_kind(&self, ty: TypeId) -> Option<ScalarKind> {
        match self.entries[self.resolve(ty).0 as usize].data {
            TypeData::Scalar { scalar, .. } => Some(scalar),
            _ => None,
        }
    }

    /// Conversion rank of a scalar type.
    ///
    /// # Panics
    ///
    /// Panics if the type is not a scalar.
    #[must_use]
    pub fn priority(&self, ty: TypeId) -> u8 {
        match self.entries[self.resolve(ty).0 as usize].data {
            TypeData::Scalar { priority, .. } => priority,
            _ => panic!("priority is defined for scalars only"),
        }
    }

    /// Bit width of a scalar type, or `None` otherwise.
    #[must_use]
    pub fn bit_width(&self, ty: TypeId) -> Option<u8> {
        match self.entries[self.resolve(ty).0 as usize].data {
            TypeData::Scalar { bit_width, .. } => Some(bit_width),
            _ => None,
        }
    }

    /// Whether the type is a literal scalar type.
    #[must_use]
    pub fn is_literal(&self, ty: TypeId) -> bool {
        matches!(
            self.entries[self.resolve(ty).0 as usize].data,
            TypeData::Scalar { literal: true, .. }
        )
    }

    /// Whether the type is a numeric scalar (float or integer, not bool).
    #[must_use]
    pub fn is_numeric(&self, ty: TypeId) -> bool {
        matches!(
            self.scalar_kind(ty),
            Some(ScalarKind::Float | ScalarKind::Signed | ScalarKind::Unsigned)
        )
    }

    /// Whether the type is an integer scalar.
    #[must_use]
    pub fn is_integer(&self, ty: TypeId) -> bool {
        matches!(
            self.scalar_kind(ty),
            Some(ScalarKind::Signed | ScalarKind::Unsigned)
        )
    }

    /// Component scalar of a vector or matrix.
    #[must_use]
    pub fn component(&self, ty: TypeId) -> Option<TypeId> {
        match self.entries[self.resolve(ty).0 as usize].data {
            TypeData::Vector { component, .. } | TypeData::Matrix { component, .. } => {
                Some(component)
            }
            _ => None,
        }
    }

    /// Column count of a vector or matrix.
    #[must_use]
    pub fn columns(&self, ty: TypeId) -> Option<u8> {
        match self.entries[self.resolve(ty).0 as usize].data {
            TypeData::Vector { columns, .. } | TypeData::Matrix { columns, .. } => Some(columns),
            _ => None,
        }
    }

    /// Row count of a matrix.
    #[must_use]
    pub fn rows(&self, ty: TypeId) -> Option<u8> {
        match self.entries[self.resolve(ty).0 as usize].data {
            TypeData::Matrix { rows, .. } => Some(rows),
            _ => None,
        }
    }

    /// Element type and size of an array.
    #[must_use]
    pub fn array(&self, ty: TypeId) -> Option<(TypeId, u32)> {
        match self.entries[self.resolve(ty).0 as usize].data {
            TypeData::Array { element, size } => Some((element, size)),
            _ => None,
        }
    }

    /// Fields of a struct type.
    #[must_use]
    pub fn fields(&self, ty: TypeId) -> Option<&[Field]> {
        match &self.entries[self.resolve(ty).0 as usize].data {
            TypeData::Struct { fields } => Some(fields),
            _ => None,
        }
    }

    /// Concrete types a generic placeholder can stand for.
    #[must_use]
    pub fn coercible_types(&self, ty: TypeId) -> Option<&[TypeId]> {
        match &self.entries[self.resolve(ty).0 as usize].data {
            TypeData::Generic { coercible } => Some(coercible),
            _ => None,
        }
    }

    // -- Coercion --

    /// Cost of converting a value of type `from` to type `to`.
    ///
    /// Precedence, first match wins:
    /// 1. the types match: free;
    /// 2. both are vectors, matrices, or arrays of the same kind: free or
    ///    the component cost when the shapes match exactly, impossible
    ///    otherwise;
    /// 3. both are numeric scalars: free for integer literals, impossible
    ///    across scalar kinds, otherwise normal/narrowing by priority
    ///    difference;
    /// 4. `from` is a generic placeholder: `normal(position + 1)` of `to`
    ///    in its coercible list;
    /// 5. impossible.
    #[must_use]
    pub fn coercion_cost(&self, from: TypeId, to: TypeId) -> CoercionCost {
        if self.matches(from, to) {
            return CoercionCost::free();
        }
        let from = self.resolve(from);
        let to = self.resolve(to);

        if self.kind(from) == self.kind(to) {
            match (
                &self.entries[from.0 as usize].data,
                &self.entries[to.0 as usize].data,
            ) {
                (
                    &TypeData::Vector {
                        component: fc,
                        columns: fcols,
                    },
                    &TypeData::Vector {
                        component: tc,
                        columns: tcols,
                    },
                ) => {
                    if fcols != tcols {
                        return CoercionCost::impossible();
                    }
                    return self.coercion_cost(fc, tc);
                }
                (
                    &TypeData::Matrix {
                        component: fc,
                        columns: fcols,
                        rows: frows,
                    },
                    &TypeData::Matrix {
                        component: tc,
                        columns: tcols,
                        rows: trows,
                    },
                ) => {
                    if frows != trows || fcols != tcols {
                        return CoercionCost::impossible();
                    }
                    return self.coercion_cost(fc, tc);
                }
                (
                    &TypeData::Array {
                        element: fe,
                        size: fs,
                    },
                    &TypeData::Array {
                        element: te,
                        size: ts,
                    },
                ) => {
                    if fs != ts {
                        return CoercionCost::impossible();
                    }
                    return self.coercion_cost(fe, te);
                }
                _ => {}
            }
        }

        if self.is_numeric(from) && self.is_numeric(to) {
            if self.is_literal(from) && self.is_integer(from) {
                return CoercionCost::free();
            }
            if self.scalar_kind(from) != self.scalar_kind(to) {
                return CoercionCost::impossible();
            }
            let from_priority = self.priority(from);
            let to_priority = self.priority(to);
            if to_priority >= from_priority {
                return CoercionCost::normal(u32::from(to_priority - from_priority));
            }
            return CoercionCost::narrowing(u32::from(from_priority - to_priority));
        }

        if self.kind(from) == TypeKind::Generic {
            if let Some(coercible) = self.coercible_types(from) {
                for (position, &candidate) in coercible.iter().enumerate() {
                    if self.matches(candidate, to) {
                        #[expect(
                            clippy::cast_possible_truncation,
                            reason = "coercible lists are tiny"
                        )]
                        let cost = position as u32 + 1;
                        return CoercionCost::normal(cost);
                    }
                }
            }
        }

        CoercionCost::impossible()
    }

    /// Whether a value of type `from` can convert to `to`.
    #[must_use]
    pub fn can_coerce(&self, from: TypeId, to: TypeId, allow_narrowing: bool) -> bool {
        self.coercion_cost(from, to).is_possible(allow_narrowing)
    }

    // -- Internal --

    fn intern(
        &mut self,
        name: &str,
        abbrev: &str,
        kind: TypeKind,
        data: TypeData,
        short_abbrev: bool,
    ) -> TypeId {
        assert!(
            !short_abbrev || abbrev.len() <= 3,
            "abbreviated name exceeds the 3-character mangling limit"
        );
        assert!(
            !self.entries.iter().any(|e| e.name == name),
            "duplicate type name"
        );
        #[expect(
            clippy::cast_possible_truncation,
            reason = "type counts are tiny compared to u32"
        )]
        let id = TypeId(self.entries.len() as u32);
        self.entries.push(TypeEntry {
            name: name.to_string(),
            abbrev: abbrev.to_string(),
            kind,
            data,
        });
        id
    }
}
