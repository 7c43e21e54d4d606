// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The standard module: builtin scalar, vector, matrix, alias, literal, and
//! generic types.

use crate::types::{ScalarKind, TypeId, TypeTable};

/// Handles to the builtin types of the standard module.
///
/// Scalar conversion ranks order the numeric scalars as
/// `float > half > uint > int > ushort > short > bool`, so mixed
/// arithmetic widens toward `float`.
#[derive(Clone, Copy, Debug)]
pub struct BuiltinTypes {
    /// The unit type.
    pub void: TypeId,

    /// Boolean scalar.
    pub bool_: TypeId,
    /// 2-component boolean vector.
    pub bool2: TypeId,
    /// 3-component boolean vector.
    pub bool3: TypeId,
    /// 4-component boolean vector.
    pub bool4: TypeId,

    /// 16-bit signed integer scalar.
    pub short: TypeId,
    /// 2-component short vector.
    pub short2: TypeId,
    /// 3-component short vector.
    pub short3: TypeId,
    /// 4-component short vector.
    pub short4: TypeId,

    /// 16-bit unsigned integer scalar.
    pub ushort: TypeId,
    /// 2-component ushort vector.
    pub ushort2: TypeId,
    /// 3-component ushort vector.
    pub ushort3: TypeId,
    /// 4-component ushort vector.
    pub ushort4: TypeId,

    /// 32-bit signed integer scalar.
    pub int: TypeId,
    /// 2-component int vector.
    pub int2: TypeId,
    /// 3-component int vector.
    pub int3: TypeId,
    /// 4-component int vector.
    pub int4: TypeId,

    /// 32-bit unsigned integer scalar.
    pub uint: TypeId,
    /// 2-component uint vector.
    pub uint2: TypeId,
    /// 3-component uint vector.
    pub uint3: TypeId,
    /// 4-component uint vector.
    pub uint4: TypeId,

    /// 16-bit float scalar.
    pub half: TypeId,
    /// 2-component half vector.
    pub half2: TypeId,
    /// 3-component half vector.
    pub half3: TypeId,
    /// 4-component half vector.
    pub half4: TypeId,

    /// 32-bit float scalar.
    pub float: TypeId,
    /// 2-component float vector.
    pub float2: TypeId,
    /// 3-component float vector.
    pub float3: TypeId,
    /// 4-component float vector.
    pub float4: TypeId,

    /// 2x2 float matrix.
    pub float2x2: TypeId,
    /// 3x3 float matrix.
    pub float3x3: TypeId,
    /// 4x4 float matrix.
    pub float4x4: TypeId,
    /// 2x2 half matrix.
    pub half2x2: TypeId,
    /// 3x3 half matrix.
    pub half3x3: TypeId,
    /// 4x4 half matrix.
    pub half4x4: TypeId,

    /// Compile-time type of integer literals; coerces to any numeric type
    /// for free.
    pub int_literal: TypeId,
    /// Compile-time type of float literals.
    pub float_literal: TypeId,

    /// Generic placeholder over `float..float4`.
    pub gen_f: TypeId,
    /// Generic placeholder over `int..int4`.
    pub gen_i: TypeId,
    /// Generic placeholder over `half..half4`.
    pub gen_h: TypeId,
}

impl BuiltinTypes {
    /// Registers the standard module into `table`.
    ///
    /// The table must not already contain types with builtin names.
    #[must_use]
    pub fn install(table: &mut TypeTable) -> Self {
        let void = table.add_void("void", "v");

        let bool_ = table.add_scalar("bool", "b", ScalarKind::Boolean, 0, 1);
        let bool2 = table.add_vector("bool2", bool_, 2);
        let bool3 = table.add_vector("bool3", bool_, 3);
        let bool4 = table.add_vector("bool4", bool_, 4);

        let short = table.add_scalar("short", "s", ScalarKind::Signed, 3, 16);
        let short2 = table.add_vector("short2", short, 2);
        let short3 = table.add_vector("short3", short, 3);
        let short4 = table.add_vector("short4", short, 4);

        let ushort = table.add_scalar("ushort", "S", ScalarKind::Unsigned, 4, 16);
        let ushort2 = table.add_vector("ushort2", ushort, 2);
        let ushort3 = table.add_vector("ushort3", ushort, 3);
        let ushort4 = table.add_vector("ushort4", ushort, 4);

        let int = table.add_scalar("int", "i", ScalarKind::Signed, 6, 32);
        let int2 = table.add_vector("int2", int, 2);
        let int3 = table.add_vector("int3", int, 3);
        let int4 = table.add_vector("int4", int, 4);

        let uint = table.add_scalar("uint", "I", ScalarKind::Unsigned, 7, 32);
        let uint2 = table.add_vector("uint2", uint, 2);
        let uint3 = table.add_vector("uint3", uint, 3);
        let uint4 = table.add_vector("uint4", uint, 4);

        let half = table.add_scalar("half", "h", ScalarKind::Float, 9, 16);
        let half2 = table.add_vector("half2", half, 2);
        let half3 = table.add_vector("half3", half, 3);
        let half4 = table.add_vector("half4", half, 4);

        let float = table.add_scalar("float", "f", ScalarKind::Float, 10, 32);
        let float2 = table.add_vector("float2", float, 2);
        let float3 = table.add_vector("float3", float, 3);
        let float4 = table.add_vector("float4", float, 4);

        let float2x2 = table.add_matrix("float2x2", float2, 2);
        let float3x3 = table.add_matrix("float3x3", float3, 3);
        let float4x4 = table.add_matrix("float4x4", float4, 4);
        let half2x2 = table.add_matrix("half2x2", half2, 2);
        let half3x3 = table.add_matrix("half3x3", half3, 3);
        let half4x4 = table.add_matrix("half4x4", half4, 4);

        // GLSL-style aliases.
        let _ = table.add_alias("vec2", float2);
        let _ = table.add_alias("vec3", float3);
        let _ = table.add_alias("vec4", float4);
        let _ = table.add_alias("ivec2", int2);
        let _ = table.add_alias("ivec3", int3);
        let _ = table.add_alias("ivec4", int4);
        let _ = table.add_alias("bvec2", bool2);
        let _ = table.add_alias("bvec3", bool3);
        let _ = table.add_alias("bvec4", bool4);
        let _ = table.add_alias("mat2", float2x2);
        let _ = table.add_alias("mat3", float3x3);
        let _ = table.add_alias("mat4", float4x4);

        // Literal types sit between the integer and float ranks so a float
        // literal widens to half or float with a small normal cost.
        let int_literal = table.add_literal("$intLiteral", "i", ScalarKind::Signed, 5, 32);
        let float_literal = table.add_literal("$floatLiteral", "f", ScalarKind::Float, 8, 32);

        let gen_f = table.add_generic("__genFType", &[float, float2, float3, float4]);
        let gen_i = table.add_generic("__genIType", &[int, int2, int3, int4]);
        let gen_h = table.add_generic("__genHType", &[half, half2, half3, half4]);

        Self {
            void,
            bool_,
            bool2,
            bool3,
            bool4,
            short,
            short2,
            short3,
            short4,
            ushort,
            ushort2,
            ushort3,
            ushort4,
            int,
            int2,
            int3,
            int4,
            uint,
            uint2,
            uint3,
            uint4,
            half,
            half2,
            half3,
            half4,
            float,
            float2,
            float3,
            float4,
            float2x2,
            float3x3,
            float4x4,
            half2x2,
            half3x3,
            half4x4,
            int_literal,
            float_literal,
            gen_f,
            gen_i,
            gen_h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercion::CoercionCost;

    fn standard() -> (TypeTable, BuiltinTypes) {
        let mut table = TypeTable::new();
        let types = BuiltinTypes::install(&mut table);
        (table, types)
    }

    #[test]
    fn identity_coercion_is_free() {
        let (table, t) = standard();
        assert_eq!(table.coercion_cost(t.float, t.float), CoercionCost::free());
        assert_eq!(
            table.coercion_cost(t.float3x3, t.float3x3),
            CoercionCost::free()
        );
    }

    #[test]
    fn widening_costs_the_priority_difference() {
        let (table, t) = standard();
        assert_eq!(
            table.coercion_cost(t.int, t.float),
            CoercionCost::impossible(),
            "signed to float crosses scalar kinds"
        );
        assert_eq!(
            table.coercion_cost(t.half, t.float),
            CoercionCost::normal(1)
        );
        assert_eq!(
            table.coercion_cost(t.short, t.int),
            CoercionCost::normal(3)
        );
    }

    #[test]
    fn narrowing_costs_the_reverse_difference() {
        let (table, t) = standard();
        assert_eq!(
            table.coercion_cost(t.float, t.half),
            CoercionCost::narrowing(1)
        );
        assert_eq!(
            table.coercion_cost(t.int, t.short),
            CoercionCost::narrowing(3)
        );
        assert!(!table.can_coerce(t.float, t.half, false));
        assert!(table.can_coerce(t.float, t.half, true));
    }

    #[test]
    fn normal_only_beats_narrowing_in_overload_ranking() {
        let (table, t) = standard();
        // Candidate A widens short → int (normal 3 + 0 narrowing); candidate
        // B narrows int → short. A must rank better despite B's zero normal
        // cost.
        let a = table.coercion_cost(t.short, t.int);
        let b = table.coercion_cost(t.int, t.short);
        assert!(a < b);
    }

    #[test]
    fn integer_literals_coerce_to_any_numeric_for_free() {
        let (table, t) = standard();
        assert_eq!(
            table.coercion_cost(t.int_literal, t.float),
            CoercionCost::free()
        );
        assert_eq!(
            table.coercion_cost(t.int_literal, t.ushort),
            CoercionCost::free()
        );
        assert_eq!(
            table.coercion_cost(t.int_literal, t.half),
            CoercionCost::free()
        );
    }

    #[test]
    fn float_literals_widen_like_scalars() {
        let (table, t) = standard();
        assert_eq!(
            table.coercion_cost(t.float_literal, t.half),
            CoercionCost::normal(1)
        );
        assert_eq!(
            table.coercion_cost(t.float_literal, t.float),
            CoercionCost::normal(2)
        );
        assert_eq!(
            table.coercion_cost(t.float_literal, t.int),
            CoercionCost::impossible()
        );
    }

    #[test]
    fn vectors_recurse_on_components_with_matching_arity() {
        let (table, t) = standard();
        assert_eq!(
            table.coercion_cost(t.half2, t.float2),
            CoercionCost::normal(1)
        );
        assert_eq!(
            table.coercion_cost(t.half2, t.float3),
            CoercionCost::impossible(),
            "arity mismatch"
        );
        assert_eq!(
            table.coercion_cost(t.float4, t.half4),
            CoercionCost::narrowing(1)
        );
    }

    #[test]
    fn vectors_never_convert_to_matrices() {
        let (table, t) = standard();
        // float4 and float2x2 hold the same number of components.
        assert_eq!(
            table.coercion_cost(t.float4, t.float2x2),
            CoercionCost::impossible()
        );
        assert_eq!(
            table.coercion_cost(t.float2x2, t.float4),
            CoercionCost::impossible()
        );
    }

    #[test]
    fn matrices_require_exact_shape() {
        let (table, t) = standard();
        assert_eq!(
            table.coercion_cost(t.half2x2, t.float2x2),
            CoercionCost::normal(1)
        );
        assert_eq!(
            table.coercion_cost(t.float2x2, t.float3x3),
            CoercionCost::impossible()
        );
    }

    #[test]
    fn arrays_require_equal_size_and_recurse() {
        let (mut table, t) = standard();
        let half_4 = table.add_array(t.half, 4);
        let float_4 = table.add_array(t.float, 4);
        let float_5 = table.add_array(t.float, 5);
        assert_eq!(
            table.coercion_cost(half_4, float_4),
            CoercionCost::normal(1)
        );
        assert_eq!(
            table.coercion_cost(float_4, float_5),
            CoercionCost::impossible()
        );
    }

    #[test]
    fn generics_cost_their_list_position() {
        let (table, t) = standard();
        assert_eq!(
            table.coercion_cost(t.gen_f, t.float),
            CoercionCost::normal(1)
        );
        assert_eq!(
            table.coercion_cost(t.gen_f, t.float4),
            CoercionCost::normal(4)
        );
        assert_eq!(
            table.coercion_cost(t.gen_f, t.int),
            CoercionCost::impossible()
        );
        assert_eq!(
            table.coercion_cost(t.gen_i, t.int2),
            CoercionCost::normal(2)
        );
    }

    #[test]
    fn aliases_participate_through_resolution() {
        let (mut table, t) = standard();
        let my_vec2 = table.add_alias("myVec2", t.float2);
        assert_eq!(table.coercion_cost(my_vec2, t.float2), CoercionCost::free());
        assert_eq!(
            table.coercion_cost(t.half2, my_vec2),
            CoercionCost::normal(1)
        );
    }

    #[test]
    fn booleans_do_not_convert_to_numbers() {
        let (table, t) = standard();
        assert_eq!(
            table.coercion_cost(t.bool_, t.int),
            CoercionCost::impossible()
        );
        assert_eq!(
            table.coercion_cost(t.int, t.bool_),
            CoercionCost::impossible()
        );
    }
}
