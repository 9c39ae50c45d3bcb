//! Structural unification of type observations.
//!
//! `unify` merges two independently inferred `Type` trees into one, widening
//! numeric primitives where the evidence demands it and letting `null`
//! placeholders absorb concrete evidence. It is a total structural recursion
//! that returns either the unified tree or a typed conflict, never a
//! best-guess type and never an unstructured panic.

use std::fmt;

use crate::ty::{Prim, Type};

/// A conflict found while unifying two type observations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnifyError {
    /// The two types have incompatible kinds (primitive kinds that do not
    /// widen into each other, or different container kinds).
    KindMismatch { left: Type, right: Type },
    /// Same container kind but different nesting depth, and neither side is
    /// an empty-container placeholder.
    DepthMismatch {
        left: Type,
        right: Type,
        left_depth: usize,
        right_depth: usize,
    },
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnifyError::KindMismatch { left, right } => {
                write!(f, "cannot unify `{}` with `{}`", left, right)
            }
            UnifyError::DepthMismatch {
                left,
                right,
                left_depth,
                right_depth,
            } => write!(
                f,
                "depth mismatch: `{}` has depth {} but `{}` has depth {}",
                left, left_depth, right, right_depth
            ),
        }
    }
}

impl std::error::Error for UnifyError {}

/// Widen two primitive kinds into one, if the promotion table allows it.
///
/// The table mirrors the reconcilable pairs of the generic schema:
/// `integer` widens to `long`, `float`, or `double`; `float` and `long`
/// widen to `double`. Equal kinds pass through. Anything else is `None`.
pub fn promote(a: Prim, b: Prim) -> Option<Prim> {
    use Prim::*;
    if a == b {
        return Some(a);
    }
    match (a, b) {
        (Integer, Long) | (Long, Integer) => Some(Long),
        (Integer, Float) | (Float, Integer) => Some(Float),
        (Integer, Double) | (Double, Integer) => Some(Double),
        (Float, Double) | (Double, Float) => Some(Double),
        (Long, Double) | (Double, Long) => Some(Double),
        _ => None,
    }
}

/// Unify two type observations into one.
///
/// Rules, in order:
/// - a bare `null` leaf unifies to the other side;
/// - primitives unify through the [`promote`] table;
/// - same container kind with one side null-only (empty-literal evidence)
///   unifies to the non-null side regardless of the null side's depth;
/// - same container kind at equal depth recurses into the subtrees
///   (tuples positionally; a tuple arity mismatch is a kind conflict);
/// - same container kind at unequal depth is a depth conflict;
/// - everything else is a kind conflict.
pub fn unify(left: &Type, right: &Type) -> Result<Type, UnifyError> {
    match (left, right) {
        (Type::Null, other) | (other, Type::Null) => Ok(other.clone()),

        (Type::Prim(a), Type::Prim(b)) => match promote(*a, *b) {
            Some(kind) => Ok(Type::Prim(kind)),
            None => Err(kind_mismatch(left, right)),
        },

        (Type::List(_), Type::List(_))
        | (Type::Set(_), Type::Set(_))
        | (Type::Map(..), Type::Map(..))
        | (Type::Tuple(_), Type::Tuple(_)) => {
            // Empty-literal escape hatch: `[]` observed as `list<null>` gives
            // way to any concrete list, no matter how deeply nested.
            if left.is_null_only() {
                return Ok(right.clone());
            }
            if right.is_null_only() {
                return Ok(left.clone());
            }
            let (ld, rd) = (left.depth(), right.depth());
            if ld != rd {
                return Err(UnifyError::DepthMismatch {
                    left: left.clone(),
                    right: right.clone(),
                    left_depth: ld,
                    right_depth: rd,
                });
            }
            unify_children(left, right)
        }

        _ => Err(kind_mismatch(left, right)),
    }
}

fn unify_children(left: &Type, right: &Type) -> Result<Type, UnifyError> {
    match (left, right) {
        (Type::List(a), Type::List(b)) => Ok(Type::list(unify(a, b)?)),
        (Type::Set(a), Type::Set(b)) => Ok(Type::set(unify(a, b)?)),
        (Type::Map(ak, av), Type::Map(bk, bv)) => {
            Ok(Type::map(unify(ak, bk)?, unify(av, bv)?))
        }
        (Type::Tuple(a), Type::Tuple(b)) => {
            if a.len() != b.len() {
                return Err(kind_mismatch(left, right));
            }
            let elements = a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| unify(x, y))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Type::tuple(elements))
        }
        _ => unreachable!("unify_children called with mismatched container kinds"),
    }
}

fn kind_mismatch(left: &Type, right: &Type) -> UnifyError {
    UnifyError::KindMismatch {
        left: left.clone(),
        right: right.clone(),
    }
}

/// Structural equality where a `null` leaf matches anything.
///
/// Two trees are generically equal when they have the same container
/// structure and equal primitive kinds, except that a `null` leaf on either
/// side matches any subtree.
pub fn generic_eq(left: &Type, right: &Type) -> bool {
    match (left, right) {
        (Type::Null, _) | (_, Type::Null) => true,
        (Type::Prim(a), Type::Prim(b)) => a == b,
        (Type::List(a), Type::List(b)) | (Type::Set(a), Type::Set(b)) => generic_eq(a, b),
        (Type::Map(ak, av), Type::Map(bk, bv)) => generic_eq(ak, bk) && generic_eq(av, bv),
        (Type::Tuple(a), Type::Tuple(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| generic_eq(x, y))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_kinds_pass_through() {
        assert_eq!(
            unify(&Type::integer(), &Type::integer()).unwrap(),
            Type::integer()
        );
        assert_eq!(
            unify(&Type::string(), &Type::string()).unwrap(),
            Type::string()
        );
    }

    #[test]
    fn numeric_widening() {
        assert_eq!(
            unify(&Type::integer(), &Type::float()).unwrap(),
            Type::float()
        );
        assert_eq!(
            unify(&Type::float(), &Type::integer()).unwrap(),
            Type::float()
        );
        assert_eq!(unify(&Type::integer(), &Type::long()).unwrap(), Type::long());
        assert_eq!(
            unify(&Type::long(), &Type::double()).unwrap(),
            Type::double()
        );
        assert_eq!(
            unify(&Type::float(), &Type::double()).unwrap(),
            Type::double()
        );
    }

    #[test]
    fn long_and_float_do_not_widen() {
        // Neither kind's widening set contains the other.
        assert!(unify(&Type::long(), &Type::float()).is_err());
    }

    #[test]
    fn incompatible_primitives_conflict() {
        let err = unify(&Type::integer(), &Type::string()).unwrap_err();
        assert!(matches!(err, UnifyError::KindMismatch { .. }));
        assert!(unify(&Type::boolean(), &Type::integer()).is_err());
    }

    #[test]
    fn null_leaf_absorbs_evidence() {
        assert_eq!(
            unify(&Type::Null, &Type::list(Type::integer())).unwrap(),
            Type::list(Type::integer())
        );
        assert_eq!(
            unify(&Type::list(Type::Null), &Type::list(Type::integer())).unwrap(),
            Type::list(Type::integer())
        );
    }

    #[test]
    fn null_only_container_yields_to_deeper_side() {
        // list<null> unifies with list<list<integer>> despite the depth gap.
        let empty = Type::list(Type::Null);
        let deep = Type::list(Type::list(Type::integer()));
        assert_eq!(unify(&empty, &deep).unwrap(), deep);
        assert_eq!(unify(&deep, &empty).unwrap(), deep);
    }

    #[test]
    fn depth_mismatch_conflicts() {
        let shallow = Type::list(Type::list(Type::integer()));
        let deep = Type::list(Type::list(Type::list(Type::integer())));
        match unify(&shallow, &deep).unwrap_err() {
            UnifyError::DepthMismatch {
                left_depth,
                right_depth,
                ..
            } => {
                assert_eq!(left_depth, 2);
                assert_eq!(right_depth, 3);
            }
            other => panic!("expected DepthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn containers_recurse_elementwise() {
        let a = Type::list(Type::integer());
        let b = Type::list(Type::float());
        assert_eq!(unify(&a, &b).unwrap(), Type::list(Type::float()));

        let m1 = Type::map(Type::string(), Type::integer());
        let m2 = Type::map(Type::string(), Type::double());
        assert_eq!(
            unify(&m1, &m2).unwrap(),
            Type::map(Type::string(), Type::double())
        );
    }

    #[test]
    fn tuple_unifies_positionally() {
        let a = Type::tuple(vec![Type::integer(), Type::string()]);
        let b = Type::tuple(vec![Type::float(), Type::string()]);
        assert_eq!(
            unify(&a, &b).unwrap(),
            Type::tuple(vec![Type::float(), Type::string()])
        );
        // Arity mismatch is a kind conflict, not a depth conflict.
        let c = Type::tuple(vec![Type::integer()]);
        assert!(matches!(
            unify(&a, &c).unwrap_err(),
            UnifyError::KindMismatch { .. }
        ));
    }

    #[test]
    fn list_and_set_are_different_kinds() {
        assert!(unify(&Type::list(Type::integer()), &Type::set(Type::integer())).is_err());
    }

    #[test]
    fn generic_eq_null_matches_anything() {
        assert!(generic_eq(&Type::Null, &Type::list(Type::integer())));
        assert!(generic_eq(
            &Type::list(Type::Null),
            &Type::list(Type::list(Type::string()))
        ));
        assert!(!generic_eq(&Type::integer(), &Type::string()));
        assert!(!generic_eq(
            &Type::list(Type::integer()),
            &Type::set(Type::integer())
        ));
    }
}
