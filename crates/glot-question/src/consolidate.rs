//! Cross-example type consolidation.
//!
//! Reduces the per-example type observations for one slot, optionally
//! seeded by a declared annotation, into exactly one published type.
//! Observations are folded in scan order so conflict diagnostics cite
//! reproducible example indices.

use glot_schema::{unify, Type};

use crate::error::ConvertError;

/// One type observation for a slot, tagged with its example index.
#[derive(Clone, Debug)]
pub struct Observation {
    pub example: usize,
    pub ty: Type,
}

/// Fold a slot's observations into its final type.
///
/// An annotation seed is authoritative for shape: evidence may fill in
/// primitive kinds beneath `null` placeholders and widen numerics, but a
/// shape disagreement against the seed is the same conflict as one between
/// two examples. Without a seed, the first observation starts the fold.
/// A result that still carries `null` anywhere means no example ever
/// supplied concrete evidence for that position.
pub fn consolidate(
    slot: &str,
    annotation: Option<&Type>,
    observations: &[Observation],
) -> Result<Type, ConvertError> {
    let mut contributors: Vec<usize> = Vec::new();
    let mut rest = observations.iter();
    let mut acc = match annotation {
        Some(seed) => seed.clone(),
        None => match rest.next() {
            Some(first) => {
                contributors.push(first.example);
                first.ty.clone()
            }
            None => {
                return Err(ConvertError::NoNonNullType {
                    slot: slot.to_string(),
                })
            }
        },
    };

    for obs in rest {
        match unify(&acc, &obs.ty) {
            Ok(unified) => {
                acc = unified;
                contributors.push(obs.example);
            }
            Err(conflict) => {
                let mut examples = contributors;
                examples.push(obs.example);
                return Err(ConvertError::TypeConflict {
                    slot: slot.to_string(),
                    conflict,
                    examples,
                });
            }
        }
    }

    if acc.contains_null() {
        return Err(ConvertError::NoNonNullType {
            slot: slot.to_string(),
        });
    }
    Ok(acc)
}
