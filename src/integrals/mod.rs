//! Orbital integrals and the canonical forms of their index tuples.
//!
//! A one-electron integral $`h_{pq}`$ over real orbitals satisfies $`h_{pq} = h_{qp}`$, and a
//! two-electron integral $`(pq|rs)`$ is invariant under the eight-fold group generated by
//! $`(pq|rs) = (qp|sr)`$, $`(pq|rs) = (rs|pq)`$ and $`(pq|rs) = (pr|qs)`$ acting on index
//! positions. The canonical form of an index tuple is the lexicographically smallest tuple in its
//! orbit under the relevant group, so that all symmetry-equivalent tuples share one
//! [`CanonicalKey`].

use std::error::Error;
use std::fmt;

use indexmap::IndexSet;
use itertools::Itertools;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::permutation::{generate_group, Permutation};

#[cfg(test)]
#[path = "integrals_tests.rs"]
mod integrals_tests;

lazy_static! {
    static ref TRIVIAL_GROUP: IndexSet<Permutation> = IndexSet::from([Permutation::identity(0)]);
    static ref ONE_ELECTRON_GROUP: IndexSet<Permutation> =
        build_symmetry_group(2, &[&[1, 0]]);
    static ref TWO_ELECTRON_GROUP: IndexSet<Permutation> =
        build_symmetry_group(4, &[&[1, 0, 3, 2], &[2, 3, 0, 1], &[0, 2, 1, 3]]);
}

fn build_symmetry_group(rank: usize, generator_images: &[&[usize]]) -> IndexSet<Permutation> {
    let generators = generator_images
        .iter()
        .map(|image| Permutation::from_image(image))
        .collect::<Result<Vec<_>, _>>()
        .expect("Integral symmetry generators must be valid permutations.");
    generate_group(rank, &generators)
        .expect("Integral symmetry generators must all have the same rank.")
}

// ================
// Enum definitions
// ================

/// An enumerated type for the classes of integral terms in a Hamiltonian.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegralKind {
    /// Variant for the orbital-independent constant (nuclear repulsion) term.
    Nuclear,

    /// Variant for two-index one-electron integrals.
    OneElectron,

    /// Variant for four-index two-electron integrals.
    TwoElectron,
}

impl IntegralKind {
    /// Returns the number of orbital indices carried by integrals of this kind.
    pub fn rank(&self) -> usize {
        match self {
            Self::Nuclear => 0,
            Self::OneElectron => 2,
            Self::TwoElectron => 4,
        }
    }

    /// Determines the integral kind from the number of orbital indices.
    ///
    /// # Errors
    ///
    /// Errors if no integral kind has `rank` indices.
    pub fn from_rank(rank: usize) -> Result<Self, IntegralError> {
        match rank {
            0 => Ok(Self::Nuclear),
            2 => Ok(Self::OneElectron),
            4 => Ok(Self::TwoElectron),
            _ => Err(IntegralError(format!(
                "no integral kind carries {rank} orbital indices"
            ))),
        }
    }

    /// Returns the group of index-position permutations leaving integrals of this kind
    /// invariant. The identity is always the first element.
    pub fn symmetry_group(&self) -> &'static IndexSet<Permutation> {
        match self {
            Self::Nuclear => &TRIVIAL_GROUP,
            Self::OneElectron => &ONE_ELECTRON_GROUP,
            Self::TwoElectron => &TWO_ELECTRON_GROUP,
        }
    }
}

impl fmt::Display for IntegralKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Nuclear => write!(f, "Nuclear"),
            Self::OneElectron => write!(f, "One-electron"),
            Self::TwoElectron => write!(f, "Two-electron"),
        }
    }
}

// ==================
// Struct definitions
// ==================

#[derive(Debug, Clone, PartialEq)]
pub struct IntegralError(pub String);

impl fmt::Display for IntegralError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Integral error: {}.", self.0)
    }
}

impl Error for IntegralError {}

/// The canonical index tuple of an orbital integral.
///
/// Values of this type are only produced by [`canonicalize`], so two keys compare equal exactly
/// when their integrals are symmetry-equivalent. Deserialised keys are checked to be canonical.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct CanonicalKey(Vec<usize>);

impl TryFrom<Vec<usize>> for CanonicalKey {
    type Error = IntegralError;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        let key = canonicalize(&indices)?;
        if key.0 != indices {
            return Err(IntegralError(format!(
                "`{indices:?}` is not in canonical form, expected `{:?}`",
                key.0
            )));
        }
        Ok(key)
    }
}

impl From<CanonicalKey> for Vec<usize> {
    fn from(key: CanonicalKey) -> Self {
        key.0
    }
}

impl CanonicalKey {
    /// The canonical orbital indices.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// The kind of integral this key belongs to.
    pub fn kind(&self) -> IntegralKind {
        IntegralKind::from_rank(self.0.len())
            .expect("A canonical key always has the rank of a valid integral kind.")
    }

    /// The largest orbital index in this key, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.0.iter().max().copied()
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

/// An orbital integral as written, before canonicalisation.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalIntegral {
    /// The orbital indices in the order they were encountered.
    pub indices: Vec<usize>,

    /// The value of the integral.
    pub coefficient: f64,
}

impl OrbitalIntegral {
    pub fn new(indices: &[usize], coefficient: f64) -> Self {
        Self {
            indices: indices.to_vec(),
            coefficient,
        }
    }

    /// The kind of this integral, deduced from its number of indices.
    pub fn kind(&self) -> Result<IntegralKind, IntegralError> {
        IntegralKind::from_rank(self.indices.len())
    }

    /// Returns the canonical key of this integral.
    pub fn canonical_key(&self) -> Result<CanonicalKey, IntegralError> {
        canonicalize(&self.indices)
    }
}

impl fmt::Display for OrbitalIntegral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "({}) = {}",
            self.indices.iter().join(", "),
            self.coefficient
        )
    }
}

// =========
// Functions
// =========

/// Canonicalises an orbital index tuple.
///
/// # Arguments
///
/// * `indices` - The orbital indices of an integral: none for the nuclear term, two for a
/// one-electron integral, four for a two-electron integral.
///
/// # Returns
///
/// The lexicographically smallest rearrangement of `indices` under the symmetry group of the
/// integral kind.
///
/// # Errors
///
/// Errors if `indices` does not have the length of any integral kind.
pub fn canonicalize(indices: &[usize]) -> Result<CanonicalKey, IntegralError> {
    let kind = IntegralKind::from_rank(indices.len())?;
    kind.symmetry_group()
        .iter()
        .map(|perm| {
            perm.rearrange(indices)
                .map_err(|err| IntegralError(err.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .min()
        .map(CanonicalKey)
        .ok_or_else(|| IntegralError(format!("the symmetry group of `{kind}` is empty")))
}
