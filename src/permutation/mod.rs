//! Permutations of finite index sets.
//!
//! Orbital-integral symmetries are expressed as permutations of index positions: a two-electron
//! integral $`(pq|rs)`$ with real orbitals is invariant under the eight position permutations
//! that swap electrons and exchange orbitals within each electron. This module provides the
//! permutation type and the closure of a set of generators into a finite group.

use std::collections::HashSet;
use std::ops::Mul;

use anyhow::{self, ensure, format_err};
use derive_builder::Builder;
use indexmap::IndexSet;
use itertools::Itertools;


// ==================
// Struct definitions
// ==================

/// A structure to manage permutation actions of a finite set.
#[derive(Builder, Clone, Debug, PartialEq, Eq, Hash)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Permutation {
    /// The rank of the permutation, *i.e.* the number of elements in the finite set on which the
    /// permutation acts.
    rank: usize,

    /// If the permutation is to act on an ordered sequence of $`n`$ integers, $`0, 1, \ldots, n`$
    /// where $`n`$ is [`Self::rank`], then this gives the result of the action.
    #[builder(setter(custom))]
    image: Vec<usize>,
}

impl PermutationBuilder {
    fn image(&mut self, perm: &[usize]) -> &mut Self {
        self.image = Some(perm.to_vec());
        self
    }

    fn validate(&self) -> Result<(), String> {
        let rank = self
            .rank
            .ok_or_else(|| "Permutation rank has not been set.".to_string())?;
        let image = self
            .image
            .as_ref()
            .ok_or_else(|| "Permutation image has not been set.".to_string())?;
        if image.len() != rank {
            return Err(format!(
                "The permutation image `{image:?}` does not contain {rank} elements."
            ));
        }
        if image.iter().collect::<HashSet<_>>().len() != rank {
            return Err(format!(
                "The permutation image `{image:?}` contains repeated elements."
            ));
        }
        if image.iter().any(|&i| i >= rank) {
            return Err(format!(
                "The permutation image `{image:?}` contains out-of-range elements."
            ));
        }
        Ok(())
    }
}

impl Permutation {
    /// Returns a builder to construct a new permutation.
    #[must_use]
    fn builder() -> PermutationBuilder {
        PermutationBuilder::default()
    }

    /// Constructs a permutation from its image.
    ///
    /// # Arguments
    ///
    /// * `image` - The result of acting the permutation on $`0, 1, \ldots, n - 1`$.
    ///
    /// # Errors
    ///
    /// Errors if `image` contains repeated or out-of-range elements.
    pub fn from_image(image: &[usize]) -> Result<Self, anyhow::Error> {
        Self::builder()
            .rank(image.len())
            .image(image)
            .build()
            .map_err(|err| format_err!(err))
    }

    /// Constructs the identity permutation of a given rank.
    pub fn identity(rank: usize) -> Self {
        Self {
            rank,
            image: (0..rank).collect_vec(),
        }
    }

    /// The rank of the permutation.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The image of the permutation.
    pub fn image(&self) -> &Vec<usize> {
        &self.image
    }

    /// Rearranges a sequence by this permutation, such that position $`i`$ of the output holds
    /// the element at position `image[i]` of the input.
    ///
    /// # Errors
    ///
    /// Errors if the length of `items` does not match the rank of the permutation.
    pub fn rearrange<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, anyhow::Error> {
        ensure!(
            items.len() == self.rank,
            "Unable to rearrange {} items with a permutation of rank {}.",
            items.len(),
            self.rank
        );
        Ok(self.image.iter().map(|&i| items[i].clone()).collect())
    }
}

// ---
// Mul
// ---
impl Mul<&'_ Permutation> for &Permutation {
    type Output = Permutation;

    fn mul(self, rhs: &Permutation) -> Self::Output {
        assert_eq!(
            self.rank, rhs.rank,
            "The ranks of two multiplying permutations do not match."
        );
        Permutation {
            rank: self.rank,
            image: rhs.image.iter().map(|&ri| self.image[ri]).collect_vec(),
        }
    }
}

// =========
// Functions
// =========

/// Generates the finite group closure of a set of permutations.
///
/// # Arguments
///
/// * `rank` - The rank of all permutations involved.
/// * `generators` - The generating permutations.
///
/// # Returns
///
/// All elements of the generated group, the identity first, the remaining ones in the order they
/// are discovered.
///
/// # Errors
///
/// Errors if any generator does not have rank `rank`.
pub fn generate_group(
    rank: usize,
    generators: &[Permutation],
) -> Result<IndexSet<Permutation>, anyhow::Error> {
    ensure!(
        generators.iter().all(|generator| generator.rank() == rank),
        "Not all generators have rank {rank}."
    );
    let mut group = IndexSet::from([Permutation::identity(rank)]);
    let mut frontier = 0;
    while frontier < group.len() {
        let element = group
            .get_index(frontier)
            .cloned()
            .ok_or_else(|| format_err!("Group element {frontier} cannot be retrieved."))?;
        for generator in generators {
            group.insert(&element * generator);
        }
        frontier += 1;
    }
    log::debug!(
        "Generated a permutation group of order {} and rank {rank}: {}",
        group.len(),
        group.iter().map(|perm| format!("{:?}", perm.image())).join(", ")
    );
    Ok(group)
}
