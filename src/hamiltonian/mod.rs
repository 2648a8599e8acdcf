//! Orbital-integral Hamiltonians.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::integrals::{CanonicalKey, IntegralKind};
use crate::io::format::write_subtitle;


/// Structure for managing an electronic Hamiltonian expressed as a constant term plus one- and
/// two-electron orbital integrals.
///
/// Terms are only accumulated: adding a term whose key is already present sums the coefficients.
/// Consistency checks on repeated integrals belong to whoever populates the Hamiltonian.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitalIntegralHamiltonian {
    /// The identity (nuclear repulsion) term, if any has been added.
    identity: Option<f64>,

    /// The one-electron integrals, keyed by their canonical indices, in insertion order.
    #[serde(with = "indexmap::map::serde_seq")]
    one_electron: IndexMap<CanonicalKey, f64>,

    /// The two-electron integrals, keyed by their canonical indices, in insertion order.
    #[serde(with = "indexmap::map::serde_seq")]
    two_electron: IndexMap<CanonicalKey, f64>,
}

impl OrbitalIntegralHamiltonian {
    /// Constructs an empty Hamiltonian.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a constant term to the Hamiltonian.
    pub fn add_identity_term(&mut self, value: f64) {
        *self.identity.get_or_insert(0.0) += value;
    }

    /// Adds an integral term to the Hamiltonian under its canonical key. The term goes to the
    /// identity, one-electron or two-electron part according to the kind of `key`.
    pub fn add_term(&mut self, key: CanonicalKey, coefficient: f64) {
        match key.kind() {
            IntegralKind::Nuclear => self.add_identity_term(coefficient),
            IntegralKind::OneElectron => {
                *self.one_electron.entry(key).or_insert(0.0) += coefficient;
            }
            IntegralKind::TwoElectron => {
                *self.two_electron.entry(key).or_insert(0.0) += coefficient;
            }
        }
    }

    /// The identity term, or `None` if no identity term has been added.
    pub fn identity_term(&self) -> Option<f64> {
        self.identity
    }

    /// The one-electron terms in the order they were first added.
    pub fn one_electron_terms(&self) -> &IndexMap<CanonicalKey, f64> {
        &self.one_electron
    }

    /// The two-electron terms in the order they were first added.
    pub fn two_electron_terms(&self) -> &IndexMap<CanonicalKey, f64> {
        &self.two_electron
    }

    /// Returns the coefficient of an integral term, if present.
    pub fn coefficient(&self, key: &CanonicalKey) -> Option<f64> {
        match key.kind() {
            IntegralKind::Nuclear => self.identity,
            IntegralKind::OneElectron => self.one_electron.get(key).copied(),
            IntegralKind::TwoElectron => self.two_electron.get(key).copied(),
        }
    }

    /// The total number of terms, counting the identity term if present.
    pub fn n_terms(&self) -> usize {
        usize::from(self.identity.is_some()) + self.one_electron.len() + self.two_electron.len()
    }

    /// Returns `true` if the Hamiltonian has no terms at all.
    pub fn is_empty(&self) -> bool {
        self.n_terms() == 0
    }

    /// The number of spatial orbitals spanned by the integral terms, *i.e.* one more than the
    /// largest orbital index present.
    pub fn n_orbitals(&self) -> usize {
        self.one_electron
            .keys()
            .chain(self.two_electron.keys())
            .filter_map(CanonicalKey::max_index)
            .max()
            .map_or(0, |max_index| max_index + 1)
    }
}

impl fmt::Display for OrbitalIntegralHamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Orbital-integral Hamiltonian")?;
        writeln!(f, "Number of orbitals: {}", self.n_orbitals())?;
        writeln!(f, "Number of terms: {}", self.n_terms())?;
        match self.identity {
            Some(value) => writeln!(f, "Identity term: {value:+.10e}")?,
            None => writeln!(f, "Identity term: --")?,
        }
        for (kind, terms) in [
            (IntegralKind::OneElectron, &self.one_electron),
            (IntegralKind::TwoElectron, &self.two_electron),
        ] {
            writeln!(f, "{kind} terms: {}", terms.len())?;
            for (key, coefficient) in terms.iter() {
                writeln!(f, "  {:<16} {coefficient:+.10e}", key.to_string())?;
            }
        }
        Ok(())
    }
}
