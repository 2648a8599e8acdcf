//! Parsing of LIQUiD-format Hamiltonian text.
//!
//! A LIQUiD file is a sequence of records separated by the literal token `tst`. Each record
//! describes one electronic Hamiltonian through
//! - an optional `nuc=<value>` nuclear-repulsion term,
//! - an optional `info=<annotation>` provenance tag, which is ignored,
//! - one-electron integrals written as `p,q=<value>`, and
//! - two-electron integrals written as `p,q,r,s=<value>` (any non-digit separators).
//!
//! Integrals related by permutational symmetry may appear more than once in a record. They are
//! merged under their canonical keys provided that their values agree exactly.

use std::error::Error;
use std::fmt;

use derive_builder::Builder;
use indexmap::map::Entry;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hamiltonian::OrbitalIntegralHamiltonian;
use crate::integrals::{CanonicalKey, IntegralError, IntegralKind, OrbitalIntegral};
use crate::io::format::nice_bool;

mod scanner;

use scanner::{count_nuclear_tags, scan_info_annotation, scan_nuclear_term, IntegralScanner};



/// The literal token separating consecutive records in a LIQUiD file.
pub const RECORD_DELIMITER: &str = "tst";

// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

/// A structure containing control parameters for parsing LIQUiD records.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct LiquidParseParams {
    /// Boolean indicating if a record containing more than one `nuc=` tag is to be rejected. If
    /// `false`, only the first tag is read and the rest are ignored.
    #[builder(default = "false")]
    #[serde(default)]
    pub strict_nuclear_term: bool,
}

impl LiquidParseParams {
    /// Returns a builder to construct a [`LiquidParseParams`] structure.
    pub fn builder() -> LiquidParseParamsBuilder {
        LiquidParseParamsBuilder::default()
    }
}

impl Default for LiquidParseParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `LiquidParseParams`.")
    }
}

impl fmt::Display for LiquidParseParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Reject records with multiple nuclear terms: {}",
            nice_bool(self.strict_nuclear_term)
        )?;
        Ok(())
    }
}

// -----
// Error
// -----

/// An enumerated type for the ways in which a LIQUiD record can fail to parse.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
    /// Two symmetry-equivalent integrals in the same record carry different values.
    InconsistentIntegral {
        /// The canonical key shared by the two integrals.
        key: CanonicalKey,

        /// The integral encountered first.
        recorded: OrbitalIntegral,

        /// The later integral whose value disagrees with the recorded one.
        conflicting: OrbitalIntegral,
    },

    /// A numeric literal could not be converted into a number.
    NumericConversion {
        /// The offending literal.
        literal: String,

        /// The byte offset of the literal within the record.
        position: usize,

        /// Why the conversion failed.
        reason: String,
    },

    /// More than one `nuc=` tag was found while these are being rejected.
    MultipleNuclearTerms {
        /// The number of `nuc=` tags found.
        count: usize,
    },

    /// An integral could not be canonicalised.
    Integral(IntegralError),
}

impl ParseError {
    pub(crate) fn numeric_conversion(
        literal: &str,
        position: usize,
        reason: impl fmt::Display,
    ) -> Self {
        Self::NumericConversion {
            literal: literal.to_string(),
            position,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentIntegral {
                key,
                recorded,
                conflicting,
            } => write!(
                f,
                "LIQUiD parse error: inconsistent {} integral {key}: `{conflicting}` disagrees with the previously read `{recorded}`.",
                key.kind().to_string().to_lowercase(),
            ),
            Self::NumericConversion {
                literal,
                position,
                reason,
            } => write!(
                f,
                "LIQUiD parse error: unable to convert `{literal}` at byte {position} into a number ({reason})."
            ),
            Self::MultipleNuclearTerms { count } => write!(
                f,
                "LIQUiD parse error: {count} nuclear terms found where at most one is allowed."
            ),
            Self::Integral(err) => write!(f, "LIQUiD parse error: {err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Integral(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IntegralError> for ParseError {
    fn from(err: IntegralError) -> Self {
        Self::Integral(err)
    }
}

// -----------
// Accumulator
// -----------

/// Collects the integrals of one kind read from a record, keyed by canonical index tuple.
///
/// The first integral seen for each key is retained so that a later disagreement can name both
/// integrals involved.
struct IntegralAccumulator {
    kind: IntegralKind,
    integrals: IndexMap<CanonicalKey, OrbitalIntegral>,
}

impl IntegralAccumulator {
    fn new(kind: IntegralKind) -> Self {
        Self {
            kind,
            integrals: IndexMap::new(),
        }
    }

    /// Records an integral, absorbing exact duplicates of an existing key.
    ///
    /// # Errors
    ///
    /// Errors if the integral is not of the accumulator's kind, or if an integral with the same
    /// canonical key but a different value has already been recorded.
    fn insert(&mut self, integral: OrbitalIntegral) -> Result<(), ParseError> {
        let key = integral.canonical_key()?;
        if key.kind() != self.kind {
            return Err(IntegralError(format!(
                "`{integral}` is not a {} integral",
                self.kind.to_string().to_lowercase()
            ))
            .into());
        }
        match self.integrals.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(integral);
                Ok(())
            }
            Entry::Occupied(entry) if entry.get().coefficient == integral.coefficient => Ok(()),
            Entry::Occupied(entry) => Err(ParseError::InconsistentIntegral {
                key: entry.key().clone(),
                recorded: entry.get().clone(),
                conflicting: integral,
            }),
        }
    }

    fn into_terms(self) -> impl Iterator<Item = (CanonicalKey, f64)> {
        self.integrals
            .into_iter()
            .map(|(key, integral)| (key, integral.coefficient))
    }
}

// =========
// Functions
// =========

/// Splits the contents of a LIQUiD file into records.
///
/// Pieces of zero length, such as those produced by a leading, trailing or repeated delimiter,
/// are discarded. Whitespace is preserved.
///
/// # Arguments
///
/// * `text` - The entire contents of a LIQUiD file.
///
/// # Returns
///
/// The records in file order.
pub fn split_records(text: &str) -> Vec<String> {
    text.split(RECORD_DELIMITER)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a single LIQUiD record into a Hamiltonian with default parameters.
///
/// See [`parse_record_with_params`].
pub fn parse_record(record: &str) -> Result<OrbitalIntegralHamiltonian, ParseError> {
    parse_record_with_params(record, &LiquidParseParams::default())
}

/// Parses a single LIQUiD record into a Hamiltonian.
///
/// Text in the record that matches none of the recognised terms is ignored, so a record without
/// any recognised term gives an empty Hamiltonian.
///
/// # Arguments
///
/// * `record` - The text of the record.
/// * `params` - The parsing parameters.
///
/// # Returns
///
/// The Hamiltonian containing the nuclear term, if any, followed by one term per distinct
/// canonical one-electron integral and one term per distinct canonical two-electron integral, in
/// order of first appearance.
///
/// # Errors
///
/// Errors if a numeric literal is malformed, if two symmetry-equivalent integrals disagree, or if
/// [`LiquidParseParams::strict_nuclear_term`] is set and the record has several nuclear terms.
/// No partially populated Hamiltonian is returned in any of these cases.
pub fn parse_record_with_params(
    record: &str,
    params: &LiquidParseParams,
) -> Result<OrbitalIntegralHamiltonian, ParseError> {
    if params.strict_nuclear_term {
        let count = count_nuclear_tags(record);
        if count > 1 {
            return Err(ParseError::MultipleNuclearTerms { count });
        }
    }
    let nuclear_term = scan_nuclear_term(record)?;
    if let Some(info) = scan_info_annotation(record) {
        log::debug!("Ignoring record annotation `{info}`.");
    }

    let mut one_electron = IntegralAccumulator::new(IntegralKind::OneElectron);
    let mut two_electron = IntegralAccumulator::new(IntegralKind::TwoElectron);
    for accumulator in [&mut one_electron, &mut two_electron] {
        for token in IntegralScanner::new(record, accumulator.kind) {
            let token = token?;
            log::trace!("Read {} integral {:?}.", token.kind, token.indices);
            accumulator.insert(OrbitalIntegral::new(&token.indices, token.coefficient))?;
        }
    }

    let mut hamiltonian = OrbitalIntegralHamiltonian::new();
    if let Some(value) = nuclear_term {
        hamiltonian.add_identity_term(value);
    }
    one_electron
        .into_terms()
        .chain(two_electron.into_terms())
        .for_each(|(key, coefficient)| hamiltonian.add_term(key, coefficient));
    log::debug!(
        "Parsed a record with {} terms over {} orbitals.",
        hamiltonian.n_terms(),
        hamiltonian.n_orbitals()
    );
    Ok(hamiltonian)
}

/// Splits the contents of a LIQUiD file into records and parses them in parallel.
///
/// # Arguments
///
/// * `text` - The entire contents of a LIQUiD file.
/// * `params` - The parsing parameters applied to every record.
///
/// # Returns
///
/// One parsing outcome per record, in file order. A failing record does not affect the others.
pub fn parse_records(
    text: &str,
    params: &LiquidParseParams,
) -> Vec<Result<OrbitalIntegralHamiltonian, ParseError>> {
    split_records(text)
        .par_iter()
        .map(|record| parse_record_with_params(record, params))
        .collect()
}
