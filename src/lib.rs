//! # liquidham: orbital-integral Hamiltonians from LIQUiD text
//!
//! `liquidham` reads molecular electronic Hamiltonians written in the LIQUiD text format, in
//! which each record lists a nuclear-repulsion constant together with the one- and two-electron
//! integrals over a set of spatial orbitals, e.g.
//!
//! ```text
//! info=H2_sto-3g nuc=0.713753990
//! 0,0=-1.252477303 1,1=-0.475934458
//! 0,0,0,0=0.674493166 0,0,1,1=0.663472101 0,1,1,0=0.181287535 1,1,1,1=0.697398010
//! tst
//! ...
//! ```
//!
//! Integrals that are equivalent under the permutational symmetry of real orbitals are merged
//! under a single canonical index tuple, and a record in which equivalent integrals disagree is
//! rejected.
//!
//! The crate provides
//! - [`liquid`]: splitting LIQUiD text into records and parsing each record,
//! - [`hamiltonian`]: the resulting [`hamiltonian::OrbitalIntegralHamiltonian`],
//! - [`integrals`] and [`permutation`]: integral index symmetry and canonicalisation,
//! - [`drivers`]: a driver that loads, reports and optionally saves a whole LIQUiD file, and
//! - [`interfaces`] and [`io`]: the YAML input and file handling used by the `liquidham` binary.
//!
//! ## Using the library
//!
//! ```
//! use liquidham::liquid::{parse_record, split_records};
//!
//! let records = split_records("nuc=0.5 0,1=0.25 tst 1,0=0.25 1,1=-1.0e-1");
//! assert_eq!(records.len(), 2);
//! let ham = parse_record(&records[1]).unwrap();
//! assert_eq!(ham.n_terms(), 2);
//! ```
//!
//! ## Using the binary
//!
//! The `liquidham` binary takes a YAML configuration file,
//!
//! ```yaml
//! liquid_loading:
//!   source: h2_sto3g.dat
//!   parameters:
//!     skip_failed_records: true
//!     verbose: 1
//!     result_save_name: h2_sto3g
//! ```
//!
//! and is run as `liquidham -c config.yml -o h2_sto3g.out`.

pub mod drivers;
pub mod hamiltonian;
pub mod integrals;
pub mod interfaces;
pub mod io;
pub mod liquid;
pub mod permutation;
