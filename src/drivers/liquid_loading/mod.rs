//! Driver for loading orbital-integral Hamiltonians from LIQUiD text.

use std::fmt;
use std::path::PathBuf;

use anyhow::{self, bail, format_err};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::drivers::LiquidhamDriver;
use crate::hamiltonian::OrbitalIntegralHamiltonian;
use crate::io::format::{
    liquidham_output, liquidham_warn, log_subtitle, log_title, nice_bool, write_subtitle,
    LiquidhamOutput,
};
use crate::io::{read_liquid_text, write_liquidham_binary, LiquidhamFileType};
use crate::liquid::{parse_records, LiquidParseParams};

#[cfg(test)]
#[path = "liquid_loading_tests.rs"]
mod liquid_loading_tests;

// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

/// A structure containing control parameters for loading LIQUiD Hamiltonians.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct LiquidLoadingParams {
    /// Parameters applied to the parsing of every record.
    #[builder(default = "LiquidParseParams::default()")]
    #[serde(default)]
    pub parse: LiquidParseParams,

    /// Boolean indicating if records that fail to parse are to be reported and skipped. If
    /// `false`, the first failing record aborts the loading.
    #[builder(default = "false")]
    #[serde(default)]
    pub skip_failed_records: bool,

    /// The output verbosity level. At level `1` and above, every parsed Hamiltonian is written
    /// out in full.
    #[builder(default = "0")]
    #[serde(default)]
    pub verbose: u8,

    /// Optional name for saving the result as a binary file of type [`LiquidhamFileType::Ham`].
    /// If `None`, the result will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<PathBuf>,
}

impl LiquidLoadingParams {
    /// Returns a builder to construct a [`LiquidLoadingParams`] structure.
    pub fn builder() -> LiquidLoadingParamsBuilder {
        LiquidLoadingParamsBuilder::default()
    }
}

impl Default for LiquidLoadingParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `LiquidLoadingParams`.")
    }
}

impl fmt::Display for LiquidLoadingParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parse)?;
        writeln!(
            f,
            "Skip failed records: {}",
            nice_bool(self.skip_failed_records)
        )?;
        writeln!(f, "Output level: {}", self.verbose)?;
        writeln!(
            f,
            "Save parsed Hamiltonians to file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                format!("{}.{}", name.display(), LiquidhamFileType::Ham.ext())
            } else {
                nice_bool(false)
            }
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// A record that could not be parsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiquidRecordFailure {
    /// The zero-based position of the record in the input.
    pub record_index: usize,

    /// A description of the parsing error.
    pub reason: String,
}

/// A structure to contain LIQUiD loading results.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct LiquidLoadingResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: LiquidLoadingParams,

    /// The number of records found in the input.
    pub n_records: usize,

    /// The parsed Hamiltonians, each with the zero-based position of its record in the input.
    pub hamiltonians: Vec<(usize, OrbitalIntegralHamiltonian)>,

    /// The records that failed to parse. This can only be non-empty if
    /// [`LiquidLoadingParams::skip_failed_records`] is set.
    #[builder(default = "vec![]")]
    pub failures: Vec<LiquidRecordFailure>,
}

impl LiquidLoadingResult {
    fn builder() -> LiquidLoadingResultBuilder {
        LiquidLoadingResultBuilder::default()
    }

    /// Returns the Hamiltonian parsed from the record at `record_index`, if that record parsed.
    pub fn hamiltonian(&self, record_index: usize) -> Option<&OrbitalIntegralHamiltonian> {
        self.hamiltonians
            .iter()
            .find(|(index, _)| *index == record_index)
            .map(|(_, ham)| ham)
    }

    /// Writes a one-line summary of each parsed Hamiltonian in a nicely formatted table.
    fn write_record_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count_length = self.n_records.to_string().len();
        let table_width = count_length + 40;
        writeln!(f, "{}", "┈".repeat(table_width))?;
        writeln!(
            f,
            "{:>count_length$} {:>9} {:>9} {:>19}",
            "#", "Orbitals", "Terms", "Identity term"
        )?;
        writeln!(f, "{}", "┈".repeat(table_width))?;
        for (record_index, ham) in self.hamiltonians.iter() {
            writeln!(
                f,
                "{:>count_length$} {:>9} {:>9} {:>19}",
                record_index,
                ham.n_orbitals(),
                ham.n_terms(),
                ham.identity_term()
                    .map(|value| format!("{value:+.10e}"))
                    .unwrap_or_else(|| "--".to_string())
            )?;
        }
        writeln!(f, "{}", "┈".repeat(table_width))?;
        Ok(())
    }
}

impl fmt::Display for LiquidLoadingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Summary of parsed records")?;
        writeln!(f)?;
        writeln!(f, "Records found: {}", self.n_records)?;
        writeln!(f, "Records parsed: {}", self.hamiltonians.len())?;
        writeln!(f, "Records failed: {}", self.failures.len())?;
        writeln!(f)?;

        if !self.hamiltonians.is_empty() {
            self.write_record_table(f)?;
            writeln!(f)?;
        }

        if !self.failures.is_empty() {
            writeln!(f, "Failed records:")?;
            for failure in self.failures.iter() {
                writeln!(f, "  #{}: {}", failure.record_index, failure.reason)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for loading orbital-integral Hamiltonians from LIQUiD text.
#[derive(Clone, Builder)]
pub struct LiquidLoadingDriver<'a> {
    /// The control parameters for LIQUiD loading.
    parameters: &'a LiquidLoadingParams,

    /// The LIQUiD text to be parsed. Only one of this or [`Self::path`] should be specified.
    #[builder(default = "None")]
    text: Option<String>,

    /// A path to a LIQUiD file to be parsed. Only one of this or [`Self::text`] should be
    /// specified.
    #[builder(default = "None")]
    path: Option<PathBuf>,

    /// The result of the loading.
    #[builder(setter(skip), default = "None")]
    result: Option<LiquidLoadingResult>,
}

impl<'a> LiquidLoadingDriver<'a> {
    /// Returns a builder to construct a [`LiquidLoadingDriver`] structure.
    pub fn builder() -> LiquidLoadingDriverBuilder<'a> {
        LiquidLoadingDriverBuilder::default()
    }

    /// Executes LIQUiD loading.
    fn load_hamiltonians(&mut self) -> Result<(), anyhow::Error> {
        log_title("LIQUiD Hamiltonian Loading");
        liquidham_output!("");
        let params = self.parameters;
        params.log_output_display();

        let text = match (self.text.as_ref(), self.path.as_ref()) {
            (Some(text), None) => text.clone(),
            (None, Some(path)) => {
                liquidham_output!("LIQUiD file: {}", path.display());
                liquidham_output!("");
                read_liquid_text(path)?
            }
            _ => bail!("Neither or both `text` and `path` are specified."),
        };

        let outcomes = parse_records(&text, &params.parse);
        let n_records = outcomes.len();
        log::debug!("Parsed {n_records} LIQUiD records.");

        let mut hamiltonians = Vec::with_capacity(n_records);
        let mut failures = vec![];
        for (record_index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(ham) => hamiltonians.push((record_index, ham)),
                Err(err) if params.skip_failed_records => {
                    liquidham_warn!("Skipping record #{record_index}: {err}");
                    failures.push(LiquidRecordFailure {
                        record_index,
                        reason: err.to_string(),
                    });
                }
                Err(err) => {
                    return Err(anyhow::Error::new(err)
                        .context(format!("Unable to parse LIQUiD record #{record_index}.")))
                }
            }
        }

        if params.verbose >= 1 {
            for (record_index, ham) in hamiltonians.iter() {
                log_subtitle(&format!("Record #{record_index}"));
                liquidham_output!("");
                ham.log_output_display();
                liquidham_output!("");
            }
        }

        let result = LiquidLoadingResult::builder()
            .parameters(params.clone())
            .n_records(n_records)
            .hamiltonians(hamiltonians)
            .failures(failures)
            .build()
            .map_err(|err| format_err!(err))?;
        result.log_output_display();

        // Save the loaded Hamiltonians, if requested
        if let Some(name) = params.result_save_name.as_ref() {
            write_liquidham_binary(name, LiquidhamFileType::Ham, &result)?;
            liquidham_output!(
                "Parsed Hamiltonians saved as {}.{}.",
                name.display(),
                LiquidhamFileType::Ham.ext()
            );
            liquidham_output!("");
        }

        self.result = Some(result);
        Ok(())
    }
}

impl LiquidhamDriver for LiquidLoadingDriver<'_> {
    type Params = LiquidLoadingParams;

    type Outcome = LiquidLoadingResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No LIQUiD loading results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.load_hamiltonians()
    }
}
