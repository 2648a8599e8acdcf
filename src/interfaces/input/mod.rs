//! Input configuration for the `liquidham` binary.

use std::path::PathBuf;

use anyhow::{self, format_err, Context};
use serde::{Deserialize, Serialize};

use crate::drivers::liquid_loading::{LiquidLoadingDriver, LiquidLoadingParams};
use crate::drivers::LiquidhamDriver;
use crate::interfaces::InputHandle;


/// A structure specifying a LIQUiD loading calculation in a YAML input file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiquidLoadingInput {
    /// The path to the LIQUiD file to be loaded.
    pub source: PathBuf,

    /// The parameters for the loading. If not specified, the defaults are used.
    #[serde(default)]
    pub parameters: LiquidLoadingParams,
}

/// A structure containing `liquidham` input parameters which can be serialised into and
/// deserialised from a YAML input file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Input {
    /// Specification for LIQUiD loading. If `None`, there is nothing to be done and handling the
    /// input fails.
    #[serde(default)]
    pub liquid_loading: Option<LiquidLoadingInput>,
}

impl InputHandle for Input {
    fn handle(&self) -> Result<(), anyhow::Error> {
        let liquid_loading = self
            .liquid_loading
            .as_ref()
            .ok_or_else(|| format_err!("No `liquid_loading` section found in the input."))?;
        let mut driver = LiquidLoadingDriver::builder()
            .parameters(&liquid_loading.parameters)
            .path(Some(liquid_loading.source.clone()))
            .build()
            .with_context(|| "Unable to construct a LIQUiD loading driver")?;
        driver.run()
    }
}
