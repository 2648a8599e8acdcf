//! Reading and writing of LIQUiD text files and `liquidham` configuration and result files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{self, ensure, format_err, Context};
use bincode;
use serde::{de::DeserializeOwned, Serialize};
use serde_yaml;


pub(crate) mod format;

/// An enumerated type for `liquidham` file types.
pub enum LiquidhamFileType {
    /// Variant for binary files containing parsed Hamiltonians.
    Ham,
}

impl LiquidhamFileType {
    /// Returns the extension of the file type.
    pub fn ext(&self) -> String {
        match self {
            LiquidhamFileType::Ham => "liquidham.ham".to_string(),
        }
    }
}

/// Reads the entire contents of a LIQUiD-format text file.
///
/// The format is plain ASCII, so any non-ASCII byte is treated as a sign of a corrupt or
/// mistaken input file.
///
/// # Arguments
///
/// * `name` - The path to the file to be read in.
///
/// # Returns
///
/// A `Result` containing the file contents.
pub fn read_liquid_text<P: AsRef<Path>>(name: P) -> Result<String, anyhow::Error> {
    let path = name.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Unable to read `{}`", path.display()))?;
    ensure!(
        bytes.is_ascii(),
        "`{}` contains non-ASCII bytes and is not a valid LIQUiD file.",
        path.display()
    );
    String::from_utf8(bytes).map_err(|err| format_err!(err))
}

/// Reads a `liquidham` binary file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (without `liquidham`-specific extensions).
/// * `file_type` - The type of the `liquidham` file to be read in.
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_liquidham_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: LiquidhamFileType,
) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut reader = BufReader::new(File::open(path).map_err(|err| format_err!(err))?);
    bincode::deserialize_from(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes into a `liquidham` binary file.
///
/// # Arguments
///
/// * `name` - The name of the file to be written (without `liquidham`-specific extensions).
/// * `file_type` - The type of the `liquidham` file to be written.
///
/// # Returns
///
/// A `Result` indicating if the serialisation and writing processes have been successful.
pub fn write_liquidham_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: LiquidhamFileType,
    value: &T,
) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, value).map_err(|err| format_err!(err))
}

/// Reads a `liquidham` configuration YAML file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (with its `.yml` or `.yaml` extension).
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_liquidham_yaml<T, P: AsRef<Path>>(name: P) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(File::open(name).map_err(|err| format_err!(err))?);
    serde_yaml::from_reader(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes into a `liquidham` configuration YAML file.
///
/// # Arguments
///
/// * `name` - The name of the YAML file to be written (without extensions). The resulting file
/// will have the `.yml` extension.
///
/// # Returns
///
/// A `Result` indicating if the serialisation and writing processes have been successful.
pub fn write_liquidham_yaml<T, P: AsRef<Path>>(name: P, value: &T) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension("yml");
    let mut writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(&mut writer, value).map_err(|err| format_err!(err))
}
