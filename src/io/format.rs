//! Nice `liquidham` output formatting.

use std::fmt;

const LIQUIDHAM_BANNER_LENGTH: usize = 79;

/// Logs a warning to the `liquidham-output` logger.
macro_rules! liquidham_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::warn!(target: "liquidham-output", $fmt, $($($arg)*)?); }
}

/// Logs a main output line to the `liquidham-output` logger.
macro_rules! liquidham_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "liquidham-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {liquidham_output, liquidham_warn};

/// Logs a nicely formatted section title to the `liquidham-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(LIQUIDHAM_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    liquidham_output!("┌──{bar}──┐");
    liquidham_output!("│§ {title:^length$} §│");
    liquidham_output!("└──{bar}──┘");
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Logs a nicely formatted subtitle to the `liquidham-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    liquidham_output!("{}", subtitle);
    liquidham_output!("{}", bar);
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging `liquidham` outputs nicely.
pub(crate) trait LiquidhamOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            liquidham_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> LiquidhamOutput for T where T: fmt::Debug + fmt::Display {}
