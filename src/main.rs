use std::path::Path;

use anyhow::{self, Context};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use liquidham::interfaces::cli::{log_heading, Cli};
use liquidham::interfaces::input::Input;
use liquidham::interfaces::InputHandle;
use liquidham::io::read_liquidham_yaml;

/// Sets up diagnostics on standard error and the main `liquidham-output` stream either on
/// standard output or in `output`.
fn init_logging(output: Option<&Path>) -> Result<(), anyhow::Error> {
    let diagnostics = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {t} - {m}{n}")))
        .build();
    let main_output: Box<dyn Append> = match output {
        Some(path) => Box::new(
            FileAppender::builder()
                .append(false)
                .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                .build(path)
                .with_context(|| format!("Unable to open output file `{}`", path.display()))?,
        ),
        None => Box::new(
            ConsoleAppender::builder()
                .target(Target::Stdout)
                .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                .build(),
        ),
    };

    let config = Config::builder()
        .appender(Appender::builder().build("diagnostics", Box::new(diagnostics)))
        .appender(Appender::builder().build("main_output", main_output))
        .logger(
            Logger::builder()
                .appender("main_output")
                .additive(false)
                .build("liquidham-output", LevelFilter::Info),
        )
        .build(Root::builder().appender("diagnostics").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    init_logging(cli.output.as_deref())?;
    log_heading();

    let input: Input = read_liquidham_yaml(&cli.config).with_context(|| {
        format!(
            "Unable to read the input configuration `{}`",
            cli.config.display()
        )
    })?;
    input.handle()
}
