use clap::Parser;
use lessondeck::{
    builder::create_presentation_from_path, configuration::DeckConfiguration, error::ContextError,
    localization::Language,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct CliArguments {
    #[arg(short = 'l', long = "lesson", value_name = "json_file")]
    lesson_path: PathBuf,
    #[arg(short = 'o', long = "output", value_name = "file_path")]
    output_file_path: PathBuf,
    #[arg(long = "language", value_name = "code", default_value = "en")]
    language: String,
    #[arg(short = 'c', long = "configuration", value_name = "json_file")]
    configuration_path: Option<PathBuf>,
}

fn main() {
    if let Err(error) = fallible_main() {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

fn fallible_main() -> Result<(), ContextError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let arguments = CliArguments::parse();
    log::debug!("{:?}", arguments);

    let language: Language = arguments.language.parse()?;
    let configuration = match &arguments.configuration_path {
        Some(configuration_path) => DeckConfiguration::from_path(configuration_path)?,
        None => DeckConfiguration::default(),
    };

    let saved_path = create_presentation_from_path(
        &arguments.lesson_path,
        &arguments.output_file_path,
        language,
        &configuration,
    )?;
    log::info!("Saved the output file to the path: {:?}", saved_path);
    Ok(())
}
