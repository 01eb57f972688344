use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, ValueHint};

/// Command-line definition of the `twinfer` binary.
pub fn build_cli() -> Command {
    Command::new("twinfer")
        .version(clap::crate_version!())
        .about("Serve random forest and gradient boosting classifiers over HTTP")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Load both model artifacts and serve POST /predict")
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON server configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("host")
                        .long("host")
                        .help("Interface to bind. Overrides the configuration file.")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::Hostname),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .help("Port to bind. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(u16)),
                )
                .arg(
                    Arg::new("random_forest")
                        .long("random-forest")
                        .help("Path to the random forest artifact (*.json)")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("gradient_boosting")
                        .long("gradient-boosting")
                        .help("Path to the gradient boosting artifact (*.json)")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("workers")
                        .short('w')
                        .long("workers")
                        .help("Number of HTTP worker threads. Defaults to the number of CPUs.")
                        .value_parser(clap::builder::RangedU64ValueParser::<usize>::new().range(1..)),
                )
                .arg(
                    Arg::new("no_schema_check")
                        .long("no-schema-check")
                        .help("Do not require both models to share the same feature names.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Validate a model artifact and print a JSON summary")
                .arg(
                    Arg::new("artifact")
                        .help("Path to the model artifact (*.json)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
}
