mod commands;
mod config_args;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::config_args::ConfigArgs;

#[derive(Parser)]
#[clap(
    author, version, about, long_about = None,
    propagate_version = false, disable_help_subcommand = true
)]
struct Cli {
    #[clap(flatten)]
    config: ConfigArgs,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the S3 URI of a path inside a BYOB project
    ToS3 {
        /// Project ID or project name
        project: String,

        /// Path relative to the project root. End with "/" for a folder.
        #[clap(default_value_t = String::from(""))]
        path: String,
    },

    /// Print the project ID and relative path of an S3 URI
    FromS3 {
        /// S3 URI, e.g. s3://bucket/prefix/file.txt
        uri: String,

        /// Print JSON instead of tab-separated text
        #[clap(long)]
        json: bool,
    },

    /// Print the storage credential which grants access to an S3 URI
    Credential {
        /// S3 URI, e.g. s3://bucket/prefix/file.txt
        uri: String,

        /// Also print the path of the URI relative to the granted prefix
        #[clap(short, long)]
        relative: bool,

        /// Print JSON instead of tab-separated text
        #[clap(long)]
        json: bool,
    },

    /// Convert an S3 URI to an icav2:// URI
    ToIcav2 {
        /// S3 URI, e.g. s3://bucket/prefix/file.txt
        uri: String,
    },

    /// Convert an icav2:// URI to an S3 URI
    FromIcav2 {
        /// icav2:// URI, e.g. icav2://project-name/path/to/data/
        uri: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();
    let args: Cli = Cli::parse();
    let resolver = args.config.load_resolver()?;

    match args.command {
        Commands::ToS3 { project, path } => commands::to_s3(&resolver, &project, &path),
        Commands::FromS3 { uri, json } => commands::from_s3(&resolver, &uri, json),
        Commands::Credential {
            uri,
            relative,
            json,
        } => commands::credential(&resolver, &uri, relative, json),
        Commands::ToIcav2 { uri } => commands::to_icav2(&resolver, &uri),
        Commands::FromIcav2 { uri } => commands::from_icav2(&resolver, &uri),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::*;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert()
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "icav2-uri",
            "--storage-configurations",
            "a.yaml",
            "--project-mappings",
            "b.yaml",
            "--storage-credentials",
            "c.yaml",
            "to-s3",
            "P1",
            "sample.fastq",
        ])
        .unwrap();
        assert_eq!(cli.config.storage_configurations.unwrap().as_str(), "a.yaml");
        assert!(matches!(
            cli.command,
            Commands::ToS3 { project, path } if project == "P1" && path == "sample.fastq"
        ));
    }

    #[rstest]
    #[case(&["to-s3", "P1"], "to-s3")]
    #[case(&["from-s3", "s3://b/k", "--json"], "from-s3")]
    #[case(&["credential", "s3://b/k", "-r"], "credential")]
    #[case(&["to-icav2", "s3://b/k"], "to-icav2")]
    #[case(&["from-icav2", "icav2://P1/a/"], "from-icav2")]
    fn test_parse_subcommand(#[case] args: &[&str], #[case] expected: &str) {
        let cli = Cli::try_parse_from(std::iter::once("icav2-uri").chain(args.iter().copied())).unwrap();
        let actual = match cli.command {
            Commands::ToS3 { path, .. } => {
                assert_eq!(path, "");
                "to-s3"
            }
            Commands::FromS3 { json, .. } => {
                assert!(json);
                "from-s3"
            }
            Commands::Credential { relative, json, .. } => {
                assert!(relative && !json);
                "credential"
            }
            Commands::ToIcav2 { .. } => "to-icav2",
            Commands::FromIcav2 { .. } => "from-icav2",
        };
        assert_eq!(actual, expected);
    }
}
