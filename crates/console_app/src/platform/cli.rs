use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::config::DEFAULT_CONFIG_FILENAME;

/// Terminal console for the job controller REST API.
#[derive(Parser, Debug)]
#[command(name = "job_console")]
#[command(version, about = "Browse jobs, results and artifacts of a job controller", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long = "config", default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// API base URL (e.g., http://localhost:8080/api)
    #[arg(short = 'u', long = "base-url")]
    pub base_url: Option<String>,

    /// Directory downloads are saved into
    #[arg(long = "download-dir")]
    pub download_dir: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the backend application name and version
    About,
    /// List all jobs
    Jobs,
    /// Show the detail panel of one job
    Show { uuid: String },
    /// Show the result of a job
    Result {
        uuid: String,
        /// Ask the backend for the decoded result
        #[arg(long)]
        decode: bool,
    },
    /// Show the artifact of a job
    Artifact { uuid: String },
    /// Save a job resource to the download directory
    Download {
        uuid: String,
        /// Resource path below the job
        #[arg(long, default_value = "/artifact")]
        api: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn result_accepts_decode_flag() {
        let cli = Cli::parse_from(["job_console", "-u", "http://h/api", "result", "u1", "--decode"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://h/api"));
        assert_eq!(
            cli.command,
            Command::Result {
                uuid: "u1".into(),
                decode: true
            }
        );
    }

    #[test]
    fn download_defaults_to_artifact() {
        let cli = Cli::parse_from(["job_console", "download", "u1"]);
        assert_eq!(
            cli.command,
            Command::Download {
                uuid: "u1".into(),
                api: "/artifact".into()
            }
        );
    }
}
