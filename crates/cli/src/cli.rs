use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use repostats_series::RepoId;
use repostats_series::fetch::StatsClient;

use crate::error::CliError;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render the statistics dashboard of a repository into an HTML page.
    Render(RenderArgs),
    /// Print the current number of open issues per label, highest first.
    Labels(LabelsArgs),
}

#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub(crate) endpoint: EndpointArgs,

    /// Read the stars, issues and pull requests series from a JSON file
    /// instead of the statistics endpoint.
    ///
    /// The file holds the `stars_by_day`, `issues_by_day` and
    /// `pulls_by_day` arrays of `[date, count]` rows.
    #[arg(short, long, value_parser(parse_file))]
    pub(crate) page_data: Option<PathBuf>,

    /// Specify the path where the `index.html` page will be created.
    /// If the output path is not specified then the current working
    /// directory is used.
    #[arg(short, long, value_parser(parse_path))]
    pub(crate) output_path: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct LabelsArgs {
    #[command(flatten)]
    pub(crate) endpoint: EndpointArgs,
}

#[derive(Args)]
pub(crate) struct EndpointArgs {
    /// The URL of the repository's dashboard page. Its statistics are
    /// served from `<url>/json`.
    #[arg(short, long, env = "REPOSTATS_URL")]
    pub(crate) url: String,

    /// The owner of the repository. Defaults to the owner reported by the
    /// statistics endpoint.
    #[arg(long, env = "REPOSTATS_OWNER")]
    pub(crate) owner: Option<String>,

    /// The name of the repository. Defaults to the name reported by the
    /// statistics endpoint.
    #[arg(long, env = "REPOSTATS_REPO")]
    pub(crate) repo: Option<String>,

    /// Give up on a request after this many seconds. Requests wait
    /// indefinitely by default.
    #[arg(short, long)]
    pub(crate) timeout_secs: Option<u64>,
}

impl EndpointArgs {
    pub(crate) fn client(&self) -> Result<StatsClient, CliError> {
        let timeout = self.timeout_secs.map(Duration::from_secs);
        let client = StatsClient::new(&self.url, timeout)?;
        Ok(client)
    }

    /// Whether both the owner and the name of the repository are given on
    /// the command line.
    pub(crate) fn names_repo(&self) -> bool {
        self.owner.is_some() && self.repo.is_some()
    }

    /// The repository named on the command line, falling back to the one
    /// the endpoint reported.
    pub(crate) fn repo_id(
        &self,
        reported_owner: Option<String>,
        reported_repo: Option<String>,
    ) -> Result<RepoId, CliError> {
        let owner = self.owner.clone().or(reported_owner).ok_or_else(|| {
            CliError::Config(String::from(
                "the repository owner is unknown; specify it with --owner",
            ))
        })?;
        let repo = self.repo.clone().or(reported_repo).ok_or_else(|| {
            CliError::Config(String::from(
                "the repository name is unknown; specify it with --repo",
            ))
        })?;

        Ok(RepoId::new(owner, repo))
    }
}

fn parse_path(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.exists() {
        return Err(format!("The `{}` path does not exist.", path.display()));
    }

    if !path.is_dir() {
        return Err(format!(
            "The `{}` path must point to a directory.",
            path.display()
        ));
    }

    Ok(path)
}

fn parse_file(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.is_file() {
        return Err(format!("The `{}` path must point to a file.", path.display()));
    }

    Ok(path)
}

pub(crate) trait PathExt {
    fn or_current_dir(self) -> Result<PathBuf, CliError>;
}

impl PathExt for Option<PathBuf> {
    fn or_current_dir(self) -> Result<PathBuf, CliError> {
        if let Some(path) = self {
            Ok(path)
        } else {
            env::current_dir().map_err(|e| CliError::Path(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn endpoint(owner: Option<&str>, repo: Option<&str>) -> EndpointArgs {
        EndpointArgs {
            url: String::from("https://stats.example.com/danvk/dygraphs"),
            owner: owner.map(String::from),
            repo: repo.map(String::from),
            timeout_secs: None,
        }
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_render_command() {
        let cli = Cli::try_parse_from([
            "repostats",
            "render",
            "--url",
            "https://stats.example.com/danvk/dygraphs",
            "--owner",
            "danvk",
            "--timeout-secs",
            "10",
        ])
        .expect("valid arguments");

        let Commands::Render(args) = cli.command else {
            panic!("expected the render command");
        };
        assert_eq!(args.endpoint.owner.as_deref(), Some("danvk"));
        assert_eq!(args.endpoint.timeout_secs, Some(10));
        assert!(args.page_data.is_none());
        assert!(args.output_path.is_none());
    }

    #[test]
    fn output_path_must_be_a_directory() -> Result<(), std::io::Error> {
        let file = tempfile::NamedTempFile::new()?;
        let path = file.path().to_string_lossy().into_owned();

        assert!(parse_path(&path).is_err());
        assert!(parse_file(&path).is_ok());
        assert!(parse_path("/nonexistent/repostats").is_err());

        Ok(())
    }

    #[test]
    fn repo_id_prefers_command_line() -> Result<(), CliError> {
        let args = endpoint(Some("danvk"), None);

        let repo = args.repo_id(Some(String::from("someone")), Some(String::from("dygraphs")))?;

        assert_eq!(repo, RepoId::new("danvk", "dygraphs"));

        Ok(())
    }

    #[test]
    fn repo_id_falls_back_to_reported_repo() -> Result<(), CliError> {
        let args = endpoint(None, None);

        let repo = args.repo_id(Some(String::from("danvk")), Some(String::from("dygraphs")))?;

        assert!(!args.names_repo());
        assert_eq!(repo, RepoId::new("danvk", "dygraphs"));

        Ok(())
    }

    #[test]
    fn repo_id_requires_an_owner() {
        let args = endpoint(None, Some("dygraphs"));

        let result = args.repo_id(None, None);

        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
