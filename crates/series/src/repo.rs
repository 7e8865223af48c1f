use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

const GITHUB_URL: &str = "https://github.com";

/// Identifies a repository on the code hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> RepoId {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    pub fn url(&self) -> String {
        format!("{GITHUB_URL}/{owner}/{repo}", owner = self.owner, repo = self.repo)
    }
}

impl Display for RepoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
