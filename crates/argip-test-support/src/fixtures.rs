//! Backend probes for integration tests.

use std::path::Path;
use std::process::Command;

/// Variable naming an existing Postgres server for integration tests.
pub const ENV_TEST_DATABASE_URL: &str = "ARGIP_TEST_DATABASE_URL";

/// Where integration tests get their database from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostgresBackend {
    /// An existing server from [`ENV_TEST_DATABASE_URL`].
    External(String),
    /// A throwaway container.
    Container,
    /// Nothing reachable; tests skip.
    Unavailable,
}

impl PostgresBackend {
    /// Inspect the environment and the local Docker daemon.
    #[must_use]
    pub fn detect() -> Self {
        let external = std::env::var(ENV_TEST_DATABASE_URL).ok();
        Self::choose(external, docker_available)
    }

    fn choose(external: Option<String>, docker: impl FnOnce() -> bool) -> Self {
        match external.filter(|url| !url.trim().is_empty()) {
            Some(url) => Self::External(url),
            None if docker() => Self::Container,
            None => Self::Unavailable,
        }
    }
}

/// Returns `true` if a Docker daemon is reachable for integration tests.
#[must_use]
pub fn docker_available() -> bool {
    docker_available_with_host(std::env::var("DOCKER_HOST").ok())
}

fn docker_available_with_host(host: Option<String>) -> bool {
    if let Some(host) = host {
        return host
            .strip_prefix("unix://")
            .is_none_or(|path| Path::new(path).exists());
    }

    Path::new("/var/run/docker.sock").exists()
        || Command::new("docker")
            .arg("info")
            .output()
            .is_ok_and(|output| output.status.success())
}
