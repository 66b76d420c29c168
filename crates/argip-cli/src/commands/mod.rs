//! Command handlers grouped by concern.

pub(crate) mod auth;
pub(crate) mod nuts;
pub(crate) mod ranges;
pub(crate) mod screws;

use crate::client::{AppContext, CliError, CliResult};

/// Catalog commands refuse to run without a stored token; the server is not
/// consulted until a protected call actually fails.
pub(crate) fn require_login(ctx: &AppContext) -> CliResult<()> {
    if ctx.api.tokens().is_authenticated() {
        Ok(())
    } else {
        Err(CliError::LoginRequired)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use reqwest::Client;

    use crate::cli::OutputFormat;
    use crate::client::{ApiClient, AppContext, CliResult};
    use crate::prompt::Confirm;
    use crate::session::MemoryTokenStore;

    /// Fixed answer to every confirmation prompt.
    pub(crate) struct Answer(pub(crate) bool);

    impl Confirm for Answer {
        fn confirm(&self, _question: &str) -> CliResult<bool> {
            Ok(self.0)
        }
    }

    pub(crate) fn context(
        base_url: &str,
        tokens: Arc<MemoryTokenStore>,
        answer: bool,
    ) -> AppContext {
        AppContext {
            api: ApiClient::new(Client::new(), base_url.parse().expect("valid URL"), tokens),
            output: OutputFormat::Table,
            confirm: Box::new(Answer(answer)),
        }
    }

    pub(crate) fn logged_in(base_url: &str) -> AppContext {
        context(base_url, Arc::new(MemoryTokenStore::with_token("tok")), true)
    }
}
