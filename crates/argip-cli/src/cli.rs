//! Argument parsing and command dispatch.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::Url;
use uuid::Uuid;

use crate::client::{ApiClient, AppContext, CliResult, build_http_client, parse_url};
use crate::commands::{auth, nuts, ranges, screws};
use crate::prompt::TerminalConfirm;
use crate::session::FileTokenStore;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Parses CLI arguments and executes the requested command. Returns the process
/// exit code: 0 on success, 2 for validation failures, 3 for everything else.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let trace_id = Uuid::new_v4().to_string();

    let result = match build_context(&cli, &trace_id) {
        Ok(ctx) => dispatch(cli.command, &ctx).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn build_context(cli: &Cli, trace_id: &str) -> CliResult<AppContext> {
    let http = build_http_client(Duration::from_secs(cli.timeout), trace_id)?;
    let token_path = cli
        .token_file
        .clone()
        .unwrap_or_else(FileTokenStore::default_path);
    let tokens = Arc::new(FileTokenStore::new(token_path));
    Ok(AppContext {
        api: ApiClient::new(http, cli.api_url.clone(), tokens),
        output: cli.output,
        confirm: Box::new(TerminalConfirm),
    })
}

async fn dispatch(command: Command, ctx: &AppContext) -> CliResult<()> {
    match command {
        Command::Register(args) => auth::handle_register(ctx, args).await,
        Command::Login(args) => auth::handle_login(ctx, args).await,
        Command::Logout => auth::handle_logout(ctx).await,
        Command::Me => auth::handle_me(ctx).await,
        Command::Ranges(command) => match command {
            RangesCommand::List => ranges::handle_list(ctx).await,
            RangesCommand::Get(args) => ranges::handle_get(ctx, args).await,
            RangesCommand::Create(args) => ranges::handle_create(ctx, args).await,
            RangesCommand::Update(args) => ranges::handle_update(ctx, args).await,
            RangesCommand::Delete(args) => ranges::handle_delete(ctx, args).await,
        },
        Command::Nuts(command) => match command {
            NutsCommand::List(args) => nuts::handle_list(ctx, args).await,
            NutsCommand::Get(args) => nuts::handle_get(ctx, args).await,
            NutsCommand::Create(args) => nuts::handle_create(ctx, args).await,
            NutsCommand::Update(args) => nuts::handle_update(ctx, args).await,
            NutsCommand::Delete(args) => nuts::handle_delete(ctx, args).await,
        },
        Command::Screws(command) => match command {
            ScrewsCommand::List => screws::handle_list(ctx).await,
            ScrewsCommand::Create(args) => screws::handle_create(ctx, args).await,
            ScrewsCommand::Delete(args) => screws::handle_delete(ctx, args).await,
            ScrewsCommand::Diameters => screws::handle_diameters(ctx).await,
            ScrewsCommand::Lengths(args) => screws::handle_lengths(ctx, args).await,
        },
    }
}

#[derive(Parser)]
#[command(name = "argip", about = "Terminal client for the Argip inventory service")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "ARGIP_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    api_url: Url,
    #[arg(
        long,
        global = true,
        env = "ARGIP_TOKEN_FILE",
        help = "Where the bearer token is kept (default: $HOME/.argip/token)"
    )]
    token_file: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "ARGIP_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Create an account.
    Register(RegisterArgs),
    /// Log in and store the bearer token.
    Login(LoginArgs),
    /// Revoke the session and forget the stored token.
    Logout,
    /// Show the logged-in user.
    Me,
    /// Measurement ranges.
    #[command(subcommand)]
    Ranges(RangesCommand),
    /// Nuts priced within a range.
    #[command(subcommand)]
    Nuts(NutsCommand),
    /// Screw length reference data and the length calculator.
    #[command(subcommand)]
    Screws(ScrewsCommand),
}

#[derive(Args)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "ARGIP_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,
}

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long, env = "ARGIP_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,
}

#[derive(Args)]
pub(crate) struct IdArgs {
    #[arg(help = "Record identifier")]
    pub(crate) id: i64,
}

#[derive(Args)]
pub(crate) struct DeleteArgs {
    #[arg(help = "Record identifier")]
    pub(crate) id: i64,
    #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
    pub(crate) yes: bool,
}

#[derive(Subcommand)]
pub(crate) enum RangesCommand {
    List,
    Get(IdArgs),
    Create(RangeCreateArgs),
    Update(RangeUpdateArgs),
    Delete(DeleteArgs),
}

#[derive(Args)]
pub(crate) struct RangeCreateArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long, help = "Lower bound")]
    pub(crate) od: f64,
    #[arg(long = "do", help = "Upper bound")]
    pub(crate) do_: f64,
}

#[derive(Args)]
pub(crate) struct RangeUpdateArgs {
    #[arg(help = "Range identifier")]
    pub(crate) id: i64,
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long, help = "Lower bound")]
    pub(crate) od: Option<f64>,
    #[arg(long = "do", help = "Upper bound")]
    pub(crate) do_: Option<f64>,
}

#[derive(Subcommand)]
pub(crate) enum NutsCommand {
    List(NutListArgs),
    Get(IdArgs),
    Create(NutCreateArgs),
    Update(NutUpdateArgs),
    Delete(DeleteArgs),
}

#[derive(Args, Default)]
pub(crate) struct NutListArgs {
    #[arg(long, help = "Only list nuts belonging to this range")]
    pub(crate) range_id: Option<i64>,
}

#[derive(Args)]
pub(crate) struct NutCreateArgs {
    #[arg(long)]
    pub(crate) range_id: i64,
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) diameter: f64,
    #[arg(long)]
    pub(crate) price: f64,
}

#[derive(Args, Default)]
pub(crate) struct NutUpdateArgs {
    #[arg(help = "Nut identifier")]
    pub(crate) id: i64,
    #[arg(long)]
    pub(crate) range_id: Option<i64>,
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) diameter: Option<f64>,
    #[arg(long)]
    pub(crate) price: Option<f64>,
}

#[derive(Subcommand)]
pub(crate) enum ScrewsCommand {
    List,
    Create(ScrewCreateArgs),
    Delete(DeleteArgs),
    /// Distinct diameters, ascending.
    Diameters,
    /// Lengths available for one diameter, ascending.
    Lengths(LengthsArgs),
}

#[derive(Args)]
pub(crate) struct ScrewCreateArgs {
    #[arg(long)]
    pub(crate) diameter: f64,
    #[arg(long)]
    pub(crate) length: f64,
}

#[derive(Args)]
pub(crate) struct LengthsArgs {
    #[arg(long)]
    pub(crate) diameter: f64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_anywhere() {
        let cli = Cli::try_parse_from([
            "argip",
            "ranges",
            "create",
            "--name",
            "M6-M10",
            "--od",
            "6",
            "--do",
            "10",
            "--output",
            "json",
            "--api-url",
            "http://api.test:8000",
        ])
        .expect("parse");
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.api_url.as_str(), "http://api.test:8000/");
        let Command::Ranges(RangesCommand::Create(args)) = cli.command else {
            panic!("expected ranges create");
        };
        assert_eq!(args.name, "M6-M10");
        assert!((args.do_ - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn delete_accepts_short_yes_flag() {
        let cli = Cli::try_parse_from(["argip", "nuts", "delete", "4", "-y"]).expect("parse");
        let Command::Nuts(NutsCommand::Delete(args)) = cli.command else {
            panic!("expected nuts delete");
        };
        assert_eq!(args.id, 4);
        assert!(args.yes);
    }

    #[test]
    fn context_uses_the_configured_token_file() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("token");
        let cli = Cli::try_parse_from([
            "argip",
            "me",
            "--token-file",
            path.to_str().expect("utf-8 path"),
        ])
        .expect("parse");
        let ctx = build_context(&cli, "trace").expect("context");
        ctx.api.tokens().set("abc").expect("store");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "abc");
    }
}
