mod api;
mod store;

use std::io::{self, BufRead, Write as _};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use session::{
    Credentials, PasswordChange, PasswordReset, ProfileUpdate, Registration, Resolution, Role, SessionOutcome,
};

use crate::api::ReqwestAuthApi;
use crate::store::FileTokenStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `portal login` first")]
    NotSignedIn,
    #[error("{0}")]
    Session(#[from] session::SessionError),
    #[error("{0}")]
    Api(#[from] session::ApiError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not read password: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "portal", about = "Learning portal session and routing CLI")]
struct Cli {
    #[arg(long, env = "PORTAL_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[arg(long, env = "PORTAL_TOKEN_FILE", default_value = ".portal-tokens.json")]
    token_file: PathBuf,

    #[arg(long, env = "PORTAL_TIMEOUT_SECS", help = "Request timeout; unset uses the transport default")]
    timeout_secs: Option<u64>,

    #[arg(short, long, help = "Log session decisions to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the token pair.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true, help = "Read from stdin when omitted")]
        password: Option<String>,
    },
    /// Create an account (does not sign in).
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Student)]
        role: RoleArg,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true, help = "Read from stdin when omitted")]
        password: Option<String>,
    },
    /// Verify the stored session and print the user.
    Whoami,
    /// Sign out and clear stored tokens.
    Logout,
    /// Update the signed-in user's name or interface language.
    UpdateProfile {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long, help = "Language code: en, es, fr, hi, or sw")]
        language: Option<String>,
    },
    /// Change the signed-in user's password (both prompted on stdin).
    ChangePassword,
    /// Request a password reset email.
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Show which view a path resolves to for the stored session.
    Route { path: String },
    /// Check the backend health endpoint.
    Health,
    /// List the backend's advertised features.
    Features,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Student,
    Teacher,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Student => Role::Student,
            RoleArg::Teacher => Role::Teacher,
        }
    }
}

struct CliContext {
    api: ReqwestAuthApi,
    store: FileTokenStore,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN })
        .init();

    let mut builder = reqwest::Client::builder();
    if let Some(secs) = cli.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let ctx = CliContext {
        api: ReqwestAuthApi::new(builder.build()?, &cli.base_url),
        store: FileTokenStore::new(cli.token_file),
    };
    tracing::debug!(base_url = %cli.base_url, token_file = %ctx.store.path().display(), "portal cli starting");

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, email, password).await,
        Command::Register { email, full_name, role, password } => {
            run_register(&ctx, email, full_name, role.into(), password).await
        }
        Command::Whoami => run_whoami(&ctx).await,
        Command::Logout => run_logout(&ctx).await,
        Command::UpdateProfile { full_name, language } => run_update_profile(&ctx, full_name, language).await,
        Command::ChangePassword => run_change_password(&ctx).await,
        Command::ForgotPassword { email } => run_forgot_password(&ctx, email).await,
        Command::Route { path } => run_route(&ctx, &path).await,
        Command::Health => print_json(&ctx.api.health().await?),
        Command::Features => print_json(&ctx.api.features().await?),
    }
}

async fn run_login(ctx: &CliContext, email: String, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => prompt_password("password")?,
    };
    let credentials = Credentials { email: email.trim().to_owned(), password };
    let user = session::login(&ctx.store, &ctx.api, &credentials).await?;
    println!("signed in as {} ({})", user.display_name(), user.role);
    Ok(())
}

async fn run_register(
    ctx: &CliContext,
    email: String,
    full_name: String,
    role: Role,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => prompt_password("password")?,
    };
    let registration = Registration {
        email: email.trim().to_owned(),
        confirm_password: password.clone(),
        password,
        full_name: full_name.trim().to_owned(),
        role,
    };
    let user = session::register(&ctx.api, &registration).await?;
    println!("registered {} as {}; run `portal login` to sign in", user.display_name(), user.role);
    Ok(())
}

async fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    match session::verify_session(&ctx.store, &ctx.api).await {
        SessionOutcome::Verified(user) => print_json(&serde_json::to_value(&user)?),
        SessionOutcome::NoToken => Err(CliError::NotSignedIn),
        SessionOutcome::Rejected(reason) => {
            eprintln!("stored session rejected ({reason:?}); tokens cleared");
            Err(CliError::NotSignedIn)
        }
    }
}

async fn run_logout(ctx: &CliContext) -> Result<(), CliError> {
    session::logout(&ctx.store, &ctx.api).await?;
    println!("signed out");
    Ok(())
}

async fn run_update_profile(
    ctx: &CliContext,
    full_name: Option<String>,
    language: Option<String>,
) -> Result<(), CliError> {
    let update = ProfileUpdate {
        full_name: full_name.map(|name| name.trim().to_owned()),
        language: language.map(|code| code.trim().to_ascii_lowercase()),
        accessibility: None,
    };
    let user = session::update_profile(&ctx.store, &ctx.api, &update).await?;
    println!("updated {}", user.display_name());
    if let Some(lang) = user.preferred_language() {
        println!("interface language: {}", lang.name());
    }
    Ok(())
}

async fn run_change_password(ctx: &CliContext) -> Result<(), CliError> {
    let change = PasswordChange {
        current_password: prompt_password("current password")?,
        new_password: prompt_password("new password")?,
    };
    session::change_password(&ctx.store, &ctx.api, &change).await?;
    println!("password changed");
    Ok(())
}

async fn run_forgot_password(ctx: &CliContext, email: String) -> Result<(), CliError> {
    let reset = PasswordReset { email: email.trim().to_owned() };
    session::forgot_password(&ctx.api, &reset).await?;
    println!("if {} has an account, a reset link is on its way", reset.email);
    Ok(())
}

async fn run_route(ctx: &CliContext, path: &str) -> Result<(), CliError> {
    let outcome = session::verify_session(&ctx.store, &ctx.api).await;
    match session::resolve(path, outcome.user()) {
        Resolution::Render { view, params } => {
            if params.is_empty() {
                println!("render {view:?}");
            } else {
                println!("render {view:?} {params:?}");
            }
        }
        Resolution::Redirect(to) => println!("redirect {to}"),
    }
    Ok(())
}

fn prompt_password(label: &str) -> Result<String, CliError> {
    eprint!("{label}: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
