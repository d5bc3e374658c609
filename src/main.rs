use std::process::ExitCode;
use std::sync::Arc;

use auth_sample::config::{AppConfig, ConfigError};
use auth_sample::controller::{LoginController, LoginForm};
use auth_sample::credentials::{CredentialStore, FileCredentialStore};
use auth_sample::handoff::{HandoffError, HandoffParams};
use auth_sample::navigation::{Navigator, TerminalNavigator};
use auth_sample::provider::openfort::OpenfortClient;
use auth_sample::provider::{IdentityProvider, OAuthProvider, ProviderError, ProviderFactory};
use auth_sample::routes;
use auth_sample::state::AppState;
use auth_sample::status::{StatusSignal, StatusTracker};
use clap::{Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("identity provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("handoff URL rejected: {0}")]
    Handoff(#[from] HandoffError),
    #[error("handoff URL carries no credentials (need access_token, refresh_token and player_id)")]
    NoHandoffCredentials,
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "auth-sample", about = "Sample login flows against an Openfort-style identity provider")]
struct Cli {
    /// Public origin of the app; OAuth providers redirect to `<app-url>/login`.
    #[arg(long)]
    app_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the login pages.
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTH_SAMPLE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Print the authorization URL for a federated provider.
    Oauth { provider: OAuthProvider },
    /// Continue with a wallet instead.
    Wallet,
    /// Complete a sign-in from a redirect URL carrying handoff tokens.
    Handoff { url: String },
    /// Show the current session.
    Whoami,
    /// Forget the stored session.
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "auth-sample failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let port = match &cli.command {
        Command::Serve { port } => *port,
        _ => None,
    };
    let config = AppConfig::from_env()?.with_overrides(cli.app_url, port);
    let store = Arc::new(FileCredentialStore::new(&config.credentials_path));
    let client = Arc::new(OpenfortClient::new(&config.provider, Arc::clone(&store) as Arc<dyn CredentialStore>)?);
    let provider = Arc::clone(&client) as Arc<dyn IdentityProvider>;

    let status = Arc::new(StatusTracker::new());
    let navigator = Arc::new(TerminalNavigator::new(&config.app_url)) as Arc<dyn Navigator>;
    let controller = LoginController::new(Arc::clone(&provider), navigator, Arc::clone(&status), &config.app_url);

    match cli.command {
        Command::Serve { .. } => serve(&config, client).await,
        Command::Login { email, password } => {
            let result = controller.submit(&LoginForm { email, password }).await;
            report(&status.current());
            result.map(|_| ()).map_err(CliError::from)
        }
        Command::Oauth { provider } => {
            controller.start_oauth(provider).await?;
            println!("after signing in you will be sent to {}", controller.login_url());
            Ok(())
        }
        Command::Wallet => {
            controller.connect_wallet();
            Ok(())
        }
        Command::Handoff { url } => {
            let params = HandoffParams::from_url(&url)?;
            if params.credentials().is_none() {
                return Err(CliError::NoHandoffCredentials);
            }
            let outcome = controller.bootstrap(&params).await;
            report(&status.current());
            if outcome.handed_off {
                tracing::info!(path = %store.path().display(), "session stored");
            }
            Ok(())
        }
        Command::Whoami => {
            let user = provider.get_user().await?;
            println!("{}", user.email().unwrap_or(&user.id));
            println!("player {}", user.id);
            Ok(())
        }
        Command::Logout => {
            client.log_out().await?;
            Ok(())
        }
    }
}

async fn serve(config: &AppConfig, client: Arc<OpenfortClient>) -> Result<(), CliError> {
    let state = AppState::new(client as Arc<dyn ProviderFactory>, &config.app_url);
    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, app_url = %config.app_url, "auth-sample listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn report(status: &StatusSignal) {
    if let Some(title) = status.title() {
        println!("[{}] {title}", status.kind());
    }
}
