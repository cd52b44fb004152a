use std::sync::Arc;

use athenaeum_session::{
    AuthSession, BackendError, ClientConfig, ConfigError, Credentials, HttpBackend, NavigationOutcome, Navigator,
    RouteTable, SessionStore,
};
use clap::{Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("backend client failed: {0}")]
    Backend(#[from] BackendError),
    #[error("--username and --password must be given together")]
    IncompleteCredentials,
    #[error("login rejected: {0}")]
    LoginRejected(String),
}

#[derive(Parser, Debug)]
#[command(name = "athenaeum", about = "Athenaeum session client")]
struct Cli {
    #[arg(long, env = "ATHENAEUM_BASE_URL")]
    base_url: Option<String>,

    /// Log in with these credentials before running the command.
    #[arg(long)]
    username: Option<String>,

    #[arg(long, env = "ATHENAEUM_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the backend's view of this session.
    Status,
    /// Attempt a navigation and print where it lands.
    Visit { path: String },
    /// Log out and return to the login route.
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }

    let backend = Arc::new(HttpBackend::new(&config)?);
    let store = Arc::new(SessionStore::new());
    let session = Arc::new(AuthSession::new(backend, store.clone()));
    let routes = RouteTable::for_login(&config.login_path);
    let navigator = Navigator::new(routes, session.clone(), config.login_path.clone());

    match (cli.username, cli.password) {
        (Some(username), Some(password)) => {
            let result = session.login(&Credentials::new(username, password)).await;
            if !result.success {
                return Err(CliError::LoginRejected(result.message.unwrap_or_default()));
            }
            println!("logged in as {}", store.current_user().unwrap_or_default());
        }
        (None, None) => {}
        _ => return Err(CliError::IncompleteCredentials),
    }

    match cli.command {
        Command::Status => {
            let info = session.get_session_info().await;
            match info.username {
                Some(username) if info.authenticated => println!("authenticated as {username}"),
                _ if info.authenticated => println!("authenticated"),
                _ => println!("not authenticated"),
            }
            for label in store.labels() {
                println!("  label: {label}");
            }
        }
        Command::Visit { path } => print_outcome(&navigator.navigate(&path).await),
        Command::Logout => {
            let (result, outcome) = navigator.logout().await;
            if let Some(message) = result.message {
                println!("{message}");
            }
            print_outcome(&outcome);
        }
    }

    session.shutdown();
    Ok(())
}

fn print_outcome(outcome: &NavigationOutcome) {
    match outcome {
        NavigationOutcome::Entered(path) => println!("entered {path}"),
        NavigationOutcome::Redirected { from, to } => println!("{from} redirected to {to}"),
        NavigationOutcome::NotFound(path) => println!("no route for {path}"),
        NavigationOutcome::Cancelled => println!("navigation cancelled"),
        NavigationOutcome::TooManyRedirects(path) => println!("too many redirects from {path}"),
    }
}
