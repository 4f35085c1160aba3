mod app;
mod auth_commands;
mod money_commands;
mod view_commands;

use {
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "strongroom",
    about = "Strongroom — capital dashboard gate and money movement"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Serving origin used for deployment-mode classification.
    #[arg(
        long,
        global = true,
        env = "STRONGROOM_ORIGIN",
        default_value = "localhost"
    )]
    origin: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the credential service.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "STRONGROOM_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, env = "STRONGROOM_LICENSE_KEY", hide_env_values = true)]
        license_key: String,
    },
    /// Show session status.
    Status,
    /// Log out and clear the persisted session.
    Logout,
    /// Gate a navigation and show the decision.
    Open {
        /// View path, e.g. "/backtest".
        path: String,
    },
    /// Fetch the capital snapshot.
    Capital,
    /// Create a deposit checkout session.
    Deposit {
        /// Amount in minor units (cents).
        amount: i64,
        #[arg(default_value = "eur")]
        currency: String,
        /// Open the checkout URL in a browser.
        #[arg(long)]
        browse: bool,
    },
    /// Submit a withdrawal to the payout service.
    Withdraw {
        /// Amount in minor units (cents).
        amount: i64,
        #[arg(long)]
        holder: String,
        #[arg(long)]
        iban: String,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        origin = %cli.origin,
        "strongroom starting"
    );

    let app = app::App::bootstrap(&cli.origin).await;

    match cli.command {
        Commands::Login {
            username,
            password,
            license_key,
        } => auth_commands::login(&app, &username, password, license_key).await,
        Commands::Status => auth_commands::status(&app).await,
        Commands::Logout => auth_commands::logout(&app).await,
        Commands::Open { path } => view_commands::open(&app, &path).await,
        Commands::Capital => view_commands::capital(&app).await,
        Commands::Deposit {
            amount,
            currency,
            browse,
        } => money_commands::deposit(&app, amount, &currency, browse).await,
        Commands::Withdraw {
            amount,
            holder,
            iban,
        } => money_commands::withdraw(&app, amount, &holder, &iban).await,
    }
}
