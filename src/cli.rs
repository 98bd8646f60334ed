use anyhow::Context;
use brokerage::{
    config::ConfigLoader,
    db::init_pool,
    migration::{Migrator, MigratorTrait},
    server::run_server,
    telemetry::init_tracing,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "brokerage",
    about = "Listings, leads and saved searches API for a real estate investment brokerage",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Apply or roll back schema migrations
    Migrate {
        #[command(subcommand)]
        direction: MigrateDirection,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum MigrateDirection {
    /// Apply all pending migrations
    Up,
    /// Roll back the most recent migration
    Down,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Apply pending migrations before serving
    #[arg(long)]
    migrate: bool,
    /// Override the configured bind address, e.g. 127.0.0.1:3000
    #[arg(long)]
    bind: Option<String>,
}

pub(crate) async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let mut config = ConfigLoader::new()
        .load()
        .context("failed to load configuration")?;
    if let Command::Serve(ServeArgs {
        bind: Some(bind), ..
    }) = &command
    {
        config.api_bind_addr = bind.clone();
    }

    init_tracing(&config)?;
    tracing::info!(profile = %config.profile, "configuration loaded");
    if let Ok(redacted) = config.redacted_json() {
        tracing::debug!(config = %redacted, "effective configuration");
    }

    let db = init_pool(&config).await?;

    match command {
        Command::Serve(args) => {
            if args.migrate {
                Migrator::up(&db, None)
                    .await
                    .context("failed to apply migrations")?;
                tracing::info!("migrations applied");
            }
            run_server(config, db).await
        }
        Command::Migrate { direction } => {
            let outcome = match direction {
                MigrateDirection::Up => Migrator::up(&db, None).await,
                MigrateDirection::Down => Migrator::down(&db, Some(1)).await,
            };
            outcome.with_context(|| format!("migration {direction:?} failed"))?;
            tracing::info!(?direction, "migration finished");
            Ok(())
        }
    }
}
