mod db;
mod entities;
mod error;
mod follows;
mod graphql;
mod models;
mod persist;
mod profile;
mod rooms;
mod routes;
mod schema;
mod socials;
mod state;
mod viewer;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use state::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Database path (":memory:" for a throwaway database)
    #[arg(short, long, env = "DATABASE_PATH", default_value = "dogehouse.db")]
    db_path: String,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let args = Args::parse();
    let port = args.port;

    tracing::info!("Initializing database at {}", args.db_path);
    let db = match db::connect(&args.db_path, args.max_connections).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = schema::verify_users_table(&db).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }

    let app = routes::router(AppState::new(db));

    let addr = format!("0.0.0.0:{port}");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on http://localhost:{port}");
    tracing::info!("GraphQL playground: http://localhost:{port}/api/graphql");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {e}");
    }
}
