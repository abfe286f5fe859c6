//! The demo applications as one service.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl http://localhost:3000/todos
//!   curl -X POST http://localhost:3000/todos/create -d 'text=buy milk'
//!   curl 'http://localhost:3000/api/memos?q=router'
//!   curl -X POST http://localhost:3000/api/memos -d '{"text":"hello"}'
//!   curl -i -X POST http://localhost:3000/login \
//!        -d 'email=hong@test.com&password=password123'
//!   curl -i http://localhost:3000/dashboard          # 302 → /login

use tracing::info;
use tracing_subscriber::EnvFilter;

use trellis::apps::App;
use trellis::{Config, Server};

#[tokio::main]
async fn main() -> Result<(), trellis::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let addr = config.bind_addr()?;

    let app = App::build(&config).await?;
    let sweeper = app.sessions.spawn_sweeper(config.session.sweep_interval());
    info!(
        ttl_secs = config.session.ttl_secs,
        protected = %config.guard.protected_prefix,
        "session guard installed",
    );

    let served = Server::bind(addr).serve(app.router).await;
    sweeper.abort();
    served
}
