//! The demo applications and the wiring that turns them into one router.

pub mod auth;
pub mod feedback;
pub mod memos;
pub mod posts;
pub mod todos;

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::health;
use crate::middleware::{SessionGuard, Trace};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::session::{SessionStore, UserDirectory};
use crate::status::Status;
use crate::store::{JsonFileRepository, MemoryRepository, Record, Repository};

/// A fully wired application.
pub struct App {
    pub router: Router,
    /// Shared with the session guard; `main` also hands it to the sweeper.
    pub sessions: Arc<SessionStore>,
    pub todos: todos::Todos,
    pub memos: memos::Memos,
    pub feedback: feedback::Feedbacks,
}

impl App {
    /// Opens the repositories named by `config.storage` and registers every
    /// route behind the `Trace` and `SessionGuard` layers.
    pub async fn build(config: &Config) -> Result<Self> {
        let data_dir = config.storage.data_dir.as_deref();
        if let Some(dir) = data_dir {
            tokio::fs::create_dir_all(dir).await?;
            info!(dir = %dir.display(), "using file-backed repositories");
        }

        let todos: todos::Todos = open(data_dir, "todos", todos::seed()).await?;
        let memos: memos::Memos = open(data_dir, "memos", memos::seed()).await?;
        let feedback: feedback::Feedbacks = open(data_dir, "feedback", feedback::seed()).await?;

        let sessions = Arc::new(SessionStore::new(config.session.ttl()));
        let auth = Arc::new(auth::Auth {
            sessions: Arc::clone(&sessions),
            users: UserDirectory::seeded(),
            cookie_name: config.session.cookie_name.clone(),
            login_path: config.guard.login_path.clone(),
            home_path: config.guard.protected_prefix.clone(),
        });

        let router = Router::new()
            .get("/healthz", health::liveness)
            .get("/readyz", health::readiness);
        let router = todos::routes(router, Arc::clone(&todos));
        let router = memos::routes(router, Arc::clone(&memos));
        let router = feedback::routes(router, Arc::clone(&feedback));
        let router = posts::routes(router);
        let router = auth::routes(router, auth)
            .layer(Trace)
            .layer(SessionGuard::new(
                Arc::clone(&sessions),
                config.session.cookie_name.clone(),
                config.guard.protected_prefix.clone(),
                config.guard.login_path.clone(),
            ));

        Ok(Self { router, sessions, todos, memos, feedback })
    }
}

async fn open<T: Record>(
    data_dir: Option<&Path>,
    name: &str,
    seed: Vec<T>,
) -> Result<Arc<dyn Repository<T>>> {
    let repo: Arc<dyn Repository<T>> = match data_dir {
        Some(dir) => Arc::new(JsonFileRepository::open(dir.join(format!("{name}.json")), seed).await?),
        None => Arc::new(MemoryRepository::seeded(seed)),
    };
    Ok(repo)
}

// ── Shared handler helpers ────────────────────────────────────────────────────

/// Length in characters, so multi-byte text is measured the way users see it.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The `id` form field, if present and numeric.
pub(crate) fn form_id(req: &Request) -> Option<u64> {
    req.form().int("id").and_then(|id| u64::try_from(id).ok())
}

pub(crate) fn storage_failure(collection: &str, e: Error) -> Response {
    error!(collection, "repository write failed: {e}");
    Response::status(Status::InternalServerError)
}
