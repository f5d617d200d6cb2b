use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use venue_service::{CommentService, TicketService};
use venue_storage_sqlite::SqliteStorage;

use crate::config::Config;

/// Wires the config, the sqlite storage, and the services together for
/// one invocation. Collaborators are shared as trait objects; the raw
/// store stays reachable for seeding users and events.
pub struct App {
    pub root: PathBuf,
    pub cfg: Config,
    pub store: Arc<SqliteStorage>,
    pub comments: CommentService,
    pub tickets: TicketService,
}

impl App {
    pub fn open(root: PathBuf) -> Result<Self> {
        let cfg_path = Config::config_path(&root);
        let cfg = if cfg_path.exists() {
            Config::load_from(&cfg_path)?
        } else {
            let project_id = root.file_name().and_then(|s| s.to_str()).unwrap_or("venue");
            let cfg = Config::default_for_dir(project_id);
            cfg.save_to(&cfg_path)?;
            cfg
        };

        let store = Arc::new(SqliteStorage::open(&cfg.db_path(&root))?);
        let comments = CommentService::new(store.clone(), store.clone());
        let tickets = TicketService::new(store.clone(), store.clone());

        Ok(Self {
            root,
            cfg,
            store,
            comments,
            tickets,
        })
    }

    pub fn init(root: &Path) -> Result<()> {
        let cfg_path = Config::config_path(root);
        if !cfg_path.exists() {
            let project_id = root.file_name().and_then(|s| s.to_str()).unwrap_or("venue");
            Config::default_for_dir(project_id).save_to(&cfg_path)?;
        }
        let cfg = Config::load_from(&cfg_path)?;
        let _ = SqliteStorage::open(&cfg.db_path(root))?;
        Ok(())
    }
}
