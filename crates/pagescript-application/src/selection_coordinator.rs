//! Selection use case implementation.
//!
//! `SelectionCoordinator` drives one invocation of the script tool:
//!
//! ```text
//! Uninitialized ──begin──▶ AwaitingContext ──context──▶ Ready ──done──▶ Completed
//!                                │                       ↺ edit / example /
//!                                └──────── done ────────▶   save custom / choose
//! ```
//!
//! Both stores are loaded fresh when the context arrives. Writes to the
//! durable records run as detached background tasks; the host receives its
//! payload without waiting for them. Catalog writes land in append order: a
//! snapshot older than the last one written is dropped.

use pagescript_core::HostKey;
use pagescript_core::error::{PageScriptError, Result};
use pagescript_core::script::{
    CustomScriptCatalog, CustomScriptRepository, SavedScriptRepository, SavedScripts,
    ScriptExample,
};
use pagescript_core::session::{
    CompletionPayload, PageContext, ScriptChosenDelegate, ScriptHost, SessionState,
};
use pagescript_core::settings::SettingsStore;
use pagescript_infrastructure::{SettingsCustomScriptRepository, SettingsSavedScriptRepository};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{Mutex, oneshot};
use tokio_util::task::TaskTracker;

use crate::page_context::PageContextSender;

/// Coordinates one selection session.
///
/// # Runtime
///
/// `begin` must be called from within a Tokio runtime. Its handle is kept and
/// background writes are spawned onto it, so `save_custom_script` and `done`
/// may be called from any thread afterwards.
pub struct SelectionCoordinator {
    /// Repository for the per-site saved scripts
    saved_script_repository: Arc<dyn SavedScriptRepository>,
    /// Repository for the custom script catalog
    custom_script_repository: Arc<dyn CustomScriptRepository>,
    /// Receiver of the completion payload
    host: Arc<dyn ScriptHost>,
    state: SessionState,
    context_receiver: Option<oneshot::Receiver<PageContext>>,
    page_context: Option<PageContext>,
    host_key: Option<HostKey>,
    /// The active script buffer
    current_script: String,
    saved_scripts: SavedScripts,
    custom_scripts: CustomScriptCatalog,
    /// Detached persistence tasks
    background: TaskTracker,
    /// Runtime captured by `begin`
    runtime: Option<Handle>,
    /// Generation of the newest catalog snapshot
    catalog_generation: u64,
    /// Generation of the last catalog snapshot written; held while writing
    persisted_catalog: Arc<Mutex<u64>>,
}

impl SelectionCoordinator {
    /// Creates a coordinator in the `Uninitialized` state.
    pub fn new(
        saved_script_repository: Arc<dyn SavedScriptRepository>,
        custom_script_repository: Arc<dyn CustomScriptRepository>,
        host: Arc<dyn ScriptHost>,
    ) -> Self {
        Self {
            saved_script_repository,
            custom_script_repository,
            host,
            state: SessionState::Uninitialized,
            context_receiver: None,
            page_context: None,
            host_key: None,
            current_script: String::new(),
            saved_scripts: SavedScripts::default(),
            custom_scripts: CustomScriptCatalog::default(),
            background: TaskTracker::new(),
            runtime: None,
            catalog_generation: 0,
            persisted_catalog: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates a coordinator whose repositories share one settings namespace.
    pub fn with_settings(settings: Arc<dyn SettingsStore>, host: Arc<dyn ScriptHost>) -> Self {
        Self::new(
            Arc::new(SettingsSavedScriptRepository::new(settings.clone())),
            Arc::new(SettingsCustomScriptRepository::new(settings)),
            host,
        )
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Session title shown by the UI (the page title, empty until context arrives).
    pub fn title(&self) -> &str {
        self.page_context
            .as_ref()
            .map(|c| c.page_title.as_str())
            .unwrap_or_default()
    }

    pub fn page_context(&self) -> Option<&PageContext> {
        self.page_context.as_ref()
    }

    pub fn host_key(&self) -> Option<&HostKey> {
        self.host_key.as_ref()
    }

    pub fn current_script(&self) -> &str {
        &self.current_script
    }

    /// The catalog as loaded for this session, including entries appended since.
    pub fn custom_scripts(&self) -> &CustomScriptCatalog {
        &self.custom_scripts
    }

    // ============================================================================
    // Context delivery
    // ============================================================================

    /// Starts the session and returns the handle the host uses to deliver
    /// page context.
    pub fn begin(&mut self) -> Result<PageContextSender> {
        if self.state != SessionState::Uninitialized {
            return Err(PageScriptError::invalid_state(self.state, "begin"));
        }

        let runtime = Handle::try_current().map_err(|e| {
            PageScriptError::config(format!("Session must begin inside a Tokio runtime: {}", e))
        })?;

        let (sender, receiver) = PageContextSender::channel();
        self.context_receiver = Some(receiver);
        self.runtime = Some(runtime);
        self.state = SessionState::AwaitingContext;
        tracing::debug!("[SelectionCoordinator] Awaiting page context");

        Ok(sender)
    }

    /// Waits for the host to deliver context and enters `Ready`.
    ///
    /// There is no timeout. If the host drops its sender without delivering,
    /// the session stays in `AwaitingContext` and the returned state says so.
    pub async fn wait_for_context(&mut self) -> Result<SessionState> {
        if self.state != SessionState::AwaitingContext {
            return Err(PageScriptError::invalid_state(self.state, "wait for context"));
        }

        let Some(receiver) = self.context_receiver.take() else {
            return Err(PageScriptError::invalid_state(self.state, "wait for context"));
        };

        match receiver.await {
            Ok(context) => self.receive_context(context).await?,
            Err(_) => {
                tracing::info!("[SelectionCoordinator] Host closed without delivering page context");
            }
        }

        Ok(self.state)
    }

    /// Enters `Ready` with the given page context.
    ///
    /// Loads both stores fresh and seeds the buffer with the script saved for
    /// the page's host, or an empty script.
    pub async fn receive_context(&mut self, context: PageContext) -> Result<()> {
        if self.state != SessionState::AwaitingContext {
            return Err(PageScriptError::invalid_state(self.state, "receive page context"));
        }

        let host_key = context.host_key();
        let (saved_scripts, custom_scripts) = tokio::join!(
            self.saved_script_repository.load(),
            self.custom_script_repository.load()
        );

        self.current_script = host_key
            .as_ref()
            .and_then(|host| saved_scripts.get(host))
            .unwrap_or_default()
            .to_string();

        tracing::info!(
            "[SelectionCoordinator] Ready for host {:?} ({} saved site(s), {} custom script(s), buffer {} bytes)",
            host_key.as_ref().map(HostKey::as_str),
            saved_scripts.len(),
            custom_scripts.len(),
            self.current_script.len()
        );

        self.saved_scripts = saved_scripts;
        self.custom_scripts = custom_scripts;
        self.host_key = host_key;
        self.page_context = Some(context);
        self.context_receiver = None;
        self.state = SessionState::Ready;

        Ok(())
    }

    // ============================================================================
    // Buffer editing
    // ============================================================================

    /// Replaces the buffer with text typed by the user.
    pub fn edit_script(&mut self, text: impl Into<String>) -> Result<()> {
        self.ensure_open("edit script")?;
        self.current_script = text.into();
        Ok(())
    }

    /// Replaces the buffer with the built-in example at `index`.
    pub fn choose_example(&mut self, index: usize) -> Result<&'static ScriptExample> {
        self.ensure_open("choose example")?;
        let example = ScriptExample::get(index).ok_or_else(|| {
            PageScriptError::out_of_range(index, pagescript_core::script::BUILTIN_EXAMPLES.len())
        })?;

        self.current_script = example.script.to_string();
        tracing::debug!("[SelectionCoordinator] Example '{}' chosen", example.title);
        Ok(example)
    }

    /// Appends the current buffer to the catalog under `name` and persists the
    /// catalog in the background.
    ///
    /// The buffer is unchanged. A failed write is logged and otherwise
    /// ignored; the in-memory catalog stays authoritative for this session.
    pub fn save_custom_script(&mut self, name: impl Into<String>) -> Result<()> {
        self.ensure_ready("save custom script")?;

        self.custom_scripts
            .append(name, self.current_script.clone());
        self.catalog_generation += 1;
        let generation = self.catalog_generation;
        let snapshot = self.custom_scripts.clone();
        let repository = Arc::clone(&self.custom_script_repository);
        let persisted = Arc::clone(&self.persisted_catalog);

        self.spawn_background(async move {
            let mut last_written = persisted.lock().await;
            if *last_written > generation {
                tracing::debug!(
                    "[SelectionCoordinator] Skipping stale custom scripts snapshot #{}",
                    generation
                );
                return;
            }

            match repository.persist(&snapshot).await {
                Ok(()) => *last_written = generation,
                Err(e) => {
                    tracing::warn!("[SelectionCoordinator] Failed to persist custom scripts: {}", e)
                }
            }
        })
    }

    // ============================================================================
    // Completion
    // ============================================================================

    /// Finishes the session and hands the buffer to the host.
    ///
    /// When the page has a host key, the buffer is stored as that site's
    /// script in the background. The host is notified without waiting for
    /// that write.
    pub fn done(&mut self) -> Result<CompletionPayload> {
        self.ensure_open("complete")?;

        if let Some(host_key) = &self.host_key {
            self.saved_scripts.put(host_key, self.current_script.clone());
            let snapshot = self.saved_scripts.clone();
            let repository = Arc::clone(&self.saved_script_repository);

            self.spawn_background(async move {
                if let Err(e) = repository.save(&snapshot).await {
                    tracing::warn!("[SelectionCoordinator] Failed to save site script: {}", e);
                }
            })?;
        } else {
            tracing::debug!("[SelectionCoordinator] No host key, site script not saved");
        }

        let payload = CompletionPayload::new(self.current_script.clone());
        self.state = SessionState::Completed;
        self.host.complete_request(payload.clone());
        tracing::info!(
            "[SelectionCoordinator] Completed with {} byte script",
            payload.custom_javascript.len()
        );

        Ok(payload)
    }

    /// Waits until every background persistence task spawned so far has
    /// finished.
    pub async fn wait_for_background(&self) {
        self.background.close();
        self.background.wait().await;
        self.background.reopen();
    }

    fn spawn_background<F>(&self, task: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Some(runtime) = &self.runtime else {
            return Err(PageScriptError::internal("No runtime captured for background work"));
        };
        self.background.spawn_on(task, runtime);
        Ok(())
    }

    fn ensure_open(&self, action: &'static str) -> Result<()> {
        match self.state {
            SessionState::AwaitingContext | SessionState::Ready => Ok(()),
            state => Err(PageScriptError::invalid_state(state, action)),
        }
    }

    fn ensure_ready(&self, action: &'static str) -> Result<()> {
        match self.state {
            SessionState::Ready => Ok(()),
            state => Err(PageScriptError::invalid_state(state, action)),
        }
    }
}

impl ScriptChosenDelegate for SelectionCoordinator {
    fn on_script_chosen(&mut self, index: usize) -> Result<()> {
        self.ensure_ready("choose custom script")?;
        let chosen = self.custom_scripts.item_at(index)?;
        self.current_script = chosen.script.clone();
        tracing::debug!("[SelectionCoordinator] Custom script #{} chosen", index);
        Ok(())
    }
}
