//! Incremental rebuilds driven by file-system events.
//!
//! Events arrive in bursts (an editor save is often several writes and a
//! rename). Rebuilds are serialized through a [`RebuildGate`]: at most one
//! rebuild runs at a time, and any number of events that arrive while it runs
//! collapse into a single follow-up rebuild.
//!
//! ```text
//!            request()               request()
//!   Idle ───────────────▶ Running ───────────────▶ RunningDirty
//!     ▲                     │  ▲                        │
//!     └──── finish()=false ─┘  └──── finish()=true ─────┘
//! ```

use crate::{ArtifactStore, BuildSummary, Error, IndexBuilder, Result};
use notify::event::{CreateKind, ModifyKind, RemoveKind};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Something that regenerates the artifact.
pub trait Rebuild: Send + Sync {
    /// Run one full rebuild.
    fn rebuild(&self) -> Result<BuildSummary>;
}

/// Builds the index and saves it.
#[derive(Debug, Clone)]
pub struct IndexPipeline {
    builder: IndexBuilder,
    store: ArtifactStore,
}

impl IndexPipeline {
    /// Pipeline writing what `builder` produces into `store`.
    pub const fn new(builder: IndexBuilder, store: ArtifactStore) -> Self {
        Self { builder, store }
    }

    /// The builder.
    pub const fn builder(&self) -> &IndexBuilder {
        &self.builder
    }

    /// The store.
    pub const fn store(&self) -> &ArtifactStore {
        &self.store
    }
}

impl Rebuild for IndexPipeline {
    fn rebuild(&self) -> Result<BuildSummary> {
        let report = self.builder.build()?;
        self.store.save(&report.records)?;
        Ok(BuildSummary::from(&report))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Idle,
    Running,
    RunningDirty,
}

/// At-most-one-pending rebuild state machine.
#[derive(Debug)]
pub struct RebuildGate {
    state: Mutex<GateState>,
    idle: Condvar,
}

impl Default for RebuildGate {
    fn default() -> Self {
        Self {
            state: Mutex::new(GateState::Idle),
            idle: Condvar::new(),
        }
    }
}

impl RebuildGate {
    /// Ask for a rebuild. Returns `true` if the caller should start one now.
    pub fn request(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            GateState::Idle => {
                *state = GateState::Running;
                true
            },
            GateState::Running | GateState::RunningDirty => {
                *state = GateState::RunningDirty;
                false
            },
        }
    }

    /// Report a finished rebuild. Returns `true` if another one is owed.
    pub fn finish(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == GateState::RunningDirty {
            *state = GateState::Running;
            true
        } else {
            *state = GateState::Idle;
            self.idle.notify_all();
            false
        }
    }

    /// Whether no rebuild is running.
    pub fn is_idle(&self) -> bool {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) == GateState::Idle
    }

    /// Block until idle or until `timeout` passes. Returns whether idle.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let (state, _) = self
            .idle
            .wait_timeout_while(state, timeout, |s| *s != GateState::Idle)
            .unwrap_or_else(PoisonError::into_inner);
        *state == GateState::Idle
    }

    fn reset(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = GateState::Idle;
        self.idle.notify_all();
    }
}

/// Called after every successful rebuild.
pub type RebuildListener = Arc<dyn Fn(&BuildSummary) + Send + Sync>;

struct Shared<R> {
    rebuilder: R,
    gate: RebuildGate,
    settle: Duration,
    on_rebuilt: RebuildListener,
}

/// Runs rebuilds on a worker thread, coalescing requests while one is running.
pub struct Coalescer<R> {
    shared: Arc<Shared<R>>,
}

impl<R> Clone for Coalescer<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R> fmt::Debug for Coalescer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coalescer")
            .field("gate", &self.shared.gate)
            .field("settle", &self.shared.settle)
            .finish_non_exhaustive()
    }
}

impl<R: Rebuild + 'static> Coalescer<R> {
    /// Coalescer that waits `settle` before each rebuild and then calls `on_rebuilt`.
    pub fn new(rebuilder: R, settle: Duration, on_rebuilt: RebuildListener) -> Self {
        Self {
            shared: Arc::new(Shared {
                rebuilder,
                gate: RebuildGate::default(),
                settle,
                on_rebuilt,
            }),
        }
    }

    /// Request a rebuild. Returns `true` when this call started a worker.
    pub fn trigger(&self) -> bool {
        if !self.shared.gate.request() {
            debug!("rebuild already running, marked dirty");
            return false;
        }

        let shared = Arc::clone(&self.shared);
        let spawned = std::thread::Builder::new()
            .name("blogdex-rebuild".into())
            .spawn(move || run_worker(&shared));
        match spawned {
            Ok(_) => true,
            Err(e) => {
                error!("failed to start rebuild worker: {e}");
                self.shared.gate.reset();
                false
            },
        }
    }

    /// Whether no rebuild is running.
    pub fn is_idle(&self) -> bool {
        self.shared.gate.is_idle()
    }

    /// Block until the current rebuild (and any follow-up) is done.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        self.shared.gate.wait_idle(timeout)
    }
}

fn run_worker<R: Rebuild>(shared: &Shared<R>) {
    loop {
        if !shared.settle.is_zero() {
            std::thread::sleep(shared.settle);
        }
        match shared.rebuilder.rebuild() {
            Ok(summary) => {
                info!(
                    "index rebuilt: {} documents, {} warnings",
                    summary.documents, summary.warnings
                );
                (shared.on_rebuilt)(&summary);
            },
            Err(e) if e.is_recoverable() => warn!("rebuild failed, will retry on next change: {e}"),
            Err(e) => error!("rebuild failed ({}): {e}", e.category()),
        }
        if !shared.gate.finish() {
            break;
        }
        debug!("changes arrived during rebuild, running again");
    }
}

/// Whether `event` should cause a rebuild.
///
/// Besides markdown files, directory changes count: moving or renaming a
/// folder arrives as a single event on the folder path and changes every
/// slug beneath it.
pub fn is_relevant(event: &Event, matcher: &IndexBuilder) -> bool {
    let folder_event = matches!(
        event.kind,
        EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder)
    );
    let kind_matches = match event.kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        EventKind::Access(_) | EventKind::Any | EventKind::Other => false,
    };
    kind_matches
        && event.paths.iter().any(|p| {
            matcher.matches(p)
                || matcher.may_contain_documents(p)
                || (folder_event && matcher.is_visible(p))
        })
}

/// Rebuild once now, then on every relevant change under the builder's root,
/// until `shutdown` resolves.
///
/// Waits for an in-flight rebuild to finish before returning.
pub async fn watch<R, S>(builder: &IndexBuilder, coalescer: Coalescer<R>, shutdown: S) -> Result<()>
where
    R: Rebuild + 'static,
    S: Future<Output = ()>,
{
    // Event paths are absolute and resolved, so match against the resolved root.
    let root = std::fs::canonicalize(builder.root())
        .map_err(|e| Error::Watch(format!("cannot watch {}: {e}", builder.root().display())))?;
    let matcher = builder.clone().with_root(&root);

    coalescer.trigger();

    let on_event = coalescer.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if is_relevant(&event, &matcher) => {
            debug!("change detected: {:?}", event.paths);
            on_event.trigger();
        },
        Ok(_) => {},
        Err(e) => warn!("watch error: {e}"),
    })?;
    watcher.watch(&root, RecursiveMode::Recursive)?;
    info!("watching {} for changes", root.display());

    shutdown.await;
    drop(watcher);
    info!("stopping watcher");

    let waiting = coalescer.clone();
    let idle = tokio::task::spawn_blocking(move || waiting.wait_idle(Duration::from_secs(30)))
        .await
        .map_err(|e| Error::Other(format!("rebuild worker join failed: {e}")))?;
    if !idle {
        warn!("a rebuild was still running at shutdown");
    }
    Ok(())
}
