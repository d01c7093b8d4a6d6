//! Fail-fast provisioning pipeline.
//!
//! Steps are data: an ordered list of named actions, each tagged with the
//! mode(s) it applies to. Running filters by mode, executes strictly in
//! order, and stops at the first failure, reporting exactly which steps
//! finished before it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::ProgressReporter;
use crate::domain::error::PipelineAbort;
use crate::domain::{BootstrapConfig, ServiceHandles};

// ── Modes ────────────────────────────────────────────────────────────────────

/// Pipeline execution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Complete bootstrap of a fresh host.
    Full,
    /// Incremental worker refresh on an already-bootstrapped host.
    Update,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Update => "update",
        }
    }
}

/// Which mode(s) a step participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    Full,
    Update,
    Both,
}

impl StepMode {
    #[must_use]
    pub fn runs_in(self, mode: Mode) -> bool {
        match self {
            Self::Both => true,
            Self::Full => mode == Mode::Full,
            Self::Update => mode == Mode::Update,
        }
    }
}

// ── Steps ────────────────────────────────────────────────────────────────────

/// State carried through one pipeline run. The event-router step fills in
/// `handles`; the worker step consumes them.
pub struct PipelineContext {
    pub config: BootstrapConfig,
    pub handles: Option<ServiceHandles>,
}

impl PipelineContext {
    #[must_use]
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            handles: None,
        }
    }
}

/// One step's work. Implementations hold their own port handles.
#[async_trait]
pub trait StepAction: Send + Sync {
    async fn execute(&self, ctx: &mut PipelineContext) -> anyhow::Result<()>;
}

/// A named, mode-tagged pipeline step. Immutable once assembled.
pub struct Step {
    name: &'static str,
    mode: StepMode,
    action: Box<dyn StepAction>,
}

impl Step {
    pub fn new(name: &'static str, mode: StepMode, action: impl StepAction + 'static) -> Self {
        Self {
            name,
            mode,
            action: Box::new(action),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn mode(&self) -> StepMode {
        self.mode
    }
}

// ── Execution ────────────────────────────────────────────────────────────────

/// Outcome of one pipeline run. `completed` is always the exact prefix of
/// step names that finished; on failure it stops at the step before the
/// failing one.
#[derive(Debug)]
pub struct PipelineReport {
    pub mode: Mode,
    pub completed: Vec<String>,
    pub failure: Option<PipelineAbort>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl PipelineReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Run the steps applicable to `mode`, strictly in order, aborting on the
/// first failure. Nothing is retried and no step after a failure is invoked.
pub async fn run_pipeline(
    steps: &[Step],
    mode: Mode,
    ctx: &mut PipelineContext,
    reporter: &impl ProgressReporter,
) -> PipelineReport {
    let started_at = Utc::now();
    let mut completed: Vec<String> = Vec::new();

    for step in steps.iter().filter(|step| step.mode.runs_in(mode)) {
        reporter.step(step.name);
        match step.action.execute(ctx).await {
            Ok(()) => {
                reporter.success(step.name);
                completed.push(step.name.to_string());
            }
            Err(source) => {
                let failure = PipelineAbort {
                    step: step.name.to_string(),
                    completed: completed.clone(),
                    source,
                };
                return PipelineReport {
                    mode,
                    completed,
                    failure: Some(failure),
                    started_at,
                    finished_at: Utc::now(),
                };
            }
        }
    }

    PipelineReport {
        mode,
        completed,
        failure: None,
        started_at,
        finished_at: Utc::now(),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
