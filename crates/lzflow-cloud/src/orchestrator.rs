//! Sequential step orchestration

use crate::context::{ProvisioningContext, StepOutput};
use crate::error::{CloudError, Result};
use crate::poll::poll;
use crate::step::ProvisioningStep;
use std::fmt;

/// Progress of one provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    /// Step `index` was initiated and is being polled
    Pending { index: usize, step: String },
    /// Step `index` converged
    Ready { index: usize, step: String },
    Succeeded,
    Failed { step: String, reason: String },
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed { .. })
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::NotStarted => write!(f, "not started"),
            RunState::Pending { index, step } => write!(f, "step {} ({}) pending", index + 1, step),
            RunState::Ready { index, step } => write!(f, "step {} ({}) ready", index + 1, step),
            RunState::Succeeded => write!(f, "succeeded"),
            RunState::Failed { step, reason } => write!(f, "failed at {}: {}", step, reason),
        }
    }
}

/// Runs an ordered list of steps, threading results forward and stopping at
/// the first failure. Completed steps are not rolled back.
pub struct Orchestrator {
    name: String,
    steps: Vec<Box<dyn ProvisioningStep>>,
    seed: ProvisioningContext,
    state: RunState,
    history: Vec<RunState>,
}

impl Orchestrator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            seed: ProvisioningContext::new(),
            state: RunState::NotStarted,
            history: vec![RunState::NotStarted],
        }
    }

    pub fn step(mut self, step: impl ProvisioningStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Start from results obtained outside this run
    pub fn with_context(mut self, seed: ProvisioningContext) -> Self {
        self.seed = seed;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Every state the run has passed through, in order
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!("{}: {} -> {}", self.name, self.state, next);
        self.history.push(next.clone());
        self.state = next;
    }

    /// Execute all steps once.
    ///
    /// # Errors
    /// The first step error, unchanged. [`CloudError::RunFinished`] if the run
    /// already reached a terminal state.
    pub async fn run(&mut self) -> Result<ProvisioningContext> {
        if self.state.is_terminal() {
            return Err(CloudError::RunFinished(self.state.to_string()));
        }

        tracing::info!("{}: running {} steps", self.name, self.steps.len());
        let mut ctx = self.seed.clone();

        for index in 0..self.steps.len() {
            let step_name = self.steps[index].name().to_string();
            self.transition(RunState::Pending {
                index,
                step: step_name.clone(),
            });

            if let Err(e) = self.run_step(index, &mut ctx).await {
                tracing::error!("{}: {} failed: {}", self.name, step_name, e);
                self.transition(RunState::Failed {
                    step: step_name,
                    reason: e.to_string(),
                });
                return Err(e);
            }

            self.transition(RunState::Ready {
                index,
                step: step_name,
            });
        }

        self.transition(RunState::Succeeded);
        tracing::info!("{}: completed", self.name);
        Ok(ctx)
    }

    async fn run_step(&self, index: usize, ctx: &mut ProvisioningContext) -> Result<()> {
        let step = self.steps[index].as_ref();

        if step.already_absent(ctx).await? {
            tracing::info!("{}: resource already absent, nothing to do", step.name());
            ctx.merge(StepOutput::Absent(step.name().to_string()));
            return Ok(());
        }

        if let Some(output) = step.initiate(ctx).await? {
            ctx.merge(output);
        }

        let snapshot: &ProvisioningContext = ctx;
        let result = poll(step.name(), step.poll_config(), || step.status(snapshot)).await?;
        if let Some(output) = result {
            ctx.merge(output);
        }
        Ok(())
    }
}
