//! Scenario state for the forge facade BDD tests.

use std::future::Future;

use forge_facade::{ForgeError, InMemoryForge, Label, PullRequestComment, ResponseMeta};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::Builder;

/// Result of the most recent `When` step.
#[derive(Debug, Clone)]
pub(crate) enum Outcome {
    Created(PullRequestComment),
    Deleted(ResponseMeta),
    Labels(Vec<Label>, ResponseMeta),
    Failed(ForgeError),
}

#[derive(ScenarioState, Default)]
pub(crate) struct FacadeState {
    pub(crate) forge: Slot<InMemoryForge>,
    pub(crate) outcome: Slot<Outcome>,
}

impl FacadeState {
    /// Runs `action` against the scenario's forge.
    pub(crate) fn with_forge<R>(&self, action: impl FnOnce(&InMemoryForge) -> R) -> R {
        self.forge
            .with_ref(action)
            .unwrap_or_else(|| panic!("in-memory forge not initialised"))
    }

    /// Rebuilds the scenario's forge, e.g. to seed more data.
    pub(crate) fn reseed(&self, seed: impl FnOnce(InMemoryForge) -> InMemoryForge) {
        let forge = self
            .forge
            .take()
            .unwrap_or_else(|| panic!("in-memory forge not initialised"));
        self.forge.set(seed(forge));
    }

    /// Returns the recorded outcome of the last action.
    pub(crate) fn outcome(&self) -> Outcome {
        self.outcome
            .get()
            .unwrap_or_else(|| panic!("no action has been performed"))
    }
}

/// Drives a facade future to completion on a single-threaded runtime.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"))
        .block_on(future)
}
