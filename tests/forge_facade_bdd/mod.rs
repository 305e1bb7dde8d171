//! Support modules for the forge facade BDD tests.

pub(crate) mod domain;
pub(crate) mod state;

pub(crate) use domain::{CallCount, CommentId, IssueNumber};
pub(crate) use state::{FacadeState, Outcome, block_on};
