//! Build-outcome-to-ticket reconciliation runtime for Vigil.
//!
//! One reconcile cycle runs per completed build: load the tracked ticket,
//! compute exactly one action from the build transition, execute it against
//! the tracker, and record the result in the per-job store.

pub mod reconcile_runtime;

pub use reconcile_runtime::apply::{apply, ApplyOutcome};
pub use reconcile_runtime::decision::{decide, Action, ReconcileContext};
pub use reconcile_runtime::ticket_store::{FileTicketStore, StoreError, TicketStore};
pub use reconcile_runtime::{ReconcileError, ReconcileRuntime, ReconcileRuntimeConfig};
