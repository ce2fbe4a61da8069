//! Public runtime API surface.
//!
//! Types exposed to embedders: the agent capability, the records exchanged
//! with agents, the registry that binds agents to seats, and errors.

pub mod agent;
pub mod decision;
pub mod errors;
pub mod registry;

pub use agent::{AgentKind, AgentResolver, DecisionAgent};
pub use decision::{Choices, Decided, Decision, DecisionContext, DecisionOption};
pub use errors::{AgentError, ResolveError, Result, RuntimeError};
pub use registry::AgentRegistry;
