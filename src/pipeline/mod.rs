pub mod emitter;
pub mod engine;
pub mod orchestrator;
pub mod pacing;
pub mod phase;
pub mod state;

pub use emitter::{LogEmitter, LogSink, MemorySink};
pub use engine::{SimulatedEngine, WorkflowEngine, WorkflowTask};
pub use orchestrator::RemediationOrchestrator;
pub use pacing::Pacing;
pub use state::{HandlerState, TaskState};
