//! Call scripts — the editable four-stage script, its catalog of templates,
//! and the derived call flow the simulator walks.

pub mod catalog;
pub mod flow;
pub mod model;

pub use catalog::{Persona, ProductId, QUICK_PROMPTS, ToneId, derive_script, simulator_summary};
pub use flow::CallFlow;
pub use model::{Script, ScriptPatch, ScriptStage};
