//! Bridge to the out-of-process prediction model.
//!
//! Inference itself lives outside this crate; this module only spawns the
//! configured executables and interprets what they print.

pub mod output;
pub mod process;

pub use output::{parse_model_output, ModelOutput};
pub use process::{ModelKind, ModelProcess, ModelRunner};
