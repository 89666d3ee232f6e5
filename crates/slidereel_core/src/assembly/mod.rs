//! Segment builders and the sequence assembler.
//!
//! # Architecture
//!
//! ```text
//! SequenceAssembler
//!     ├── build_slide_segment   (slide i, for each i in 1..=N)
//!     ├── trim_transition      (transition i, for each i in 1..N)
//!     ├── write_manifest
//!     └── MediaTool::concat
//! ```
//!
//! Slides and transitions are interleaved per index, strictly in order;
//! any step's failure ends the run without attempting subsequent steps.
//!
//! # Example
//!
//! ```ignore
//! use slidereel_core::assembly::SequenceAssembler;
//!
//! let assembler = SequenceAssembler::new(&tool, scratch_dir, logger);
//! let final_path = assembler.assemble(&job)?;
//! ```

mod assembler;
mod errors;
mod manifest;
mod slide;
mod transition;

pub use assembler::{ProgressCallback, SequenceAssembler};
pub use errors::{AssemblyError, AssemblyResult};
pub use manifest::write_manifest;
pub use slide::build_slide_segment;
pub use transition::{trim_transition, window_start};
