//! Collaborator traits
//!
//! These traits define the interface between the axis logic and the parts
//! of the system it only observes or drives: the wire to the driver chip
//! and the step/dir motion generator.

pub mod motion;
pub mod transport;

pub use motion::{MotionController, MotionStatus, StepDirMode};
pub use transport::Transport;
