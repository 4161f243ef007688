//! Value ranges of the motion parameters
//!
//! Host tooling asks for these to size its input widgets. Only the
//! velocity and acceleration parameters have a known range; their upper
//! ends depend on the motion generator's configuration.

use holdfast_core::parameter::LimitKind;
use holdfast_core::traits::MotionController;
use holdfast_core::ErrorFlags;

use super::catalog::id;

/// Range end of a parameter
pub fn limit<M: MotionController>(
    motion: &M,
    kind: LimitKind,
    parameter: u8,
) -> Result<i32, ErrorFlags> {
    let max = match parameter {
        id::TARGET_SPEED | id::ACTUAL_SPEED | id::MAX_SPEED | id::VELOCITY_CLASS => {
            motion.frequency()
        }
        id::MAX_ACCELERATION => motion.max_acceleration(),
        _ => return Err(ErrorFlags::UNKNOWN_TYPE),
    };
    Ok(match kind {
        LimitKind::Min => 0,
        LimitKind::Max => max,
    })
}
