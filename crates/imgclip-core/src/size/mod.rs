//! Output size policy.
//!
//! Decides how many pixels an export should have, from the host's display
//! measurements and the caller's limits (`maxWidth`, `forceWidth`, ...).

mod platform;
mod policy;

pub use platform::{HostEnvironment, Platform};
pub use policy::{compute_size_policy, crop_output_size, OutputSize, SizeLimits};
