//! Sheen Animation Timing
//!
//! Directional property animations for widget style effects.
//!
//! # Features
//!
//! - **Animations**: 0→1 / 1→0 transitions of one property with a fixed duration
//! - **Explicit Scheduling**: the host loop drives time through [`AnimationScheduler::advance`]
//! - **Weak Ownership**: animations outlive neither their scheduler nor their target
//! - **Quantization**: optional stepped output for reduced-effects setups

pub mod animation;
pub mod scheduler;
pub mod values;

pub use animation::{Animation, AnimationTarget, Direction};
pub use scheduler::{AnimationId, AnimationScheduler, SchedulerHandle};
pub use values::digitize;
