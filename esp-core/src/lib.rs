//! ESP Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Datenmodell, Traits, Pure Functions und die beiden
//! Steuerschleifen (Output-Controller, Power-Supervisor).

#![no_std]

#[macro_use]
mod fmt;

pub mod controller;
pub mod frame_slot;
pub mod logic;
pub mod power;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use controller::{ControllerConfig, OutputController};
pub use frame_slot::FrameSlot;
pub use logic::{SwitchAction, SwitchDebouncer, apply_polarity, compute_duty, scale_duty};
pub use power::{SupervisorConfig, arm_drive_hold, hibernate, watch_switch};
pub use traits::{Clock, Delay, HeldOutput, PwmError, PwmOutput, SleepControl, SwitchInput};
pub use types::{
    Channel, ChannelLevels, ChannelPolarity, DUTY_MAX, DUTY_RESOLUTION_BITS, DutyVector, Level,
    LightingFrame, Polarity, PowerState, Pull,
};
