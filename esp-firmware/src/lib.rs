// Library-Root: Firmware-Module der RGBW-Leuchte
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{ChannelLevels, FrameSlot, LightingFrame};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Frame-Slot zwischen Frame-Receiver und Light-Task
///
/// CriticalSectionRawMutex, da der Receiver auch aus einem anderen
/// Executor oder Interrupt-Kontext publishen darf. Frames älter als
/// `FRAME_TIMEOUT_MS` gelten als stale.
pub type SharedFrameSlot = FrameSlot<CriticalSectionRawMutex>;
