//! Single-Slot Frame-Übergabe (Receiver → Output-Controller)
//!
//! Der Receiver überschreibt den Slot bei jedem neuen Frame, der
//! Controller liest auf seinem eigenen Takt immer den neuesten Stand.
//! Es gibt genau einen Schreiber und einen Leser, niemand blockiert.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::types::{ChannelLevels, LightingFrame};

#[derive(Clone, Copy)]
struct Stamped {
    levels: ChannelLevels,
    published_at_ms: u64,
}

/// Slot für den jeweils neuesten Frame
///
/// `timeout_ms` bestimmt, wann ein Frame als veraltet gilt.
/// `None` = einmal empfangen, für immer frisch.
pub struct FrameSlot<M: RawMutex> {
    latest: Mutex<M, Cell<Option<Stamped>>>,
    timeout_ms: Option<u64>,
}

impl<M: RawMutex> FrameSlot<M> {
    pub const fn new(timeout_ms: Option<u64>) -> Self {
        Self {
            latest: Mutex::new(Cell::new(None)),
            timeout_ms,
        }
    }

    /// Schreibt einen neuen Frame (überschreibt ungelesene alte Daten)
    pub fn publish(&self, levels: ChannelLevels, now_ms: u64) {
        self.latest.lock(|cell| {
            cell.set(Some(Stamped {
                levels,
                published_at_ms: now_ms,
            }))
        });
    }

    /// Dekodiert die DMX-Slots eines Universums und publiziert sie
    ///
    /// Gibt `false` zurück (und lässt den Slot unverändert), wenn der
    /// Footprint nicht ins Universum passt.
    pub fn publish_dmx(&self, slots: &[u8], start_address: u16, now_ms: u64) -> bool {
        match ChannelLevels::from_dmx(slots, start_address) {
            Some(levels) => {
                self.publish(levels, now_ms);
                true
            }
            None => false,
        }
    }

    /// Liest den neuesten Frame inkl. Frische-Bewertung
    pub fn latest(&self, now_ms: u64) -> LightingFrame {
        match self.latest.lock(Cell::get) {
            None => LightingFrame::NONE,
            Some(stamped) => LightingFrame {
                levels: stamped.levels,
                fresh: self.is_within_timeout(stamped.published_at_ms, now_ms),
            },
        }
    }

    pub const fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    fn is_within_timeout(&self, published_at_ms: u64, now_ms: u64) -> bool {
        match self.timeout_ms {
            None => true,
            Some(timeout) => now_ms.saturating_sub(published_at_ms) <= timeout,
        }
    }
}
