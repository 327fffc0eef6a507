//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use crate::types::{Channel, ChannelPolarity, DUTY_MAX, DutyVector, LightingFrame, Polarity};

/// 65535² - Nenner der doppelten 16-Bit-Normierung (ungerade!)
const LEVEL_SCALE: u64 = 65535 * 65535;

/// Skaliert einen Farbkanal mit dem Master-Dimmer auf 13 Bit
///
/// Berechnet `round(DUTY_MAX × dimmer/65535 × level/65535)` exakt in
/// Ganzzahl-Arithmetik. Da 65535² ungerade ist, tritt der Fall ".5" nie auf.
///
/// ```
/// # use esp_core::scale_duty;
/// assert_eq!(scale_duty(65535, 65535), 8191);
/// assert_eq!(scale_duty(0, 65535), 0);
/// ```
pub fn scale_duty(dimmer: u16, level: u16) -> u16 {
    let numerator = u64::from(DUTY_MAX) * u64::from(dimmer) * u64::from(level);
    let rounded = (2 * numerator + LEVEL_SCALE) / (2 * LEVEL_SCALE);

    // Kann mathematisch nicht überlaufen, wird trotzdem geklemmt
    rounded.min(u64::from(DUTY_MAX)) as u16
}

/// Berechnet den Duty-Vektor für einen Frame (vor Polaritäts-Inversion)
///
/// Nicht frische Frames ergeben immer Blackout, egal welche alten
/// Kanalwerte noch im Slot liegen.
pub fn compute_duty(frame: &LightingFrame) -> DutyVector {
    if !frame.fresh {
        return DutyVector::OFF;
    }

    let levels = &frame.levels;
    let mut duty = DutyVector::OFF;
    for channel in Channel::ALL {
        duty.set(channel, scale_duty(levels.dimmer, levels.channel(channel)));
    }
    duty
}

/// Wendet die statische Polarität an: invertierte Kanäle → `DUTY_MAX - duty`
pub fn apply_polarity(duty: DutyVector, polarity: &ChannelPolarity) -> DutyVector {
    let mut out = duty;
    for channel in Channel::ALL {
        let value = duty.get(channel).min(DUTY_MAX);
        let value = match polarity.get(channel) {
            Polarity::Normal => value,
            Polarity::Inverted => DUTY_MAX - value,
        };
        out.set(channel, value);
    }
    out
}

/// Ergebnis einer Schalter-Abtastung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchAction {
    /// Kein Sleep-Wunsch (oder Glitch verworfen)
    Stay,
    /// Erster Sleep-Pegel gesehen: nach der Debounce-Zeit erneut lesen
    Confirm,
    /// Zweimal in Folge Sleep-Pegel: in den Tiefschlaf wechseln
    Hibernate,
}

/// Doppel-Lese-Entprellung des Power-Schalters
///
/// Nur zwei aufeinanderfolgende Sleep-Lesungen lösen `Hibernate` aus.
/// Die Wartezeit zwischen den Lesungen macht der Aufrufer.
#[derive(Debug, Default)]
pub struct SwitchDebouncer {
    pending: bool,
}

impl SwitchDebouncer {
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Verarbeitet eine Lesung (`true` = Sleep-Pegel)
    pub fn sample(&mut self, sleep_requested: bool) -> SwitchAction {
        let was_pending = core::mem::replace(&mut self.pending, false);

        match (was_pending, sleep_requested) {
            (false, true) => {
                self.pending = true;
                SwitchAction::Confirm
            }
            (true, true) => SwitchAction::Hibernate,
            (_, false) => SwitchAction::Stay,
        }
    }

    /// Wartet gerade auf die Bestätigungs-Lesung?
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChannelLevels;

    #[test]
    fn test_scale_duty_full_scale() {
        assert_eq!(scale_duty(65535, 65535), DUTY_MAX);
    }

    #[test]
    fn test_scale_duty_zero_dimmer() {
        assert_eq!(scale_duty(0, 65535), 0);
        assert_eq!(scale_duty(65535, 0), 0);
    }

    #[test]
    fn test_scale_duty_half_dimmer_rounds() {
        // 8191 × 32768 / 65535 = 4095.56…
        assert_eq!(scale_duty(32768, 65535), 4096);
    }

    #[test]
    fn test_compute_duty_not_fresh_is_blackout() {
        let frame = LightingFrame {
            levels: ChannelLevels::new(65535, 65535, 65535, 65535, 65535),
            fresh: false,
        };
        assert_eq!(compute_duty(&frame), DutyVector::OFF);
    }

    #[test]
    fn test_apply_polarity_mixed() {
        let polarity = ChannelPolarity {
            red: Polarity::Inverted,
            green: Polarity::Normal,
            blue: Polarity::Inverted,
            white: Polarity::Normal,
        };
        let out = apply_polarity(DutyVector::new(0, 100, 8191, 4000), &polarity);
        assert_eq!(out, DutyVector::new(8191, 100, 0, 4000));
    }

    #[test]
    fn test_debouncer_glitch_is_rejected() {
        let mut debouncer = SwitchDebouncer::new();
        assert_eq!(debouncer.sample(true), SwitchAction::Confirm);
        assert_eq!(debouncer.sample(false), SwitchAction::Stay);
        assert!(!debouncer.is_pending());
        // Neuer Anlauf beginnt wieder bei Confirm
        assert_eq!(debouncer.sample(true), SwitchAction::Confirm);
    }

    #[test]
    fn test_debouncer_confirmed() {
        let mut debouncer = SwitchDebouncer::new();
        assert_eq!(debouncer.sample(false), SwitchAction::Stay);
        assert_eq!(debouncer.sample(true), SwitchAction::Confirm);
        assert_eq!(debouncer.sample(true), SwitchAction::Hibernate);
    }
}
