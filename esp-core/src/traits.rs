//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.
//!
//! # Implementierungen
//! - **Production:** esp-hal Backends in `esp-firmware/src/hal`
//! - **Testing:** Mocks in `esp-tests`

use crate::types::{Channel, Level, Pull};

/// Fehler-Typ für PWM-Operationen
///
/// Jeder dieser Fehler ist ein Konfigurations- oder Verdrahtungsfehler
/// und zur Laufzeit nicht behebbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    /// PWM-Timer ließ sich nicht konfigurieren (Frequenz/Auflösung)
    TimerConfigFailed,
    /// Kanal ließ sich nicht an Pin/Timer binden
    ChannelConfigFailed(Channel),
    /// Duty-Wert größer als die Auflösung erlaubt
    DutyOutOfRange { channel: Channel, duty: u16 },
}

/// Trait für den 4-Kanal PWM-Ausgang
///
/// Zweistufig wie der LEDC: `set_duty` schreibt das Duty-Register,
/// erst `commit` übernimmt den Wert in den laufenden PWM-Zyklus.
pub trait PwmOutput {
    /// Setzt den Duty-Wert eines Kanals (noch nicht aktiv)
    fn set_duty(&mut self, channel: Channel, duty: u16) -> Result<(), PwmError>;

    /// Übernimmt den gesetzten Duty-Wert eines Kanals
    fn commit(&mut self, channel: Channel) -> Result<(), PwmError>;
}

/// Trait für den Sense-Pin des Power-Schalters (Laufzeit-Konfiguration)
pub trait SwitchInput {
    /// Liest den aktuellen Pegel
    fn read(&mut self) -> Level;
}

/// Hold-Capability des Drive-Pins
///
/// Ein gehaltener Pin behält seinen Pegel auch durch den Tiefschlaf,
/// bis der Hold beim nächsten Boot explizit gelöst wird. `hold_enable`
/// und `hold_disable` sind der einzige Weg, den Hold zu verändern.
pub trait HeldOutput {
    /// Treibt den Pin auf den gegebenen Pegel (wirkungslos solange gehalten)
    fn set_level(&mut self, level: Level);

    /// Aktuell physisch anliegender Pegel
    fn level(&self) -> Level;

    fn hold_enable(&mut self);

    fn hold_disable(&mut self);

    fn is_held(&self) -> bool;
}

/// Schlaf-Steuerung: Sense-Pin im LP-Modus, Wake-Quelle, Tiefschlaf
pub trait SleepControl {
    /// Initialisiert den Sense-Pin für die LP/RTC-Domäne
    fn init_sense_for_sleep(&mut self);

    /// Weckt, sobald der Sense-Pin den gegebenen Pegel hat
    fn arm_wake_on_level(&mut self, level: Level);

    /// Setzt den internen Bias des Sense-Pins in der LP-Domäne
    fn set_sense_pull(&mut self, pull: Pull);

    /// Betritt den Tiefschlaf. Kehrt nie zurück - weiter geht es nur
    /// per Neustart.
    fn enter_deep_sleep(self) -> !;
}

/// Kooperatives Warten (gibt CPU an andere Tasks ab)
#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn delay_ms(&mut self, ms: u32);
}

/// Monotone Zeitquelle in Millisekunden seit Boot
pub trait Clock {
    fn now_ms(&self) -> u64;
}

#[cfg(feature = "defmt")]
impl defmt::Format for PwmError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PwmError::TimerConfigFailed => defmt::write!(fmt, "TimerConfigFailed"),
            PwmError::ChannelConfigFailed(channel) => {
                defmt::write!(fmt, "ChannelConfigFailed({})", channel)
            }
            PwmError::DutyOutOfRange { channel, duty } => {
                defmt::write!(fmt, "DutyOutOfRange {{ channel: {}, duty: {} }}", channel, duty)
            }
        }
    }
}
