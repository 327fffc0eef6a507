//! Core Types für die RGBW-Leuchte
//!
//! Datenstrukturen ohne Hardware-Dependencies

use rgb::RGB16;

/// PWM-Auflösung in Bit (bestimmt auch die LEDC-Timer-Konfiguration)
pub const DUTY_RESOLUTION_BITS: u8 = 13;

/// Maximaler Duty-Wert bei 13 Bit PWM-Auflösung (2^13 - 1)
pub const DUTY_MAX: u16 = (1 << DUTY_RESOLUTION_BITS) - 1;

/// Anzahl der DMX-Slots, die eine Leuchte belegt (5 Kanäle à 16 Bit)
pub const DMX_FOOTPRINT: usize = 10;

/// Einer der vier LED-Kanäle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    Red,
    Green,
    Blue,
    White,
}

impl Channel {
    /// Alle Kanäle in Hardware-Reihenfolge (LEDC Channel 0..3)
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::White];

    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::White => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Channel::Red => "Rot",
            Channel::Green => "Grün",
            Channel::Blue => "Blau",
            Channel::White => "Weiß",
        }
    }
}

/// Rohwerte eines empfangenen Frames (je 16 Bit, 0..=65535)
///
/// Die Farbkanäle sind relativ zum Master-Dimmer zu verstehen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelLevels {
    pub dimmer: u16,
    pub color: RGB16,
    pub white: u16,
}

impl ChannelLevels {
    pub const fn new(dimmer: u16, red: u16, green: u16, blue: u16, white: u16) -> Self {
        Self {
            dimmer,
            color: RGB16 {
                r: red,
                g: green,
                b: blue,
            },
            white,
        }
    }

    /// Dekodiert die 10-Slot-Personality ab einer DMX-Startadresse
    ///
    /// Reihenfolge: Dimmer, Rot, Grün, Blau, Weiß - jeweils Coarse- und
    /// Fine-Byte (Big-Endian). `start_address` ist 1-basiert wie am Pult.
    ///
    /// Gibt `None` zurück, wenn die Adresse 0 ist oder der Footprint
    /// über das Ende von `slots` hinausragt.
    ///
    /// ```
    /// # use esp_core::ChannelLevels;
    /// let slots = [0xFF, 0xFF, 0x80, 0x00, 0, 0, 0, 0, 0x00, 0x01];
    /// let levels = ChannelLevels::from_dmx(&slots, 1).unwrap();
    /// assert_eq!(levels.dimmer, 65535);
    /// assert_eq!(levels.color.r, 32768);
    /// assert_eq!(levels.white, 1);
    /// ```
    pub fn from_dmx(slots: &[u8], start_address: u16) -> Option<Self> {
        let first = usize::from(start_address).checked_sub(1)?;
        let footprint = slots.get(first..first + DMX_FOOTPRINT)?;

        let value = |offset: usize| u16::from_be_bytes([footprint[offset], footprint[offset + 1]]);

        Some(Self::new(value(0), value(2), value(4), value(6), value(8)))
    }

    /// Rohwert eines Farbkanals
    pub const fn channel(&self, channel: Channel) -> u16 {
        match channel {
            Channel::Red => self.color.r,
            Channel::Green => self.color.g,
            Channel::Blue => self.color.b,
            Channel::White => self.white,
        }
    }
}

/// Ein Frame, wie ihn der Output-Controller pro Zyklus sieht
///
/// `fresh == false` heißt: nie empfangen oder veraltet. Die Kanalwerte
/// enthalten dann evtl. noch alte Daten und dürfen nicht ausgegeben werden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightingFrame {
    pub levels: ChannelLevels,
    pub fresh: bool,
}

impl LightingFrame {
    /// Frame ohne gültige Daten
    pub const NONE: Self = Self {
        levels: ChannelLevels::new(0, 0, 0, 0, 0),
        fresh: false,
    };

    pub const fn fresh(levels: ChannelLevels) -> Self {
        Self {
            levels,
            fresh: true,
        }
    }
}

/// Duty-Werte für die vier PWM-Kanäle, jeweils in `[0, DUTY_MAX]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DutyVector {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub white: u16,
}

impl DutyVector {
    /// Alle Kanäle aus (vor Polaritäts-Inversion)
    pub const OFF: Self = Self::new(0, 0, 0, 0);

    pub const fn new(red: u16, green: u16, blue: u16, white: u16) -> Self {
        Self {
            red,
            green,
            blue,
            white,
        }
    }

    /// Nur ein Kanal voll an, alle anderen aus (für den Selbsttest)
    pub const fn solo(channel: Channel) -> Self {
        let mut duty = Self::OFF;
        match channel {
            Channel::Red => duty.red = DUTY_MAX,
            Channel::Green => duty.green = DUTY_MAX,
            Channel::Blue => duty.blue = DUTY_MAX,
            Channel::White => duty.white = DUTY_MAX,
        }
        duty
    }

    pub const fn get(&self, channel: Channel) -> u16 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
            Channel::White => self.white,
        }
    }

    pub fn set(&mut self, channel: Channel, duty: u16) {
        match channel {
            Channel::Red => self.red = duty,
            Channel::Green => self.green = duty,
            Channel::Blue => self.blue = duty,
            Channel::White => self.white = duty,
        }
    }
}

/// Ausgangs-Polarität eines Kanals
///
/// Manche LED-Treiber ziehen Strom gegen Masse: dort bedeutet Duty 0
/// "voll an" und der Wert muss invertiert werden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    #[default]
    Normal,
    Inverted,
}

/// Statische Polaritäts-Konfiguration aller vier Kanäle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelPolarity {
    pub red: Polarity,
    pub green: Polarity,
    pub blue: Polarity,
    pub white: Polarity,
}

impl ChannelPolarity {
    pub const NORMAL: Self = Self::uniform(Polarity::Normal);
    pub const INVERTED: Self = Self::uniform(Polarity::Inverted);

    pub const fn uniform(polarity: Polarity) -> Self {
        Self {
            red: polarity,
            green: polarity,
            blue: polarity,
            white: polarity,
        }
    }

    pub const fn get(&self, channel: Channel) -> Polarity {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
            Channel::White => self.white,
        }
    }
}

/// Logik-Pegel eines Pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    Low,
    High,
}

/// Interner Pull-Widerstand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Geräte-Zustand des Power-Supervisors
///
/// `Hibernating` ist terminal: der Eintritt hält die CPU an, weiter geht
/// es nur über einen kompletten Neustart (dann wieder `Active`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerState {
    #[default]
    Active,
    Hibernating,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelLevels {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ChannelLevels {{ dim: {}, rgbw: ({}, {}, {}, {}) }}",
            self.dimmer,
            self.color.r,
            self.color.g,
            self.color.b,
            self.white
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LightingFrame {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "LightingFrame {{ {}, fresh: {} }}", self.levels, self.fresh)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DutyVector {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Duty {{ r: {}, g: {}, b: {}, w: {} }}",
            self.red,
            self.green,
            self.blue,
            self.white
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Level {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Level::Low => defmt::write!(fmt, "Low"),
            Level::High => defmt::write!(fmt, "High"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PowerState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PowerState::Active => defmt::write!(fmt, "Active"),
            PowerState::Hibernating => defmt::write!(fmt, "Hibernating"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_max_follows_resolution() {
        assert_eq!(DUTY_RESOLUTION_BITS, 13);
        assert_eq!(DUTY_MAX, 8191);
    }

    #[test]
    fn test_from_dmx_reads_coarse_fine_pairs() {
        let mut slots = [0u8; 512];
        // Startadresse 11 → Index 10
        slots[10..20].copy_from_slice(&[0x12, 0x34, 0xFF, 0xFF, 0x00, 0x00, 0x80, 0x01, 0x00, 0xFF]);

        let levels = ChannelLevels::from_dmx(&slots, 11).unwrap();
        assert_eq!(levels, ChannelLevels::new(0x1234, 0xFFFF, 0, 0x8001, 0x00FF));
    }

    #[test]
    fn test_from_dmx_rejects_address_zero() {
        assert_eq!(ChannelLevels::from_dmx(&[0u8; 512], 0), None);
    }

    #[test]
    fn test_from_dmx_rejects_footprint_past_end() {
        let slots = [0u8; 512];
        assert!(ChannelLevels::from_dmx(&slots, 503).is_some());
        assert_eq!(ChannelLevels::from_dmx(&slots, 504), None);
    }

    #[test]
    fn test_duty_vector_solo() {
        assert_eq!(DutyVector::solo(Channel::Blue), DutyVector::new(0, 0, DUTY_MAX, 0));
    }

    #[test]
    fn test_channel_index_matches_all_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }
}
