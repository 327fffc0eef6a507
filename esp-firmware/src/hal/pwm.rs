// LEDC PWM Backend für die vier LED-Kanäle
//
// Ein Low-Speed Timer (DUTY_RESOLUTION_BITS, 5 kHz) speist vier Kanäle.
// set_duty() puffert nur, erst commit() schreibt Duty-Register + Update-Bit.

use esp_core::{Channel, DUTY_MAX, DUTY_RESOLUTION_BITS, PwmError, PwmOutput};
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::ledc::channel::{self, ChannelHW, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::peripherals::LEDC;
use esp_hal::time::Rate;
use static_cell::StaticCell;

/// LEDC-Auflösung passend zu `DUTY_RESOLUTION_BITS`
/// Nicht unterstützte Auflösungen scheitern schon beim Kompilieren.
const PWM_DUTY: timer::config::Duty = match DUTY_RESOLUTION_BITS {
    10 => timer::config::Duty::Duty10Bit,
    11 => timer::config::Duty::Duty11Bit,
    12 => timer::config::Duty::Duty12Bit,
    13 => timer::config::Duty::Duty13Bit,
    14 => timer::config::Duty::Duty14Bit,
    _ => panic!("DUTY_RESOLUTION_BITS wird vom LEDC nicht unterstützt"),
};

/// Der Timer muss 'static sein, da die Kanäle eine Referenz darauf halten
static PWM_TIMER: StaticCell<timer::Timer<'static, LowSpeed>> = StaticCell::new();

/// LEDC-basierter 4-Kanal PWM-Ausgang
///
/// Darf nur einmal erstellt werden (StaticCell für den Timer).
pub struct LedcPwm {
    channels: [channel::Channel<'static, LowSpeed>; 4],
    staged: [u16; 4],
}

impl LedcPwm {
    /// Konfiguriert Timer und alle vier Kanäle
    ///
    /// Alle Kanäle starten mit Duty 0. Bei invertierter Polarität ist das
    /// "voll an" - der Aufrufer muss direkt danach einen Blackout schreiben.
    ///
    /// # Fehlerbehandlung
    /// Jeder Konfigurationsfehler bricht sofort ab (keine Teil-Konfiguration)
    pub fn new(
        ledc_peripheral: LEDC<'static>,
        red: impl PeripheralOutput<'static>,
        green: impl PeripheralOutput<'static>,
        blue: impl PeripheralOutput<'static>,
        white: impl PeripheralOutput<'static>,
        frequency_hz: u32,
    ) -> Result<Self, PwmError> {
        let mut ledc = Ledc::new(ledc_peripheral);
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

        let lstimer0 = PWM_TIMER.init(ledc.timer::<LowSpeed>(timer::Number::Timer0));
        lstimer0
            .configure(timer::config::Config {
                duty: PWM_DUTY,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_hz(frequency_hz),
            })
            .map_err(|_| PwmError::TimerConfigFailed)?;
        let lstimer0: &'static timer::Timer<'static, LowSpeed> = lstimer0;

        let channels = [
            ledc.channel(channel::Number::Channel0, red),
            ledc.channel(channel::Number::Channel1, green),
            ledc.channel(channel::Number::Channel2, blue),
            ledc.channel(channel::Number::Channel3, white),
        ];

        let mut pwm = Self {
            channels,
            staged: [0; 4],
        };

        for ch in Channel::ALL {
            pwm.channels[ch.index()]
                .configure(channel::config::Config {
                    timer: lstimer0,
                    duty_pct: 0,
                    pin_config: channel::config::PinConfig::PushPull,
                })
                .map_err(|_| PwmError::ChannelConfigFailed(ch))?;
        }

        Ok(pwm)
    }
}

impl PwmOutput for LedcPwm {
    fn set_duty(&mut self, channel: Channel, duty: u16) -> Result<(), PwmError> {
        if duty > DUTY_MAX {
            return Err(PwmError::DutyOutOfRange { channel, duty });
        }
        self.staged[channel.index()] = duty;
        Ok(())
    }

    fn commit(&mut self, channel: Channel) -> Result<(), PwmError> {
        // Schreibt Duty-Register und setzt das Update-Bit des Kanals
        self.channels[channel.index()].set_duty_hw(u32::from(self.staged[channel.index()]));
        Ok(())
    }
}
