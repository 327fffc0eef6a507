// Power-Schalter Backends: Sense-Pin, gehaltener Drive-Pin, Tiefschlaf
//
// Der Sense-Pin liegt im Betrieb in der digitalen Domäne (normaler Input)
// und wird erst für den Tiefschlaf an die LP/RTC-Domäne übergeben.

use esp_core::{HeldOutput, Level, Pull, SleepControl, SwitchInput};
use esp_hal::gpio::{
    Input, InputConfig, InputPin, Level as GpioLevel, Output, OutputConfig, OutputPin, Pin,
    Pull as GpioPull, RtcFunction, RtcPin, RtcPinWithResistors,
};
use esp_hal::peripherals::LP_AON;
use esp_hal::rtc_cntl::Rtc;
use esp_hal::rtc_cntl::sleep::{Ext1WakeupSource, WakeupLevel};

fn to_gpio_level(level: Level) -> GpioLevel {
    match level {
        Level::Low => GpioLevel::Low,
        Level::High => GpioLevel::High,
    }
}

fn to_gpio_pull(pull: Pull) -> GpioPull {
    match pull {
        Pull::None => GpioPull::None,
        Pull::Up => GpioPull::Up,
        Pull::Down => GpioPull::Down,
    }
}

// ============================================================================
// Sense-Pin (Laufzeit)
// ============================================================================

/// Sense-Pin des Schalters als digitaler Input
pub struct SenseSwitch<'d> {
    input: Input<'d>,
}

impl<'d> SenseSwitch<'d> {
    /// Erstellt den Input mit dem Laufzeit-Bias
    ///
    /// Nach dem Aufwachen hängt der Pin noch in der LP-Domäne (inkl. Pad-Hold)
    /// und wird zuerst an die digitale GPIO-Matrix zurückgegeben.
    pub fn new(pin: impl InputPin + RtcPin + 'd, pull: Pull) -> Self {
        pin.rtcio_pad_hold(false);
        pin.rtc_set_config(true, false, RtcFunction::Digital);

        let input = Input::new(pin, InputConfig::default().with_pull(to_gpio_pull(pull)));
        Self { input }
    }
}

impl SwitchInput for SenseSwitch<'_> {
    fn read(&mut self) -> Level {
        if self.input.is_high() {
            Level::High
        } else {
            Level::Low
        }
    }
}

// ============================================================================
// Drive-Pin mit Pad-Hold
// ============================================================================

/// Digitaler Output mit Pad-Hold über LP_AON
///
/// Ein gehaltenes Pad behält seinen Pegel auch im Tiefschlaf. Der Hold
/// überlebt den Neustart: `is_held()` liest deshalb immer das Hold-Register.
/// `level()` ist der zuletzt ungehalten getriebene Pegel. Solange ein alter
/// Hold aus dem letzten Schlaf aktiv ist, liefert es nur den gewünschten
/// Startpegel, nicht den Pegel am Pad. Erst nach `arm_drive_hold` stimmen
/// beide überein.
pub struct HeldDrivePin<'d> {
    output: Output<'d>,
    hold_mask: u32,
    latched: Level,
}

impl<'d> HeldDrivePin<'d> {
    /// Übernimmt den Pin, ohne einen bestehenden Hold anzutasten
    ///
    /// Das Bit im Hold-Register ergibt sich aus der GPIO-Nummer des Pins.
    pub fn new(pin: impl OutputPin + 'd, initial: Level) -> Self {
        let gpio_num = pin.number();
        let hold_mask = 1u32 << gpio_num;
        let output = Output::new(pin, to_gpio_level(initial), OutputConfig::default());

        let drive = Self {
            output,
            hold_mask,
            latched: initial,
        };
        if drive.is_held() {
            // Pad treibt noch den Pegel von vor dem Schlaf, nicht `initial`
            defmt::debug!("Power: Drive-Pin GPIO{} noch gehalten", gpio_num);
        }
        drive
    }

    fn write_hold(&mut self, enable: bool) {
        let mask = self.hold_mask;
        LP_AON::regs().gpio_hold0().modify(|r, w| {
            let bits = if enable {
                r.gpio_hold0().bits() | mask
            } else {
                r.gpio_hold0().bits() & !mask
            };
            // SAFETY: Nur das Bit dieses Pins wird verändert
            unsafe { w.gpio_hold0().bits(bits) }
        });
    }
}

impl HeldOutput for HeldDrivePin<'_> {
    fn set_level(&mut self, level: Level) {
        self.output.set_level(to_gpio_level(level));
        if !self.is_held() {
            self.latched = level;
        }
    }

    fn level(&self) -> Level {
        self.latched
    }

    fn hold_enable(&mut self) {
        self.write_hold(true);
    }

    fn hold_disable(&mut self) {
        self.write_hold(false);
    }

    fn is_held(&self) -> bool {
        LP_AON::regs().gpio_hold0().read().gpio_hold0().bits() & self.hold_mask != 0
    }
}

// ============================================================================
// Tiefschlaf
// ============================================================================

/// Tiefschlaf mit EXT1-Wake über den Sense-Pin
pub struct LpDeepSleep<'d, P: RtcPinWithResistors> {
    sense: P,
    rtc: Rtc<'d>,
    wake_level: WakeupLevel,
}

impl<'d, P: RtcPinWithResistors> LpDeepSleep<'d, P> {
    pub fn new(sense: P, rtc: Rtc<'d>) -> Self {
        Self {
            sense,
            rtc,
            wake_level: WakeupLevel::Low,
        }
    }
}

impl<P: RtcPinWithResistors> SleepControl for LpDeepSleep<'_, P> {
    fn init_sense_for_sleep(&mut self) {
        // LP-Domäne, Input aktiv
        self.sense.rtc_set_config(true, true, RtcFunction::Rtc);
    }

    fn arm_wake_on_level(&mut self, level: Level) {
        self.wake_level = match level {
            Level::Low => WakeupLevel::Low,
            Level::High => WakeupLevel::High,
        };
    }

    fn set_sense_pull(&mut self, pull: Pull) {
        self.sense.rtcio_pullup(pull == Pull::Up);
        self.sense.rtcio_pulldown(pull == Pull::Down);
    }

    fn enter_deep_sleep(mut self) -> ! {
        let wake_level = self.wake_level;
        let mut wake_pins: [(&mut dyn RtcPinWithResistors, WakeupLevel); 1] =
            [(&mut self.sense, wake_level)];
        let wake_source = Ext1WakeupSource::new(&mut wake_pins);

        defmt::info!("Power: Tiefschlaf");
        self.rtc.sleep_deep(&[&wake_source])
    }
}
