//! Lighting Output Controller
//!
//! Liest zyklisch den neuesten Frame aus dem [`FrameSlot`], berechnet die
//! vier Duty-Werte und programmiert den PWM-Ausgang. Ohne frische Daten
//! wird dunkel geschaltet.

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::frame_slot::FrameSlot;
use crate::logic::{apply_polarity, compute_duty};
use crate::traits::{Clock, Delay, PwmError, PwmOutput};
use crate::types::{Channel, ChannelPolarity, DutyVector, LightingFrame};

/// Timing und Polarität des Output-Controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub polarity: ChannelPolarity,
    /// Ausgabe-Periode (Ziel: 20 ms)
    pub period_ms: u32,
    /// Standzeit je Farbe beim Selbsttest
    pub self_test_dwell_ms: u32,
}

/// Output-Controller über einem beliebigen [`PwmOutput`]
pub struct OutputController<P: PwmOutput> {
    pwm: P,
    polarity: ChannelPolarity,
    was_fresh: bool,
}

impl<P: PwmOutput> OutputController<P> {
    pub fn new(pwm: P, polarity: ChannelPolarity) -> Self {
        Self {
            pwm,
            polarity,
            was_fresh: false,
        }
    }

    /// Programmiert einen Duty-Vektor (vor Inversion) auf alle vier Kanäle
    ///
    /// Nach dem Schreiben wird jeder Kanal committet, auch unveränderte -
    /// der LEDC übernimmt Duty-Register nur mit explizitem Update.
    pub fn apply(&mut self, duty: DutyVector) -> Result<(), PwmError> {
        let hardware = apply_polarity(duty, &self.polarity);

        for channel in Channel::ALL {
            self.pwm.set_duty(channel, hardware.get(channel))?;
        }
        for channel in Channel::ALL {
            self.pwm.commit(channel)?;
        }
        Ok(())
    }

    /// Alle Kanäle aus (polaritätsrichtig)
    pub fn blackout(&mut self) -> Result<(), PwmError> {
        self.apply(DutyVector::OFF)
    }

    /// Ein Ausgabe-Zyklus: Frame → Duty → PWM
    ///
    /// Gibt den Duty-Vektor vor Inversion zurück.
    pub fn render(&mut self, frame: &LightingFrame) -> Result<DutyVector, PwmError> {
        if frame.fresh != self.was_fresh {
            if frame.fresh {
                info!("Output: frische Frame-Daten, Ausgabe aktiv");
            } else {
                warn!("Output: keine frischen Frame-Daten, Blackout");
            }
            self.was_fresh = frame.fresh;
        }

        let duty = compute_duty(frame);
        self.apply(duty)?;
        Ok(duty)
    }

    /// Sichtbarer Selbsttest: Rot, Grün, Blau, Weiß je `dwell_ms`, dann dunkel
    pub async fn self_test<D: Delay>(&mut self, delay: &mut D, dwell_ms: u32) -> Result<(), PwmError> {
        info!("Output: Selbsttest R, G, B, W");

        for channel in Channel::ALL {
            self.apply(DutyVector::solo(channel))?;
            delay.delay_ms(dwell_ms).await;
        }

        self.blackout()?;
        info!("Output: Selbsttest beendet");
        Ok(())
    }

    /// Selbsttest, danach Endlos-Schleife im festen Takt
    ///
    /// Kehrt nur bei einem PWM-Fehler zurück. Die Periode wird über eine
    /// Deadline gehalten, damit Rechenzeit nicht aufaddiert.
    pub async fn run<M, T>(
        mut self,
        slot: &FrameSlot<M>,
        timer: &mut T,
        config: &ControllerConfig,
    ) -> Result<Infallible, PwmError>
    where
        M: RawMutex,
        T: Delay + Clock,
    {
        self.self_test(timer, config.self_test_dwell_ms).await?;

        info!("Output: starte Frame-Ausgabe alle {} ms", config.period_ms);
        let period = u64::from(config.period_ms);
        let mut deadline = timer.now_ms();

        loop {
            let frame = slot.latest(timer.now_ms());
            self.render(&frame)?;

            deadline += period;
            let now = timer.now_ms();
            if deadline <= now {
                // Zu spät dran: neu synchronisieren statt aufholen
                deadline = now + period;
            }
            timer.delay_ms((deadline - now) as u32).await;
        }
    }

    /// Zugriff auf den PWM-Ausgang (z.B. für Tests)
    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    pub fn into_pwm(self) -> P {
        self.pwm
    }
}
