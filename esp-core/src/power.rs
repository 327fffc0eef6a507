//! Power State Supervisor
//!
//! Überwacht den Power-Schalter (entprellt) und schickt das Gerät in den
//! Tiefschlaf, wenn er auf "aus" steht. Der Drive-Pin wird dabei über den
//! Hold festgehalten.
//!
//! ```text
//! Active --(2x Sleep-Pegel, 10 ms Abstand)--> Hibernating
//! Hibernating --(Wake-Pegel am Sense-Pin)--> Neustart → Active
//! ```

use crate::logic::{SwitchAction, SwitchDebouncer};
use crate::traits::{Delay, HeldOutput, SleepControl, SwitchInput};
use crate::types::{Level, PowerState, Pull};

/// Timing und Verdrahtung des Supervisors
///
/// Sleep-Pegel, Wake-Pegel und Bias sind unabhängig konfigurierbar und
/// müssen zur tatsächlichen Beschaltung passen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorConfig {
    /// Wartezeit nach dem Boot, bevor der Schalter beachtet wird
    pub startup_delay_ms: u32,
    /// Abtast-Periode
    pub poll_ms: u32,
    /// Abstand der Bestätigungs-Lesung
    pub debounce_ms: u32,
    /// Bias des Sense-Pins im Betrieb (Schalter zieht auf die Gegenseite)
    pub run_pull: Pull,
    /// Pegel am Sense-Pin, der "schlafen" bedeutet
    pub sleep_level: Level,
    /// Pegel, den der Drive-Pin treibt und durch den Schlaf hält
    pub drive_level: Level,
    /// Pegel am Sense-Pin, der aus dem Tiefschlaf weckt
    pub wake_level: Level,
    /// Bias des Sense-Pins während des Tiefschlafs
    pub sleep_pull: Pull,
}

/// Initialisiert den Drive-Pin: alten Hold lösen, Pegel setzen, Hold scharf
///
/// Der Hold aus dem letzten Tiefschlaf ist nach dem Neustart noch aktiv
/// und muss zuerst gelöst werden.
pub fn arm_drive_hold<H: HeldOutput>(drive: &mut H, level: Level) {
    drive.hold_disable();
    drive.set_level(level);
    drive.hold_enable();
    info!("Power: Drive-Pin auf {} gehalten", level);
}

/// Überwacht den Schalter, bis zweimal in Folge der Sleep-Pegel anliegt
///
/// Gibt [`PowerState::Hibernating`] zurück; danach muss der Aufrufer
/// [`hibernate`] ausführen.
pub async fn watch_switch<S, D>(switch: &mut S, delay: &mut D, config: &SupervisorConfig) -> PowerState
where
    S: SwitchInput,
    D: Delay,
{
    delay.delay_ms(config.startup_delay_ms).await;
    info!("Power: überwache Schalter");

    let mut debouncer = SwitchDebouncer::new();

    loop {
        delay.delay_ms(config.poll_ms).await;

        let mut action = debouncer.sample(switch.read() == config.sleep_level);
        if action == SwitchAction::Confirm {
            delay.delay_ms(config.debounce_ms).await;
            action = debouncer.sample(switch.read() == config.sleep_level);
            if action == SwitchAction::Stay {
                debug!("Power: Glitch am Sense-Pin verworfen");
            }
        }

        if action == SwitchAction::Hibernate {
            return PowerState::Hibernating;
        }
    }
}

/// Übergang nach `Hibernating` - kehrt nie zurück
///
/// Reihenfolge: Sense-Pin in die LP-Domäne, Wake-Quelle scharf, Bias
/// umstellen, Drive-Hold sicherstellen, Tiefschlaf.
pub fn hibernate<S, H>(mut sleep: S, drive: &mut H, config: &SupervisorConfig) -> !
where
    S: SleepControl,
    H: HeldOutput,
{
    info!("Power: Hibernating!");

    sleep.init_sense_for_sleep();
    sleep.arm_wake_on_level(config.wake_level);
    sleep.set_sense_pull(config.sleep_pull);

    drive.hold_enable();

    sleep.enter_deep_sleep()
}
