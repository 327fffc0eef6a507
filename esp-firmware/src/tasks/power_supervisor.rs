// Power Supervisor Task - Überwacht den Power-Schalter, steuert Tiefschlaf
use defmt::info;
use esp_core::{PowerState, arm_drive_hold, hibernate, watch_switch};
use esp_hal::rtc_cntl::Rtc;

use crate::config::SUPERVISOR_CONFIG;
use crate::hal::{EmbassyTimer, HeldDrivePin, LpDeepSleep, SenseSwitch};

/// Power Supervisor Task - Embassy Task
///
/// Ablauf:
/// 1. Drive-Pin: alten Hold lösen, Pegel setzen, Hold scharf
/// 2. Schalter nach der Anlaufzeit entprellt überwachen
/// 3. Bei bestätigtem "aus": Tiefschlaf, Wake über den Sense-Pin
#[embassy_executor::task]
pub async fn power_supervisor_task(
    mut sense: esp_hal::peripherals::GPIO2<'static>,
    drive: esp_hal::peripherals::GPIO21<'static>,
    lpwr: esp_hal::peripherals::LPWR<'static>,
) {
    let mut drive = HeldDrivePin::new(drive, SUPERVISOR_CONFIG.drive_level);
    arm_drive_hold(&mut drive, SUPERVISOR_CONFIG.drive_level);

    let mut timer = EmbassyTimer;
    {
        // Input nur geliehen: der Pin wird danach für den Wake gebraucht
        let mut switch = SenseSwitch::new(sense.reborrow(), SUPERVISOR_CONFIG.run_pull);
        let state = watch_switch(&mut switch, &mut timer, &SUPERVISOR_CONFIG).await;
        debug_assert_eq!(state, PowerState::Hibernating);
    }

    info!("Power: Schalter aus, gehe schlafen");
    let sleep = LpDeepSleep::new(sense, Rtc::new(lpwr));
    hibernate(sleep, &mut drive, &SUPERVISOR_CONFIG)
}
