// Lighting Output Task - Steuert die vier RGBW-Kanäle über LEDC
use defmt::{error, info};
use esp_core::{DUTY_RESOLUTION_BITS, OutputController, PwmError, PwmOutput};

use crate::SharedFrameSlot;
use crate::config::{CONTROLLER_CONFIG, PWM_FREQUENCY_HZ};
use crate::hal::{EmbassyTimer, LedcPwm};

/// Lighting Output Logic - Testbare Logik ohne Hardware-Abhängigkeit
///
/// Schreibt sofort einen Blackout (bei invertierter Polarität starten die
/// Kanäle sonst auf "voll an"), dann Selbsttest und Endlos-Schleife.
/// Kehrt nur mit einem Fehler zurück.
pub async fn light_output_logic<P: PwmOutput>(
    pwm: P,
    frame_slot: &SharedFrameSlot,
    timer: &mut EmbassyTimer,
) -> PwmError {
    let mut controller = OutputController::new(pwm, CONTROLLER_CONFIG.polarity);

    if let Err(e) = controller.blackout() {
        return e;
    }
    info!("Licht: Blackout gesetzt, starte Selbsttest");

    match controller.run(frame_slot, timer, &CONTROLLER_CONFIG).await {
        Ok(never) => match never {},
        Err(e) => e,
    }
}

/// Lighting Output Task - Embassy Task
///
/// Initialisiert LEDC und ruft `light_output_logic()` auf.
/// Ein PWM-Fehler ist ein Verdrahtungs-/Konfigurationsfehler → Panic.
#[embassy_executor::task]
pub async fn light_output_task(
    ledc: esp_hal::peripherals::LEDC<'static>,
    red: esp_hal::peripherals::GPIO1<'static>,
    green: esp_hal::peripherals::GPIO18<'static>,
    blue: esp_hal::peripherals::GPIO20<'static>,
    white: esp_hal::peripherals::GPIO15<'static>,
    frame_slot: &'static SharedFrameSlot,
) {
    let pwm = match LedcPwm::new(ledc, red, green, blue, white, PWM_FREQUENCY_HZ) {
        Ok(pwm) => pwm,
        Err(e) => {
            error!("Licht: PWM-Initialisierung fehlgeschlagen: {}", e);
            defmt::panic!("LEDC-Konfiguration ungültig");
        }
    };
    info!(
        "Licht: LEDC bereit ({} Hz, {} Bit)",
        PWM_FREQUENCY_HZ, DUTY_RESOLUTION_BITS
    );

    let mut timer = EmbassyTimer;
    let e = light_output_logic(pwm, frame_slot, &mut timer).await;

    error!("Licht: PWM-Fehler: {}", e);
    defmt::panic!("PWM-Ausgabe fehlgeschlagen");
}
