// Embassy-Zeitbasis für die Steuerschleifen

use embassy_time::{Instant, Timer};
use esp_core::{Clock, Delay};

/// Delay + Clock über embassy-time
///
/// Zustandslos, jeder Task erzeugt seine eigene Instanz.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyTimer;

impl Delay for EmbassyTimer {
    async fn delay_ms(&mut self, ms: u32) {
        Timer::after_millis(u64::from(ms)).await;
    }
}

impl Clock for EmbassyTimer {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
