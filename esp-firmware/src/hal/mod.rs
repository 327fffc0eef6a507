// Hardware Abstraction Layer (HAL) Module
//
// esp-hal Backends für die Traits aus esp-core.
// Die Logik darüber wird auf dem Host gegen Mocks getestet (esp-tests).

pub mod power;
pub mod pwm;
pub mod timer;

pub use power::{HeldDrivePin, LpDeepSleep, SenseSwitch};
pub use pwm::LedcPwm;
pub use timer::EmbassyTimer;
