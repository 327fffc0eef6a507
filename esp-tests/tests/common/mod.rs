//! Mock-Implementierungen der Hardware-Traits für Host-Tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use esp_core::{
    Channel, Clock, DUTY_MAX, Delay, DutyVector, HeldOutput, Level, PwmError, PwmOutput, Pull,
    SleepControl, SwitchInput,
};

// ============================================================================
// Mock PWM
// ============================================================================

/// Zweistufiger PWM-Mock wie der LEDC: `set_duty` staged, `commit` übernimmt
#[derive(Default)]
pub struct MockPwm {
    pub staged: [u16; 4],
    pub active: [u16; 4],
    pub set_count: usize,
    pub commit_count: usize,
    /// Anzahl erlaubter Commits, danach schlägt jeder Commit fehl
    pub fail_after_commits: Option<usize>,
    /// Aktive Hardware-Duty nach jedem vollständigen Update (White zuletzt)
    pub history: Vec<DutyVector>,
}

impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_duty(&self) -> DutyVector {
        DutyVector::new(self.active[0], self.active[1], self.active[2], self.active[3])
    }
}

impl PwmOutput for MockPwm {
    fn set_duty(&mut self, channel: Channel, duty: u16) -> Result<(), PwmError> {
        if duty > DUTY_MAX {
            return Err(PwmError::DutyOutOfRange { channel, duty });
        }
        self.staged[channel.index()] = duty;
        self.set_count += 1;
        Ok(())
    }

    fn commit(&mut self, channel: Channel) -> Result<(), PwmError> {
        if let Some(limit) = self.fail_after_commits {
            if self.commit_count >= limit {
                return Err(PwmError::ChannelConfigFailed(channel));
            }
        }

        self.active[channel.index()] = self.staged[channel.index()];
        self.commit_count += 1;

        if channel == Channel::White {
            self.history.push(self.active_duty());
        }
        Ok(())
    }
}

// ============================================================================
// Mock Timer (Delay + Clock)
// ============================================================================

/// Simulierte Zeit: jedes `delay_ms` schiebt die Uhr vor und kehrt sofort zurück
#[derive(Default)]
pub struct MockTimer {
    pub now: u64,
    pub delays: Vec<u32>,
}

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Delay for MockTimer {
    async fn delay_ms(&mut self, ms: u32) {
        self.now += u64::from(ms);
        self.delays.push(ms);
    }
}

impl Clock for MockTimer {
    fn now_ms(&self) -> u64 {
        self.now
    }
}

/// Uhr, die bei jedem Ablesen um `lag_ms` weiterläuft
///
/// Simuliert einen Ausgabe-Zyklus, dessen Rechenzeit die Periode übersteigt.
pub struct LaggingTimer {
    pub now: Cell<u64>,
    pub lag_ms: u64,
    pub delays: Vec<u32>,
}

impl LaggingTimer {
    pub fn new(lag_ms: u64) -> Self {
        Self {
            now: Cell::new(0),
            lag_ms,
            delays: Vec::new(),
        }
    }
}

impl Delay for LaggingTimer {
    async fn delay_ms(&mut self, ms: u32) {
        self.now.set(self.now.get() + u64::from(ms));
        self.delays.push(ms);
    }
}

impl Clock for LaggingTimer {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.lag_ms);
        now
    }
}

// ============================================================================
// Mock Power-Hardware
// ============================================================================

/// Hardware-Ereignisse in Aufruf-Reihenfolge (über alle Mocks hinweg)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwEvent {
    SetLevel(Level),
    HoldEnable,
    HoldDisable,
    SenseLowPower,
    ArmWake(Level),
    SensePull(Pull),
    DeepSleep,
}

pub type EventLog = Rc<RefCell<Vec<HwEvent>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Panic-Payload, mit dem der Mock den Tiefschlaf "betritt"
pub const DEEP_SLEEP_MARKER: &str = "mock: deep sleep entered";

/// Sense-Pin mit vorgegebener Lese-Folge
pub struct MockSwitch {
    pub readings: VecDeque<Level>,
    pub read_count: usize,
}

impl MockSwitch {
    pub fn new(readings: &[Level]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            read_count: 0,
        }
    }
}

impl SwitchInput for MockSwitch {
    fn read(&mut self) -> Level {
        self.read_count += 1;
        self.readings
            .pop_front()
            .expect("MockSwitch: keine weiteren Lesungen vorgegeben")
    }
}

/// Drive-Pin mit Hold-Semantik: gehaltene Pins ignorieren Pegeländerungen
/// und überstehen einen Peripherie-Reset
pub struct MockDrivePin {
    pub level: Level,
    pub held: bool,
    log: EventLog,
}

impl MockDrivePin {
    pub fn new(level: Level, held: bool, log: EventLog) -> Self {
        Self { level, held, log }
    }

    /// Simuliert den Reset aller Pads beim Tiefschlaf (Default: High via Pull-Up)
    pub fn simulate_sleep_reset(&mut self) {
        if !self.held {
            self.level = Level::High;
        }
    }
}

impl HeldOutput for MockDrivePin {
    fn set_level(&mut self, level: Level) {
        self.log.borrow_mut().push(HwEvent::SetLevel(level));
        if !self.held {
            self.level = level;
        }
    }

    fn level(&self) -> Level {
        self.level
    }

    fn hold_enable(&mut self) {
        self.log.borrow_mut().push(HwEvent::HoldEnable);
        self.held = true;
    }

    fn hold_disable(&mut self) {
        self.log.borrow_mut().push(HwEvent::HoldDisable);
        self.held = false;
    }

    fn is_held(&self) -> bool {
        self.held
    }
}

/// Schlaf-Steuerung, deren Tiefschlaf per Panic "nie zurückkehrt"
pub struct MockSleep {
    log: EventLog,
}

impl MockSleep {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl SleepControl for MockSleep {
    fn init_sense_for_sleep(&mut self) {
        self.log.borrow_mut().push(HwEvent::SenseLowPower);
    }

    fn arm_wake_on_level(&mut self, level: Level) {
        self.log.borrow_mut().push(HwEvent::ArmWake(level));
    }

    fn set_sense_pull(&mut self, pull: Pull) {
        self.log.borrow_mut().push(HwEvent::SensePull(pull));
    }

    fn enter_deep_sleep(self) -> ! {
        self.log.borrow_mut().push(HwEvent::DeepSleep);
        std::panic::panic_any(DEEP_SLEEP_MARKER)
    }
}

/// Erlaubt `OutputController::new(&mut pwm, ..)`, damit der Mock nach
/// `run()` noch inspiziert werden kann
impl PwmOutput for &mut MockPwm {
    fn set_duty(&mut self, channel: Channel, duty: u16) -> Result<(), PwmError> {
        (**self).set_duty(channel, duty)
    }

    fn commit(&mut self, channel: Channel) -> Result<(), PwmError> {
        (**self).commit(channel)
    }
}
