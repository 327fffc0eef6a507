// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
// (Seeed XIAO ESP32-C6 mit 4-Kanal RGBW-Treiber)

use esp_core::{ChannelPolarity, ControllerConfig, Level, Polarity, Pull, SupervisorConfig};

// ============================================================================
// PWM / LED Konfiguration
// ============================================================================

// Pin-Belegung (Peripherals werden in main.rs zugewiesen):
// Rot GPIO1, Grün GPIO18, Blau GPIO20, Weiß GPIO15 → LEDC Channel 0..3

/// PWM-Trägerfrequenz in Hz
/// 5 kHz flimmert nicht sichtbar und passt mit 13 Bit noch auf den APB-Takt
pub const PWM_FREQUENCY_HZ: u32 = 5000;

/// Polarität je Kanal
/// Der Treiber auf der Referenz-Platine zieht Strom gegen Masse → alle invertiert
pub const LED_POLARITY: ChannelPolarity = ChannelPolarity {
    red: Polarity::Inverted,
    green: Polarity::Inverted,
    blue: Polarity::Inverted,
    white: Polarity::Inverted,
};

/// Ausgabe-Periode in Millisekunden (50 Hz)
pub const OUTPUT_PERIOD_MS: u32 = 20;

/// Standzeit je Farbe beim Selbsttest nach dem Boot
pub const SELF_TEST_DWELL_MS: u32 = 300;

pub const CONTROLLER_CONFIG: ControllerConfig = ControllerConfig {
    polarity: LED_POLARITY,
    period_ms: OUTPUT_PERIOD_MS,
    self_test_dwell_ms: SELF_TEST_DWELL_MS,
};

// ============================================================================
// Frame-Empfang (DMX)
// ============================================================================

/// DMX-Startadresse der Leuchte (1-basiert, belegt 10 Slots)
pub const DMX_START_ADDRESS: u16 = 1;

/// Nach dieser Zeit ohne neuen Frame wird dunkel geschaltet
/// 2,5 s = Network Data Loss Timeout aus E1.31
pub const FRAME_TIMEOUT_MS: u64 = 2500;

// ============================================================================
// Power-Schalter / Hibernate
// ============================================================================

// Sense-Pin GPIO2 (muss LP-fähig sein, LP_GPIO0..7)
// Drive-Pin GPIO21: liefert dauerhaft Low für den Schalter, auch im Tiefschlaf

/// Verdrahtung: Schalter "an" zieht den Sense-Pin auf den Drive-Pin (Low),
/// "aus" lässt ihn offen → Pull-Up → High = schlafen.
/// Wake-Pegel und Bias im Schlaf müssen zur Beschaltung passen!
pub const SUPERVISOR_CONFIG: SupervisorConfig = SupervisorConfig {
    startup_delay_ms: 5000,
    poll_ms: 100,
    debounce_ms: 10,
    run_pull: Pull::Up,
    sleep_level: Level::High,
    drive_level: Level::Low,
    wake_level: Level::Low,
    sleep_pull: Pull::Up,
};

// ============================================================================
// Board-Bootstrap
// ============================================================================

// XIAO ESP32-C6 Antennen-Umschalter:
// Low an GPIO3 versorgt den RF-Switch, Low an GPIO14 wählt die interne Antenne

/// Wartezeit nach dem Umschalten der Antenne
pub const ANT_MUX_SETTLE_MS: u64 = 100;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit vor erneutem Verbindungsversuch
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

/// Anzahl Sockets im embassy-net Stack (Frame-Receiver + DHCP + Reserve)
pub const NET_SOCKET_COUNT: usize = 4;
