// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use static_cell::StaticCell;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_rgbw_leuchte::SharedFrameSlot;
use esp_rgbw_leuchte::config::{
    ANT_MUX_SETTLE_MS, DMX_START_ADDRESS, EXTRA_HEAP_SIZE, FRAME_TIMEOUT_MS, NET_SOCKET_COUNT,
    WIFI_HEAP_SIZE,
};
use esp_rgbw_leuchte::tasks::{
    connection_task, dhcp_task, light_output_task, net_task, power_supervisor_task,
};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Frame-Slot: Receiver schreibt, Light-Task liest
static FRAME_SLOT: StaticCell<SharedFrameSlot> = StaticCell::new();

/// Main Entry Point
///
/// Initialisiert Hardware, startet zuerst den Light-Task (Blackout so früh
/// wie möglich), dann WiFi und den Power-Supervisor.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    // Zwei Bereiche: reclaimed RAM (64 KB) + extra (36 KB) = 100 KB total
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    defmt::info!("RGBW-Leuchte startet");

    // Frame-Slot anlegen - bis zum ersten Frame bleibt der Ausgang dunkel
    // Ein Frame-Receiver (z.B. sACN über den embassy-net Stack) ist nicht Teil
    // dieser Firmware. Er bekommt `frame_slot` und ruft pro Universum
    // `frame_slot.publish_dmx(slots, DMX_START_ADDRESS, Instant::now().as_millis())` auf.
    let frame_slot: &'static SharedFrameSlot =
        FRAME_SLOT.init(SharedFrameSlot::new(Some(FRAME_TIMEOUT_MS)));

    // Light-Task zuerst: LEDC + Blackout vor allem anderen
    spawner
        .spawn(light_output_task(
            peripherals.LEDC,
            peripherals.GPIO1,  // Rot
            peripherals.GPIO18, // Grün
            peripherals.GPIO20, // Blau
            peripherals.GPIO15, // Weiß
            frame_slot,
        ))
        .unwrap();

    // Antennen-Umschalter (XIAO ESP32-C6): RF-Switch versorgen, interne Antenne
    // Die Outputs müssen leben, solange WiFi läuft → main kehrt nie zurück
    let _ant_power = Output::new(peripherals.GPIO3, Level::Low, OutputConfig::default());
    Timer::after(Duration::from_millis(ANT_MUX_SETTLE_MS)).await;
    let _ant_select = Output::new(peripherals.GPIO14, Level::Low, OutputConfig::default());

    // WiFi Hardware initialisieren
    static RADIO_INIT: StaticCell<esp_radio::Controller> = StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Netzwerk-Stack erstellen
    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Static resources für embassy-net
    static RESOURCES: StaticCell<StackResources<NET_SOCKET_COUNT>> = StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    // embassy-net erstellt Stack + Runner (nutzt STA interface für Client-Modus)
    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: StaticCell<Stack<'static>> = StaticCell::new();
    let stack = &*STACK.init(stack);

    // Spawn WiFi Tasks
    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner
        .spawn(dhcp_task(stack, DMX_START_ADDRESS))
        .unwrap();

    // Spawn Power-Supervisor (Sense GPIO2, Drive GPIO21)
    spawner
        .spawn(power_supervisor_task(
            peripherals.GPIO2,
            peripherals.GPIO21,
            peripherals.LPWR,
        ))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
