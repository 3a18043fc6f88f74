//! Smart Irrigation Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LcdDisplay    NvsAdapter   LogEventSink     │
//! │  (Sensor+Output+   (Display)     (Storage)    (EventSink)      │
//! │   Buttons)                                                     │
//! │  SoftAp            HttpServer    Esp32TimeAdapter              │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Menu FSM · Threshold · Mode · Decision                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every pass: serve pending HTTP requests, then run one `AppService::tick`,
//! feed the watchdog and idle.  Requests and the loop body never overlap.
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::Ets;
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use log::{error, info, warn};

use smart_irrigation::adapters::display::LcdDisplay;
use smart_irrigation::adapters::hardware::HardwareAdapter;
use smart_irrigation::adapters::http::HttpServer;
use smart_irrigation::adapters::log_sink::LogEventSink;
use smart_irrigation::adapters::nvs::NvsAdapter;
use smart_irrigation::adapters::time::Esp32TimeAdapter;
use smart_irrigation::adapters::wifi::SoftAp;
use smart_irrigation::api;
use smart_irrigation::app::service::AppService;
use smart_irrigation::config::SystemConfig;
use smart_irrigation::drivers::lcd::Lcd;
use smart_irrigation::drivers::watchdog::Watchdog;
use smart_irrigation::drivers::hw_init;
use smart_irrigation::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Smart Irrigation v{}             ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    let config = match config.validate() {
        Ok(()) => config,
        Err(e) => {
            warn!("Config rejected ({}), using defaults", e);
            SystemConfig::default()
        }
    };

    // ── 2. GPIO + ADC ─────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without the relay pin in a known state nothing else is safe.
        error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);

    // ── 3. Persistent storage ─────────────────────────────────
    let mut nvs = match NvsAdapter::new() {
        Ok(n) => n,
        Err(e) => {
            warn!("NVS init failed ({}), threshold will not persist", e);
            NvsAdapter::unavailable()
        }
    };

    // ── 4. LCD on I²C0 ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21, // pins::I2C_SDA_GPIO
        peripherals.pins.gpio22, // pins::I2C_SCL_GPIO
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;
    let mut display = LcdDisplay::new(Lcd::new(i2c, Ets, pins::LCD_I2C_ADDR));
    if let Err(e) = display.init() {
        // Keep going: the outputs and the web UI still work.
        warn!("Display unavailable: {}", e);
    }

    // ── 5. Soft-AP + HTTP ─────────────────────────────────────
    let sysloop = EspSystemEventLoop::take()?;
    let mut http = match SoftAp::new(&config.ap_ssid, &config.ap_password) {
        Ok(mut ap) => match ap.start(peripherals.modem, sysloop) {
            Ok(()) => match HttpServer::bind(config.http_port) {
                Ok(server) => Some((ap, server)),
                Err(e) => {
                    warn!("HTTP bind failed ({}), remote control disabled", e);
                    None
                }
            },
            Err(e) => {
                warn!("Soft-AP start failed ({}), remote control disabled", e);
                None
            }
        },
        Err(e) => {
            warn!("Soft-AP credentials rejected ({}), remote control disabled", e);
            None
        }
    };

    // ── 6. Application core ───────────────────────────────────
    let mut hw = HardwareAdapter::from_board(config.raw_max);
    let mut sink = LogEventSink::new();
    let time = Esp32TimeAdapter::new();

    let mut app = AppService::new(config.clone(), &nvs);
    app.start(time.uptime_ms(), &mut display, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 7. Control loop ───────────────────────────────────────
    let idle = Duration::from_millis(u64::from(config.loop_idle_ms));
    loop {
        let now = time.uptime_ms();

        if let Some((_ap, server)) = http.as_mut() {
            server.poll(config.max_requests_per_pass, |req| {
                api::handle(req, now, &mut app, &mut hw, &mut display, &mut nvs, &mut sink)
            });
        }

        app.tick(now, &mut hw, &mut display, &mut nvs, &mut sink);

        watchdog.feed();
        std::thread::sleep(idle);
    }
}
