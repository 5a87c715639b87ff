//! Irrigation controller firmware — main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LcdDisplay     RemoteStore    LogEventSink  │
//! │  (Sensor+Actuator) (DisplayPort)  (Telemetry)    (EventSink)   │
//! │  NvsAdapter        Esp32Clock                                  │
//! │  (ConfigPort)      (MonotonicClock)                            │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  sample · decide · rotate · push                       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wi-Fi and remote-store credentials are baked in at build time through
//! `IRRIGATION_WIFI_SSID`, `IRRIGATION_WIFI_PASS`, `IRRIGATION_STORE_HOST`
//! and `IRRIGATION_STORE_AUTH`.
//!
//! Nothing here waits on the radio.  The station is started and left to
//! associate on its own; [`LinkSupervisor`] watches it from the loop and
//! re-requests a connect once per telemetry interval while it is down.
//! The task watchdog is armed only after all of that is set up.
#![deny(unused_must_use)]

use anyhow::{Result, anyhow};
use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, OutputPin as _, PinDriver};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;
use log::{error, info, warn};

use irrigation::adapters::device_id;
use irrigation::adapters::display::{LcdDisplay, NullDisplay};
use irrigation::adapters::hardware::HardwareAdapter;
use irrigation::adapters::log_sink::LogEventSink;
use irrigation::adapters::nvs::NvsAdapter;
use irrigation::adapters::remote_store::{self, RemoteStore, RemoteStoreConfig};
use irrigation::adapters::time::Esp32Clock;
use irrigation::adapters::wifi::LinkSupervisor;
use irrigation::app::ports::{ConfigPort, DisplayPort, MonotonicClock};
use irrigation::app::service::AppService;
use irrigation::config::SystemConfig;
use irrigation::display::overlay;
use irrigation::drivers::dht::Dht;
use irrigation::drivers::lcd::Lcd1602;
use irrigation::drivers::relay::RelayDriver;
use irrigation::drivers::watchdog::Watchdog;
use irrigation::drivers::hw_init;
use irrigation::pins;

const WIFI_SSID: &str = match option_env!("IRRIGATION_WIFI_SSID") {
    Some(v) => v,
    None => "",
};
const WIFI_PASS: &str = match option_env!("IRRIGATION_WIFI_PASS") {
    Some(v) => v,
    None => "",
};
const STORE_HOST: &str = match option_env!("IRRIGATION_STORE_HOST") {
    Some(v) => v,
    None => "",
};
const STORE_AUTH: &str = match option_env!("IRRIGATION_STORE_AUTH") {
    Some(v) => v,
    None => "",
};

/// Yield between ticks so the idle task can run.
const LOOP_YIELD_MS: u32 = 10;

type Relay = PinDriver<'static, AnyOutputPin, Output>;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Smart Irrigation v{}             ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs_partition = EspDefaultNvsPartition::take()?;

    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}, halting", e);
        // Watchdog not armed yet; park and let the operator reset.
        loop {
            FreeRtos::delay_ms(1_000);
        }
    }
    info!(
        "pins: DHT=GPIO{} soil=GPIO{} light=GPIO{} pump=GPIO{} lamp=GPIO{} I2C=GPIO{}/{}",
        pins::DHT_GPIO,
        pins::SOIL_ADC_GPIO,
        pins::LIGHT_ADC_GPIO,
        pins::PUMP_RELAY_GPIO,
        pins::LIGHT_RELAY_GPIO,
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
    );

    // ── 2. Config ─────────────────────────────────────────────
    let (mut config, config_fault) = match NvsAdapter::new().and_then(|nvs| nvs.load()) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            warn!("config load failed ({}), using defaults", e);
            (SystemConfig::default(), Some(e))
        }
    };
    let mac = device_id::read_mac();
    config.device_id = device_id::resolve(&config.device_id, &mac);
    info!(
        "Device ID: {} (hostname: {})",
        config.device_id,
        device_id::hostname(&mac)
    );

    // ── 3. Display ────────────────────────────────────────────
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;
    let mut display: Box<dyn DisplayPort> =
        match Lcd1602::new(i2c, Ets, config.lcd_address, config.lcd_cols, config.lcd_rows) {
            Ok(lcd) => Box::new(LcdDisplay::new(lcd)),
            Err(e) => {
                error!("LCD at 0x{:02X} not responding ({}), running headless", config.lcd_address, e);
                Box::new(NullDisplay)
            }
        };
    display.execute_all(&overlay::boot_splash());

    if let Some(e) = config_fault {
        display.execute_all(&overlay::error("Config invalid"));
        warn!("config fault: {}", e);
        FreeRtos::delay_ms(2_000);
    }

    // ── 4. Sensors + relays ───────────────────────────────────
    let pump: Relay = PinDriver::output(peripherals.pins.gpio26.downgrade_output())?;
    let grow_light: Relay = PinDriver::output(peripherals.pins.gpio27.downgrade_output())?;
    let mut dht_pin = PinDriver::input_output_od(peripherals.pins.gpio4)?;
    dht_pin.set_high()?;
    let dht = Dht::new(dht_pin, Ets, config.dht_model);

    let mut hw = HardwareAdapter::new(
        dht,
        RelayDriver::new(pump, config.relay_active_low)?,
        RelayDriver::new(grow_light, config.relay_active_low)?,
    );

    // ── 5. Network ────────────────────────────────────────────
    let mut store = RemoteStore::new(RemoteStoreConfig {
        host: STORE_HOST.into(),
        auth: STORE_AUTH.into(),
        timeout_ms: remote_store::DEFAULT_TIMEOUT_MS,
    });

    let mut esp_wifi = EspWifi::new(peripherals.modem, sys_loop, Some(nvs_partition))?;
    let mut wifi = match start_station(&mut esp_wifi) {
        Ok(()) => Some(esp_wifi),
        Err(e) => {
            warn!("wifi disabled ({:#}), running offline", e);
            None
        }
    };
    let mut link = LinkSupervisor::new(config.telemetry_interval_ms);
    display.execute_all(&overlay::wifi_status(false));
    display.execute_all(&overlay::cloud_status(false));

    // ── 6. App service ────────────────────────────────────────
    let clock = Esp32Clock::new();
    let mut sink = LogEventSink::new();
    let mut app = AppService::new(config);
    app.start(&mut hw, &mut sink);

    let watchdog = Watchdog::default();
    info!(
        "System ready (watchdog {} ms). Entering control loop.",
        watchdog.timeout_ms()
    );

    // ── 7. Control loop ───────────────────────────────────────
    loop {
        let now = clock.now_ms();
        app.tick(now, &mut hw, &mut display, &mut store, &mut sink);

        if let Some(radio) = wifi.as_mut() {
            link.poll(now, radio, &mut store);
        }

        watchdog.feed();
        FreeRtos::delay_ms(LOOP_YIELD_MS);
    }
}

/// Configure station mode and start the driver.  Association proceeds in
/// the background; the first connect request comes from the supervisor.
fn start_station(wifi: &mut EspWifi<'static>) -> Result<()> {
    if WIFI_SSID.is_empty() {
        return Err(anyhow!("no SSID configured"));
    }
    let auth_method = if WIFI_PASS.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };
    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: WIFI_SSID.try_into().map_err(|_| anyhow!("wifi ssid too long"))?,
        password: WIFI_PASS
            .try_into()
            .map_err(|_| anyhow!("wifi password too long"))?,
        auth_method,
        ..Default::default()
    }))?;
    wifi.start()?;
    info!("wifi started, station for `{}`", WIFI_SSID);
    Ok(())
}
