//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `hardware`     | SensorPort         | DHT line, ADC1 soil/light    |
//! |                | ActuatorPort       | pump / grow-light relays     |
//! | `display`      | DisplayPort        | HD44780 LCD over I2C         |
//! | `remote_store` | TelemetryPort      | HTTPS JSON PATCH             |
//! | `log_sink`     | EventSink          | Serial log output            |
//! | `nvs`          | ConfigPort         | NVS / in-memory blob         |
//! | `time`         | MonotonicClock     | ESP32 high-resolution timer  |
//! | `wifi`         | ConnectivityPort   | ESP32 station radio          |
//! | `device_id`    | —                  | eFuse factory MAC            |

pub mod device_id;
pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod remote_store;
pub mod time;
pub mod wifi;
