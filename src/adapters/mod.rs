//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                  |
//! |------------|--------------------|------------------------------|
//! | `display`  | DisplayPort        | 16×2 LCD over I²C            |
//! | `hardware` | SensorPort         | ESP32 ADC1                   |
//! |            | OutputPort         | Relay / buzzer GPIO          |
//! |            | ButtonPort         | Button GPIO                  |
//! | `http`     | —                  | TCP listener on the soft-AP  |
//! | `log_sink` | EventSink          | Serial log output            |
//! | `nvs`      | StoragePort        | NVS / in-memory store        |
//! | `time`     | —                  | ESP32 system timer           |
//! | `wifi`     | —                  | ESP-IDF WiFi soft-AP         |

pub mod display;
pub mod hardware;
pub mod http;
pub mod log_sink;
pub mod nvs;
pub mod time;
pub mod wifi;
