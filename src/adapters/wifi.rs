//! WiFi soft access point adapter.
//!
//! The controller hosts its own WPA2 network so a phone can reach the
//! status page without any infrastructure.  Clients get addresses from the
//! ESP-IDF soft-AP DHCP server; the device itself is 192.168.4.1/24.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests.

use log::{info, warn};

use crate::error::NetworkError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::eventloop::EspSystemEventLoop;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::modem::Modem;
#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{
    AccessPointConfiguration, AuthMethod, BlockingWifi, Configuration, EspWifi,
};

/// Soft-AP address (ESP-IDF default netif configuration).
pub const AP_ADDRESS: [u8; 4] = [192, 168, 4, 1];

/// Channel the AP beacons on.
const AP_CHANNEL: u8 = 1;

const AP_MAX_CONNECTIONS: u16 = 4;

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), NetworkError> {
    if ssid.is_empty() || ssid.len() > 32 {
        return Err(NetworkError::InvalidSsid);
    }
    if !is_printable_ascii(ssid) {
        return Err(NetworkError::InvalidSsid);
    }
    Ok(())
}

/// Empty means an open network; otherwise WPA2 needs 8–64 bytes.
fn validate_password(password: &str) -> Result<(), NetworkError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(NetworkError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Soft-AP adapter
// ───────────────────────────────────────────────────────────────

pub struct SoftAp {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    running: bool,
    #[cfg(target_os = "espidf")]
    wifi: Option<BlockingWifi<EspWifi<'static>>>,
}

impl SoftAp {
    /// Validate credentials.  Nothing is started yet.
    pub fn new(ssid: &str, password: &str) -> Result<Self, NetworkError> {
        validate_ssid(ssid)?;
        validate_password(password)?;

        let mut s = heapless::String::new();
        s.push_str(ssid).map_err(|_| NetworkError::InvalidSsid)?;
        let mut p = heapless::String::new();
        p.push_str(password)
            .map_err(|_| NetworkError::InvalidPassword)?;

        if password.is_empty() {
            warn!("SoftAp: no password configured, network will be open");
        }

        Ok(Self {
            ssid: s,
            password: p,
            running: false,
            #[cfg(target_os = "espidf")]
            wifi: None,
        })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ── Platform-specific ─────────────────────────────────────

    /// Bring up the access point and wait for its netif.
    #[cfg(target_os = "espidf")]
    pub fn start(
        &mut self,
        modem: Modem,
        sysloop: EspSystemEventLoop,
    ) -> Result<(), NetworkError> {
        let fail = |stage: &str, e: esp_idf_svc::sys::EspError| {
            warn!("SoftAp: {} failed: {}", stage, e);
            NetworkError::ApStartFailed
        };

        let esp_wifi =
            EspWifi::new(modem, sysloop.clone(), None).map_err(|e| fail("driver", e))?;
        let mut wifi = BlockingWifi::wrap(esp_wifi, sysloop).map_err(|e| fail("wrap", e))?;

        let auth_method = if self.is_open() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let ap = AccessPointConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| NetworkError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| NetworkError::InvalidPassword)?,
            auth_method,
            channel: AP_CHANNEL,
            max_connections: AP_MAX_CONNECTIONS,
            ..Default::default()
        };

        wifi.set_configuration(&Configuration::AccessPoint(ap))
            .map_err(|e| fail("configure", e))?;
        wifi.start().map_err(|e| fail("start", e))?;
        wifi.wait_netif_up().map_err(|e| fail("netif", e))?;

        match wifi.wifi().ap_netif().get_ip_info() {
            Ok(ip) => info!("SoftAp: '{}' up at {}", self.ssid, ip.ip),
            Err(e) => warn!("SoftAp: '{}' up, IP query failed: {}", self.ssid, e),
        }

        self.wifi = Some(wifi);
        self.running = true;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn start(&mut self) -> Result<(), NetworkError> {
        if self.running {
            return Err(NetworkError::ApStartFailed);
        }
        info!(
            "SoftAp(sim): '{}' up at {}.{}.{}.{} (max {} clients, ch {})",
            self.ssid,
            AP_ADDRESS[0],
            AP_ADDRESS[1],
            AP_ADDRESS[2],
            AP_ADDRESS[3],
            AP_MAX_CONNECTIONS,
            AP_CHANNEL
        );
        self.running = true;
        Ok(())
    }
}
