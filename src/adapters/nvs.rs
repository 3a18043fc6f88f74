//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`StoragePort`] for the irrigation controller.  Every value
//! lives in the `irrigation` namespace as a 32-bit integer.
//!
//! - Atomic writes: ESP-IDF NVS commits are atomic per `nvs_commit()`.
//! - Keys are limited to 15 bytes by NVS; longer keys are rejected.
//! - The simulation backend is an in-memory map (dev/test only).

use crate::app::ports::{StorageError, StoragePort};
use crate::error::Error;
use log::{info, warn};

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

pub const NAMESPACE: &str = "irrigation";

/// NVS key length limit (excluding the terminating NUL).
const MAX_KEY_LEN: usize = 15;

pub struct NvsAdapter {
    /// `false` when flash init failed: every access reports `IoError`.
    available: bool,
    #[cfg(not(target_os = "espidf"))]
    store: HashMap<String, i32>,
    #[cfg(not(target_os = "espidf"))]
    fail_writes: bool,
}

impl NvsAdapter {
    /// Initialise NVS flash.
    ///
    /// On first boot or after a version mismatch the NVS partition is
    /// erased and re-initialised automatically.
    pub fn new() -> Result<Self, Error> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any other NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(Error::Init("NVS erase"));
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(Error::Init("NVS init"));
                }
            } else if ret != ESP_OK {
                return Err(Error::Init("NVS init"));
            }
            info!("NvsAdapter: ESP-IDF NVS initialised (namespace '{}')", NAMESPACE);
            Ok(Self { available: true })
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("NvsAdapter: simulation backend");
            Ok(Self {
                available: true,
                store: HashMap::new(),
                fail_writes: false,
            })
        }
    }

    /// Adapter for a board whose NVS partition could not be initialised.
    /// Reads and writes fail, so callers fall back to in-memory values.
    pub fn unavailable() -> Self {
        warn!("NvsAdapter: persistence unavailable this session");
        Self {
            available: false,
            #[cfg(not(target_os = "espidf"))]
            store: HashMap::new(),
            #[cfg(not(target_os = "espidf"))]
            fail_writes: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Simulation only: make every subsequent write fail.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// NUL-terminated copy of `key`, or `None` if NVS cannot hold it.
    fn key_cstr(key: &str) -> Option<[u8; MAX_KEY_LEN + 1]> {
        let bytes = key.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_KEY_LEN || bytes.contains(&0) {
            return None;
        }
        let mut buf = [0u8; MAX_KEY_LEN + 1];
        buf[..bytes.len()].copy_from_slice(bytes);
        Some(buf)
    }

    /// Open the namespace, execute a closure with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut ns_buf = [0u8; 16];
        let ns_bytes = NAMESPACE.as_bytes();
        let len = ns_bytes.len().min(15);
        ns_buf[..len].copy_from_slice(&ns_bytes[..len]);

        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        // SAFETY: ns_buf is NUL-terminated and outlives the call.
        let ret = unsafe { nvs_open(ns_buf.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }

    #[cfg(target_os = "espidf")]
    fn map_err(ret: i32) -> StorageError {
        if ret == ESP_ERR_NVS_NOT_FOUND {
            StorageError::NotFound
        } else if ret == ESP_ERR_NVS_NOT_ENOUGH_SPACE {
            StorageError::Full
        } else {
            StorageError::IoError
        }
    }
}

impl StoragePort for NvsAdapter {
    fn get_int(&self, key: &str) -> Result<Option<i32>, StorageError> {
        if !self.available {
            return Err(StorageError::IoError);
        }
        let key_buf = Self::key_cstr(key).ok_or(StorageError::IoError)?;

        #[cfg(not(target_os = "espidf"))]
        {
            let _ = key_buf;
            Ok(self.store.get(key).copied())
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(false, |handle| {
                let mut value: i32 = 0;
                // SAFETY: key buffer is NUL-terminated; value is a valid out-pointer.
                let ret = unsafe { nvs_get_i32(handle, key_buf.as_ptr() as *const _, &mut value) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(value)
            });
            match result {
                Ok(v) => Ok(Some(v)),
                // A namespace that was never written cannot be opened read-only.
                Err(e) if e == ESP_ERR_NVS_NOT_FOUND => Ok(None),
                Err(e) => {
                    warn!("NvsAdapter: read '{}' failed ({})", key, e);
                    Err(Self::map_err(e))
                }
            }
        }
    }

    fn put_int(&mut self, key: &str, value: i32) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::IoError);
        }
        let key_buf = Self::key_cstr(key).ok_or(StorageError::IoError)?;

        #[cfg(not(target_os = "espidf"))]
        {
            let _ = key_buf;
            if self.fail_writes {
                return Err(StorageError::IoError);
            }
            self.store.insert(key.to_string(), value);
            info!("NvsAdapter: {} = {} (simulation)", key, value);
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            Self::with_nvs_handle(true, |handle| {
                // SAFETY: key buffer is NUL-terminated and outlives the call.
                let ret = unsafe { nvs_set_i32(handle, key_buf.as_ptr() as *const _, value) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(())
            })
            .map_err(Self::map_err)?;
            info!("NvsAdapter: {} = {} committed", key, value);
            Ok(())
        }
    }
}
