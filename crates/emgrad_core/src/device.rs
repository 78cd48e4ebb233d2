use crate::error::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Device {
    CPU,
    CUDA(usize),
}

impl Device {
    pub fn name(&self) -> String {
        match self {
            Device::CPU => "cpu".to_string(),
            Device::CUDA(id) => format!("cuda:{}", id),
        }
    }

    /// Parses `cpu`, `cuda` or `cuda:<index>`.
    ///
    /// `cuda` without an index means ordinal 0. A CUDA descriptor is only
    /// accepted when the ordinal is actually present (see [`cuda_device_count`]).
    pub fn parse(descriptor: &str) -> Result<Self> {
        match descriptor {
            "cpu" => Ok(Device::CPU),
            "cuda" => Self::cuda_checked(0),
            _ => match descriptor.strip_prefix("cuda:") {
                Some(id) => {
                    let id = id
                        .parse::<usize>()
                        .map_err(|_| Error::InvalidDevice(descriptor.to_string()))?;
                    Self::cuda_checked(id)
                }
                None => Err(Error::InvalidDevice(descriptor.to_string())),
            },
        }
    }

    fn cuda_checked(id: usize) -> Result<Self> {
        if id < cuda_device_count() {
            Ok(Device::CUDA(id))
        } else {
            Err(Error::DeviceUnavailable(format!("cuda:{}", id)))
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            Device::CPU => true,
            Device::CUDA(id) => *id < cuda_device_count(),
        }
    }

    /// Makes this device the ambient one until the returned guard is dropped.
    /// The previous ambient device is restored on every exit path, including
    /// unwinds.
    pub fn scoped(self) -> DeviceGuard {
        let prev = get_default_device();
        DEFAULT_DEVICE.with(|d| d.set(self));
        DeviceGuard { prev }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Number of detected CUDA ordinals. This workspace links no accelerator
/// backend, so the count is zero and every CUDA request reports
/// [`Error::DeviceUnavailable`].
pub fn cuda_device_count() -> usize {
    0
}

/// Host first, then one descriptor per detected accelerator ordinal.
pub fn available_devices() -> Vec<String> {
    let mut devices = vec!["cpu".to_string()];
    devices.extend((0..cuda_device_count()).map(|i| format!("cuda:{}", i)));
    devices
}

/// Anything a factory function accepts where a device is expected.
pub trait IntoDevice {
    fn into_device(self) -> Result<Device>;
}

impl IntoDevice for Device {
    fn into_device(self) -> Result<Device> {
        Ok(self)
    }
}

impl IntoDevice for &str {
    fn into_device(self) -> Result<Device> {
        Device::parse(self)
    }
}

impl IntoDevice for String {
    fn into_device(self) -> Result<Device> {
        Device::parse(&self)
    }
}

/// Resolves an optional device request, falling back to the ambient default.
pub fn select_device<D: IntoDevice>(device: Option<D>) -> Result<Device> {
    match device {
        Some(d) => d.into_device(),
        None => Ok(get_default_device()),
    }
}

thread_local! {
    static DEFAULT_DEVICE: std::cell::Cell<Device> = const { std::cell::Cell::new(Device::CPU) };
}

pub fn get_default_device() -> Device {
    DEFAULT_DEVICE.with(|d| d.get())
}

pub fn set_default_device(device: Device) {
    DEFAULT_DEVICE.with(|d| d.set(device));
}

pub struct DeviceGuard {
    prev: Device,
}

impl Drop for DeviceGuard {
    fn drop(&mut self) {
        DEFAULT_DEVICE.with(|d| d.set(self.prev));
    }
}
