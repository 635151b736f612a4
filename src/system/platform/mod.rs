use crate::system::snapshot::MemoryPressure;

/// Per-OS lookups for readings sysinfo does not expose.
pub trait PlatformExtensions {
    fn gpu_model() -> Option<String>;
    fn memory_pressure() -> Option<MemoryPressure>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn gpu_model() -> Option<String> {
    platform_impl::Platform::gpu_model()
}

/// Kernel-reported pressure level, when the platform has one.
pub fn memory_pressure() -> Option<MemoryPressure> {
    platform_impl::Platform::memory_pressure()
}
