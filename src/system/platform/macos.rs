use std::ffi::CString;

use super::PlatformExtensions;
use crate::system::command::{
    CommandRunner, SystemRunner, parse_display_chipset, pressure_from_level,
};
use crate::system::snapshot::MemoryPressure;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn gpu_model() -> Option<String> {
        let output = SystemRunner.run("system_profiler", &["SPDisplaysDataType"])?;
        parse_display_chipset(&output)
    }

    fn memory_pressure() -> Option<MemoryPressure> {
        let name = CString::new("kern.memorystatus_vm_pressure_level").ok()?;
        let mut level: libc::c_int = 0;
        let mut size = std::mem::size_of::<libc::c_int>();
        let rc = unsafe {
            libc::sysctlbyname(
                name.as_ptr(),
                (&mut level as *mut libc::c_int).cast(),
                &mut size,
                std::ptr::null_mut(),
                0,
            )
        };
        if rc != 0 {
            return None;
        }
        match pressure_from_level(i64::from(level)) {
            MemoryPressure::Unknown => None,
            pressure => Some(pressure),
        }
    }
}
