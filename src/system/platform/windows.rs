use super::PlatformExtensions;
use crate::system::command::{CommandRunner, SystemRunner, parse_wmic_names};
use crate::system::snapshot::MemoryPressure;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn gpu_model() -> Option<String> {
        let output = SystemRunner.run("wmic", &["path", "win32_VideoController", "get", "name"])?;
        parse_wmic_names(&output)
    }

    fn memory_pressure() -> Option<MemoryPressure> {
        None
    }
}
