use super::PlatformExtensions;
use crate::system::command::{CommandRunner, SystemRunner, parse_lspci_gpu};
use crate::system::snapshot::MemoryPressure;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn gpu_model() -> Option<String> {
        let output = SystemRunner.run("lspci", &[])?;
        parse_lspci_gpu(&output)
    }

    fn memory_pressure() -> Option<MemoryPressure> {
        // No kernel pressure level here; callers estimate from usage.
        None
    }
}
