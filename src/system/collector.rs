use std::time::{SystemTime, UNIX_EPOCH};

use sysinfo::{MINIMUM_CPU_UPDATE_INTERVAL, System};

use color_eyre::eyre::{Result, eyre};

use super::command::{
    CommandRunner, SystemRunner, parse_boot_time, parse_cpuinfo, parse_display_chipset,
    parse_load_average, parse_lspci_gpu, parse_meminfo, parse_pressure_level, parse_proc_uptime,
    parse_ps_cpu_total, parse_swap_usage, parse_u64, parse_vm_stat,
};
use super::platform;
use super::snapshot::{
    LoadAverage, MemoryPressure, MetricsSnapshot, UNKNOWN_CPU, UNKNOWN_GPU,
    estimate_memory_pressure,
};

/// Produces one snapshot per polling cycle. Collection never fails: counters
/// that cannot be read come back as zero or as the "unknown" sentinels.
pub trait MetricsCollector {
    fn name(&self) -> &'static str;
    fn collect(&mut self) -> MetricsSnapshot;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectorKind {
    #[default]
    Sysinfo,
    Command,
}

impl CollectorKind {
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sysinfo" | "library" => Some(CollectorKind::Sysinfo),
            "command" | "shell" => Some(CollectorKind::Command),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CollectorKind::Sysinfo => "sysinfo",
            CollectorKind::Command => "command",
        }
    }

    /// Fails for the command collector when the host offers neither
    /// `sysctl` nor `/proc`; a blind collector would report a healthy system.
    pub fn build(self) -> Result<Box<dyn MetricsCollector>> {
        match self {
            CollectorKind::Sysinfo => Ok(Box::new(SysinfoCollector::new())),
            CollectorKind::Command => {
                let collector = CommandCollector::new(SystemRunner);
                if collector.source().is_none() {
                    return Err(eyre!(
                        "the command collector found neither sysctl nor /proc on this host; use --collector sysinfo"
                    ));
                }
                Ok(Box::new(collector))
            }
        }
    }
}

/// Library-backed collector.
pub struct SysinfoCollector {
    sys: System,
    gpu_model: String,
}

impl Default for SysinfoCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoCollector {
    /// Primes CPU usage with two samples so the first snapshot already has a
    /// meaningful busy percentage. GPU identity is read here once; it does
    /// not change while the process runs.
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_usage();

        let gpu_model = platform::gpu_model().unwrap_or_else(|| {
            tracing::debug!("gpu identity unavailable");
            UNKNOWN_GPU.to_string()
        });
        SysinfoCollector { sys, gpu_model }
    }
}

impl MetricsCollector for SysinfoCollector {
    fn name(&self) -> &'static str {
        CollectorKind::Sysinfo.label()
    }

    fn collect(&mut self) -> MetricsSnapshot {
        let _span = tracing::debug_span!("collector.collect", collector = self.name()).entered();

        self.sys.refresh_memory();
        self.sys.refresh_cpu_usage();

        let cpu_core_count = self.sys.cpus().len();
        let cpu_usage_percent = f64::from(self.sys.global_cpu_usage()).clamp(0.0, 100.0);
        let cpu_model = self
            .sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| UNKNOWN_CPU.to_string());

        let load = System::load_average();
        let load_average = substitute_missing_load(
            LoadAverage::new(load.one, load.five, load.fifteen),
            cpu_usage_percent,
            cpu_core_count,
        );

        let memory_total_bytes = self.sys.total_memory();
        let memory_used_bytes = self.sys.used_memory().min(memory_total_bytes);
        let swap_used_bytes = self.sys.used_swap();
        let memory_pressure = platform::memory_pressure().unwrap_or_else(|| {
            estimate_memory_pressure(memory_used_bytes, memory_total_bytes, swap_used_bytes)
        });

        MetricsSnapshot {
            cpu_usage_percent,
            load_average,
            cpu_core_count,
            cpu_model,
            memory_total_bytes,
            memory_used_bytes,
            swap_used_bytes,
            swap_total_bytes: self.sys.total_swap(),
            memory_pressure,
            gpu_model: self.gpu_model.clone(),
            uptime_secs: System::uptime(),
        }
    }
}

/// Hosts without a run queue average report all zeros; approximate it from
/// CPU busy time instead.
pub fn substitute_missing_load(load: LoadAverage, usage_percent: f64, cores: usize) -> LoadAverage {
    if load.is_zero() {
        LoadAverage::uniform(usage_percent / 100.0 * cores as f64)
    } else {
        load
    }
}

/// Where [`CommandCollector`] reads its counters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSource {
    /// `sysctl`, `vm_stat` and `system_profiler` (macOS and the BSDs).
    Sysctl,
    /// `/proc/{meminfo,cpuinfo,loadavg,uptime}` and `lspci` (Linux).
    Procfs,
}

/// Collector built on shell utilities and kernel pseudo-files. The source is
/// detected once at construction; GPU identity is read once as well.
pub struct CommandCollector<R: CommandRunner = SystemRunner> {
    runner: R,
    source: Option<HostSource>,
    gpu_model: String,
}

impl<R: CommandRunner> CommandCollector<R> {
    pub fn new(runner: R) -> Self {
        let source = detect_source(&runner);
        let gpu_model = match source {
            Some(HostSource::Sysctl) => runner
                .run("system_profiler", &["SPDisplaysDataType"])
                .as_deref()
                .and_then(parse_display_chipset),
            Some(HostSource::Procfs) => runner.run("lspci", &[]).as_deref().and_then(parse_lspci_gpu),
            None => None,
        }
        .unwrap_or_else(|| UNKNOWN_GPU.to_string());

        tracing::debug!(?source, gpu = %gpu_model, "command collector ready");
        Self {
            runner,
            source,
            gpu_model,
        }
    }

    /// `None` when neither `sysctl` nor `/proc` answered; every snapshot is
    /// then defaults only.
    pub fn source(&self) -> Option<HostSource> {
        self.source
    }

    fn sysctl(&self, key: &str) -> Option<String> {
        self.runner.run("sysctl", &["-n", key])
    }

    fn ps_cpu_usage(&self, cores: usize) -> f64 {
        self.runner
            .run("ps", &["-A", "-o", "%cpu"])
            .map(|out| parse_ps_cpu_total(&out, cores))
            .unwrap_or_default()
    }

    fn collect_sysctl(&self) -> MetricsSnapshot {
        let cpu_core_count = self
            .sysctl("hw.logicalcpu")
            .as_deref()
            .and_then(parse_u64)
            .map(|cores| cores as usize)
            .filter(|&cores| cores > 0)
            .unwrap_or_else(fallback_core_count);
        let cpu_model = self
            .sysctl("machdep.cpu.brand_string")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_CPU.to_string());
        let load_average = self
            .sysctl("vm.loadavg")
            .as_deref()
            .and_then(parse_load_average)
            .unwrap_or_default();

        let memory_total_bytes = self
            .sysctl("hw.memsize")
            .as_deref()
            .and_then(parse_u64)
            .unwrap_or_default();
        let memory_used_bytes = self
            .runner
            .run("vm_stat", &[])
            .as_deref()
            .and_then(parse_vm_stat)
            .map(|stat| stat.used_bytes().min(memory_total_bytes))
            .unwrap_or_default();
        let (swap_total_bytes, swap_used_bytes) = self
            .sysctl("vm.swapusage")
            .as_deref()
            .and_then(parse_swap_usage)
            .unwrap_or_default();

        let memory_pressure = match self
            .sysctl("kern.memorystatus_vm_pressure_level")
            .as_deref()
            .map(parse_pressure_level)
        {
            Some(MemoryPressure::Unknown) | None => {
                estimate_memory_pressure(memory_used_bytes, memory_total_bytes, swap_used_bytes)
            }
            Some(level) => level,
        };

        let uptime_secs = self
            .sysctl("kern.boottime")
            .as_deref()
            .and_then(parse_boot_time)
            .and_then(|boot| {
                let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
                Some(now.as_secs().saturating_sub(boot))
            })
            .unwrap_or(0);

        MetricsSnapshot {
            cpu_usage_percent: self.ps_cpu_usage(cpu_core_count),
            load_average,
            cpu_core_count,
            cpu_model,
            memory_total_bytes,
            memory_used_bytes,
            swap_used_bytes,
            swap_total_bytes,
            memory_pressure,
            gpu_model: self.gpu_model.clone(),
            uptime_secs,
        }
    }

    fn collect_procfs(&self) -> MetricsSnapshot {
        let (cores, model) = self
            .runner
            .read_file("/proc/cpuinfo")
            .map(|out| parse_cpuinfo(&out))
            .unwrap_or_default();
        let cpu_core_count = if cores > 0 { cores } else { fallback_core_count() };
        let cpu_model = model.unwrap_or_else(|| UNKNOWN_CPU.to_string());
        let load_average = self
            .runner
            .read_file("/proc/loadavg")
            .as_deref()
            .and_then(parse_load_average)
            .unwrap_or_default();

        let meminfo = self
            .runner
            .read_file("/proc/meminfo")
            .as_deref()
            .and_then(parse_meminfo)
            .unwrap_or_default();
        let memory_used_bytes = meminfo.used_bytes();
        let swap_used_bytes = meminfo.swap_used_bytes();

        MetricsSnapshot {
            cpu_usage_percent: self.ps_cpu_usage(cpu_core_count),
            load_average,
            cpu_core_count,
            cpu_model,
            memory_total_bytes: meminfo.total,
            memory_used_bytes,
            swap_used_bytes,
            swap_total_bytes: meminfo.swap_total,
            memory_pressure: estimate_memory_pressure(
                memory_used_bytes,
                meminfo.total,
                swap_used_bytes,
            ),
            gpu_model: self.gpu_model.clone(),
            uptime_secs: self
                .runner
                .read_file("/proc/uptime")
                .as_deref()
                .and_then(parse_proc_uptime)
                .unwrap_or(0),
        }
    }
}

impl<R: CommandRunner> MetricsCollector for CommandCollector<R> {
    fn name(&self) -> &'static str {
        CollectorKind::Command.label()
    }

    fn collect(&mut self) -> MetricsSnapshot {
        let _span = tracing::debug_span!("collector.collect", collector = self.name()).entered();

        let snapshot = match self.source {
            Some(HostSource::Sysctl) => self.collect_sysctl(),
            Some(HostSource::Procfs) => self.collect_procfs(),
            None => MetricsSnapshot {
                cpu_model: UNKNOWN_CPU.to_string(),
                gpu_model: self.gpu_model.clone(),
                ..Default::default()
            },
        };

        if snapshot.memory_total_bytes == 0 {
            tracing::warn!(source = ?self.source, "total memory unavailable, memory readings default to zero");
        }
        snapshot
    }
}

/// `sysctl` wins when it reports physical memory; otherwise `/proc/meminfo`
/// must parse.
fn detect_source<R: CommandRunner>(runner: &R) -> Option<HostSource> {
    if runner
        .run("sysctl", &["-n", "hw.memsize"])
        .as_deref()
        .and_then(parse_u64)
        .is_some_and(|bytes| bytes > 0)
    {
        return Some(HostSource::Sysctl);
    }
    if runner
        .read_file("/proc/meminfo")
        .as_deref()
        .and_then(parse_meminfo)
        .is_some_and(|info| info.total > 0)
    {
        return Some(HostSource::Procfs);
    }
    None
}

fn fallback_core_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(0)
}
