//! Running platform utilities and parsing what they print.
//!
//! The parsers are plain functions over captured stdout so they can be tested
//! on any host; only [`SystemRunner`] actually spawns processes or touches
//! `/proc`.

use std::fs;
use std::process::Command;

use crate::system::snapshot::{BYTES_PER_MB, LoadAverage, MemoryPressure};

/// Captures stdout of a utility, or the text of a kernel pseudo-file. `None`
/// covers every failure mode: missing binary or file, non-zero exit, non
/// UTF-8 output.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Option<String>;
    fn read_file(&self, path: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Option<String> {
        let output = match Command::new(program).args(args).output() {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(program, ?args, error = %err, "failed to spawn utility");
                return None;
            }
        };
        if !output.status.success() {
            tracing::debug!(program, ?args, status = ?output.status, "utility exited with failure");
            return None;
        }
        String::from_utf8(output.stdout).ok()
    }

    fn read_file(&self, path: &str) -> Option<String> {
        match fs::read_to_string(path) {
            Ok(contents) => Some(contents),
            Err(err) => {
                tracing::debug!(path, error = %err, "failed to read kernel file");
                None
            }
        }
    }
}

/// Page counters reported by `vm_stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VmStat {
    pub page_size: u64,
    pub pages_free: u64,
    pub pages_active: u64,
    pub pages_inactive: u64,
    pub pages_speculative: u64,
    pub pages_wired: u64,
    pub pages_compressed: u64,
}

impl VmStat {
    /// App memory plus wired plus compressed, the figure Activity Monitor
    /// reports as "Memory Used".
    pub fn used_bytes(&self) -> u64 {
        (self.pages_active + self.pages_wired + self.pages_compressed) * self.page_size
    }
}

pub fn parse_vm_stat(output: &str) -> Option<VmStat> {
    let mut lines = output.lines();
    let header = lines.next()?;
    let page_size = header
        .split("page size of")
        .nth(1)?
        .split_whitespace()
        .next()?
        .parse()
        .ok()?;

    let mut stat = VmStat {
        page_size,
        ..Default::default()
    };

    for line in lines {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let Ok(pages) = value.trim().trim_end_matches('.').parse::<u64>() else {
            continue;
        };
        match label.trim() {
            "Pages free" => stat.pages_free = pages,
            "Pages active" => stat.pages_active = pages,
            "Pages inactive" => stat.pages_inactive = pages,
            "Pages speculative" => stat.pages_speculative = pages,
            "Pages wired down" => stat.pages_wired = pages,
            "Pages occupied by compressor" => stat.pages_compressed = pages,
            _ => {}
        }
    }

    Some(stat)
}

/// Parses `sysctl vm.swapusage` output such as
/// `total = 2048.00M  used = 1024.50M  free = 1023.50M  (encrypted)` into
/// `(total_bytes, used_bytes)`.
pub fn parse_swap_usage(output: &str) -> Option<(u64, u64)> {
    let mut total = None;
    let mut used = None;
    let mut tokens = output.split_whitespace();

    while let Some(token) = tokens.next() {
        let slot = match token {
            "total" => &mut total,
            "used" => &mut used,
            _ => continue,
        };
        if tokens.next() != Some("=") {
            continue;
        }
        *slot = tokens.next().and_then(parse_size_with_unit);
    }

    Some((total?, used?))
}

fn parse_size_with_unit(token: &str) -> Option<u64> {
    let split = token.find(|c: char| c.is_ascii_alphabetic()).unwrap_or(token.len());
    let (number, unit) = token.split_at(split);
    let value: f64 = number.parse().ok()?;
    let multiplier = match unit.to_ascii_uppercase().as_str() {
        "" | "B" => 1.0,
        "K" => 1024.0,
        "M" => BYTES_PER_MB,
        "G" => BYTES_PER_MB * 1024.0,
        "T" => BYTES_PER_MB * 1024.0 * 1024.0,
        _ => return None,
    };
    Some((value * multiplier).round() as u64)
}

/// Accepts both `sysctl -n vm.loadavg` (`{ 1.20 1.35 1.50 }`) and
/// `/proc/loadavg` (`1.20 1.35 1.50 2/512 4242`).
pub fn parse_load_average(output: &str) -> Option<LoadAverage> {
    let mut values = output
        .split_whitespace()
        .filter(|t| *t != "{" && *t != "}")
        .map(|t| t.replace(',', "."))
        .map(|t| t.parse::<f64>());

    let one = values.next()?.ok()?;
    let five = values.next()?.ok()?;
    let fifteen = values.next()?.ok()?;
    Some(LoadAverage::new(one, five, fifteen))
}

/// Maps `kern.memorystatus_vm_pressure_level` (1, 2, 4) to a pressure level.
pub fn pressure_from_level(level: i64) -> MemoryPressure {
    match level {
        1 => MemoryPressure::Normal,
        2 => MemoryPressure::Warning,
        4 => MemoryPressure::Critical,
        _ => MemoryPressure::Unknown,
    }
}

pub fn parse_pressure_level(output: &str) -> MemoryPressure {
    output
        .trim()
        .parse::<i64>()
        .map(pressure_from_level)
        .unwrap_or_else(|_| MemoryPressure::from_label(output))
}

/// Sums the `%CPU` column of `ps -A -o %cpu` and normalizes by core count.
pub fn parse_ps_cpu_total(output: &str, cores: usize) -> f64 {
    if cores == 0 {
        return 0.0;
    }
    let total: f64 = output
        .lines()
        .filter_map(|line| line.trim().replace(',', ".").parse::<f64>().ok())
        .sum();
    (total / cores as f64).clamp(0.0, 100.0)
}

/// Reads the `sec` field of `sysctl -n kern.boottime`
/// (`{ sec = 1700000000, usec = 0 } Tue Nov 14 22:13:20 2023`).
pub fn parse_boot_time(output: &str) -> Option<u64> {
    let rest = output.split("sec =").nth(1)?;
    rest.split(',').next()?.trim().parse().ok()
}

pub fn parse_u64(output: &str) -> Option<u64> {
    output.trim().parse().ok()
}

/// First `Chipset Model` entry from `system_profiler SPDisplaysDataType`.
pub fn parse_display_chipset(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (label, value) = line.trim().split_once(':')?;
        let value = value.trim();
        (label.trim() == "Chipset Model" && !value.is_empty()).then(|| value.to_string())
    })
}

/// First VGA, 3D or display controller from `lspci`.
pub fn parse_lspci_gpu(output: &str) -> Option<String> {
    const CLASSES: [&str; 3] = ["VGA compatible controller", "3D controller", "Display controller"];

    output.lines().find_map(|line| {
        let (_, rest) = line.split_once(' ')?;
        let (class, device) = rest.split_once(':')?;
        let class = class.trim();
        let device = device.trim();
        (CLASSES.contains(&class) && !device.is_empty()).then(|| device.to_string())
    })
}

/// First adapter name from `wmic path win32_VideoController get name`.
pub fn parse_wmic_names(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .skip(1)
        .map(str::to_string)
        .next()
}

/// Fields of `/proc/meminfo`, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemInfo {
    pub total: u64,
    pub available: u64,
    pub swap_total: u64,
    pub swap_free: u64,
}

impl MemInfo {
    pub fn used_bytes(&self) -> u64 {
        self.total.saturating_sub(self.available)
    }

    pub fn swap_used_bytes(&self) -> u64 {
        self.swap_total.saturating_sub(self.swap_free)
    }
}

/// Parses `/proc/meminfo`. `MemAvailable` is preferred; kernels older than
/// 3.14 only have `MemFree`.
pub fn parse_meminfo(output: &str) -> Option<MemInfo> {
    let mut total = None;
    let mut available = None;
    let mut free = None;
    let mut info = MemInfo::default();

    for line in output.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let Some(kb) = value
            .split_whitespace()
            .next()
            .and_then(|v| v.parse::<u64>().ok())
        else {
            continue;
        };
        let bytes = kb * 1024;
        match label.trim() {
            "MemTotal" => total = Some(bytes),
            "MemAvailable" => available = Some(bytes),
            "MemFree" => free = Some(bytes),
            "SwapTotal" => info.swap_total = bytes,
            "SwapFree" => info.swap_free = bytes,
            _ => {}
        }
    }

    info.total = total?;
    info.available = available.or(free).unwrap_or(0).min(info.total);
    Some(info)
}

/// Logical processor count and first `model name` from `/proc/cpuinfo`.
pub fn parse_cpuinfo(output: &str) -> (usize, Option<String>) {
    let mut count = 0;
    let mut model = None;
    for line in output.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        match label.trim() {
            "processor" => count += 1,
            "model name" if model.is_none() => {
                let value = value.trim();
                if !value.is_empty() {
                    model = Some(value.to_string());
                }
            }
            _ => {}
        }
    }
    (count, model)
}

/// Seconds since boot from the first field of `/proc/uptime`.
pub fn parse_proc_uptime(output: &str) -> Option<u64> {
    let secs: f64 = output.split_whitespace().next()?.parse().ok()?;
    Some(secs.max(0.0) as u64)
}
