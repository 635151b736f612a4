//! RAM sizing calculators.
//!
//! Both policies estimate the memory actually needed (resident usage plus
//! swapped-out pages), add a buffer and round up to a commercially common
//! module size.

pub const HEADROOM_FACTOR: f64 = 1.25;
pub const CONSERVATIVE_FACTOR: f64 = 1.15;

pub const HEADROOM_SIZES_GB: [f64; 10] = [
    8.0, 16.0, 24.0, 32.0, 48.0, 64.0, 96.0, 128.0, 192.0, 256.0,
];
pub const CONSERVATIVE_SIZES_GB: [f64; 7] = [16.0, 24.0, 32.0, 48.0, 64.0, 96.0, 128.0];

/// Past the largest headroom size, targets round up to this step.
pub const HEADROOM_STEP_GB: f64 = 32.0;

/// Resident usage plus swap, in GB.
pub fn memory_need_gb(total_gb: f64, used_percent: f64, swap_used_gb: f64) -> f64 {
    used_percent / 100.0 * total_gb + swap_used_gb
}

/// Target for HIGH/MEDIUM findings: 25% buffer, open-ended above 256 GB.
pub fn headroom_target_gb(total_gb: f64, used_percent: f64, swap_used_gb: f64) -> f64 {
    let target = memory_need_gb(total_gb, used_percent, swap_used_gb) * HEADROOM_FACTOR;
    round_up_to_size(target, &HEADROOM_SIZES_GB)
        .unwrap_or_else(|| (target / HEADROOM_STEP_GB).ceil() * HEADROOM_STEP_GB)
}

/// Target for CRITICAL findings and minimum upgrades: 15% buffer, capped at
/// 128 GB.
pub fn conservative_target_gb(total_gb: f64, used_percent: f64, swap_used_gb: f64) -> f64 {
    let target = memory_need_gb(total_gb, used_percent, swap_used_gb) * CONSERVATIVE_FACTOR;
    round_up_to_size(target, &CONSERVATIVE_SIZES_GB)
        .unwrap_or(CONSERVATIVE_SIZES_GB[CONSERVATIVE_SIZES_GB.len() - 1])
}

fn round_up_to_size(target: f64, sizes: &[f64]) -> Option<f64> {
    sizes.iter().copied().find(|&size| target <= size)
}
