//! Read-only queries against the host machine.
//!
//! Every query is best effort: on any failure it returns a fixed
//! "Unknown ..." sentinel for its category instead of an error.

use std::env;
use std::path::{Path, PathBuf};
use sysinfo::System;

const GIB: u64 = 1024 * 1024 * 1024;

pub const UNKNOWN_USER: &str = "Unknown User";
pub const UNKNOWN_OS: &str = "Unknown OS";
pub const UNKNOWN_CPU: &str = "Unknown CPU";
pub const UNKNOWN_GPU: &str = "Unknown GPU";
pub const UNKNOWN_RAM: &str = "Unknown RAM Size";

/// Strings shown in the information banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub os: String,
    pub user: String,
    pub cpu: String,
    pub gpu: String,
    pub ram: String,
}

impl SystemInfo {
    /// Query the host for every banner field
    pub fn collect() -> Self {
        let mut sys = System::new();

        Self {
            os: os_name(),
            user: username(),
            cpu: cpu_name(&mut sys),
            gpu: gpu_name(),
            ram: ram_size(&mut sys),
        }
    }
}

/// The current user's temporary directory as reported by the host.
pub fn temp_dir() -> PathBuf {
    env::temp_dir()
}

/// Free bytes on the volume holding `path`.
pub fn available_space(path: &Path) -> Option<u64> {
    fs2::available_space(path).ok()
}

pub fn username() -> String {
    ["USERNAME", "USER"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}

pub fn os_name() -> String {
    System::long_os_version()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_OS.to_string())
}

pub fn cpu_name(sys: &mut System) -> String {
    sys.refresh_cpu_all();
    sys.cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
        .unwrap_or_else(|| UNKNOWN_CPU.to_string())
}

/// Total physical memory, floored to whole GiB.
pub fn ram_size(sys: &mut System) -> String {
    sys.refresh_memory();
    format_ram(sys.total_memory())
}

fn format_ram(total_bytes: u64) -> String {
    if total_bytes == 0 {
        return UNKNOWN_RAM.to_string();
    }
    format!("{} GB", total_bytes / GIB)
}

pub fn gpu_name() -> String {
    first_display_adapter().unwrap_or_else(|| UNKNOWN_GPU.to_string())
}

#[cfg(target_os = "linux")]
fn first_display_adapter() -> Option<String> {
    let mut cards: Vec<PathBuf> = std::fs::read_dir("/sys/class/drm")
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_card_name(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();
    cards.sort();

    cards.iter().find_map(|card| {
        let uevent = std::fs::read_to_string(card.join("device").join("uevent")).ok()?;
        describe_uevent(&uevent)
    })
}

#[cfg(windows)]
fn first_display_adapter() -> Option<String> {
    let output = std::process::Command::new("wmic")
        .args(["path", "win32_VideoController", "get", "name"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    first_table_value(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(not(any(target_os = "linux", windows)))]
fn first_display_adapter() -> Option<String> {
    None
}

/// `card0` is an adapter, `card0-HDMI-A-1` is one of its connectors.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn is_card_name(name: &str) -> bool {
    name.strip_prefix("card")
        .map(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

/// Build "driver (vendor:device)" from a sysfs uevent file.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn describe_uevent(uevent: &str) -> Option<String> {
    let mut driver = None;
    let mut pci_id = None;
    for line in uevent.lines() {
        if let Some(value) = line.strip_prefix("DRIVER=") {
            driver = Some(value.trim());
        } else if let Some(value) = line.strip_prefix("PCI_ID=") {
            pci_id = Some(value.trim());
        }
    }

    match (driver, pci_id) {
        (Some(driver), Some(id)) => Some(format!("{} ({})", driver, id)),
        (Some(driver), None) => Some(driver.to_string()),
        (None, Some(id)) => Some(id.to_string()),
        (None, None) => None,
    }
}

/// First value under the header of `wmic ... get <column>` output.
#[cfg_attr(not(windows), allow(dead_code))]
fn first_table_value(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .nth(1)
        .map(str::to_string)
}
