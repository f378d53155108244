use chrono::{DateTime, Local};
use std::fmt::{Display, Formatter, Result};

/// Snapshot of the machine a benchmark ran on, printed after each run.
#[derive(Debug, Clone)]
pub struct SystemReport {
    pub os: &'static str,
    pub family: &'static str,
    pub arch: &'static str,
    pub available_parallelism: Option<usize>,
    pub total_memory_gb: Option<f64>,
    pub rss_gb: Option<f64>,
    pub crate_version: &'static str,
    pub collected_at: DateTime<Local>,
}

impl SystemReport {
    pub fn collect() -> Self {
        Self {
            os: std::env::consts::OS,
            family: std::env::consts::FAMILY,
            arch: std::env::consts::ARCH,
            available_parallelism: std::thread::available_parallelism()
                .ok()
                .map(|n| n.get()),
            total_memory_gb: total_memory_gb(),
            rss_gb: current_rss_gb(),
            crate_version: env!("CARGO_PKG_VERSION"),
            collected_at: Local::now(),
        }
    }
}

fn fmt_gb(v: Option<f64>) -> String {
    v.map(|gb| format!("{gb:.3} GB"))
        .unwrap_or_else(|| "unavailable".to_string())
}

impl Display for SystemReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "=== Rust Runtime Benchmark Environment ===")?;
        writeln!(f, "OS: {} ({})", self.os, self.family)?;
        writeln!(f, "Architecture: {}", self.arch)?;
        writeln!(f, "bariance Version: {}", self.crate_version)?;
        match self.available_parallelism {
            Some(n) => writeln!(f, "Available Processors: {n}")?,
            None => writeln!(f, "Available Processors: unavailable")?,
        }
        writeln!(f, "Total Memory: {}", fmt_gb(self.total_memory_gb))?;
        writeln!(f, "Resident Memory: {}", fmt_gb(self.rss_gb))?;
        writeln!(
            f,
            "Collected At: {}",
            self.collected_at.format("%Y-%m-%d %H:%M:%S %z")
        )?;
        write!(f, "==========================================")
    }
}

/// Physical memory installed, in GB. Linux only.
#[inline]
pub fn total_memory_gb() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
        parse_kb_field_gb(&meminfo, "MemTotal:")
    }

    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[inline]
pub fn current_rss_gb() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        calculate_rss_for_linux()
    }

    #[cfg(target_os = "macos")]
    {
        calculate_rss_for_macos()
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

#[cfg(target_os = "linux")]
fn calculate_rss_for_linux() -> Option<f64> {
    use std::fs;
    let status = fs::read_to_string("/proc/self/status").ok()?;
    parse_kb_field_gb(&status, "VmRSS:")
}

/// Reads a `Key:   123 kB` line from a `/proc` file and converts it to GB.
#[cfg(target_os = "linux")]
fn parse_kb_field_gb(text: &str, key: &str) -> Option<f64> {
    for line in text.lines() {
        let Some(rest) = line.strip_prefix(key) else {
            continue;
        };
        if let Some(kb) = rest.split_whitespace().find_map(|t| t.parse::<u64>().ok()) {
            return Some(kb as f64 / (1024.0 * 1024.0)); // kB -> GB
        }
    }
    None
}

#[cfg(target_os = "macos")]
fn calculate_rss_for_macos() -> Option<f64> {
    use libc::{c_int, c_void, kern_return_t, mach_msg_type_number_t, mach_port_t, time_value_t};
    use std::mem::{size_of, zeroed};

    #[repr(C)]
    #[allow(non_camel_case_types)]
    struct mach_task_basic_info {
        virtual_size: u64,
        resident_size: u64,
        resident_size_max: u64,
        user_time: time_value_t,
        system_time: time_value_t,
        policy: i32,
        suspend_count: i32,
    }

    unsafe extern "C" {
        fn mach_task_self() -> mach_port_t;
        fn task_info(
            target_task: mach_port_t,
            flavor: c_int,
            task_info_out: *mut c_void,
            task_info_out_count: *mut mach_msg_type_number_t,
        ) -> kern_return_t;
    }

    const MACH_TASK_BASIC_INFO: c_int = 20;
    const MACH_TASK_BASIC_INFO_COUNT: mach_msg_type_number_t =
        (size_of::<mach_task_basic_info>() / size_of::<u32>()) as _;

    unsafe {
        let mut info: mach_task_basic_info = zeroed();
        let mut count = MACH_TASK_BASIC_INFO_COUNT;
        let kr = task_info(
            mach_task_self(),
            MACH_TASK_BASIC_INFO,
            &mut info as *mut _ as *mut c_void,
            &mut count,
        );
        if kr == 0 {
            return Some(info.resident_size as f64 / (1024.0 * 1024.0 * 1024.0));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    mod linux {
        use super::super::parse_kb_field_gb;

        #[test]
        fn parses_basic_vmrss_line() {
            let s = "Name:\tproc\nVmSize:\t  999 kB\nVmRSS:\t  123456 kB\nThreads: 4\n";
            let got = parse_kb_field_gb(s, "VmRSS:").unwrap();
            let want = 123456.0 / (1024.0 * 1024.0);
            assert!((got - want).abs() < 1e-12, "got={got}, want={want}");
        }

        #[test]
        fn parses_meminfo_total() {
            let s = "MemTotal:       16384000 kB\nMemFree:         1024000 kB\n";
            let got = parse_kb_field_gb(s, "MemTotal:").unwrap();
            let want = 16384000.0 / (1024.0 * 1024.0);
            assert!((got - want).abs() < 1e-12, "got={got}, want={want}");
        }

        #[test]
        fn ignores_non_numeric_tokens_and_picks_number() {
            let s = "VmRSS:\t  abc  789  kB";
            let got = parse_kb_field_gb(s, "VmRSS:").unwrap();
            let want = 789.0 / (1024.0 * 1024.0);
            assert!((got - want).abs() < 1e-12);
        }

        #[test]
        fn returns_none_if_key_missing() {
            let s = "Name:\tfoo\nVmSize:\t 1024 kB\n";
            assert!(parse_kb_field_gb(s, "VmRSS:").is_none());
        }

        #[test]
        fn returns_none_if_number_missing() {
            let s = "VmRSS:\t kB";
            assert!(parse_kb_field_gb(s, "VmRSS:").is_none());
        }

        #[test]
        fn smoke_current_rss_and_total_memory() {
            let rss = super::super::current_rss_gb().unwrap();
            let total = super::super::total_memory_gb().unwrap();
            assert!(rss >= 0.0);
            assert!(total > 0.0);
        }
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn macos_current_rss_smoke() {
        let v = current_rss_gb();
        assert!(v.is_some(), "expected Some on macOS");
        let x = v.unwrap();
        assert!(x.is_finite() && x >= 0.0, "invalid RSS value: {x}");
    }

    #[test]
    fn report_display_is_framed_and_complete() {
        let report = SystemReport::collect();
        let text = report.to_string();
        assert!(text.starts_with("=== Rust Runtime Benchmark Environment ==="));
        assert!(text.ends_with("=========================================="));
        assert!(text.contains(&format!("Architecture: {}", std::env::consts::ARCH)));
        assert!(text.contains("Available Processors: "));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn missing_values_render_as_unavailable() {
        assert_eq!(fmt_gb(None), "unavailable");
        assert_eq!(fmt_gb(Some(1.5)), "1.500 GB");
    }
}
