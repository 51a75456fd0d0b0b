use super::{network_mb, CircularBuffer, StatReadout, SystemSample};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sysinfo::{Disks, Networks, System};

/// Backend producing resource samples.
pub trait MetricsSource {
    fn sample(&mut self) -> SystemSample;
}

/// [`MetricsSource`] backed by `sysinfo`.
pub struct SysinfoSource {
    system: System,
    networks: Networks,
    disks: Disks,
    root: PathBuf,
}

impl SysinfoSource {
    /// Returns `None` on platforms `sysinfo` does not support.
    pub fn new() -> Option<Self> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            warn!("sysinfo does not support this platform");
            return None;
        }

        let mut system = System::new();
        system.refresh_cpu_usage();

        Some(Self {
            system,
            networks: Networks::new_with_refreshed_list(),
            disks: Disks::new_with_refreshed_list(),
            root: filesystem_root(),
        })
    }
}

impl MetricsSource for SysinfoSource {
    fn sample(&mut self) -> SystemSample {
        self.system.refresh_cpu_usage();
        self.networks.refresh(true);
        self.disks.refresh(true);

        let (sent, received) = self
            .networks
            .list()
            .values()
            .fold((0u64, 0u64), |(tx, rx), data| {
                (
                    tx.saturating_add(data.total_transmitted()),
                    rx.saturating_add(data.total_received()),
                )
            });

        let disk_percent = disk_usage_percent(
            self.disks
                .list()
                .iter()
                .map(|d| (d.mount_point(), d.total_space(), d.available_space())),
            &self.root,
        )
        .unwrap_or_else(|| {
            warn!("No disk found for {}", self.root.display());
            0.0
        });

        SystemSample {
            cpu_percent: self.system.global_cpu_usage(),
            network_mb: network_mb(sent, received),
            disk_percent,
        }
    }
}

/// Root of the filesystem holding the working directory (`/`, `C:\`, ...).
fn filesystem_root() -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|dir| dir.ancestors().last().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(std::path::MAIN_SEPARATOR_STR))
}

/// Usage percent of the disk whose mount point is the longest prefix of `root`.
///
/// Entries are `(mount_point, total_bytes, available_bytes)`.
pub fn disk_usage_percent<'a>(
    disks: impl IntoIterator<Item = (&'a Path, u64, u64)>,
    root: &Path,
) -> Option<f32> {
    disks
        .into_iter()
        .filter(|(mount, total, _)| *total > 0 && root.starts_with(mount))
        .max_by_key(|(mount, _, _)| mount.as_os_str().len())
        .map(|(_, total, available)| {
            let used = total.saturating_sub(available);
            (used as f64 / total as f64 * 100.0) as f32
        })
}

/// Polls a [`MetricsSource`] at a fixed interval from the UI loop.
pub struct MetricsMonitor {
    source: Option<Box<dyn MetricsSource>>,
    last_update: Option<Instant>,
    update_interval: Duration,
    last_sample: Option<SystemSample>,
    cpu_history: CircularBuffer<f32>,
}

impl MetricsMonitor {
    /// `source` is `None` when no metrics backend is available.
    pub fn new(
        source: Option<Box<dyn MetricsSource>>,
        update_interval: Duration,
        history_len: usize,
    ) -> Self {
        Self {
            source,
            last_update: None,
            update_interval,
            last_sample: None,
            cpu_history: CircularBuffer::new(history_len),
        }
    }

    pub fn with_sysinfo(update_interval: Duration, history_len: usize) -> Self {
        let source = SysinfoSource::new().map(|s| Box::new(s) as Box<dyn MetricsSource>);
        info!(
            "Metrics backend {}",
            if source.is_some() { "ready" } else { "unavailable" }
        );
        Self::new(source, update_interval, history_len)
    }

    pub fn is_available(&self) -> bool {
        self.source.is_some()
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub fn set_update_interval(&mut self, interval: Duration) {
        self.update_interval = interval;
    }

    pub fn set_history_len(&mut self, len: usize) {
        if len.max(1) != self.cpu_history.capacity() {
            let mut resized = CircularBuffer::new(len);
            for &v in self.cpu_history.iter() {
                resized.push(v);
            }
            self.cpu_history = resized;
        }
    }

    pub fn should_update(&self) -> bool {
        self.last_update
            .map_or(true, |t| t.elapsed() >= self.update_interval)
    }

    /// Time left before the next poll is due.
    pub fn time_until_update(&self) -> Duration {
        self.last_update
            .map_or(Duration::ZERO, |t| self.update_interval.saturating_sub(t.elapsed()))
    }

    pub fn update(&mut self) {
        if let Some(source) = self.source.as_mut() {
            let sample = source.sample();
            self.cpu_history.push(sample.cpu_percent);
            self.last_sample = Some(sample);
        }
        self.last_update = Some(Instant::now());
    }

    pub fn last_sample(&self) -> Option<&SystemSample> {
        self.last_sample.as_ref()
    }

    pub fn cpu_history(&self) -> Vec<f32> {
        self.cpu_history.as_vec()
    }

    pub fn history_capacity(&self) -> usize {
        self.cpu_history.capacity()
    }

    /// Card contents; the unavailable placeholder when there is no backend.
    pub fn readouts(&self) -> [StatReadout; 3] {
        if !self.is_available() {
            return StatReadout::from_sample(None);
        }
        let sample = self.last_sample.unwrap_or_default();
        StatReadout::from_sample(Some(&sample))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::UNAVAILABLE;

    struct FakeSource {
        cpu: f32,
    }

    impl MetricsSource for FakeSource {
        fn sample(&mut self) -> SystemSample {
            self.cpu += 10.0;
            SystemSample {
                cpu_percent: self.cpu,
                network_mb: 5.0,
                disk_percent: 50.0,
            }
        }
    }

    fn fake_monitor(history_len: usize) -> MetricsMonitor {
        MetricsMonitor::new(
            Some(Box::new(FakeSource { cpu: 0.0 })),
            Duration::from_secs(3600),
            history_len,
        )
    }

    #[test]
    fn first_poll_is_due_immediately() {
        let mut monitor = fake_monitor(10);
        assert!(monitor.should_update());
        monitor.update();
        assert!(!monitor.should_update());
        assert_eq!(monitor.last_sample().map(|s| s.cpu_percent), Some(10.0));
    }

    #[test]
    fn cpu_history_is_bounded() {
        let mut monitor = fake_monitor(3);
        for _ in 0..5 {
            monitor.update();
        }
        assert_eq!(monitor.cpu_history(), vec![30.0, 40.0, 50.0]);

        monitor.set_history_len(2);
        assert_eq!(monitor.cpu_history(), vec![40.0, 50.0]);
    }

    #[test]
    fn missing_backend_keeps_polling_with_placeholders() {
        let mut monitor = MetricsMonitor::new(None, Duration::from_millis(0), 10);
        monitor.update();
        monitor.update();

        assert!(monitor.should_update());
        assert!(monitor.last_sample().is_none());
        for r in monitor.readouts() {
            assert_eq!(r.text, UNAVAILABLE);
            assert_eq!(r.value, 0.0);
        }
    }

    #[test]
    fn picks_most_specific_mount_point() {
        let disks = [
            (Path::new("/"), 1000, 250),
            (Path::new("/home"), 1000, 900),
            (Path::new("/boot"), 0, 0),
        ];
        let pct = disk_usage_percent(disks, Path::new("/home")).unwrap();
        assert!((pct - 10.0).abs() < 1e-4);
        let pct = disk_usage_percent(disks, Path::new("/")).unwrap();
        assert!((pct - 75.0).abs() < 1e-4);
        assert!(disk_usage_percent(disks, Path::new("C:\\")).is_none());
    }
}
