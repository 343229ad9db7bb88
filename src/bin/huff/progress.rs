//! Progress display for the command line tool, built on `indicatif`.

use std::{io::Read, time::Duration};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

/// Wraps a reader and advances a progress bar for every byte that passes through.
///
/// The bar clears itself once `total` bytes have been read or [ProgressMonitor::finish]
/// is called, whichever happens first.
pub struct ProgressMonitor<R: Read> {
    /// The amount the reader is expected to deliver
    pub total: usize,
    /// Amount read so far
    pub read: usize,
    reader: R,
    progress_bar: ProgressBar,
}

impl<R: Read> ProgressMonitor<R> {
    pub fn new(reader: R, size: usize) -> Self {
        let style = ProgressStyle::with_template(
            "{wide_bar} {binary_bytes}/{binary_total_bytes}  \n[est. {eta} remaining]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        let progress_bar = ProgressBar::new(size as u64).with_style(style);
        // Redrawing at the default 20hz is noticeable on small inputs
        progress_bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(8));
        Self {
            reader,
            total: size,
            read: 0,
            progress_bar,
        }
    }

    fn update(&mut self, delta: u64) {
        self.progress_bar.inc(delta);
        if self.read >= self.total {
            self.finish();
        }
    }

    /// Clear the bar and log throughput. Does nothing the second time.
    pub fn finish(&self) {
        if self.progress_bar.is_finished() {
            return;
        }
        self.progress_bar.finish_and_clear();
        let elapsed = self.progress_bar.elapsed();
        info!(
            "read {} in {} ({}/s avg)",
            fmt_size(self.read as f64),
            fmt_duration(elapsed),
            fmt_size(self.read as f64 / elapsed.as_secs_f64().max(f64::EPSILON))
        );
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let out = self.reader.read(buf)?;
        self.read += out;
        self.update(out as u64);
        Ok(out)
    }
}

/// Converts a quantity in bytes to a human readable size, "GiB, MiB, KiB, etc"
pub fn fmt_size(size_in_bytes: f64) -> String {
    let units = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    let order_of_magnitude = size_in_bytes.log10().max(0.0) as usize;
    // Switch to the next unit once there are more than three figures before the decimal
    let unit_index = (order_of_magnitude / 3).min(units.len() - 1);
    let decimal = size_in_bytes / 2_f64.powi((unit_index * 10) as i32);
    if unit_index > 0 {
        format!("{:.2}{}", decimal, units[unit_index])
    } else {
        format!("{:.0}{}", decimal, units[unit_index])
    }
}

/// Converts a [`std::time::Duration`] to a human readable format
pub fn fmt_duration(duration: Duration) -> String {
    let as_secs = duration.as_secs_f64();
    let secs_portion = as_secs % 60.0;
    let whole_minutes = (as_secs / 60.0).floor() as usize;
    let min_portion = whole_minutes % 60;
    let hr_portion = whole_minutes / 60;

    let mut parts = Vec::with_capacity(3);
    if hr_portion > 0 {
        parts.push(format!("{hr_portion}h"));
    }
    if min_portion > 0 {
        parts.push(format!("{min_portion}m"));
    }
    if as_secs > 60.0 && secs_portion != 0.0 {
        parts.push(format!("{:.0}s", secs_portion.round()));
    } else if secs_portion > 4.0 {
        parts.push(format!("{secs_portion:.1}s"));
    } else if secs_portion > 1.0 {
        parts.push(format!("{secs_portion:.2}s"));
    } else if secs_portion > 0.0 {
        parts.push(format!("{:.2}ms", secs_portion * 1000.0));
    }
    parts.join(" ")
}
