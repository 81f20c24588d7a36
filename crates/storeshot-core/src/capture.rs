use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::Config;

/// Build the `screencapture` invocation for `destination`.
///
/// `-x` silences the shutter sound; `-w` asks the user to click the window
/// to capture and blocks until they do.
pub fn build_command(program: &str, destination: &Path, window_only: bool) -> Command {
    let mut command = Command::new(program);
    command.arg("-x");
    if window_only {
        command.arg("-w");
    }
    command.arg(destination.as_os_str());
    command
}

/// File name of the `index`-th capture (1-based)
pub fn capture_file_name(index: u32) -> String {
    format!("screenshot_{:02}.png", index)
}

/// Count down `delay_secs` seconds, one line per second
fn countdown(delay_secs: u64) {
    if delay_secs == 0 {
        return;
    }

    println!("\nTaking screenshot in {} seconds...", delay_secs);
    println!("Position your app window as desired");
    for remaining in (1..=delay_secs).rev() {
        println!("  {}...", remaining);
        let _ = std::io::stdout().flush();
        thread::sleep(Duration::from_secs(1));
    }
}

/// Take one screenshot into `destination` and return the path.
///
/// Failures of the screenshot command are logged but not returned: a
/// missing file shows up later when the batch tries to decode it.
pub fn capture(destination: &Path, window_only: bool, delay_secs: u64, program: &str) -> PathBuf {
    countdown(delay_secs);

    if window_only {
        println!("Click on the window you want to capture...");
    }

    let mut command = build_command(program, destination, window_only);
    debug!("Running {:?}", command);

    match command.status() {
        Ok(status) if status.success() => {
            info!("Screenshot saved: {}", destination.display());
        }
        Ok(status) => {
            warn!(
                "{} exited with {} for {}",
                program,
                status,
                destination.display()
            );
        }
        Err(e) => {
            warn!("Failed to run {}: {}", program, e);
        }
    }

    destination.to_path_buf()
}

/// Capture `count` screenshots sequentially into the output directory
pub fn capture_series(count: u32, config: &Config) -> Vec<PathBuf> {
    info!("Capturing {} screenshots...", count);

    (1..=count)
        .map(|index| {
            let destination = config.output_dir.join(capture_file_name(index));
            capture(
                &destination,
                config.window_only,
                config.capture_delay_secs,
                &config.capture_command,
            )
        })
        .collect()
}
