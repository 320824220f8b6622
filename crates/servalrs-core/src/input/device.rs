// Servalrs Input Layer - evdev Controller Source
// Finds the physical controller and pulls raw events from it

use std::collections::VecDeque;
use std::os::unix::io::AsRawFd;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use evdev::Device;
use log::{debug, info, warn};

use super::event::RawEvent;
use super::filter::{is_virtual_device, matches_device};
use super::source::{EventSource, SourceError, SourceResult};

/// Device information for listing devices
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    /// Device index
    pub index: usize,
    /// Device name
    pub name: String,
    /// Device path (if available)
    pub path: Option<String>,
}

/// Raw event source backed by a single evdev device.
///
/// Reads block in `poll()` with a short timeout so the shared `running`
/// flag is observed; clearing it ends the stream. The device is ungrabbed
/// on drop.
pub struct EvdevSource {
    device: Device,
    path: PathBuf,
    poll_fd: libc::pollfd,
    pending: VecDeque<RawEvent>,
    running: Arc<AtomicBool>,
    grabbed: bool,
    timeout_ms: i32,
}

impl EvdevSource {
    /// Poll timeout used between checks of the running flag
    pub const POLL_TIMEOUT_MS: i32 = 100;

    /// List every input device evdev can see
    ///
    /// This is useful for the --list-devices CLI flag.
    pub fn list_devices() -> Vec<DeviceInfo> {
        evdev::enumerate()
            .enumerate()
            .map(|(index, (path, device))| DeviceInfo {
                index,
                name: device.name().unwrap_or("Unknown").to_string(),
                path: path.to_str().map(|s| s.to_string()),
            })
            .collect()
    }

    /// Find the controller by exact name or path.
    ///
    /// Returns `Ok(None)` when nothing matches; a missing controller is
    /// not an error.
    pub fn open(
        wanted: &str,
        virtual_name: &str,
        running: Arc<AtomicBool>,
    ) -> SourceResult<Option<Self>> {
        for (path, device) in evdev::enumerate() {
            let device_name = device.name().unwrap_or("Unknown");
            let device_path = path.to_str().unwrap_or_default();

            if is_virtual_device(device_name, virtual_name) {
                continue;
            }

            if matches_device(device_name, device_path, wanted) {
                debug!("Matched '{}' at {}", device_name, path.display());
                let poll_fd = libc::pollfd {
                    fd: device.as_raw_fd(),
                    events: libc::POLLIN,
                    revents: 0,
                };
                return Ok(Some(Self {
                    device,
                    path,
                    poll_fd,
                    pending: VecDeque::new(),
                    running,
                    grabbed: false,
                    timeout_ms: Self::POLL_TIMEOUT_MS,
                }));
            }
        }

        debug!("No input device named '{}'", wanted);
        Ok(None)
    }

    /// Like `open`, but a missing controller is reported as an error.
    pub fn open_required(
        wanted: &str,
        virtual_name: &str,
        running: Arc<AtomicBool>,
    ) -> SourceResult<Self> {
        Self::open(wanted, virtual_name, running)?
            .ok_or_else(|| SourceError::DeviceNotFound(wanted.to_string()))
    }

    /// Grab the controller so its raw events reach nobody else
    pub fn grab(&mut self) -> SourceResult<()> {
        if !self.grabbed {
            self.device.grab()?;
            self.grabbed = true;
            info!("Grabbed {}", self.path.display());
        }
        Ok(())
    }

    /// Release a previous grab
    pub fn ungrab(&mut self) {
        if self.grabbed {
            let _ = self.device.ungrab();
            self.grabbed = false;
        }
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    /// Device name as reported by evdev
    pub fn name(&self) -> &str {
        self.device.name().unwrap_or("Unknown")
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn wait_readable(&mut self) -> SourceResult<Readiness> {
        poll_readiness(&mut self.poll_fd, self.timeout_ms)
    }
}

/// Outcome of one `poll()` on the device fd
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Readable,
    /// Timeout or EINTR; recheck the running flag
    Idle,
    /// POLLHUP, POLLERR or POLLNVAL with nothing left to read
    Gone,
}

/// Pending input wins over a hangup so buffered events still drain.
fn poll_readiness(poll_fd: &mut libc::pollfd, timeout_ms: i32) -> SourceResult<Readiness> {
    poll_fd.revents = 0;
    let poll_result = unsafe { libc::poll(poll_fd, 1, timeout_ms) };

    if poll_result < 0 {
        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::EINTR) {
            return Ok(Readiness::Idle);
        }
        return Err(SourceError::Io(err));
    }
    if poll_result == 0 {
        return Ok(Readiness::Idle);
    }

    let revents = poll_fd.revents;
    if revents & libc::POLLIN != 0 {
        Ok(Readiness::Readable)
    } else if revents & (libc::POLLHUP | libc::POLLERR | libc::POLLNVAL) != 0 {
        Ok(Readiness::Gone)
    } else {
        Ok(Readiness::Idle)
    }
}

impl EventSource for EvdevSource {
    fn next_event(&mut self) -> SourceResult<Option<RawEvent>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }

            if !self.running.load(Ordering::SeqCst) {
                return Ok(None);
            }

            match self.wait_readable()? {
                Readiness::Readable => {}
                Readiness::Idle => continue,
                Readiness::Gone => {
                    warn!("{} hung up", self.path.display());
                    return Ok(None);
                }
            }

            match self.device.fetch_events() {
                Ok(events) => self.pending.extend(events.map(RawEvent::from)),
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {}
                Err(err) if err.raw_os_error() == Some(libc::ENODEV) => {
                    warn!("{} disconnected", self.path.display());
                    return Ok(None);
                }
                Err(err) => return Err(SourceError::Io(err)),
            }
        }
    }
}

/// The grab must not outlive the process, or the controller stays
/// unusable for everything else.
impl Drop for EvdevSource {
    fn drop(&mut self) {
        self.ungrab();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_devices_indices_are_sequential() {
        let devices = EvdevSource::list_devices();
        for (i, device) in devices.iter().enumerate() {
            assert_eq!(device.index, i);
        }
    }

    #[test]
    fn test_open_unknown_device_is_none() {
        let running = Arc::new(AtomicBool::new(true));
        match EvdevSource::open("servalrs test: no such device", "servalrs-virtual", running) {
            Ok(source) => assert!(source.is_none()),
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }

    #[test]
    fn test_open_required_unknown_device_errors() {
        let running = Arc::new(AtomicBool::new(true));
        let result = EvdevSource::open_required(
            "servalrs test: no such device",
            "servalrs-virtual",
            running,
        );
        assert!(matches!(result, Err(SourceError::DeviceNotFound(_))));
    }

    fn pipe() -> (libc::c_int, libc::c_int) {
        let mut fds = [0; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        (fds[0], fds[1])
    }

    fn pollfd(fd: libc::c_int) -> libc::pollfd {
        libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        }
    }

    #[test]
    fn test_readiness_idle_on_timeout() {
        let (read_end, write_end) = pipe();
        let mut fd = pollfd(read_end);
        assert_eq!(poll_readiness(&mut fd, 0).unwrap(), Readiness::Idle);
        unsafe {
            libc::close(read_end);
            libc::close(write_end);
        }
    }

    #[test]
    fn test_readiness_readable_before_hangup() {
        let (read_end, write_end) = pipe();
        let byte = [1u8];
        assert_eq!(unsafe { libc::write(write_end, byte.as_ptr().cast(), 1) }, 1);
        unsafe { libc::close(write_end) };

        let mut fd = pollfd(read_end);
        assert_eq!(poll_readiness(&mut fd, 0).unwrap(), Readiness::Readable);
        unsafe { libc::close(read_end) };
    }

    #[test]
    fn test_readiness_gone_after_hangup() {
        let (read_end, write_end) = pipe();
        unsafe { libc::close(write_end) };

        let mut fd = pollfd(read_end);
        assert_eq!(poll_readiness(&mut fd, 100).unwrap(), Readiness::Gone);
        unsafe { libc::close(read_end) };
    }
}
