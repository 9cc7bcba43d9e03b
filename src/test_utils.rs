/*
 * Test utilities and fakes for fodbridge
 *
 * Recording sinks, a scripted waiter and a fake sysfs tree shared by the
 * unit tests of several modules.
 */

#[cfg(test)]
pub mod test_utils {
    use crate::locator::EndpointPaths;
    use crate::sinks::{FingerprintDevice, TouchControl};
    use crate::event_loop::Waiter;
    use std::collections::VecDeque;
    use std::fs;
    use std::io;
    use std::os::fd::BorrowedFd;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use tracing::subscriber::DefaultGuard;

    /// Fingerprint device that records every extension command
    #[derive(Debug, Default)]
    pub struct RecordingDevice {
        calls: Mutex<Vec<(i32, i32)>>,
    }

    impl RecordingDevice {
        pub fn calls(&self) -> Vec<(i32, i32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl FingerprintDevice for RecordingDevice {
        fn ext_cmd(&self, cmd: i32, param: i32) -> i32 {
            self.calls.lock().unwrap().push((cmd, param));
            0
        }
    }

    /// Fingerprint device that rewrites the state node when commanded,
    /// simulating the display flipping between the two reads of one wake
    #[derive(Debug)]
    pub struct FlippingDevice {
        node: PathBuf,
        next: &'static str,
        inner: RecordingDevice,
    }

    impl FlippingDevice {
        pub fn new(node: PathBuf, next: &'static str) -> Self {
            Self { node, next, inner: RecordingDevice::default() }
        }
    }

    impl FingerprintDevice for FlippingDevice {
        fn ext_cmd(&self, cmd: i32, param: i32) -> i32 {
            fs::write(&self.node, self.next).unwrap();
            self.inner.ext_cmd(cmd, param)
        }
    }

    /// Touch control that records `[mode, value]` payloads
    #[derive(Debug, Default)]
    pub struct RecordingTouch {
        calls: Mutex<Vec<[i32; 2]>>,
        fail: bool,
    }

    impl RecordingTouch {
        /// Records payloads but reports ENOTTY for each, like a wrong device node
        pub fn failing() -> Self {
            Self { calls: Mutex::default(), fail: true }
        }

        pub fn calls(&self) -> Vec<[i32; 2]> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl TouchControl for RecordingTouch {
        fn set_mode(&self, mode: i32, value: i32) -> io::Result<()> {
            self.calls.lock().unwrap().push([mode, value]);
            if self.fail {
                return Err(io::Error::from_raw_os_error(libc::ENOTTY));
            }
            Ok(())
        }
    }

    /// Waiter that replays a fixed script, then raises the stop flag
    pub struct ScriptedWaiter {
        script: VecDeque<io::Result<()>>,
        stop: Arc<AtomicBool>,
    }

    impl ScriptedWaiter {
        pub fn new(script: Vec<io::Result<()>>, stop: Arc<AtomicBool>) -> Self {
            Self { script: script.into(), stop }
        }
    }

    impl Waiter for ScriptedWaiter {
        fn wait(&mut self, _fd: BorrowedFd<'_>) -> io::Result<()> {
            match self.script.pop_front() {
                Some(result) => result,
                None => {
                    self.stop.store(true, Ordering::Release);
                    Ok(())
                }
            }
        }
    }

    /// Lay out a fake sysfs under `root`.
    ///
    /// Only the second candidate of each list is ever created, so lookups
    /// always go through the fallback. The touch node is never created.
    pub fn fake_sysfs(root: &Path, fod_ui: Option<&str>, fod_status: bool) -> EndpointPaths {
        let paths = EndpointPaths {
            fod_ui: vec![
                root.join("dsi-display-primary/fod_ui"),
                root.join("dsi-display/fod_ui"),
            ],
            fod_status: vec![
                root.join("touchpanel/fod_status"),
                root.join("tp_dev/fod_status"),
            ],
            touch_dev: root.join("xiaomi-touch"),
        };

        if let Some(state) = fod_ui {
            fs::create_dir_all(paths.fod_ui[1].parent().unwrap()).unwrap();
            fs::write(&paths.fod_ui[1], state).unwrap();
        }
        if fod_status {
            fs::create_dir_all(paths.fod_status[1].parent().unwrap()).unwrap();
            fs::write(&paths.fod_status[1], "").unwrap();
        }
        paths
    }

    /// Everything a capturing subscriber wrote, shared with its writer
    #[derive(Debug, Clone, Default)]
    pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap();
            String::from_utf8_lossy(&bytes).lines().map(str::to_owned).collect()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Record ERROR events on this thread until the guard is dropped.
    /// Threads started through `event_loop::spawn` inherit the capture.
    pub fn capture_errors() -> (CapturedLogs, DefaultGuard) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::ERROR)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }
}
