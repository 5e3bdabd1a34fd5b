//! Shared fixtures for the integration tests.

use api_catalogue_explore::model::{Panel, PanelAttributes};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Captures tracing output for tests.
#[allow(dead_code)]
pub struct TestTracing {
    buffer: Arc<std::sync::Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl TestTracing {
    pub fn new() -> Self {
        Self {
            buffer: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.buffer.clone();
        let make_writer = move || TestWriter(writer.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(make_writer)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn output(&self) -> String {
        let buf = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Assert that the captured log output contains the provided substring.
    pub fn assert_contains(&self, needle: &str) {
        let out = self.output();
        assert!(
            out.contains(needle),
            "expected logs to contain `{needle}`, got:\n{out}"
        );
    }
}

struct TestWriter(Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// A panel double that records the last visibility it was told.
pub struct RecordingPanel {
    visible: AtomicBool,
}

#[allow(dead_code)]
impl RecordingPanel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            visible: AtomicBool::new(true),
        })
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }
}

impl Panel for RecordingPanel {
    fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Relaxed);
    }
}

/// Builder for one panel's attribute record, mirroring the server template.
pub struct PanelFixtureBuilder {
    attrs: PanelAttributes,
}

#[allow(dead_code)]
impl PanelFixtureBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            attrs: PanelAttributes {
                id: id.to_string(),
                api_name: id.to_string(),
                api_status: "LIVE".to_string(),
                domain: String::new(),
                subdomain: String::new(),
                hods: String::new(),
                platform: String::new(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.attrs.api_name = name.to_string();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.attrs.api_status = status.to_string();
        self
    }

    pub fn domain(mut self, domain: &str, subdomain: &str) -> Self {
        self.attrs.domain = domain.to_string();
        self.attrs.subdomain = subdomain.to_string();
        self
    }

    pub fn hods(mut self, hods: &str) -> Self {
        self.attrs.hods = hods.to_string();
        self
    }

    pub fn platform(mut self, platform: &str) -> Self {
        self.attrs.platform = platform.to_string();
        self
    }

    pub fn build(self) -> (Arc<RecordingPanel>, PanelAttributes) {
        (RecordingPanel::new(), self.attrs)
    }
}
