use async_trait::async_trait;
use easel::model::SourceRecord;
use easel::services::{BusyFlag, ItemSource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub const SLIDER_DSL: &str = r#"{
    "controls": [
        {"id": "x", "type": "slider", "label": "X", "min": 0, "max": 1, "step": 0.1, "defaultValue": 0.5}
    ]
}"#;

/// In-memory item source with switchable failures
///
/// Records every commit it accepts, and whether the session's busy flag was
/// raised while the call ran.
#[derive(Default)]
pub struct MemorySource {
    records: Mutex<Vec<SourceRecord>>,
    commits: Mutex<Vec<(String, String)>>,
    fail_load: AtomicBool,
    fail_commit: AtomicBool,
    busy: Mutex<Option<BusyFlag>>,
    busy_during_call: AtomicBool,
}

impl MemorySource {
    pub fn new(records: Vec<SourceRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn set_fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_commit(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    pub fn watch_busy(&self, flag: BusyFlag) {
        *self.busy.lock().unwrap() = Some(flag);
    }

    pub fn was_busy_during_call(&self) -> bool {
        self.busy_during_call.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> Vec<(String, String)> {
        self.commits.lock().unwrap().clone()
    }

    pub fn record_value(&self, id: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.value.clone())
    }

    fn observe_busy(&self) {
        if let Some(flag) = self.busy.lock().unwrap().as_ref() {
            if flag.is_busy() {
                self.busy_during_call.store(true, Ordering::SeqCst);
            }
        }
    }
}

#[async_trait]
impl ItemSource for MemorySource {
    async fn load(&self) -> anyhow::Result<Vec<SourceRecord>> {
        self.observe_busy();
        if self.fail_load.load(Ordering::SeqCst) {
            anyhow::bail!("collection unavailable");
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn commit(&self, record: &SourceRecord, value: &str) -> anyhow::Result<()> {
        self.observe_busy();
        if self.fail_commit.load(Ordering::SeqCst) {
            anyhow::bail!("record '{}' is read-only", record.id);
        }
        let mut records = self.records.lock().unwrap();
        if let Some(stored) = records.iter_mut().find(|r| r.id == record.id) {
            stored.value = value.to_string();
        }
        self.commits
            .lock()
            .unwrap()
            .push((record.id.clone(), value.to_string()));
        Ok(())
    }
}
