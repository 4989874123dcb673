//! Settings mutation, debounced persistence and the editing session.

use crate::engine::WidgetEngine;
use crate::error::{SchemaError, SchemaResult};
use crate::resolve::resolve_settings;
use embedkit_types::{FormSection, RenderNode, Settings, ViewMode, WidgetInstance};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Default quiet window for debounced persistence writes.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(100);

/// Apply a single user edit, producing a new settings record.
///
/// The input record is never mutated; activity is always recomputed by the
/// dependency evaluator from the current record, never cached here.
pub fn apply_edit(settings: &Settings, menu_id: &str, value: Value) -> Settings {
    let mut next = settings.clone();
    next.insert(menu_id.to_string(), value);
    next
}

/// Durable settings persistence boundary.
///
/// The storage representation behind `load`/`save` (a JSON column, a file,
/// an API) is the collaborator's concern; the engine only sees the flat
/// record.
pub trait SettingsStore: Send + Sync {
    fn load(&self, instance_id: Uuid) -> anyhow::Result<Option<Settings>>;
    fn save(&self, instance_id: Uuid, settings: &Settings) -> anyhow::Result<()>;
}

/// Debounced persistence writer for one widget instance.
///
/// Records submitted within the quiet window coalesce into a single save
/// carrying only the latest record; the window resets on every submission.
/// Saves run serialized on one background task, so at most one write is in
/// flight per instance; a record arriving mid-save is picked up by the next
/// flush. A failed save is logged and counted — the in-memory record is
/// never rolled back.
pub struct DebouncedWriter {
    tx: mpsc::UnboundedSender<Settings>,
    handle: JoinHandle<()>,
    failures: Arc<AtomicU64>,
}

impl DebouncedWriter {
    /// Spawn the writer task. Must be called from within a tokio runtime.
    pub fn spawn(
        store: Arc<dyn SettingsStore>,
        instance_id: Uuid,
        quiet_window: Duration,
    ) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Settings>();
        let failures = Arc::new(AtomicU64::new(0));
        let failure_count = Arc::clone(&failures);

        let handle = tokio::spawn(async move {
            while let Some(mut latest) = rx.recv().await {
                loop {
                    match tokio::time::timeout(quiet_window, rx.recv()).await {
                        // newer record within the window: coalesce and reset
                        Ok(Some(newer)) => latest = newer,
                        // channel closed: flush what we have and exit
                        Ok(None) => break,
                        // quiet window elapsed
                        Err(_) => break,
                    }
                }
                if let Err(err) = store.save(instance_id, &latest) {
                    failure_count.fetch_add(1, Ordering::Relaxed);
                    log::warn!("settings save failed for instance {instance_id}: {err:#}");
                }
            }
        });

        Self {
            tx,
            handle,
            failures,
        }
    }

    /// Schedule a record for persistence.
    pub fn submit(&self, settings: Settings) {
        // send only fails when the task is gone; nothing left to flush then
        let _ = self.tx.send(settings);
    }

    /// Number of failed saves so far; each is retryable by a later submit.
    pub fn failed_saves(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Flush any pending record and stop the writer.
    pub async fn close(self) {
        drop(self.tx);
        let _ = self.handle.await;
    }
}

/// An interactive editing session over one widget instance.
///
/// The session owns the in-memory settings record for its lifetime; the
/// store owns the durable copy. Edits apply synchronously, persistence is
/// debounced, and closing the session flushes the pending write.
pub struct EditorSession {
    instance: WidgetInstance,
    writer: DebouncedWriter,
}

impl EditorSession {
    /// Open a session: resolve the instance's settings against its template
    /// and start the debounced persistence writer.
    pub fn open(
        engine: &WidgetEngine,
        mut instance: WidgetInstance,
        store: Arc<dyn SettingsStore>,
        quiet_window: Duration,
    ) -> SchemaResult<Self> {
        let template = engine
            .templates()
            .template(&instance.widget_type, &instance.template_id)
            .ok_or_else(|| SchemaError::UnknownTemplate {
                widget_type: instance.widget_type.clone(),
                template_id: instance.template_id.clone(),
            })?;
        instance.settings = resolve_settings(template, &instance.settings);
        let writer = DebouncedWriter::spawn(store, instance.id, quiet_window);
        Ok(Self { instance, writer })
    }

    pub fn instance(&self) -> &WidgetInstance {
        &self.instance
    }

    pub fn settings(&self) -> &Settings {
        &self.instance.settings
    }

    /// Apply one user edit and schedule a debounced persistence write.
    pub fn set_value(&mut self, menu_id: &str, value: Value) {
        self.instance.settings = apply_edit(&self.instance.settings, menu_id, value);
        self.writer.submit(self.instance.settings.clone());
    }

    /// Project the editor form model for the current record.
    pub fn form_model(&self, engine: &WidgetEngine) -> Vec<FormSection> {
        engine
            .form_model(
                &self.instance.widget_type,
                &self.instance.template_id,
                &self.instance.settings,
            )
            .unwrap_or_default()
    }

    /// Render the live preview through the shared render entry point.
    pub fn preview(&self, engine: &WidgetEngine, mode: ViewMode, data: Option<&Value>) -> RenderNode {
        engine.render(
            &self.instance.widget_type,
            &self.instance.template_id,
            &self.instance.settings,
            mode,
            data,
        )
    }

    pub fn failed_saves(&self) -> u64 {
        self.writer.failed_saves()
    }

    /// Close the session, flushing any pending debounced write.
    pub async fn close(self) -> WidgetInstance {
        self.writer.close().await;
        self.instance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemStore {
        saves: Mutex<Vec<Settings>>,
        save_delay: Option<Duration>,
        fail: bool,
        started: AtomicU64,
    }

    impl SettingsStore for MemStore {
        fn load(&self, _instance_id: Uuid) -> anyhow::Result<Option<Settings>> {
            Ok(self.saves.lock().unwrap().last().cloned())
        }

        fn save(&self, _instance_id: Uuid, settings: &Settings) -> anyhow::Result<()> {
            self.started.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.save_delay {
                std::thread::sleep(delay);
            }
            if self.fail {
                anyhow::bail!("store unavailable");
            }
            self.saves.lock().unwrap().push(settings.clone());
            Ok(())
        }
    }

    fn record(n: i64) -> Settings {
        let mut settings = Settings::new();
        settings.insert("count".into(), json!(n));
        settings
    }

    #[test]
    fn test_apply_edit_is_pure() {
        let original = record(1);
        let next = apply_edit(&original, "count", json!(2));
        assert_eq!(original.get("count"), Some(&json!(1)));
        assert_eq!(next.get("count"), Some(&json!(2)));
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_apply_edit_can_introduce_new_keys() {
        let next = apply_edit(&Settings::new(), "title", json!("hi"));
        assert_eq!(next.get("title"), Some(&json!("hi")));
    }

    #[tokio::test]
    async fn test_burst_of_edits_coalesces_into_one_save() {
        let store = Arc::new(MemStore::default());
        let writer = DebouncedWriter::spawn(store.clone(), Uuid::new_v4(), DEFAULT_QUIET_WINDOW);

        for n in 1..=5 {
            writer.submit(record(n));
        }
        writer.close().await;

        let saves = store.saves.lock().unwrap();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0], record(5));
    }

    #[tokio::test]
    async fn test_close_flushes_pending_record() {
        let store = Arc::new(MemStore::default());
        let writer = DebouncedWriter::spawn(store.clone(), Uuid::new_v4(), Duration::from_secs(60));

        writer.submit(record(7));
        // the quiet window is far from elapsed; close must still flush
        writer.close().await;

        let saves = store.saves.lock().unwrap();
        assert_eq!(saves.as_slice(), &[record(7)]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_record_arriving_mid_save_is_flushed_afterwards() {
        let store = Arc::new(MemStore {
            save_delay: Some(Duration::from_millis(200)),
            ..MemStore::default()
        });
        let writer = DebouncedWriter::spawn(
            store.clone(),
            Uuid::new_v4(),
            Duration::from_millis(10),
        );

        writer.submit(record(1));
        // wait until the first save is in progress
        while store.started.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        writer.submit(record(2));
        writer.close().await;

        let saves = store.saves.lock().unwrap();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[1], record(2));
    }

    #[tokio::test]
    async fn test_failed_save_is_counted_not_fatal() {
        let store = Arc::new(MemStore {
            fail: true,
            ..MemStore::default()
        });
        let writer = DebouncedWriter::spawn(store.clone(), Uuid::new_v4(), DEFAULT_QUIET_WINDOW);

        let failures = Arc::clone(&writer.failures);
        writer.submit(record(1));
        writer.submit(record(2));
        writer.close().await;

        assert_eq!(failures.load(Ordering::SeqCst), 1);
        assert!(store.saves.lock().unwrap().is_empty());
        assert_eq!(store.started.load(Ordering::SeqCst), 1);
    }
}
