use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// A named dataset holds either a scalar or a one-dimensional numeric array.
///
/// The untagged representation lets snapshot files spell values naturally:
/// `3.5` deserializes as a scalar, `[1.0, 2.0]` as an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetValue {
    Scalar(f64),
    Array(Vec<f64>),
}

impl DatasetValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            DatasetValue::Scalar(v) => Some(*v),
            DatasetValue::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&[f64]> {
        match self {
            DatasetValue::Array(values) => Some(values),
            DatasetValue::Scalar(_) => None,
        }
    }
}

impl From<f64> for DatasetValue {
    fn from(value: f64) -> Self {
        DatasetValue::Scalar(value)
    }
}

impl From<Vec<f64>> for DatasetValue {
    fn from(values: Vec<f64>) -> Self {
        DatasetValue::Array(values)
    }
}

/// Full snapshot of dataset state pushed to subscribers on every change.
///
/// Consumers look values up by key; the snapshot is never a diff. `changed`
/// names the keys touched by the producing write, `metadata` and `persistent`
/// ride along for host bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Update {
    pub values: HashMap<String, DatasetValue>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub persistent: HashMap<String, bool>,
    #[serde(default)]
    pub changed: Vec<String>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<DatasetValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&DatasetValue> {
        self.values.get(key)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("dataset store is no longer reachable")]
    Disconnected,
}

/// Write boundary of the external dataset store.
pub trait DatasetStore {
    fn set_dataset(&mut self, key: &str, value: DatasetValue) -> Result<(), StoreError>;
}

#[derive(Default)]
struct StoreInner {
    values: HashMap<String, DatasetValue>,
    persistent: HashMap<String, bool>,
    subscribers: Vec<Sender<Update>>,
}

impl StoreInner {
    fn broadcast(&mut self, changed: Vec<String>) {
        let update = Update {
            values: self.values.clone(),
            metadata: HashMap::new(),
            persistent: self.persistent.clone(),
            changed,
        };
        self.subscribers
            .retain(|tx| tx.send(update.clone()).is_ok());
    }
}

/// In-memory dataset store with subscriber broadcast.
///
/// Cloned handles share state; every write pushes a full snapshot to all
/// live subscribers and drops the ones that hung up.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single lock policy for every accessor: a panic in another holder
    /// cannot leave the maps half-written, so a poisoned guard is recovered
    /// rather than propagated.
    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn subscribe(&self) -> Receiver<Update> {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.lock();
        // New subscribers start from the current snapshot instead of waiting
        // for the next write.
        if !inner.values.is_empty() {
            let _ = tx.send(Update {
                values: inner.values.clone(),
                metadata: HashMap::new(),
                persistent: inner.persistent.clone(),
                changed: inner.values.keys().cloned().collect(),
            });
        }
        inner.subscribers.push(tx);
        rx
    }

    pub fn get(&self, key: &str) -> Option<DatasetValue> {
        let inner = self.lock();
        inner.values.get(key).cloned()
    }

    /// Writes several keys under one notification, for producers that keep
    /// related arrays consistent.
    pub fn set_many(&self, entries: Vec<(String, DatasetValue)>) {
        let mut inner = self.lock();
        let changed: Vec<String> = entries.iter().map(|(key, _)| key.clone()).collect();
        for (key, value) in entries {
            inner.values.insert(key, value);
        }
        inner.broadcast(changed);
    }

    pub fn set_persistent(&self, key: &str, persistent: bool) {
        let mut inner = self.lock();
        inner.persistent.insert(key.to_string(), persistent);
    }
}

impl DatasetStore for MemoryStore {
    fn set_dataset(&mut self, key: &str, value: DatasetValue) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.values.insert(key.to_string(), value);
        inner.broadcast(vec![key.to_string()]);
        Ok(())
    }
}
