use std::sync::Arc;

use tokio::sync::watch;

/// A value with the number of times it has been replaced.
#[derive(Debug)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: Option<Arc<T>>,
}

impl<T> Clone for Versioned<T> {
    fn clone(&self) -> Self {
        Versioned {
            version: self.version,
            value: self.value.clone(),
        }
    }
}

/// A process-wide value which is only ever replaced as a whole.
///
/// A replacement with a value equal to the current one is dropped, and
/// subscribers are notified only when the value actually changes.
pub struct ValueCell<T>(watch::Sender<Versioned<T>>);

impl<T> ValueCell<T>
where
    T: PartialEq,
{
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Versioned {
            version: 0,
            value: None,
        });
        ValueCell(sender)
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.0.borrow().value.clone()
    }

    pub fn version(&self) -> u64 {
        self.0.borrow().version
    }

    /// Replaces the value if it differs from the current one.
    ///
    /// Returns `true` if replaced.
    pub fn replace_if_changed<V: Into<Arc<T>>>(&self, value: V) -> bool {
        let value = value.into();
        self.0.send_if_modified(|current| {
            if current.value.as_deref() == Some(&*value) {
                return false;
            }
            current.value = Some(value);
            current.version += 1;
            true
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Versioned<T>> {
        self.0.subscribe()
    }
}

impl<T> Default for ValueCell<T>
where
    T: PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

// </coverage:exclude>
