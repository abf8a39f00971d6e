//! Hook registry for content lifecycle signals.
//!
//! The generator builds one [`Signals`] value during setup, lets each enabled
//! plugin connect its receivers, and then fires `content_object_init` once per
//! discovered [`ContentItem`]. There is no process-wide registry: the value is
//! passed explicitly to whoever needs it.

use crate::types::ContentItem;

type ContentReceiver = Box<dyn Fn(&mut ContentItem) + Send + Sync>;

/// Receivers connected to each signal, in registration order.
#[derive(Default)]
pub struct Signals {
    content_object_init: Vec<ContentReceiver>,
}

impl Signals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect a receiver to the "content object initialized" signal.
    pub fn connect_content_object_init<F>(&mut self, receiver: F)
    where
        F: Fn(&mut ContentItem) + Send + Sync + 'static,
    {
        self.content_object_init.push(Box::new(receiver));
    }

    /// Invoke every `content_object_init` receiver on `item`, synchronously,
    /// in the order they were connected.
    pub fn send_content_object_init(&self, item: &mut ContentItem) {
        for receiver in &self.content_object_init {
            receiver(item);
        }
    }

    /// Number of receivers connected to `content_object_init`.
    pub fn receiver_count(&self) -> usize {
        self.content_object_init.len()
    }
}

impl std::fmt::Debug for Signals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signals")
            .field("content_object_init", &self.content_object_init.len())
            .finish()
    }
}
