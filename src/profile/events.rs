use std::fmt;

/// Published by the store after a change has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    Created {
        name: String,
    },
    Deleted {
        name: String,
        was_current: bool,
    },
    CurrentChanged {
        previous: Option<String>,
        current: Option<String>,
    },
    FieldSaved {
        name: String,
        key: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ProfileEvent)>;

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl EventBus {
    pub fn subscribe(&mut self, observer: impl FnMut(&ProfileEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn publish(&mut self, event: &ProfileEvent) {
        tracing::debug!(?event, observers = self.observers.len(), "profile event");
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}
