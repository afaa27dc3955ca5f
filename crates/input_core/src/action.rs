//! One-shot action triggers from external recognizers.

/// Discrete action requests. The emitter (gesture recognizer, button,
/// test harness) is a black box; only the event crosses this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    Attack,
}

/// Queue of pending triggers, drained once per frame so a held button or
/// a repeated recognizer callback cannot double-fire within one tick.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    events: Vec<ActionEvent>,
}

impl ActionQueue {
    pub fn push(&mut self, ev: ActionEvent) {
        self.events.push(ev);
    }

    /// Take this frame's events, leaving the queue empty.
    pub fn drain(&mut self) -> impl Iterator<Item = ActionEvent> + '_ {
        self.events.drain(..)
    }

    /// True if any attack was queued; consumes the whole queue.
    pub fn take_attack(&mut self) -> bool {
        let hit = self.events.contains(&ActionEvent::Attack);
        self.events.clear();
        hit
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_once() {
        let mut q = ActionQueue::default();
        q.push(ActionEvent::Attack);
        q.push(ActionEvent::Attack);
        assert_eq!(q.drain().count(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn take_attack_is_one_shot() {
        let mut q = ActionQueue::default();
        q.push(ActionEvent::Attack);
        assert!(q.take_attack());
        assert!(!q.take_attack(), "second frame must not re-fire");
    }
}
