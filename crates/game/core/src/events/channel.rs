use super::types::{GameEvent, Topics};

/// Handle returned by [`EventChannel::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u32);

#[derive(Debug)]
struct Subscriber {
    id: SubscriberId,
    name: &'static str,
    topics: Topics,
    inbox: Vec<GameEvent>,
}

/// Topic-filtered multicast channel.
///
/// Each subscriber owns an inbox. Publishing copies the event into every inbox
/// whose topic mask matches, in registration order. Events published before a
/// subscription exists are never delivered to it.
#[derive(Debug, Default)]
pub struct EventChannel {
    subscribers: Vec<Subscriber>,
    next_id: u32,
    published: u64,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber for `topics`.
    pub fn subscribe(&mut self, name: &'static str, topics: Topics) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            name,
            topics,
            inbox: Vec::new(),
        });
        tracing::trace!(
            target: "game_core::events",
            subscriber = name,
            topics = ?topics,
            "Subscribed"
        );
        id
    }

    /// Removes a subscriber and drops its pending events.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        before != self.subscribers.len()
    }

    /// Delivers `event` to every subscriber listening on its topic.
    pub fn publish(&mut self, event: GameEvent) {
        let topic = event.topic();
        self.published += 1;

        let mut delivered = 0usize;
        for subscriber in &mut self.subscribers {
            if subscriber.topics.intersects(topic) {
                subscriber.inbox.push(event);
                delivered += 1;
            }
        }

        tracing::debug!(
            target: "game_core::events",
            event = event.kind(),
            delivered,
            "Event published"
        );
    }

    /// Takes every pending event of `id`, oldest first.
    ///
    /// Unknown subscribers receive nothing.
    pub fn drain(&mut self, id: SubscriberId) -> Vec<GameEvent> {
        self.subscribers
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| std::mem::take(&mut s.inbox))
            .unwrap_or_default()
    }

    /// Number of events waiting for `id`.
    pub fn pending(&self, id: SubscriberId) -> usize {
        self.subscribers
            .iter()
            .find(|s| s.id == id)
            .map_or(0, |s| s.inbox.len())
    }

    /// Name the subscriber registered with.
    pub fn subscriber_name(&self, id: SubscriberId) -> Option<&'static str> {
        self.subscribers.iter().find(|s| s.id == id).map(|s| s.name)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Total number of events published over the channel's lifetime.
    pub fn published(&self) -> u64 {
        self.published
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::graph::NodeId;

    #[test]
    fn delivers_only_matching_topics() {
        let mut channel = EventChannel::new();
        let threat = channel.subscribe("threat", Topics::NOISE | Topics::SKILL_CHECK_FAILED);
        let hiding = channel.subscribe("hiding", Topics::HIDING);

        channel.publish(GameEvent::Noise {
            position: Vec3::ZERO,
            intensity: 0.5,
        });
        channel.publish(GameEvent::HideEntered);
        channel.publish(GameEvent::SkillCheckFailed { node: NodeId(2) });

        assert_eq!(
            channel.drain(threat),
            vec![
                GameEvent::Noise {
                    position: Vec3::ZERO,
                    intensity: 0.5
                },
                GameEvent::SkillCheckFailed { node: NodeId(2) },
            ]
        );
        assert_eq!(channel.drain(hiding), vec![GameEvent::HideEntered]);
        assert_eq!(channel.published(), 3);
    }

    #[test]
    fn drain_consumes_inbox() {
        let mut channel = EventChannel::new();
        let id = channel.subscribe("flow", Topics::ATTACK_RESOLVED);

        channel.publish(GameEvent::AttackResolved {
            position: Vec3::ONE,
        });
        assert_eq!(channel.pending(id), 1);
        assert_eq!(channel.drain(id).len(), 1);
        assert_eq!(channel.pending(id), 0);
        assert!(channel.drain(id).is_empty());
    }

    #[test]
    fn late_subscribers_miss_earlier_events() {
        let mut channel = EventChannel::new();
        channel.publish(GameEvent::Respawned);

        let id = channel.subscribe("late", Topics::RESPAWNED);
        assert!(channel.drain(id).is_empty());

        channel.publish(GameEvent::Respawned);
        assert_eq!(channel.drain(id), vec![GameEvent::Respawned]);
    }

    #[test]
    fn every_subscriber_gets_a_copy() {
        let mut channel = EventChannel::new();
        let a = channel.subscribe("a", Topics::all());
        let b = channel.subscribe("b", Topics::DISABLE_REQUESTED);

        channel.publish(GameEvent::DisableRequested { duration: 5.0 });

        assert_eq!(channel.drain(a), channel.drain(b));
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut channel = EventChannel::new();
        let id = channel.subscribe("gone", Topics::all());

        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.publish(GameEvent::HideExited);

        assert!(channel.drain(id).is_empty());
        assert_eq!(channel.subscriber_count(), 0);
        assert_eq!(channel.subscriber_name(id), None);
    }
}
