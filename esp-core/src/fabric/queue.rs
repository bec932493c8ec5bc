//! Bounded Queue mit fester Kapazität
//!
//! Dünne Hülle um `embassy_sync::channel::Channel`. Ein `put` auf eine
//! volle Queue mit `Timeout::NoWait` verwirft den neuen Wert und liefert
//! `false`, der Produzent blockiert nie.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::with_timeout;

use super::Timeout;

pub struct BoundedQueue<T, const N: usize> {
    channel: Channel<CriticalSectionRawMutex, T, N>,
}

impl<T, const N: usize> BoundedQueue<T, N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Legt einen Wert ab, `false` wenn die Queue innerhalb des Timeouts voll blieb
    pub async fn put(&self, item: T, timeout: Timeout) -> bool {
        match timeout {
            Timeout::NoWait => self.try_put(item),
            Timeout::After(duration) => with_timeout(duration, self.channel.send(item))
                .await
                .is_ok(),
            Timeout::Forever => {
                self.channel.send(item).await;
                true
            }
        }
    }

    pub fn try_put(&self, item: T) -> bool {
        self.channel.try_send(item).is_ok()
    }

    /// Holt den ältesten Wert, `None` nach Ablauf des Timeouts
    pub async fn get(&self, timeout: Timeout) -> Option<T> {
        match timeout {
            Timeout::NoWait => self.try_get(),
            Timeout::After(duration) => with_timeout(duration, self.channel.receive()).await.ok(),
            Timeout::Forever => Some(self.channel.receive().await),
        }
    }

    pub fn try_get(&self) -> Option<T> {
        self.channel.try_receive().ok()
    }

    /// Anzahl wartender Werte
    pub fn count(&self) -> usize {
        self.channel.len()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Leert die Queue und liefert nur den neuesten Wert
    pub fn drain_latest(&self) -> Option<T> {
        let mut latest = None;
        while let Some(item) = self.try_get() {
            latest = Some(item);
        }
        latest
    }

    /// Verwirft alle wartenden Werte
    pub fn clear(&self) {
        self.channel.clear();
    }
}

impl<T, const N: usize> Default for BoundedQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_put_on_full_queue_drops_newest() {
        let queue = BoundedQueue::<u8, 2>::new();
        assert!(queue.try_put(1));
        assert!(queue.try_put(2));
        assert!(!queue.try_put(3));
        assert!(!block_on(queue.put(4, Timeout::NoWait)));
        assert_eq!(queue.count(), 2);
        assert_eq!(queue.try_get(), Some(1));
        assert_eq!(queue.try_get(), Some(2));
        assert_eq!(queue.try_get(), None);
    }

    #[test]
    fn test_drain_latest() {
        let queue = BoundedQueue::<u8, 2>::new();
        assert_eq!(queue.drain_latest(), None);
        queue.try_put(7);
        queue.try_put(9);
        assert_eq!(queue.drain_latest(), Some(9));
        assert_eq!(queue.count(), 0);
    }

    #[test]
    fn test_get_no_wait_on_empty() {
        let queue = BoundedQueue::<u8, 2>::new();
        assert_eq!(block_on(queue.get(Timeout::NoWait)), None);
        assert_eq!(queue.capacity(), 2);
    }

    #[test]
    fn test_forever_put_and_get() {
        let queue = BoundedQueue::<u8, 2>::new();
        assert!(block_on(queue.put(5, Timeout::Forever)));
        assert_eq!(block_on(queue.get(Timeout::Forever)), Some(5));
    }
}
