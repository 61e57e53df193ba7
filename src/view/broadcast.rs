use {
    crate::view::{
        channel::{queue_channel, ChannelReceiver, ChannelSender},
        Observer,
    },
    parking_lot::RwLock,
    std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Weak,
    },
    tracing::debug,
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Substrate
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Push-based multicast channel that replays its most recently delivered
/// value to every newly attached observer.
pub trait Substrate<T>: Send + Sync {
    /// Hand `value` over for delivery to all attached observers.
    fn publish(&self, value: T);

    /// Attach `observer`. If a value has been delivered before, the observer
    /// receives it before this returns.
    fn add_observer(&self, observer: Weak<dyn Observer<T>>);

    fn latest(&self) -> Option<T>;
}

/// Chooses the substrate used by a telescope and by every view derived
/// from it.
pub trait Delivery: Clone + Send + Sync + 'static {
    fn cast<T: Clone + Send + Sync + 'static>(&self) -> Arc<dyn Substrate<T>>;
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Broadcast
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Synchronous substrate: `publish` runs every observer before returning.
pub struct ObserverBroadcast<T> {
    latest: RwLock<Option<T>>,
    observers: RwLock<Vec<Weak<dyn Observer<T>>>>,
}

impl<T> ObserverBroadcast<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        ObserverBroadcast {
            latest: RwLock::new(None),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Observers still alive, collected so that no lock is held while
    /// they run.
    fn live_observers(&self) -> Vec<Arc<dyn Observer<T>>> {
        let mut observers = self.observers.write();
        observers.retain(|o| o.strong_count() > 0);
        observers.iter().filter_map(Weak::upgrade).collect()
    }

    pub fn observer_count(&self) -> usize {
        self.live_observers().len()
    }
}

impl<T> Default for ObserverBroadcast<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        ObserverBroadcast::new()
    }
}

impl<T> Substrate<T> for ObserverBroadcast<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn publish(&self, value: T) {
        *self.latest.write() = Some(value.clone());
        for o in self.live_observers() {
            o.notify(&value);
        }
    }

    fn add_observer(&self, observer: Weak<dyn Observer<T>>) {
        {
            let mut observers = self.observers.write();
            observers.retain(|o| o.strong_count() > 0);
            observers.push(observer.clone());
        }
        debug!("broadcast: observer attached");

        let latest = self.latest.read().clone();
        if let (Some(value), Some(o)) = (latest, observer.upgrade()) {
            o.notify(&value);
        }
    }

    fn latest(&self) -> Option<T> {
        self.latest.read().clone()
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                Dispatcher
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
type Task = Box<dyn FnOnce() + Send>;

/// Set while one caller drains a queue; reset on drop, also when
/// unwinding out of a panicking callback.
pub(crate) struct DrainGuard<'a>(&'a AtomicBool);

impl<'a> DrainGuard<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(DrainGuard(flag))
        }
    }
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// FIFO queue of pending deliveries shared by all [`QueuedBroadcast`]s
/// created through one [`Queued`] delivery.
#[derive(Clone)]
pub struct Dispatcher {
    tx: ChannelSender<Vec<Task>>,
    rx: Arc<ChannelReceiver<Vec<Task>>>,
    draining: Arc<AtomicBool>,
}

impl Dispatcher {
    pub fn new() -> Self {
        let (tx, rx) = queue_channel::<Task>();
        Dispatcher {
            tx,
            rx: Arc::new(rx),
            draining: Arc::new(AtomicBool::new(false)),
        }
    }

    fn schedule(&self, task: Task) {
        self.tx.send(task);
    }

    pub fn is_idle(&self) -> bool {
        self.rx.is_empty()
    }

    /// Run pending deliveries, including those scheduled while flushing,
    /// until the queue is empty. Returns the number of deliveries run.
    ///
    /// A nested call from inside a delivery returns 0 immediately; the
    /// outer call picks up whatever gets scheduled.
    pub fn flush(&self) -> usize {
        let Some(_guard) = DrainGuard::acquire(&self.draining) else {
            return 0;
        };

        let mut count = 0;
        while let Some(batch) = self.rx.try_recv() {
            count += self.run(batch);
        }
        count
    }

    /// Wait until at least one delivery is pending, then flush.
    pub async fn tick(&self) -> usize {
        match self.rx.recv().await {
            Some(batch) => {
                let Some(_guard) = DrainGuard::acquire(&self.draining) else {
                    // someone is flushing right now, hand the batch back
                    for task in batch {
                        self.schedule(task);
                    }
                    return 0;
                };
                let mut count = self.run(batch);
                while let Some(batch) = self.rx.try_recv() {
                    count += self.run(batch);
                }
                count
            }
            None => 0,
        }
    }

    fn run(&self, batch: Vec<Task>) -> usize {
        let n = batch.len();
        debug!(deliveries = n, "dispatcher: running deliveries");
        for task in batch {
            task();
        }
        n
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Deferred substrate: `publish` only schedules the delivery on the
/// dispatcher. `latest` reports the last value actually delivered.
pub struct QueuedBroadcast<T> {
    cast: Arc<ObserverBroadcast<T>>,
    dispatcher: Dispatcher,
}

impl<T> QueuedBroadcast<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(dispatcher: Dispatcher) -> Self {
        QueuedBroadcast {
            cast: Arc::new(ObserverBroadcast::new()),
            dispatcher,
        }
    }
}

impl<T> Substrate<T> for QueuedBroadcast<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn publish(&self, value: T) {
        let cast = self.cast.clone();
        self.dispatcher
            .schedule(Box::new(move || cast.publish(value)));
    }

    fn add_observer(&self, observer: Weak<dyn Observer<T>>) {
        self.cast.add_observer(observer);
    }

    fn latest(&self) -> Option<T> {
        self.cast.latest()
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Delivery
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Deliver every value before `publish` returns.
#[derive(Clone, Copy, Debug, Default)]
pub struct Immediate;

impl Delivery for Immediate {
    fn cast<T: Clone + Send + Sync + 'static>(&self) -> Arc<dyn Substrate<T>> {
        Arc::new(ObserverBroadcast::new())
    }
}

/// Defer every delivery to a shared [`Dispatcher`].
#[derive(Clone, Default)]
pub struct Queued {
    dispatcher: Dispatcher,
}

impl Queued {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Queued { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl Delivery for Queued {
    fn cast<T: Clone + Send + Sync + 'static>(&self) -> Arc<dyn Substrate<T>> {
        Arc::new(QueuedBroadcast::new(self.dispatcher.clone()))
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
