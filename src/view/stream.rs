use {
    crate::view::{
        channel::{queue_channel, singleton_channel, ChannelData, ChannelReceiver, ChannelSender},
        NotifyFnObserver, Observer, Substrate,
    },
    async_std::stream::Stream,
    core::{
        pin::Pin,
        task::{Context, Poll},
    },
    std::{any::Any, sync::Arc},
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
               Value Stream
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Read side of a telescope: an endless, multicast sequence of values
/// that replays the most recent one to each new subscriber.
pub struct ValueStream<T> {
    cast: Arc<dyn Substrate<T>>,

    /// whatever has to live for values to keep arriving on `cast`
    keepalive: Arc<dyn Any + Send + Sync>,
}

impl<T> ValueStream<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(cast: Arc<dyn Substrate<T>>, keepalive: Arc<dyn Any + Send + Sync>) -> Self {
        ValueStream { cast, keepalive }
    }

    /// The most recently delivered value.
    pub fn get(&self) -> Option<T> {
        self.cast.latest()
    }

    pub fn add_observer(&self, observer: Arc<dyn Observer<T>>) -> Subscription<T> {
        self.cast.add_observer(Arc::downgrade(&observer));
        Subscription {
            _observer: observer,
            _keepalive: self.keepalive.clone(),
        }
    }

    pub fn subscribe<F: Fn(&T) + Send + Sync + 'static>(&self, f: F) -> Subscription<T> {
        self.add_observer(Arc::new(NotifyFnObserver::new(f)))
    }

    /// Every value, in order, as an async stream.
    pub fn listen(&self) -> Listener<Vec<T>> {
        self.listen_with(queue_channel())
    }

    /// Only the newest value not yet taken, as an async stream.
    pub fn watch(&self) -> Listener<Option<T>> {
        self.listen_with(singleton_channel())
    }

    fn listen_with<Data>(&self, (tx, rx): (ChannelSender<Data>, ChannelReceiver<Data>)) -> Listener<Data>
    where
        Data: ChannelData<Item = T> + 'static,
        Data::IntoIter: Send + 'static,
    {
        Listener {
            subscription: self.add_observer(Arc::new(tx)),
            rx,
        }
    }
}

impl<T> Clone for ValueStream<T> {
    fn clone(&self) -> Self {
        ValueStream {
            cast: self.cast.clone(),
            keepalive: self.keepalive.clone(),
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Attachment of one observer. Dropping it detaches that observer and
/// nothing else.
#[must_use = "dropping a Subscription detaches its observer"]
pub struct Subscription<T> {
    _observer: Arc<dyn Observer<T>>,
    _keepalive: Arc<dyn Any + Send + Sync>,
}

impl<T> Subscription<T> {
    pub fn unsubscribe(self) {}
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub struct Listener<Data: ChannelData> {
    subscription: Subscription<Data::Item>,
    rx: ChannelReceiver<Data>,
}

impl<Data: ChannelData> Listener<Data> {
    pub fn unsubscribe(self) {
        self.subscription.unsubscribe();
    }
}

impl<Data: ChannelData> Stream for Listener<Data> {
    type Item = Data::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
