use {
    crate::view::Observer,
    async_std::stream::Stream,
    core::{
        pin::Pin,
        task::{Context, Poll, Waker},
    },
    parking_lot::Mutex,
    std::sync::Arc,
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                  Buffers
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// What a channel collects between two receives: every item (`Vec`) or
/// only the newest one (`Option`).
pub trait ChannelData: Default + IntoIterator + Send {
    fn channel_insert(&mut self, x: Self::Item);
}

impl<T: Send> ChannelData for Vec<T> {
    fn channel_insert(&mut self, x: T) {
        self.push(x);
    }
}

impl<T: Send> ChannelData for Option<T> {
    fn channel_insert(&mut self, x: T) {
        *self = Some(x);
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                  Channel
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
struct ChannelState<Data: ChannelData> {
    buf: Option<Data>,
    draining: Option<Data::IntoIter>,
    senders: usize,
    waker: Option<Waker>,
}

impl<Data: ChannelData> ChannelState<Data> {
    fn wake(&mut self) {
        if let Some(waker) = self.waker.take() {
            waker.wake();
        }
    }

    /// Ready with the whole buffer, or with `None` once every sender is
    /// gone.
    fn poll_batch(&mut self, cx: &mut Context<'_>) -> Poll<Option<Data>> {
        if let Some(buf) = self.buf.take() {
            Poll::Ready(Some(buf))
        } else if self.senders == 0 {
            Poll::Ready(None)
        } else {
            self.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

pub struct ChannelSender<Data: ChannelData>(Arc<Mutex<ChannelState<Data>>>);
pub struct ChannelReceiver<Data: ChannelData>(Arc<Mutex<ChannelState<Data>>>);

fn channel<Data: ChannelData>() -> (ChannelSender<Data>, ChannelReceiver<Data>) {
    let state = Arc::new(Mutex::new(ChannelState {
        buf: None,
        draining: None,
        senders: 1,
        waker: None,
    }));
    (ChannelSender(state.clone()), ChannelReceiver(state))
}

pub fn queue_channel<T: Send>() -> (ChannelSender<Vec<T>>, ChannelReceiver<Vec<T>>) {
    channel()
}

pub fn singleton_channel<T: Send>() -> (ChannelSender<Option<T>>, ChannelReceiver<Option<T>>) {
    channel()
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Data: ChannelData> ChannelSender<Data> {
    pub fn send(&self, msg: Data::Item) {
        let mut state = self.0.lock();
        state.buf.get_or_insert_with(Data::default).channel_insert(msg);
        state.wake();
    }
}

/// A sender attached to a stream forwards every value into the channel.
impl<T, Data> Observer<T> for ChannelSender<Data>
where
    T: Clone + Send + Sync,
    Data: ChannelData<Item = T>,
    Data::IntoIter: Send,
{
    fn notify(&self, value: &T) {
        self.send(value.clone());
    }
}

impl<Data: ChannelData> Clone for ChannelSender<Data> {
    fn clone(&self) -> Self {
        self.0.lock().senders += 1;
        ChannelSender(self.0.clone())
    }
}

impl<Data: ChannelData> Drop for ChannelSender<Data> {
    fn drop(&mut self) {
        let mut state = self.0.lock();
        state.senders -= 1;
        state.wake();
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Data: ChannelData> ChannelReceiver<Data> {
    /// Wait for the next buffer. `None` once every sender is gone.
    pub async fn recv(&self) -> Option<Data> {
        std::future::poll_fn(|cx| self.0.lock().poll_batch(cx)).await
    }

    pub fn try_recv(&self) -> Option<Data> {
        self.0.lock().buf.take()
    }

    /// `true` if nothing has been sent since the last receive.
    pub fn is_empty(&self) -> bool {
        self.0.lock().buf.is_none()
    }
}

/// Item by item: a taken buffer is drained before the next one is taken.
impl<Data: ChannelData> Stream for ChannelReceiver<Data> {
    type Item = Data::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut state = self.0.lock();
        loop {
            if let Some(item) = state.draining.as_mut().and_then(Iterator::next) {
                return Poll::Ready(Some(item));
            }
            match state.poll_batch(cx) {
                Poll::Ready(Some(buf)) => state.draining = Some(buf.into_iter()),
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use {
        crate::view::channel::*,
        async_std::{stream::StreamExt, task::block_on},
        std::cell::Cell,
    };

    #[test]
    fn queue_channel_keeps_order() {
        let (tx, mut rx) = queue_channel::<i32>();
        tx.send(1);
        tx.send(2);
        tx.send(3);
        drop(tx);

        let items = block_on(async {
            let mut items = Vec::new();
            while let Some(x) = rx.next().await {
                items.push(x);
            }
            items
        });
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn singleton_channel_keeps_newest() {
        let (tx, rx) = singleton_channel::<char>();
        assert!(rx.is_empty());
        tx.send('a');
        tx.send('b');
        assert!(!rx.is_empty());
        assert_eq!(rx.try_recv(), Some(Some('b')));
        assert_eq!(rx.try_recv(), None);
    }

    #[test]
    fn recv_ends_when_senders_are_gone() {
        let (tx, rx) = queue_channel::<i32>();
        let tx2 = tx.clone();
        tx2.send(7);
        drop(tx);
        drop(tx2);

        assert_eq!(block_on(rx.recv()), Some(vec![7]));
        assert_eq!(block_on(rx.recv()), None);
    }

    #[test]
    fn carries_items_that_are_not_sync() {
        let (tx, rx) = queue_channel::<Cell<u8>>();
        tx.send(Cell::new(3));
        let got = rx.try_recv().map(|buf| buf.into_iter().map(Cell::into_inner).collect::<Vec<_>>());
        assert_eq!(got, Some(vec![3]));
    }
}
