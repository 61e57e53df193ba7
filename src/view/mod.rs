
                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                   Value
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Anything a telescope can hold.
///
/// Consecutive values are deduplicated through `PartialEq`, i.e. by
/// structural equality, never by identity.
pub trait Value: Clone + PartialEq + Send + Sync + 'static {}

impl<T> Value for T where T: Clone + PartialEq + Send + Sync + 'static {}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub mod broadcast;
pub mod channel;
pub mod observer;
pub mod stream;

pub(crate) mod distinct;

pub use {
    broadcast::{Delivery, Dispatcher, Immediate, ObserverBroadcast, Queued, QueuedBroadcast, Substrate},
    channel::{queue_channel, singleton_channel, ChannelReceiver, ChannelSender},
    observer::{NotifyFnObserver, Observer, ObserverExt},
    stream::{Listener, Subscription, ValueStream},
};
