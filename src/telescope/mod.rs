use {
    crate::{
        evolution::{self, Evolution},
        view::{Delivery, Immediate, ValueStream, Value},
    },
    std::sync::Arc,
};

mod root;

use root::Root;

/// Runs once, right after the evolution it travels with has been folded
/// and before the root publishes the result.
pub(crate) type Settle = Box<dyn FnOnce() + Send>;

/// Anything that accepts evolutions: a root, or a derived view that
/// rewrites them for its parent.
pub(crate) trait Evolver<U>: Send + Sync {
    fn evolve(&self, evolution: Evolution<U>, settle: Option<Settle>);

    /// The value as of the latest fold, whether delivered yet or not.
    fn current(&self) -> U;
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Telescope
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Reactive container of a `U`.
///
/// The value is only observable through [`stream`](Telescope::stream) and
/// only changeable through [`evolve`](Telescope::evolve). Cloning gives
/// another handle to the same container.
///
/// `D` picks how values are delivered to subscribers; views derived with
/// `magnify`, `dimap` or `uplift` use the same delivery.
pub struct Telescope<U, D = Immediate> {
    evolver: Arc<dyn Evolver<U>>,
    stream: ValueStream<U>,
    delivery: D,
}

impl<U: Value> Telescope<U> {
    pub fn of(initial: U) -> Self {
        Telescope::with_delivery(initial, Immediate)
    }
}

impl<U: Value, D: Delivery> Telescope<U, D> {
    pub fn with_delivery(initial: U, delivery: D) -> Self {
        let root = Root::new(initial, delivery.cast());
        let stream = ValueStream::new(root.cast(), root.clone());
        Telescope::from_parts(root, stream, delivery)
    }

    pub(crate) fn from_parts(evolver: Arc<dyn Evolver<U>>, stream: ValueStream<U>, delivery: D) -> Self {
        Telescope {
            evolver,
            stream,
            delivery,
        }
    }

    pub(crate) fn evolver(&self) -> &Arc<dyn Evolver<U>> {
        &self.evolver
    }

    pub fn delivery(&self) -> &D {
        &self.delivery
    }

    /// Deduplicated, replaying stream of the successive values.
    pub fn stream(&self) -> &ValueStream<U> {
        &self.stream
    }

    /// The most recently delivered value.
    pub fn get(&self) -> Option<U> {
        self.stream.get()
    }

    /// Queue `evolution`. It runs exactly once, against the value current
    /// at the time it runs, after every evolution queued before it on the
    /// same root.
    pub fn evolve(&self, evolution: impl FnOnce(U) -> U + Send + 'static) {
        self.evolver.evolve(Box::new(evolution), None);
    }

    pub fn update(&self, value: U) {
        self.evolver.evolve(evolution::constant(value), None);
    }
}

impl<U, D: Clone> Clone for Telescope<U, D> {
    fn clone(&self) -> Self {
        Telescope {
            evolver: self.evolver.clone(),
            stream: self.stream.clone(),
            delivery: self.delivery.clone(),
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
