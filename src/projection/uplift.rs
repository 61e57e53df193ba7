use {
    crate::{
        evolution::Evolution,
        pair::Pair,
        telescope::{Evolver, Settle, Telescope},
        view::{distinct::Distinct, Delivery, Observer, Substrate, Value, ValueStream},
    },
    parking_lot::Mutex,
    std::{collections::VecDeque, sync::Arc},
    tracing::{debug, trace},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<U: Value, D: Delivery> Telescope<U, D> {
    /// View pairing the parent's value with an auxiliary value that only
    /// this view knows about.
    ///
    /// Writing a pair stores `second` here and hands `first` to the parent.
    /// When the parent's value comes out unchanged (a write that keeps
    /// `first`, or one the parent maps back onto its old value) the view
    /// publishes the new pair itself and the parent sees nothing.
    pub fn uplift<C: Value>(&self, auxiliary: C) -> Telescope<Pair<U, C>, D> {
        let cast: Arc<dyn Substrate<Pair<U, C>>> = self.delivery().cast();
        let lift = Arc::new(Lift {
            state: Mutex::new(LiftState {
                auxiliary: auxiliary.clone(),
                shown: auxiliary,
                written: VecDeque::new(),
            }),
            distinct: Distinct::new(),
            cast: cast.clone(),
        });
        let subscription = self.stream().add_observer(lift.clone());
        debug!("telescope: uplifted view attached");

        Telescope::from_parts(
            Arc::new(Uplifted {
                parent: self.evolver().clone(),
                lift,
            }),
            ValueStream::new(cast, Arc::new(subscription)),
            self.delivery().clone(),
        )
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Owns the auxiliary value and publishes the combined pair.
struct Lift<U, C> {
    state: Mutex<LiftState<U, C>>,
    distinct: Distinct<Pair<U, C>>,
    cast: Arc<dyn Substrate<Pair<U, C>>>,
}

struct LiftState<U, C> {
    /// as of the latest fold, the starting point of the next write
    auxiliary: C,

    /// paired with parent values that none of our writes produced
    shown: C,

    /// folded writes whose parent value has not been delivered here yet,
    /// oldest first
    written: VecDeque<Pair<U, C>>,
}

impl<U: Value, C: Value> Lift<U, C> {
    fn publish(&self, pair: Pair<U, C>) {
        if self.distinct.admit(&pair) {
            self.cast.publish(pair);
        }
    }

    /// Record the outcome of one of our writes, right after the root
    /// folded it. `before` and `now` are the parent's value around the
    /// fold.
    fn settle(&self, before: U, now: U, second: C) {
        let direct = {
            let mut guard = self.state.lock();
            let state = &mut *guard;

            if now != before {
                state.written.push_back(Pair::new(now, second));
                None
            } else if let Some(last) = state.written.back_mut().filter(|w| w.first == now) {
                // a delivery of this very parent value is still on its way
                last.second = second;
                None
            } else {
                state.shown = second.clone();
                Some(Pair::new(now, second))
            }
        };

        if let Some(pair) = direct {
            trace!("telescope: parent unchanged, publishing auxiliary change");
            self.publish(pair);
        }
    }
}

impl<U: Value, C: Value> Observer<U> for Lift<U, C> {
    fn notify(&self, value: &U) {
        let pair = {
            let mut guard = self.state.lock();
            let state = &mut *guard;

            if let Some(i) = state.written.iter().position(|w| w.first == *value) {
                // writes ahead of the match were absorbed upstream
                let matched = state.written.drain(..=i).last();
                if let Some(w) = matched {
                    state.shown = w.second;
                }
            }
            Pair::new(value.clone(), state.shown.clone())
        };
        self.publish(pair);
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

struct Uplifted<U, C> {
    parent: Arc<dyn Evolver<U>>,
    lift: Arc<Lift<U, C>>,
}

impl<U: Value, C: Value> Evolver<Pair<U, C>> for Uplifted<U, C> {
    fn evolve(&self, evolution: Evolution<Pair<U, C>>, then: Option<Settle>) {
        let folded = Arc::new(Mutex::new(None));

        let lifted: Evolution<U> = Box::new({
            let lift = self.lift.clone();
            let folded = folded.clone();
            move |current: U| {
                let auxiliary = lift.state.lock().auxiliary.clone();
                let Pair { first, second } = evolution(Pair::new(current.clone(), auxiliary));
                lift.state.lock().auxiliary = second.clone();
                *folded.lock() = Some((current, second));
                first
            }
        });

        // views uplifted from this one settle first: our own settle may
        // publish to them directly
        let settle: Settle = Box::new({
            let parent = self.parent.clone();
            let lift = self.lift.clone();
            move || {
                if let Some(then) = then {
                    then();
                }
                let outcome = folded.lock().take();
                if let Some((before, second)) = outcome {
                    lift.settle(before, parent.current(), second);
                }
            }
        });

        self.parent.evolve(lifted, Some(settle));
    }

    fn current(&self) -> Pair<U, C> {
        Pair::new(self.parent.current(), self.lift.state.lock().auxiliary.clone())
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
