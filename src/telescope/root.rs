use {
    crate::{
        evolution::{self, Evolution},
        telescope::{Evolver, Settle},
        view::{broadcast::DrainGuard, distinct::Distinct, Substrate, Value},
    },
    parking_lot::Mutex,
    std::{
        collections::VecDeque,
        sync::{atomic::AtomicBool, Arc},
    },
    tracing::trace,
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

type Step<U> = (Evolution<U>, Option<Settle>);

/// Owner of a telescope's value. Evolutions enter through the intake
/// queue and are folded one at a time, in arrival order.
pub(crate) struct Root<U: Value> {
    value: Mutex<U>,
    intake: Mutex<VecDeque<Step<U>>>,
    folding: AtomicBool,
    distinct: Distinct<U>,
    cast: Arc<dyn Substrate<U>>,
}

impl<U: Value> Root<U> {
    pub(crate) fn new(initial: U, cast: Arc<dyn Substrate<U>>) -> Arc<Self> {
        let root = Arc::new(Root {
            value: Mutex::new(initial),
            intake: Mutex::new(VecDeque::new()),
            folding: AtomicBool::new(false),
            distinct: Distinct::new(),
            cast,
        });

        // seed: the first fold publishes the initial value
        root.evolve(evolution::identity(), None);
        root
    }

    pub(crate) fn cast(&self) -> Arc<dyn Substrate<U>> {
        self.cast.clone()
    }

    /// Drain the intake. A call made while another fold is running (from a
    /// subscriber callback) returns at once; the running fold applies the
    /// evolution after the current one.
    ///
    /// Steps are taken off the queue one at a time, so a panicking
    /// evolution leaves everything behind it queued for the next fold.
    fn fold(&self) {
        loop {
            {
                let Some(_guard) = DrainGuard::acquire(&self.folding) else {
                    return;
                };

                loop {
                    let next = self.intake.lock().pop_front();
                    let Some(step) = next else { break };
                    self.step(step);
                }
            }

            let idle = self.intake.lock().is_empty();
            if idle {
                return;
            }
        }
    }

    fn step(&self, (evolution, settle): Step<U>) {
        let current = self.value.lock().clone();
        let next = evolution(current);
        *self.value.lock() = next.clone();

        if let Some(settle) = settle {
            settle();
        }

        if self.distinct.admit(&next) {
            trace!("telescope: publishing folded value");
            self.cast.publish(next);
        } else {
            trace!("telescope: folded value unchanged");
        }
    }
}

impl<U: Value> Evolver<U> for Root<U> {
    fn evolve(&self, evolution: Evolution<U>, settle: Option<Settle>) {
        self.intake.lock().push_back((evolution, settle));
        self.fold();
    }

    fn current(&self) -> U {
        self.value.lock().clone()
    }
}
