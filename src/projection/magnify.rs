use {
    crate::{
        evolution::{evolution_with_lens, Evolution},
        lens::SimpleLens,
        telescope::{Evolver, Settle, Telescope},
        view::{distinct::Distinct, Delivery, Observer, Substrate, Value, ValueStream},
    },
    std::sync::Arc,
    tracing::debug,
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<U: Value, D: Delivery> Telescope<U, D> {
    /// View on the part of the value that `lens` focuses on.
    ///
    /// The view stores nothing of its own: reads project the parent's
    /// values through `lens.get`, writes become read-modify-write
    /// evolutions on the parent.
    pub fn magnify<P: Value>(&self, lens: SimpleLens<U, P>) -> Telescope<P, D> {
        let cast: Arc<dyn Substrate<P>> = self.delivery().cast();
        let focus = Arc::new(Focus {
            lens: lens.clone(),
            distinct: Distinct::new(),
            cast: cast.clone(),
        });
        let subscription = self.stream().add_observer(focus);
        debug!("telescope: magnified view attached");

        Telescope::from_parts(
            Arc::new(Magnified {
                parent: self.evolver().clone(),
                lens,
            }),
            ValueStream::new(cast, Arc::new(subscription)),
            self.delivery().clone(),
        )
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Read side: projects every parent value and drops repeated parts.
struct Focus<U, P> {
    lens: SimpleLens<U, P>,
    distinct: Distinct<P>,
    cast: Arc<dyn Substrate<P>>,
}

impl<U: Value, P: Value> Observer<U> for Focus<U, P> {
    fn notify(&self, value: &U) {
        let part = self.lens.get(value);
        if self.distinct.admit(&part) {
            self.cast.publish(part);
        }
    }
}

/// Write side: lifts evolutions of the part onto the parent.
struct Magnified<U, P> {
    parent: Arc<dyn Evolver<U>>,
    lens: SimpleLens<U, P>,
}

impl<U: Value, P: Value> Evolver<P> for Magnified<U, P> {
    fn evolve(&self, evolution: Evolution<P>, settle: Option<Settle>) {
        self.parent
            .evolve(evolution_with_lens(self.lens.clone(), evolution), settle);
    }

    fn current(&self) -> P {
        self.lens.get(&self.parent.current())
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use {
        crate::{
            lens::{Lens, SimpleLens},
            pair::{self, Pair},
            telescope::Telescope,
            view::{Subscription, Value},
        },
        parking_lot::Mutex,
        std::sync::Arc,
    };

    fn record<T: Value>(t: &Telescope<T>) -> (Arc<Mutex<Vec<T>>>, Subscription<T>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sub = t.stream().subscribe({
            let seen = seen.clone();
            move |x: &T| seen.lock().push(x.clone())
        });
        (seen, sub)
    }

    fn half() -> SimpleLens<i32, i32> {
        Lens::new(|u: &i32| u / 2, |p: i32, _: i32| p * 2)
    }

    #[test]
    fn getter_follows_parent() {
        let universe = Telescope::of(2);
        let part = universe.magnify(half());
        let (seen, _sub) = record(&part);

        universe.update(4);
        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[test]
    fn setter_writes_through_to_parent() {
        let universe = Telescope::of(2);
        let part = universe.magnify(half());
        let (seen, _sub) = record(&universe);

        part.update(3);
        assert_eq!(*seen.lock(), vec![2, 6]);
        assert_eq!(part.get(), Some(3));
    }

    #[test]
    fn unrelated_parent_change_is_silent() {
        let whole = Telescope::of(Pair::new(1, 'a'));
        let first = whole.magnify(pair::first());
        let (seen, _sub) = record(&first);

        whole.update(Pair::new(1, 'b'));
        whole.update(Pair::new(1, 'c'));
        whole.update(Pair::new(2, 'c'));
        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[test]
    fn round_trip_laws_through_view() {
        let whole = Telescope::of(Pair::new(1, 'a'));
        let second = whole.magnify(pair::second());
        let (seen, _sub) = record(&whole);

        // get-set
        second.update('z');
        assert_eq!(second.get(), Some('z'));

        // set-get: writing back what was read changes nothing
        second.evolve(|c| c);
        assert_eq!(*seen.lock(), vec![Pair::new(1, 'a'), Pair::new(1, 'z')]);
    }

    #[test]
    fn queued_writes_see_the_latest_parent() {
        let whole = Telescope::of(Pair::new(0, 0));
        let first = whole.magnify(pair::first());
        let second = whole.magnify(pair::second());

        let _bump = first.stream().subscribe({
            let second = second.clone();
            move |x: &i32| {
                if *x == 1 {
                    second.evolve(|y| y + 1);
                    second.evolve(|y| y + 1);
                }
            }
        });

        first.update(1);
        assert_eq!(whole.get(), Some(Pair::new(1, 2)));
    }

    #[test]
    fn nested_views_match_composed_lens() {
        let whole = Telescope::of(Pair::new(Pair::new(1, 'a'), "x".to_string()));
        let outer: SimpleLens<Pair<Pair<i32, char>, String>, Pair<i32, char>> = pair::first();
        let inner: SimpleLens<Pair<i32, char>, char> = pair::second();

        let chained = whole.magnify(outer.clone()).magnify(inner.clone());
        let composed = whole.magnify(outer.compose(&inner));
        let (seen_chained, _a) = record(&chained);
        let (seen_composed, _b) = record(&composed);

        chained.update('b');
        composed.update('c');
        whole.update(Pair::new(Pair::new(1, 'd'), "y".to_string()));

        assert_eq!(*seen_chained.lock(), vec!['a', 'b', 'c', 'd']);
        assert_eq!(*seen_chained.lock(), *seen_composed.lock());
        assert_eq!(whole.get().map(|p| p.second), Some("y".to_string()));
    }

    #[test]
    fn subscription_outlives_view_handle() {
        let universe = Telescope::of(2);
        let (seen, sub) = record(&universe.magnify(half()));

        universe.update(8);
        assert_eq!(*seen.lock(), vec![1, 4]);

        drop(sub);
        universe.update(10);
        assert_eq!(*seen.lock(), vec![1, 4]);
    }
}
