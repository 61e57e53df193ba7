use std::marker::PhantomData;

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Observer
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Receives every value pushed through a stream it is attached to.
///
/// `notify` takes `&self`: an observer may be re-entered when its own
/// callback causes a new value to be published.
pub trait Observer<T>: Send + Sync {
    fn notify(&self, value: &T);
}

pub trait ObserverExt<T>: Observer<T> {
    fn notify_each(&self, it: impl IntoIterator<Item = T>);
}

impl<T, O: Observer<T> + ?Sized> ObserverExt<T> for O {
    fn notify_each(&self, it: impl IntoIterator<Item = T>) {
        for value in it {
            self.notify(&value);
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub struct NotifyFnObserver<T, F>
where
    F: Fn(&T) + Send + Sync,
{
    f: F,
    _phantom: PhantomData<fn(&T)>,
}

impl<T, F> NotifyFnObserver<T, F>
where
    F: Fn(&T) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        NotifyFnObserver {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<T, F> Observer<T> for NotifyFnObserver<T, F>
where
    F: Fn(&T) + Send + Sync,
{
    fn notify(&self, value: &T) {
        (self.f)(value);
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use {
        crate::view::observer::*,
        parking_lot::Mutex,
        std::sync::Arc,
    };

    #[test]
    fn notify_fn_observer_forwards_values() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let obs = NotifyFnObserver::new({
            let seen = seen.clone();
            move |x: &i32| seen.lock().push(*x)
        });

        obs.notify(&1);
        obs.notify_each(vec![2, 3]);
        assert_eq!(*seen.lock(), vec![1, 2, 3]);
    }
}
