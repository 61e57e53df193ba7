use std::{fmt, sync::Arc};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                   Lens
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Bidirectional accessor focusing on a part `A` of a whole `S`.
///
/// Writing a `B` into an `S` yields a `T`. With `S = T` and `A = B` (see
/// [`SimpleLens`]) a well-behaved lens satisfies
///
/// * set-get: `set(get(s), s) == s`
/// * get-set: `get(set(a, s)) == a`
/// * set-set: `set(a2, set(a1, s)) == set(a2, s)`
///
/// These laws are not checked. Composing lawful lenses gives a lawful lens.
pub struct Lens<S, T, A, B> {
    getter: Arc<dyn Fn(&S) -> A + Send + Sync>,
    setter: Arc<dyn Fn(B, S) -> T + Send + Sync>,
}

pub type SimpleLens<S, A> = Lens<S, S, A, A>;

impl<S, T, A, B> Lens<S, T, A, B>
where
    S: 'static,
    T: 'static,
    A: 'static,
    B: 'static,
{
    pub fn new(
        getter: impl Fn(&S) -> A + Send + Sync + 'static,
        setter: impl Fn(B, S) -> T + Send + Sync + 'static,
    ) -> Self {
        Lens {
            getter: Arc::new(getter),
            setter: Arc::new(setter),
        }
    }

    /// Lens whose setter ignores the old whole: `from` alone rebuilds it.
    pub fn iso(
        to: impl Fn(&S) -> A + Send + Sync + 'static,
        from: impl Fn(B) -> T + Send + Sync + 'static,
    ) -> Self {
        Lens::new(to, move |b, _| from(b))
    }

    pub fn get(&self, s: &S) -> A {
        (self.getter)(s)
    }

    pub fn set(&self, b: B, s: S) -> T {
        (self.setter)(b, s)
    }

    /// Read the focus, transform it with `f` and write the result back.
    pub fn modify(&self, s: S, f: impl FnOnce(A) -> B) -> T {
        let b = f(self.get(&s));
        self.set(b, s)
    }

    /// Focus further into the part, through `inner`.
    pub fn compose<C, D>(&self, inner: &Lens<A, B, C, D>) -> Lens<S, T, C, D>
    where
        C: 'static,
        D: 'static,
    {
        let getter = {
            let (outer, inner) = (self.clone(), inner.clone());
            move |s: &S| inner.get(&outer.get(s))
        };
        let setter = {
            let (outer, inner) = (self.clone(), inner.clone());
            move |d: D, s: S| outer.set(inner.set(d, outer.get(&s)), s)
        };

        Lens::new(getter, setter)
    }
}

impl<S: Clone + 'static> Lens<S, S, S, S> {
    pub fn identity() -> Self {
        Lens::new(S::clone, |s, _| s)
    }
}

impl<S, T, A, B> Clone for Lens<S, T, A, B> {
    fn clone(&self) -> Self {
        Lens {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
        }
    }
}

impl<S, T, A, B> fmt::Debug for Lens<S, T, A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lens").finish_non_exhaustive()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::lens::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Segment {
        start: Point,
        end: Point,
    }

    fn x() -> SimpleLens<Point, i32> {
        Lens::new(|p: &Point| p.x, |x, p| Point { x, ..p })
    }

    fn start() -> SimpleLens<Segment, Point> {
        Lens::new(|s: &Segment| s.start.clone(), |start, s| Segment { start, ..s })
    }

    fn segment() -> Segment {
        Segment {
            start: Point { x: 1, y: 2 },
            end: Point { x: 3, y: 4 },
        }
    }

    fn assert_laws<S, A>(lens: &SimpleLens<S, A>, s: S, a1: A, a2: A)
    where
        S: Clone + PartialEq + std::fmt::Debug + 'static,
        A: Clone + PartialEq + std::fmt::Debug + 'static,
    {
        assert_eq!(lens.set(lens.get(&s), s.clone()), s, "set-get");
        assert_eq!(lens.get(&lens.set(a1.clone(), s.clone())), a1, "get-set");
        assert_eq!(
            lens.set(a2.clone(), lens.set(a1, s.clone())),
            lens.set(a2, s),
            "set-set"
        );
    }

    #[test]
    fn identity() {
        let id = SimpleLens::<i32, i32>::identity();
        assert_eq!(id.get(&1), 1);
        assert_eq!(id.set(1, 2), 1);
        assert_laws(&id, 2, 1, 3);
    }

    #[test]
    fn field_lens_is_lawful() {
        assert_laws(&x(), Point { x: 1, y: 2 }, 10, 20);
        assert_eq!(x().set(5, Point { x: 1, y: 2 }), Point { x: 5, y: 2 });
    }

    #[test]
    fn modify_goes_through_focus() {
        assert_eq!(x().modify(Point { x: 1, y: 2 }, |x| x + 1), Point { x: 2, y: 2 });
    }

    #[test]
    fn composed_field_lens() {
        let start_x = start().compose(&x());

        assert_eq!(start_x.get(&segment()), x().get(&start().get(&segment())));
        assert_eq!(start_x.set(7, segment()).start, Point { x: 7, y: 2 });
        assert_eq!(start_x.set(7, segment()).end, segment().end);
        assert_laws(&start_x, segment(), 7, 8);
    }

    #[test]
    fn compose_with_commuting_setters() {
        let half = Lens::new(|u: &f64| u / 2.0, |p: f64, _: f64| p * 2.0);
        let third = Lens::new(|u: &f64| u / 3.0, |p: f64, _: f64| p * 3.0);
        let sixth = half.compose(&third);

        let s = 2.0 * 3.0 * 5.0;
        assert_eq!(sixth.get(&s), third.get(&half.get(&s)));
        assert_eq!(sixth.set(5.0, 1.0), half.set(third.set(5.0, 1.0), 2.0));
        assert_eq!(sixth.set(5.0, 1.0), 30.0);
    }

    #[test]
    fn compose_with_non_commuting_setters() {
        let drop_last = |p: String, _: String| {
            let mut p = p;
            p.pop();
            p
        };
        let plus = Lens::new(|u: &String| format!("{}+", u), drop_last);
        let minus = Lens::new(|u: &String| format!("{}-", u), drop_last);
        let lens = plus.compose(&minus);

        let x = "x".to_string();
        assert_eq!(lens.get(&x), minus.get(&plus.get(&x)));
        assert_eq!(lens.get(&x), "x+-");

        let set = lens.set("aaa".to_string(), String::new());
        assert_eq!(set, plus.set(minus.set("aaa".to_string(), String::new()), String::new()));
        assert_eq!(set, "a");

        // the other order reads differently
        assert_ne!(minus.compose(&plus).get(&x), lens.get(&x));
    }

    #[test]
    fn type_changing_lens() {
        let len: Lens<String, usize, usize, usize> = Lens::new(|s: &String| s.len(), |n, _| n * 10);
        let described: Lens<usize, String, usize, String> = Lens::iso(|n: &usize| *n, |s: String| s);

        assert_eq!(len.get(&"abc".to_string()), 3);
        assert_eq!(len.set(4, String::new()), 40);
        assert_eq!(described.set("four".to_string(), 4), "four");
    }
}
