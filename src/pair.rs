use {
    crate::lens::Lens,
    serde::{Deserialize, Serialize},
};

/// Two related values carried together, e.g. a value and an auxiliary
/// value tracked alongside it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pair<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Pair<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Pair { first, second }
    }

    pub fn swap(self) -> Pair<B, A> {
        Pair::new(self.second, self.first)
    }

    pub fn into_tuple(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> From<(A, B)> for Pair<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Pair::new(first, second)
    }
}

impl<A, B> From<Pair<A, B>> for (A, B) {
    fn from(pair: Pair<A, B>) -> Self {
        pair.into_tuple()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Focus on `first`. Writing a `B` there turns `Pair<A, C>` into `Pair<B, C>`.
pub fn first<A, B, C>() -> Lens<Pair<A, C>, Pair<B, C>, A, B>
where
    A: Clone + 'static,
    B: 'static,
    C: 'static,
{
    Lens::new(
        |p: &Pair<A, C>| p.first.clone(),
        |first, p: Pair<A, C>| Pair::new(first, p.second),
    )
}

/// Focus on `second`.
pub fn second<A, C, D>() -> Lens<Pair<A, C>, Pair<A, D>, C, D>
where
    A: 'static,
    C: Clone + 'static,
    D: 'static,
{
    Lens::new(
        |p: &Pair<A, C>| p.second.clone(),
        |second, p: Pair<A, C>| Pair::new(p.first, second),
    )
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
