use crate::lens::SimpleLens;

/// One state transition. Applied exactly once.
pub type Evolution<A> = Box<dyn FnOnce(A) -> A + Send>;

pub fn identity<A: 'static>() -> Evolution<A> {
    Box::new(|a| a)
}

/// Replace whatever is there by `value`.
pub fn constant<A: Send + 'static>(value: A) -> Evolution<A> {
    Box::new(move |_| value)
}

/// Lift an evolution of the part into an evolution of the whole: read the
/// part through `lens`, evolve it and write it back.
pub fn evolution_with_lens<U, P>(lens: SimpleLens<U, P>, evolution: Evolution<P>) -> Evolution<U>
where
    U: 'static,
    P: 'static,
{
    Box::new(move |u| lens.modify(u, evolution))
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
