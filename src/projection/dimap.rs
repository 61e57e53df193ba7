use crate::{
    lens::Lens,
    telescope::Telescope,
    view::{Delivery, Value},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<U: Value, D: Delivery> Telescope<U, D> {
    /// View through a pair of total mappings. Writes go through `from`
    /// alone; the parent's old value is not consulted.
    pub fn dimap<P: Value>(
        &self,
        to: impl Fn(&U) -> P + Send + Sync + 'static,
        from: impl Fn(P) -> U + Send + Sync + 'static,
    ) -> Telescope<P, D> {
        self.magnify(Lens::iso(to, from))
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
