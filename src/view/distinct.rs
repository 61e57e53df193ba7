use {
    crate::view::Value,
    parking_lot::Mutex,
};

/// Remembers the last admitted value and rejects an equal successor.
pub(crate) struct Distinct<T> {
    last: Mutex<Option<T>>,
}

impl<T: Value> Distinct<T> {
    pub(crate) fn new() -> Self {
        Distinct {
            last: Mutex::new(None),
        }
    }

    /// `true` if `value` differs from the previously admitted one; it then
    /// becomes the new reference.
    pub(crate) fn admit(&self, value: &T) -> bool {
        let mut last = self.last.lock();
        if last.as_ref() == Some(value) {
            false
        } else {
            *last = Some(value.clone());
            true
        }
    }
}
