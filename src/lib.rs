//! Reactive state containers driven by lenses
//!
//! A [`Telescope`] holds a value, publishes every change of it on a
//! deduplicated stream that replays the current value to new subscribers,
//! and is written to with *evolutions*, i.e. pure `U -> U` transitions.
//!
//! From any telescope you can derive views:
//! `magnify` focuses through a [`Lens`], `dimap` maps through a pair of
//! total functions and `uplift` pairs the value with an auxiliary value
//! kept by the view. Views store nothing of the parent's value: reads are
//! projections of the parent stream and writes are rewritten into
//! evolutions on the parent, all the way down to the root.
//!
//! How values reach subscribers is up to the [`Delivery`](view::Delivery):
//! [`Immediate`](view::Immediate) delivers before `evolve` returns,
//! [`Queued`](view::Queued) defers to a [`Dispatcher`](view::Dispatcher).
//!
//!# Examples
//!
//! ```
//! use telescope::{pair::{self, Pair}, Telescope};
//!
//! let whole = Telescope::of(Pair::new(1, 'a'));
//! let count = whole.magnify(pair::first());
//!
//! let _sub = count.stream().subscribe(|n: &i32| println!("count is now {}", n));
//!
//! count.evolve(|n| n + 1);
//! assert_eq!(whole.get(), Some(Pair::new(2, 'a')));
//!
//! whole.update(Pair::new(2, 'b'));   // `first` unchanged, `count` stays silent
//! assert_eq!(count.get(), Some(2));
//!
//! let doubled = count.dimap(|n: &i32| n * 2, |d: i32| d / 2);
//! doubled.update(10);
//! assert_eq!(whole.get(), Some(Pair::new(5, 'b')));
//! ```

pub mod evolution;
pub mod lens;
pub mod pair;
pub mod view;

mod projection;
mod telescope;

pub use {
    evolution::{evolution_with_lens, Evolution},
    lens::{Lens, SimpleLens},
    pair::Pair,
    telescope::Telescope,
};
