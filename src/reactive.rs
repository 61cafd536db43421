//! Signal - shared, observable router state.
//!
//! `Signal<T>` holds a value behind `Rc<RefCell<T>>`. Clones share the same
//! value. Subscribers registered with [`Signal::subscribe`] run after every
//! `set()` or `update()`, which is how the launcher re-renders the outlet when
//! the current route changes.
//!
//! ## Example
//!
//! ```
//! use genpages::reactive::Signal;
//!
//! let count = Signal::new(0);
//! count.set(42);
//! assert_eq!(count.get(), 42);
//!
//! count.update(|n| *n += 1);
//! assert_eq!(count.get(), 43);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// A shared value that notifies subscribers when it changes.
pub struct Signal<T: 'static> {
	value: Rc<RefCell<T>>,
	subscribers: Rc<RefCell<Vec<Subscriber<T>>>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			subscribers: Rc::clone(&self.subscribers),
		}
	}
}

impl<T: 'static> Signal<T> {
	/// Create a new Signal with the given initial value
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			subscribers: Rc::new(RefCell::new(Vec::new())),
		}
	}

	/// Get a clone of the current value
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Borrow the current value without cloning it
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Set the signal to a new value and notify subscribers
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.value.borrow_mut() = value;
		self.notify();
	}

	/// Update the value in place and notify subscribers once
	pub fn update<F>(&self, f: F)
	where
		T: Clone,
		F: FnOnce(&mut T),
	{
		f(&mut *self.value.borrow_mut());
		self.notify();
	}

	/// Register a callback that runs after every change
	pub fn subscribe<F>(&self, f: F)
	where
		F: Fn(&T) + 'static,
	{
		self.subscribers.borrow_mut().push(Rc::new(f));
	}

	/// Number of registered subscribers
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.borrow().len()
	}

	// Subscribers get a snapshot with no borrow held, so they may subscribe
	// again or write to this (or any other) signal.
	fn notify(&self)
	where
		T: Clone,
	{
		let subscribers: Vec<Subscriber<T>> = self.subscribers.borrow().clone();
		let value = self.value.borrow().clone();
		for subscriber in subscribers {
			subscriber(&value);
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.value.borrow())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}
