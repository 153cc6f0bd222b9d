use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Delays `f` until `wait_ms` have passed without another call. Only the
/// latest argument is delivered.
pub fn debounce<A, F>(wait_ms: u32, f: F) -> impl FnMut(A)
where
    A: 'static,
    F: FnMut(A) + 'static,
{
    let f = Rc::new(RefCell::new(f));
    let mut pending: Option<Timeout> = None;

    move |arg: A| {
        let f = f.clone();
        let next = Timeout::new(wait_ms, move || {
            (f.borrow_mut())(arg);
        });
        if let Some(previous) = pending.replace(next) {
            drop(previous.cancel());
        }
    }
}

/// Runs `f` at most once per `limit_ms`; calls inside the window are dropped.
pub fn throttle<A, F>(limit_ms: u32, mut f: F) -> impl FnMut(A)
where
    F: FnMut(A),
{
    let cooling = Rc::new(Cell::new(false));

    move |arg: A| {
        if cooling.get() {
            return;
        }
        f(arg);
        cooling.set(true);
        let cooling = cooling.clone();
        Timeout::new(limit_ms, move || cooling.set(false)).forget();
    }
}
