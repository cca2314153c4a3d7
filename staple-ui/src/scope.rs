//! View lifetimes
//!
//! A [`ViewScope`] is created inside a page component and flips to dead when
//! the page is unmounted. Completions of calls started through it are
//! dropped once the page is gone.

use leptos::*;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use crate::alert::log_debug;

#[derive(Clone)]
pub struct ViewScope {
    alive: Rc<Cell<bool>>,
}

impl ViewScope {
    /// Bind a scope to the current reactive owner
    pub fn new() -> Self {
        let alive = Rc::new(Cell::new(true));
        let flag = alive.clone();
        on_cleanup(move || flag.set(false));
        Self { alive }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Run `fut` with `loading` raised, then hand the output to `apply`.
    ///
    /// `loading` is lowered and `apply` runs only while the view is mounted.
    pub fn run<T, F, A>(&self, loading: RwSignal<bool>, fut: F, apply: A)
    where
        T: 'static,
        F: Future<Output = T> + 'static,
        A: FnOnce(T) + 'static,
    {
        let scope = self.clone();
        loading.set(true);
        spawn_local(async move {
            let output = fut.await;
            if !scope.is_alive() {
                log_debug("Dropping completion of unmounted view");
                return;
            }
            loading.set(false);
            apply(output);
        });
    }
}
