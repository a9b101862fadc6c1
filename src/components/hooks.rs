use std::cell::{Ref, RefCell};
use std::rc::Rc;

use yew::prelude::*;

/// A plain state struct shared with async tasks. Mutations go through
/// `update`, which re-renders the owning component afterwards.
pub struct ModelHandle<T> {
    cell: Rc<RefCell<T>>,
    redraw: UseForceUpdateHandle,
}

impl<T> Clone for ModelHandle<T> {
    fn clone(&self) -> Self {
        Self { cell: self.cell.clone(), redraw: self.redraw.clone() }
    }
}

impl<T> ModelHandle<T> {
    pub fn borrow(&self) -> Ref<'_, T> {
        self.cell.borrow()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.cell.borrow_mut());
        self.redraw.force_update();
        out
    }

    /// For the async loaders in `state`, which take the cell directly. Call
    /// `redraw` once they return.
    pub fn cell(&self) -> &RefCell<T> {
        &self.cell
    }

    pub fn redraw(&self) {
        self.redraw.force_update();
    }
}

#[hook]
pub fn use_model<T, F>(init: F) -> ModelHandle<T>
where
    T: 'static,
    F: FnOnce() -> T,
{
    let cell = use_mut_ref(init);
    let redraw = use_force_update();
    ModelHandle { cell, redraw }
}
