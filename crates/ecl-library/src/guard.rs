//! Scoped ownership of an open [`LibraryContext`].

use crate::library::LibraryContext;

/// Owns an open context and closes it exactly once.
///
/// The context is closed by [`ContextGuard::release`] or, failing that, when
/// the guard is dropped, so early returns and `?` never leak it.
pub struct ContextGuard<C: LibraryContext> {
    context: C,
    released: bool,
}

impl<C: LibraryContext> ContextGuard<C> {
    pub fn new(context: C) -> Self {
        Self {
            context,
            released: false,
        }
    }

    /// The guarded context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Close the context now.
    pub fn release(mut self) {
        self.close();
    }

    fn close(&mut self) {
        if !self.released {
            self.released = true;
            self.context.close();
            tracing::debug!("Released ECL context");
        }
    }
}

impl<C: LibraryContext> Drop for ContextGuard<C> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<C: LibraryContext> std::fmt::Debug for ContextGuard<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextGuard")
            .field("released", &self.released)
            .finish()
    }
}
