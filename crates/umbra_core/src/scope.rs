//! Scope Primitive
//!
//! A single-threaded stack of open scopes shared by every capability token
//! issued from it. Each open scope is a frame identified by a unique serial;
//! a token remembers the depth and serial of the frame it was issued for.
//!
//! - A token is **active** while the frame at its depth still carries its
//!   serial. Once the issuing call returns the frame is popped and the token
//!   is **retired** for good: serials are never reused, so a later sibling
//!   frame at the same depth does not revive it.
//! - A token is **innermost** when no deeper frame is open. Only innermost
//!   tokens may open children or mutate resources.
//!
//! Frames are popped from a drop guard, so retirement also happens when a
//! callback unwinds.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::errors::ScopeFault;

#[derive(Debug)]
struct StackState {
    /// Serial of the open frame at each depth. Index 0 is the root.
    frames: RefCell<Vec<u64>>,
    next_serial: Cell<u64>,
}

impl StackState {
    fn allocate_serial(&self) -> u64 {
        let serial = self.next_serial.get();
        self.next_serial.set(serial + 1);
        serial
    }
}

/// Owner of a scope hierarchy. One stack exists per resource kind.
#[derive(Debug)]
pub struct ScopeStack {
    state: Rc<StackState>,
    label: &'static str,
}

impl ScopeStack {
    /// Creates a stack with only its root frame open.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            state: Rc::new(StackState {
                frames: RefCell::new(vec![0]),
                next_serial: Cell::new(1),
            }),
            label,
        }
    }

    /// The root token. It never retires while the stack lives.
    #[must_use]
    pub fn root(&self) -> ScopeToken {
        ScopeToken {
            state: Rc::clone(&self.state),
            label: self.label,
            depth: 0,
            serial: 0,
        }
    }

    /// Number of scopes currently open below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.state.frames.borrow().len() - 1
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// Handle to one frame of a [`ScopeStack`].
///
/// Cloning a token yields another handle to the same frame; all clones retire
/// together.
#[derive(Debug, Clone)]
pub struct ScopeToken {
    state: Rc<StackState>,
    label: &'static str,
    depth: usize,
    serial: u64,
}

impl ScopeToken {
    /// Depth of this token's frame. The root is depth 0.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` until the issuing call returns.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.frames.borrow().get(self.depth) == Some(&self.serial)
    }

    /// Returns `true` if a child of this token's frame is open.
    #[must_use]
    pub fn has_open_child(&self) -> bool {
        self.state.frames.borrow().len() > self.depth + 1
    }

    /// Faults with [`ScopeFault::UseAfterScope`] if the token is retired.
    #[track_caller]
    pub fn check_alive(&self, operation: &'static str) {
        if !self.is_active() {
            ScopeFault::UseAfterScope { operation }.raise();
        }
    }

    /// Like [`check_alive`](Self::check_alive), and additionally faults with
    /// [`ScopeFault::ScopeReentry`] if a child scope is open.
    #[track_caller]
    pub fn check_innermost(&self, operation: &'static str) {
        self.check_alive(operation);
        if self.has_open_child() {
            ScopeFault::ScopeReentry { operation }.raise();
        }
    }

    /// Opens a child frame, runs `f` with the child token and retires the
    /// child on every exit path.
    #[track_caller]
    pub fn enter<R>(&self, operation: &'static str, f: impl FnOnce(ScopeToken) -> R) -> R {
        self.check_innermost(operation);

        let serial = self.state.allocate_serial();
        self.state.frames.borrow_mut().push(serial);
        let child = ScopeToken {
            state: Rc::clone(&self.state),
            label: self.label,
            depth: self.depth + 1,
            serial,
        };
        log::trace!("[{}] enter depth {} via `{operation}`", self.label, child.depth);

        let _guard = FrameGuard {
            state: &self.state,
            label: self.label,
            depth: child.depth,
        };
        f(child)
    }
}

/// Pops a frame (and anything above it) when dropped.
struct FrameGuard<'a> {
    state: &'a StackState,
    label: &'static str,
    depth: usize,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.state.frames.borrow_mut().truncate(self.depth);
        log::trace!("[{}] exit depth {}", self.label, self.depth);
    }
}
