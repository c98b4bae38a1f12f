//! Everything a dialog borrows from the page it lives in.

use crate::environment::Environment;
use crate::stack::StackManager;
use koala_dom::DocumentHandle;
use std::rc::Rc;

/// The collaborators a [`Dialog`](crate::Dialog) is built against.
///
/// Cloning is cheap; every clone refers to the same document and stack.
#[derive(Clone)]
pub struct Host {
    /// The document the dialog's nodes are inserted into.
    pub document: DocumentHandle,
    /// Source of `z-index` values, shared by all dialogs on the page.
    pub stack: Rc<StackManager>,
    /// Host capabilities.
    pub environment: Rc<Environment>,
}

impl Host {
    /// A host on `document` using the thread's shared [`StackManager`] and a
    /// modern environment.
    #[must_use]
    pub fn new(document: DocumentHandle) -> Self {
        Self {
            document,
            stack: StackManager::shared(),
            environment: Rc::new(Environment::modern()),
        }
    }

    /// Use a dedicated stack manager, e.g. one per test.
    #[must_use]
    pub fn with_stack(mut self, stack: Rc<StackManager>) -> Self {
        self.stack = stack;
        self
    }

    /// Use a detected environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Rc::new(environment);
        self
    }
}
