// Context stack - per-scope bookkeeping for nested test runs

/// One open scope: the run root or a nested context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Direct children recorded so far (also the ordinal of the last one)
    pub spec_count: usize,
    pub succeeded: bool,
    /// Run error attached while this scope was on top
    pub pending_error: Option<String>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a fresh, successful scope with no children
    pub fn new() -> Self {
        Self {
            spec_count: 0,
            succeeded: true,
            pending_error: None,
        }
    }

    /// Record one more child and return its 1-based ordinal
    pub fn record_child(&mut self) -> usize {
        self.spec_count += 1;
        self.spec_count
    }

    /// Mark this scope as failed. Never reversible.
    pub fn fail(&mut self) {
        self.succeeded = false;
    }
}

/// A closed scope, as seen by its parent after the pop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedScope {
    pub succeeded: bool,
    pub pending_error: Option<String>,
    /// Ordinal assigned to the closed scope within its parent
    pub ordinal: usize,
}

/// LIFO stack of open scopes, newest on top
#[derive(Debug, Clone, Default)]
pub struct ContextStack {
    contexts: Vec<Context>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self {
            contexts: Vec::new(),
        }
    }

    /// Number of open scopes, root included
    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    /// Indentation level for a line emitted at the current depth
    pub fn level(&self) -> usize {
        self.depth().max(1) - 1
    }

    pub fn push(&mut self) {
        self.contexts.push(Context::new());
    }

    pub fn top(&self) -> Option<&Context> {
        self.contexts.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Context> {
        self.contexts.last_mut()
    }

    /// Success flag of the innermost open scope
    pub fn succeeded(&self) -> Option<bool> {
        self.top().map(|ctx| ctx.succeeded)
    }

    /// Record a child in the top scope, returning its ordinal.
    ///
    /// Returns 0 when no scope is open.
    pub fn record_child(&mut self) -> usize {
        self.top_mut().map(Context::record_child).unwrap_or(0)
    }

    /// Mark the top scope as failed
    pub fn fail(&mut self) {
        if let Some(ctx) = self.top_mut() {
            ctx.fail();
        }
    }

    /// Fail the top scope and attach a run error to it, replacing any earlier one
    pub fn attach_error(&mut self, message: impl Into<String>) {
        if let Some(ctx) = self.top_mut() {
            ctx.fail();
            ctx.pending_error = Some(message.into());
        }
    }

    /// Pop the top scope without touching its parent (used for the root)
    pub fn pop(&mut self) -> Option<Context> {
        self.contexts.pop()
    }

    /// Pop the top scope and fold it into its parent.
    ///
    /// The parent's success becomes `parent && child` and the child is
    /// recorded as the parent's next ordinal. With no parent left the
    /// ordinal is 0.
    pub fn close(&mut self) -> Option<ClosedScope> {
        let child = self.contexts.pop()?;
        let ordinal = match self.top_mut() {
            Some(parent) => {
                parent.succeeded = parent.succeeded && child.succeeded;
                parent.record_child()
            }
            None => 0,
        };

        Some(ClosedScope {
            succeeded: child.succeeded,
            pending_error: child.pending_error,
            ordinal,
        })
    }
}
