use emgrad_core::{
    array::Array,
    error::{Error, Result},
};

/// A differentiable operation recorded as a graph node.
///
/// `forward` computes the output value and stashes whatever `backward` will
/// need in the op's [`OpCache`]. `backward` consumes the stash exactly once
/// and returns one gradient slot per input, in input order. A `None` slot
/// marks an input that never receives a gradient from this op.
pub trait Op: Send {
    fn name(&self) -> &'static str;

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array>;

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>>;
}

/// Single-use stash bridging an op's forward pass to its backward pass.
///
/// The consumed flag is tracked separately from the slot, so an empty cache
/// distinguishes "forward never ran" from "backward already drained it";
/// `take` reports [`Error::CacheEmpty`] in both states instead of silently
/// reusing stale state, and `save` enforces the save-once contract.
pub struct OpCache<T> {
    slot: Option<T>,
    consumed: bool,
    op: &'static str,
}

impl<T> OpCache<T> {
    pub fn new(op: &'static str) -> Self {
        Self {
            slot: None,
            consumed: false,
            op,
        }
    }

    /// Stashes the forward-pass state. Panics if the slot is already live:
    /// an op instance runs forward exactly once.
    pub fn save(&mut self, value: T) {
        assert!(
            self.slot.is_none(),
            "op '{}' saved its cache twice without a backward in between",
            self.op
        );
        self.slot = Some(value);
        self.consumed = false;
    }

    pub fn take(&mut self) -> Result<T> {
        match self.slot.take() {
            Some(value) => {
                self.consumed = true;
                Ok(value)
            }
            None => Err(Error::CacheEmpty {
                op: self.op.to_string(),
            }),
        }
    }

    /// True once `take` has drained the slot; false for a cache that was
    /// never filled.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}
