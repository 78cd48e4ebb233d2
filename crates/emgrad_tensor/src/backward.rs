use crate::Tensor;
use emgrad_core::{array::Array, error::Result};
use std::collections::{hash_map::Entry, HashMap, HashSet};

/// Runs one reverse pass from `root`, seeded with `seed`.
///
/// The graph is linearized with an iterative post-order walk, then replayed
/// in reverse so every node fires only after all of its consumers have
/// contributed. Upstream gradients wait in a pending map keyed by tensor id;
/// each node's slot is drained exactly once, which keeps diamond-shaped
/// graphs from double-counting. Leaves materialize their entry into the
/// stored grad, interior nodes forward theirs through the op's backward.
pub(crate) fn run_backward(root: &Tensor, seed: Array) -> Result<()> {
    let mut order: Vec<Tensor> = Vec::new();
    let mut visited: HashSet<usize> = HashSet::new();
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((tensor, expanded)) = stack.pop() {
        if expanded {
            order.push(tensor);
            continue;
        }
        if !visited.insert(tensor.id()) {
            continue;
        }
        stack.push((tensor.clone(), true));
        if let Some(node) = tensor.node() {
            for input in node.inputs() {
                if input.requires_grad() && !visited.contains(&input.id()) {
                    stack.push((input.clone(), false));
                }
            }
        }
    }
    order.reverse();

    let mut pending: HashMap<usize, Array> = HashMap::new();
    pending.insert(root.id(), seed);

    for tensor in order {
        let grad_out = match pending.remove(&tensor.id()) {
            Some(g) => g,
            None => continue,
        };
        match tensor.node() {
            None => tensor.accumulate_grad(&grad_out)?,
            Some(node) => {
                let grads = node.backward(&grad_out)?;
                for (input, grad) in node.inputs().iter().zip(grads) {
                    let grad = match grad {
                        Some(g) => g,
                        None => continue,
                    };
                    if !input.requires_grad() {
                        continue;
                    }
                    match pending.entry(input.id()) {
                        Entry::Occupied(mut slot) => {
                            let merged = slot.get().add(&grad)?;
                            slot.insert(merged);
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(grad);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
