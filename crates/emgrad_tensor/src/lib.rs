pub mod adapter;
mod backward;
mod creation;
pub mod op;
mod operators;
pub(crate) mod ops;
pub mod random;
#[cfg(feature = "serde")]
mod serde;

use emgrad_core::{
    array::{Array, Element},
    device::Device,
    dtype::DType,
    error::{Error, Result},
    layout::Layout,
    scalar::Scalar,
};
use op::Op;
use std::{
    collections::HashSet,
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

static NEXT_TENSOR_ID: AtomicUsize = AtomicUsize::new(0);

fn next_tensor_id() -> usize {
    NEXT_TENSOR_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Clone)]
pub struct TensorData {
    id: usize,
    array: Arc<Array>,
    grad: Arc<Mutex<Option<Array>>>,
}

#[derive(Clone)]
pub struct TensorMetadata {
    device: Device,
    dtype: DType,
    layout: Layout,
    requires_grad: bool,
}

/// Graph edge: the op that produced a tensor plus the tensors it consumed.
pub struct TensorNode {
    op: Arc<Mutex<Box<dyn Op>>>,
    inputs: Vec<Tensor>,
}

impl TensorNode {
    pub fn new(op: Box<dyn Op>, inputs: Vec<Tensor>) -> Self {
        Self {
            op: Arc::new(Mutex::new(op)),
            inputs,
        }
    }

    pub fn op_name(&self) -> Result<&'static str> {
        let guard = self.op.lock().map_err(|_| Error::Internal {
            message: "op lock poisoned".to_string(),
        })?;
        Ok(guard.name())
    }

    pub fn inputs(&self) -> &[Tensor] {
        &self.inputs
    }

    fn backward(&self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let mut guard = self.op.lock().map_err(|_| Error::Internal {
            message: "op lock poisoned".to_string(),
        })?;
        let grads = guard.backward(grad_out)?;
        if grads.len() != self.inputs.len() {
            return Err(Error::Internal {
                message: format!(
                    "op '{}' produced {} gradients for {} inputs",
                    guard.name(),
                    grads.len(),
                    self.inputs.len()
                ),
            });
        }
        Ok(grads)
    }
}

/// A value in the autograd graph. Cloning is cheap: the underlying array and
/// the gradient slot are shared, so clones act as aliases of the same node.
#[derive(Clone)]
pub struct Tensor {
    data: TensorData,
    metadata: TensorMetadata,
    node: Option<Arc<TensorNode>>,
}

// The default drop would recurse through `inputs`, which overflows the stack
// on deep graphs. Nodes are detached into a worklist instead; a node whose
// Arc is still aliased stays intact for the surviving handles.
impl Drop for Tensor {
    fn drop(&mut self) {
        let mut stack: Vec<TensorNode> = Vec::new();
        if let Some(node) = self.node.take() {
            if let Ok(node) = Arc::try_unwrap(node) {
                stack.push(node);
            }
        }
        while let Some(node) = stack.pop() {
            for mut input in node.inputs {
                if let Some(n) = input.node.take() {
                    if let Ok(n) = Arc::try_unwrap(n) {
                        stack.push(n);
                    }
                }
            }
        }
    }
}

impl Tensor {
    // data

    pub(crate) fn from_array(array: Array) -> Self {
        let metadata = TensorMetadata {
            device: array.device(),
            dtype: array.dtype(),
            layout: Layout::from_shape(array.shape()),
            requires_grad: false,
        };
        Self {
            data: TensorData {
                id: next_tensor_id(),
                array: Arc::new(array),
                grad: Arc::new(Mutex::new(None)),
            },
            metadata,
            node: None,
        }
    }

    pub fn array(&self) -> &Array {
        &self.data.array
    }

    /// Creation-order identity; also the key used for gradient routing.
    pub fn id(&self) -> usize {
        self.data.id
    }

    pub fn layout(&self) -> &Layout {
        &self.metadata.layout
    }

    pub fn shape(&self) -> &[usize] {
        self.metadata.layout.shape()
    }

    pub fn strides(&self) -> &[usize] {
        self.metadata.layout.strides()
    }

    pub fn size(&self) -> usize {
        self.metadata.layout.size()
    }

    pub fn ndim(&self) -> usize {
        self.metadata.layout.ndim()
    }

    pub fn dim_size(&self, dim: usize) -> Option<usize> {
        self.metadata.layout.dim_size(dim)
    }

    pub fn device(&self) -> Device {
        self.metadata.device
    }

    pub fn dtype(&self) -> DType {
        self.metadata.dtype
    }

    pub fn requires_grad(&self) -> bool {
        self.metadata.requires_grad
    }

    pub fn node(&self) -> Option<&TensorNode> {
        self.node.as_deref()
    }

    pub(crate) fn set_node(&mut self, node: TensorNode) {
        self.node = Some(Arc::new(node));
    }

    pub fn item(&self) -> Result<Scalar> {
        self.data.array.item()
    }

    pub fn to_flat_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.data.array.to_flat_vec()
    }

    // grad

    /// Marks this tensor as a trainable leaf. Only floating-point tensors
    /// can carry gradients.
    pub fn with_grad(&mut self) -> Result<()> {
        if self.dtype().is_int() {
            return Err(Error::InvalidArgument(format!(
                "only floating-point tensors can require grad, got {}",
                self.dtype().as_str()
            )));
        }
        self.metadata.requires_grad = true;
        Ok(())
    }

    pub fn grad(&self) -> Result<Option<Tensor>> {
        let guard = self.data.grad.lock().map_err(|_| Error::GradLocked)?;
        Ok(guard.as_ref().map(|g| Tensor::from_array(g.clone())))
    }

    pub(crate) fn accumulate_grad(&self, grad_in: &Array) -> Result<()> {
        if grad_in.shape() != self.shape() {
            return Err(Error::DimensionMismatch {
                expected: self.shape().to_vec(),
                got: grad_in.shape().to_vec(),
            });
        }
        let mut guard = self.data.grad.lock().map_err(|_| Error::GradLocked)?;
        *guard = Some(match guard.take() {
            Some(existing) => existing.add(grad_in)?,
            None => grad_in.clone(),
        });
        Ok(())
    }

    /// Clears the stored gradient of this tensor and of every tensor
    /// reachable through its graph. Iterative with a visited set, so deep
    /// chains and diamond-shaped graphs are walked once per node.
    pub fn zero_grad(&self) -> Result<()> {
        let mut visited: HashSet<usize> = HashSet::new();
        let mut stack: Vec<Tensor> = vec![self.clone()];
        while let Some(tensor) = stack.pop() {
            if !visited.insert(tensor.id()) {
                continue;
            }
            {
                let mut guard = tensor.data.grad.lock().map_err(|_| Error::GradLocked)?;
                *guard = None;
            }
            if let Some(node) = tensor.node() {
                for input in node.inputs() {
                    if !visited.contains(&input.id()) {
                        stack.push(input.clone());
                    }
                }
            }
        }
        Ok(())
    }

    // backward

    /// Seeds the backward pass with ones. Only valid on single-element
    /// results; call [`Tensor::backward_with`] to seed a non-scalar.
    pub fn backward(&self) -> Result<()> {
        if !self.requires_grad() {
            return Err(Error::NotDifferentiable);
        }
        if self.size() != 1 {
            return Err(Error::InvalidShape {
                message: format!(
                    "backward() requires a single-element tensor, got shape {:?}; use backward_with",
                    self.shape()
                ),
            });
        }
        let seed = Array::ones_like(self.array())?;
        backward::run_backward(self, seed)
    }

    pub fn backward_with(&self, grad: &Tensor) -> Result<()> {
        if !self.requires_grad() {
            return Err(Error::NotDifferentiable);
        }
        if grad.shape() != self.shape() {
            return Err(Error::ShapeMismatch {
                expected: self.size(),
                got: grad.size(),
                msg: format!(
                    "seed gradient shape {:?} does not match output shape {:?}",
                    grad.shape(),
                    self.shape()
                ),
            });
        }
        backward::run_backward(self, grad.array().clone())
    }

    /// A leaf alias of this tensor's value, cut off from the graph.
    pub fn detach(&self) -> Tensor {
        let mut detached = Tensor::from_array(self.data.array.as_ref().clone());
        detached.metadata.layout = self.metadata.layout.clone();
        detached
    }

    // movement

    pub fn to_device(&self, device: Device) -> Result<Tensor> {
        let moved = self.data.array.to_device(device)?;
        let mut result = Tensor::from_array(moved);
        if self.requires_grad() {
            result.with_grad()?;
        }
        Ok(result)
    }

    pub fn astype(&self, dtype: DType) -> Result<Tensor> {
        Ok(Tensor::from_array(self.data.array.astype(dtype)?))
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data.array)
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tensor(shape={:?}, dtype={}, device={}, requires_grad={}, data={})",
            self.shape(),
            self.dtype().as_str(),
            self.device(),
            self.requires_grad(),
            self.data.array
        )
    }
}
