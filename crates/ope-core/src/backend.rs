//! Array-like containers for the two numeric back-ends
//!
//! The input validator is written once against [`ArrayLike`] and
//! instantiated for:
//!
//! - [`NdArray`]: plain numeric arrays (`ndarray`), tagged with their dtype
//! - [`candle_core::Tensor`]: the differentiable tensor back-end
//!
//! The two back-ends are never mixed within a single call.

use crate::{Error, Result};
use candle_core::{DType, Tensor};
use ndarray::{Array, ArrayD, Dimension};

/// Shape and element access shared by every back-end container
pub trait ArrayLike {
    /// Container name used in "`<name> must be <KIND>`" messages
    const KIND: &'static str;

    /// Full shape of the container
    fn shape_vec(&self) -> Vec<usize>;

    /// Whether the element dtype is an integer type
    fn is_integral(&self) -> bool;

    /// Row-major copy of all elements as `f64`
    fn to_f64_vec(&self) -> Result<Vec<f64>>;

    /// Number of dimensions
    fn ndim(&self) -> usize {
        self.shape_vec().len()
    }

    /// Size of the leading dimension (0 for scalars)
    fn leading_len(&self) -> usize {
        self.shape_vec().first().copied().unwrap_or(0)
    }
}

/// A plain numeric array carrying its element dtype
#[derive(Debug, Clone, PartialEq)]
pub enum NdArray {
    /// Integer-valued array
    Int(ArrayD<i64>),
    /// Floating-point array
    Float(ArrayD<f64>),
}

impl NdArray {
    /// Convert to a floating-point array, casting integers
    pub fn to_f64(&self) -> ArrayD<f64> {
        match self {
            Self::Int(a) => a.mapv(|v| v as f64),
            Self::Float(a) => a.clone(),
        }
    }
}

impl ArrayLike for NdArray {
    const KIND: &'static str = "ndarray";

    fn shape_vec(&self) -> Vec<usize> {
        match self {
            Self::Int(a) => a.shape().to_vec(),
            Self::Float(a) => a.shape().to_vec(),
        }
    }

    fn is_integral(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    fn to_f64_vec(&self) -> Result<Vec<f64>> {
        Ok(match self {
            Self::Int(a) => a.iter().map(|&v| v as f64).collect(),
            Self::Float(a) => a.iter().copied().collect(),
        })
    }
}

impl<D: Dimension> From<Array<i64, D>> for NdArray {
    fn from(array: Array<i64, D>) -> Self {
        Self::Int(array.into_dyn())
    }
}

impl<D: Dimension> From<Array<usize, D>> for NdArray {
    fn from(array: Array<usize, D>) -> Self {
        Self::Int(array.mapv(|v| v as i64).into_dyn())
    }
}

impl<D: Dimension> From<Array<f64, D>> for NdArray {
    fn from(array: Array<f64, D>) -> Self {
        Self::Float(array.into_dyn())
    }
}

impl ArrayLike for Tensor {
    const KIND: &'static str = "Tensor";

    fn shape_vec(&self) -> Vec<usize> {
        self.dims().to_vec()
    }

    fn is_integral(&self) -> bool {
        matches!(self.dtype(), DType::U8 | DType::U32 | DType::I64)
    }

    fn to_f64_vec(&self) -> Result<Vec<f64>> {
        let values = self
            .detach()
            .to_dtype(DType::F64)?
            .flatten_all()?
            .to_vec1::<f64>()?;
        Ok(values)
    }
}

/// Floating dtype used for tensor computation given `action_dist`'s dtype
pub fn compute_dtype(action_dist: &Tensor) -> DType {
    match action_dist.dtype() {
        DType::F32 => DType::F32,
        _ => DType::F64,
    }
}

/// Convert a non-negative integral value read back as `f64` into an index
pub(crate) fn as_index(value: f64) -> Result<usize> {
    if value < 0.0 || value.fract() != 0.0 || !value.is_finite() {
        return Err(Error::Computation(format!(
            "{value} is not a valid index"
        )));
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::Device;
    use ndarray::{array, Array3};

    #[test]
    fn test_ndarray_dtype_tagging() {
        let ints = NdArray::from(array![0i64, 1, 2]);
        assert!(ints.is_integral());
        assert_eq!(ints.shape_vec(), vec![3]);

        let floats = NdArray::from(array![0.0, 1.0]);
        assert!(!floats.is_integral());

        let actions = NdArray::from(array![3usize, 1]);
        assert!(actions.is_integral());
        assert_eq!(actions.to_f64_vec().unwrap(), vec![3.0, 1.0]);
    }

    #[test]
    fn test_ndarray_shape() {
        let cube = NdArray::from(Array3::<f64>::zeros((5, 4, 3)));
        assert_eq!(cube.shape_vec(), vec![5, 4, 3]);
        assert_eq!(cube.ndim(), 3);
        assert_eq!(cube.leading_len(), 5);
    }

    #[test]
    fn test_tensor_array_like() {
        let dev = Device::Cpu;
        let t = Tensor::new(&[1i64, 2, 3], &dev).unwrap();
        assert!(t.is_integral());
        assert_eq!(t.shape_vec(), vec![3]);
        assert_eq!(t.to_f64_vec().unwrap(), vec![1.0, 2.0, 3.0]);

        let f = Tensor::zeros((2, 3), DType::F32, &dev).unwrap();
        assert!(!f.is_integral());
        assert_eq!(f.ndim(), 2);
        assert_eq!(compute_dtype(&f), DType::F32);
    }

    #[test]
    fn test_as_index() {
        assert_eq!(as_index(3.0).unwrap(), 3);
        assert!(as_index(-1.0).is_err());
        assert!(as_index(0.5).is_err());
        assert!(as_index(f64::NAN).is_err());
    }
}
