//! DType-aware tensor creation for parity tests
//!
//! Test data is held as f64 (highest precision, human-readable) and lowered
//! to the target dtype at tensor creation, so the same case definitions
//! parameterize over every dtype.

use numlu::dtype::DType;
use numlu::runtime::Runtime;
use numlu::tensor::Tensor;

/// Float dtypes to parameterize parity tests over
pub fn float_dtypes() -> Vec<DType> {
    let mut dtypes = vec![DType::F32, DType::F64];
    #[cfg(feature = "f16")]
    dtypes.push(DType::F16);
    dtypes
}

/// All dtypes the scalar arithmetic kernels are registered for
pub fn scalar_dtypes() -> Vec<DType> {
    let mut dtypes = float_dtypes();
    dtypes.push(DType::I32);
    dtypes.push(DType::I64);
    dtypes
}

/// Read-back tolerance for a dtype: `(rtol, atol)`
///
/// F16 carries ~3 decimal digits, so it gets the loose tolerance; other
/// floats compare at 1e-4. Integer results are compared exactly by callers.
pub fn dtype_tolerance(dtype: DType) -> (f64, f64) {
    match dtype {
        DType::F16 => (1e-3, 1e-3),
        _ => (1e-4, 1e-4),
    }
}

/// Create a tensor of the target dtype from f64 test data
pub fn tensor_from_f64<R: Runtime>(
    data: &[f64],
    shape: &[usize],
    dtype: DType,
    device: &R::Device,
) -> Tensor<R> {
    match dtype {
        DType::F64 => Tensor::from_slice(data, shape, device),
        DType::F32 => {
            let v: Vec<f32> = data.iter().map(|&x| x as f32).collect();
            Tensor::from_slice(&v, shape, device)
        }
        #[cfg(feature = "f16")]
        DType::F16 => {
            let v: Vec<half::f16> = data.iter().map(|&x| half::f16::from_f64(x)).collect();
            Tensor::from_slice(&v, shape, device)
        }
        DType::I64 => {
            let v: Vec<i64> = data.iter().map(|&x| x as i64).collect();
            Tensor::from_slice(&v, shape, device)
        }
        DType::I32 => {
            let v: Vec<i32> = data.iter().map(|&x| x as i32).collect();
            Tensor::from_slice(&v, shape, device)
        }
        other => panic!("no test coverage for dtype {other}"),
    }
}

/// Read a tensor back as f64 regardless of its dtype
pub fn tensor_to_f64<R: Runtime>(tensor: &Tensor<R>) -> Vec<f64> {
    let contig = if tensor.is_contiguous() {
        tensor.clone()
    } else {
        tensor.contiguous()
    };

    match tensor.dtype() {
        DType::F64 => contig.to_vec(),
        DType::F32 => contig.to_vec::<f32>().into_iter().map(f64::from).collect(),
        #[cfg(feature = "f16")]
        DType::F16 => contig
            .to_vec::<half::f16>()
            .into_iter()
            .map(half::f16::to_f64)
            .collect(),
        DType::I64 => contig.to_vec::<i64>().into_iter().map(|x| x as f64).collect(),
        DType::I32 => contig.to_vec::<i32>().into_iter().map(f64::from).collect(),
        other => panic!("no test coverage for dtype {other}"),
    }
}
