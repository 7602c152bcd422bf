//! Backend parity tests for ScalarOps
//!
//! Mirrors the scalar math coverage used to validate the accelerator
//! kernels: every op over float and integer dtypes, with a random scalar
//! per case from a seeded generator.

use numlu::dtype::DType;
use numlu::error::Result;
use numlu::ops::ScalarOps;
use numlu::runtime::Runtime;
use numlu::tensor::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::backend_parity::dtype_helpers::{
    dtype_tolerance, scalar_dtypes, tensor_from_f64, tensor_to_f64,
};
use crate::backend_parity::helpers::{assert_parity_f64, with_mlu_backend};
use crate::common::create_cpu_client;

fn apply_scalar_op<R: Runtime>(
    client: &impl ScalarOps<R>,
    op: &str,
    tensor: &Tensor<R>,
    scalar: f64,
) -> Result<Tensor<R>> {
    match op {
        "add_scalar" => client.add_scalar(tensor, scalar),
        "sub_scalar" => client.sub_scalar(tensor, scalar),
        "mul_scalar" => client.mul_scalar(tensor, scalar),
        "div_scalar" => client.div_scalar(tensor, scalar),
        _ => panic!("unknown scalar op: {op}"),
    }
}

/// Case data per (op, dtype, shape): integer dtypes get integer-valued data
/// so results compare exactly.
fn case_data(rng: &mut StdRng, dtype: DType, numel: usize) -> Vec<f64> {
    if dtype.is_int() {
        (0..numel)
            .map(|_| rng.random_range(-10..10) as f64)
            .collect()
    } else {
        (0..numel).map(|_| rng.random_range(-10.0..10.0)).collect()
    }
}

fn run_scalar_parity(op: &str) {
    let mut rng = StdRng::seed_from_u64(0x5ca1a);
    let shapes: [&[usize]; 2] = [&[2, 3], &[2, 3, 4]];

    let (cpu_client, cpu_device) = create_cpu_client();

    for dtype in scalar_dtypes() {
        for shape in shapes {
            let numel: usize = shape.iter().product();
            let data = case_data(&mut rng, dtype, numel);
            // Integer division with a zero-converted divisor is rejected
            // by both backends; covered separately below
            let scalar = if op == "div_scalar" {
                rng.random_range(1.0..5.0)
            } else {
                rng.random_range(-5.0..5.0)
            };

            let cpu_in = tensor_from_f64(&data, shape, dtype, &cpu_device);
            let cpu_out = apply_scalar_op(&cpu_client, op, &cpu_in, scalar)
                .unwrap_or_else(|e| panic!("cpu {op} failed for {dtype}: {e}"));
            let cpu_vals = tensor_to_f64(&cpu_out);

            let data = data.clone();
            with_mlu_backend(|mlu_client, mlu_device| {
                let mlu_in = tensor_from_f64(&data, shape, dtype, &mlu_device);
                let mlu_out = apply_scalar_op(&mlu_client, op, &mlu_in, scalar)
                    .unwrap_or_else(|e| panic!("mlu {op} failed for {dtype}: {e}"));
                let mlu_vals = tensor_to_f64(&mlu_out);

                if dtype.is_int() {
                    assert_eq!(mlu_vals, cpu_vals, "{op} int parity for {dtype}");
                } else {
                    let (rtol, atol) = dtype_tolerance(dtype);
                    assert_parity_f64(&mlu_vals, &cpu_vals, rtol, atol, op);
                }
            });
        }
    }
}

#[test]
fn test_add_scalar_parity() {
    run_scalar_parity("add_scalar");
}

#[test]
fn test_sub_scalar_parity() {
    run_scalar_parity("sub_scalar");
}

#[test]
fn test_mul_scalar_parity() {
    run_scalar_parity("mul_scalar");
}

#[test]
fn test_div_scalar_parity() {
    run_scalar_parity("div_scalar");
}

#[test]
fn test_div_scalar_zero_divisor_rejected_on_both_backends() {
    let (cpu_client, cpu_device) = create_cpu_client();

    for dtype in [DType::I32, DType::I64] {
        let data = [10.0, 20.0, 30.0];
        let cpu_in = tensor_from_f64(&data, &[3], dtype, &cpu_device);
        // 0.5 converts to a zero divisor for integer dtypes
        assert!(matches!(
            cpu_client.div_scalar(&cpu_in, 0.5),
            Err(numlu::error::Error::InvalidArgument { arg: "scalar", .. })
        ));

        with_mlu_backend(|mlu_client, mlu_device| {
            let mlu_in = tensor_from_f64(&data, &[3], dtype, &mlu_device);
            assert!(matches!(
                mlu_client.div_scalar(&mlu_in, 0.5),
                Err(numlu::error::Error::InvalidArgument { arg: "scalar", .. })
            ));
        });
    }
}

#[test]
fn test_scalar_parity_on_empty_tensor() {
    let (cpu_client, cpu_device) = create_cpu_client();
    let cpu_in = tensor_from_f64(&[], &[0], DType::F32, &cpu_device);
    let cpu_out = cpu_client.add_scalar(&cpu_in, 1.0).unwrap();
    assert_eq!(cpu_out.shape(), &[0]);

    with_mlu_backend(|mlu_client, mlu_device| {
        let mlu_in = tensor_from_f64(&[], &[0], DType::F32, &mlu_device);
        let mlu_out = mlu_client.add_scalar(&mlu_in, 1.0).unwrap();
        assert_eq!(mlu_out.shape(), &[0]);
    });
}

#[test]
fn test_scalar_parity_on_strided_input() {
    let (cpu_client, cpu_device) = create_cpu_client();
    let data: Vec<f64> = (0..12).map(|i| i as f64).collect();

    let cpu_in = tensor_from_f64(&data, &[3, 4], DType::F32, &cpu_device);
    let cpu_out = cpu_client
        .add_scalar(&cpu_in.transpose(0, 1).unwrap(), 1.5)
        .unwrap();
    let cpu_vals = tensor_to_f64(&cpu_out);

    with_mlu_backend(|mlu_client, mlu_device| {
        let mlu_in = tensor_from_f64(&data, &[3, 4], DType::F32, &mlu_device);
        let mlu_out = mlu_client
            .add_scalar(&mlu_in.transpose(0, 1).unwrap(), 1.5)
            .unwrap();
        let mlu_vals = tensor_to_f64(&mlu_out);

        assert_parity_f64(&mlu_vals, &cpu_vals, 1e-6, 1e-7, "add_scalar strided");
    });
}
