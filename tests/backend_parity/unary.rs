//! Backend parity tests for UnaryOps
//!
//! rsqrt is the headline op here: it runs over the full shape ladder with
//! positive random inputs scaled to [0, 10), at 1e-3 tolerance.

use numlu::dtype::DType;
use numlu::ops::UnaryOps;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::backend_parity::dtype_helpers::{float_dtypes, tensor_from_f64, tensor_to_f64};
use crate::backend_parity::helpers::{assert_parity_f64, with_mlu_backend};
use crate::common::create_cpu_client;

#[test]
fn test_rsqrt_parity_shape_ladder() {
    let mut rng = StdRng::seed_from_u64(0x125);
    let shapes: [&[usize]; 4] = [&[2], &[2, 3], &[2, 3, 4], &[2, 3, 4, 5]];

    let (cpu_client, cpu_device) = create_cpu_client();

    for dtype in float_dtypes() {
        for shape in shapes {
            let numel: usize = shape.iter().product();
            let data: Vec<f64> = (0..numel).map(|_| rng.random::<f64>() * 10.0).collect();

            let cpu_in = tensor_from_f64(&data, shape, dtype, &cpu_device);
            let cpu_vals = tensor_to_f64(&cpu_client.rsqrt(&cpu_in).unwrap());

            let data = data.clone();
            with_mlu_backend(|mlu_client, mlu_device| {
                let mlu_in = tensor_from_f64(&data, shape, dtype, &mlu_device);
                let mlu_vals = tensor_to_f64(&mlu_client.rsqrt(&mlu_in).unwrap());

                assert_parity_f64(&mlu_vals, &cpu_vals, 1e-3, 1e-3, "rsqrt");
            });
        }
    }
}

#[test]
fn test_rsqrt_parity_edge_values() {
    let (cpu_client, cpu_device) = create_cpu_client();
    // rsqrt(0) = inf, rsqrt(negative) = NaN; both backends must agree
    let data = [0.0f64, -4.0, 1e-6, 1e6];

    let cpu_in = tensor_from_f64(&data, &[4], DType::F32, &cpu_device);
    let cpu_vals = tensor_to_f64(&cpu_client.rsqrt(&cpu_in).unwrap());
    assert!(cpu_vals[0].is_infinite());
    assert!(cpu_vals[1].is_nan());

    with_mlu_backend(|mlu_client, mlu_device| {
        let mlu_in = tensor_from_f64(&data, &[4], DType::F32, &mlu_device);
        let mlu_vals = tensor_to_f64(&mlu_client.rsqrt(&mlu_in).unwrap());

        assert!(mlu_vals[0].is_infinite());
        assert_parity_f64(&mlu_vals, &cpu_vals, 1e-4, 1e-4, "rsqrt edge");
    });
}

#[test]
fn test_unary_parity_neg_abs() {
    let mut rng = StdRng::seed_from_u64(0xab5);
    let (cpu_client, cpu_device) = create_cpu_client();

    for op in ["neg", "abs"] {
        // neg and abs also cover integer dtypes
        for dtype in [DType::F32, DType::I32, DType::I64] {
            let data: Vec<f64> = (0..24).map(|_| rng.random_range(-50..50) as f64).collect();

            let cpu_in = tensor_from_f64(&data, &[2, 3, 4], dtype, &cpu_device);
            let cpu_out = match op {
                "neg" => cpu_client.neg(&cpu_in).unwrap(),
                _ => cpu_client.abs(&cpu_in).unwrap(),
            };
            let cpu_vals = tensor_to_f64(&cpu_out);

            let data = data.clone();
            with_mlu_backend(|mlu_client, mlu_device| {
                let mlu_in = tensor_from_f64(&data, &[2, 3, 4], dtype, &mlu_device);
                let mlu_out = match op {
                    "neg" => mlu_client.neg(&mlu_in).unwrap(),
                    _ => mlu_client.abs(&mlu_in).unwrap(),
                };

                assert_eq!(tensor_to_f64(&mlu_out), cpu_vals, "{op} parity for {dtype}");
            });
        }
    }
}

#[test]
fn test_neg_abs_exact_at_large_i64() {
    let (cpu_client, cpu_device) = create_cpu_client();
    // Values past f64's 53-bit mantissa stay exact in native integer math
    let big = (1i64 << 53) + 1;
    let values = [big, -big, i64::MIN, i64::MAX];

    let cpu_in = numlu::tensor::Tensor::from_slice(&values, &[4], &cpu_device);
    let cpu_neg = cpu_client.neg(&cpu_in).unwrap().to_vec::<i64>();
    let cpu_abs = cpu_client.abs(&cpu_in).unwrap().to_vec::<i64>();
    assert_eq!(cpu_neg, vec![-big, big, i64::MIN, -i64::MAX]);
    assert_eq!(cpu_abs, vec![big, big, i64::MIN, i64::MAX]);

    with_mlu_backend(|mlu_client, mlu_device| {
        let mlu_in = numlu::tensor::Tensor::from_slice(&values, &[4], &mlu_device);
        assert_eq!(mlu_client.neg(&mlu_in).unwrap().to_vec::<i64>(), cpu_neg);
        assert_eq!(mlu_client.abs(&mlu_in).unwrap().to_vec::<i64>(), cpu_abs);
    });
}

#[test]
fn test_unary_parity_sqrt_recip() {
    let mut rng = StdRng::seed_from_u64(0x53c);
    let (cpu_client, cpu_device) = create_cpu_client();

    let data: Vec<f64> = (0..30).map(|_| rng.random::<f64>() * 9.0 + 0.5).collect();

    for dtype in float_dtypes() {
        let cpu_in = tensor_from_f64(&data, &[5, 6], dtype, &cpu_device);
        let cpu_sqrt = tensor_to_f64(&cpu_client.sqrt(&cpu_in).unwrap());
        let cpu_recip = tensor_to_f64(&cpu_client.recip(&cpu_in).unwrap());

        with_mlu_backend(|mlu_client, mlu_device| {
            let mlu_in = tensor_from_f64(&data, &[5, 6], dtype, &mlu_device);
            let mlu_sqrt = tensor_to_f64(&mlu_client.sqrt(&mlu_in).unwrap());
            let mlu_recip = tensor_to_f64(&mlu_client.recip(&mlu_in).unwrap());

            let (rtol, atol) = crate::backend_parity::dtype_helpers::dtype_tolerance(dtype);
            assert_parity_f64(&mlu_sqrt, &cpu_sqrt, rtol, atol, "sqrt");
            assert_parity_f64(&mlu_recip, &cpu_recip, rtol, atol, "recip");
        });
    }
}
