//! Backend parity tests for IndexingOps
//!
//! index_select runs over randomized 4-D shapes, dims, and index vectors
//! from a seeded generator, with both index dtypes.

use numlu::dtype::DType;
use numlu::error::Error;
use numlu::ops::IndexingOps;
use numlu::tensor::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::backend_parity::dtype_helpers::{tensor_from_f64, tensor_to_f64};
use crate::backend_parity::helpers::with_mlu_backend;
use crate::common::create_cpu_client;

#[test]
fn test_index_select_parity_randomized() {
    let mut rng = StdRng::seed_from_u64(0x1d5);
    let (cpu_client, cpu_device) = create_cpu_client();

    for _ in 0..10 {
        let shape: Vec<usize> = (0..4).map(|_| rng.random_range(1..10)).collect();
        let dim = rng.random_range(0..4usize);
        let index_len = rng.random_range(1..10usize);

        let numel: usize = shape.iter().product();
        let data: Vec<f64> = (0..numel).map(|_| rng.random_range(-100.0..100.0)).collect();
        let indices: Vec<i64> = (0..index_len)
            .map(|_| rng.random_range(0..shape[dim] as i64))
            .collect();

        let cpu_in = tensor_from_f64(&data, &shape, DType::F32, &cpu_device);
        let cpu_index = Tensor::from_slice(&indices, &[index_len], &cpu_device);
        let cpu_out = cpu_client
            .index_select(&cpu_in, dim as isize, &cpu_index)
            .unwrap();
        let cpu_vals = tensor_to_f64(&cpu_out);

        let mut expected_shape = shape.clone();
        expected_shape[dim] = index_len;
        assert_eq!(cpu_out.shape(), expected_shape.as_slice());

        let (shape, data, indices) = (shape.clone(), data.clone(), indices.clone());
        let cpu_vals = cpu_vals.clone();
        with_mlu_backend(move |mlu_client, mlu_device| {
            let mlu_in = tensor_from_f64(&data, &shape, DType::F32, &mlu_device);
            let mlu_index = Tensor::from_slice(&indices, &[indices.len()], &mlu_device);
            let mlu_out = mlu_client
                .index_select(&mlu_in, dim as isize, &mlu_index)
                .unwrap();

            // A gather moves values untouched, so parity is exact
            assert_eq!(tensor_to_f64(&mlu_out), cpu_vals);
        });
    }
}

#[test]
fn test_index_select_parity_i32_index_and_negative_dim() {
    let (cpu_client, cpu_device) = create_cpu_client();
    let data: Vec<f64> = (0..24).map(|i| i as f64).collect();

    let cpu_in = tensor_from_f64(&data, &[2, 3, 4], DType::F32, &cpu_device);
    let cpu_index = Tensor::from_slice(&[3i32, 0, 3], &[3], &cpu_device);
    let cpu_vals = tensor_to_f64(&cpu_client.index_select(&cpu_in, -1, &cpu_index).unwrap());

    with_mlu_backend(|mlu_client, mlu_device| {
        let mlu_in = tensor_from_f64(&data, &[2, 3, 4], DType::F32, &mlu_device);
        let mlu_index = Tensor::from_slice(&[3i32, 0, 3], &[3], &mlu_device);
        let mlu_out = mlu_client.index_select(&mlu_in, -1, &mlu_index).unwrap();

        assert_eq!(mlu_out.shape(), &[2, 3, 3]);
        assert_eq!(tensor_to_f64(&mlu_out), cpu_vals);
    });
}

#[test]
fn test_index_select_parity_int_payload() {
    let (cpu_client, cpu_device) = create_cpu_client();
    let data: Vec<f64> = (0..12).map(|i| (i * 7 % 13) as f64).collect();

    for dtype in [DType::I32, DType::I64] {
        let cpu_in = tensor_from_f64(&data, &[4, 3], dtype, &cpu_device);
        let cpu_index = Tensor::from_slice(&[2i64, 2, 0], &[3], &cpu_device);
        let cpu_vals = tensor_to_f64(&cpu_client.index_select(&cpu_in, 0, &cpu_index).unwrap());

        with_mlu_backend(|mlu_client, mlu_device| {
            let mlu_in = tensor_from_f64(&data, &[4, 3], dtype, &mlu_device);
            let mlu_index = Tensor::from_slice(&[2i64, 2, 0], &[3], &mlu_device);
            let mlu_out = mlu_client.index_select(&mlu_in, 0, &mlu_index).unwrap();

            assert_eq!(tensor_to_f64(&mlu_out), cpu_vals, "int payload for {dtype}");
        });
    }
}

#[test]
fn test_index_select_out_of_bounds_agrees() {
    let (cpu_client, cpu_device) = create_cpu_client();
    let data = [1.0f64, 2.0, 3.0];

    let cpu_in = tensor_from_f64(&data, &[3], DType::F32, &cpu_device);
    let cpu_index = Tensor::from_slice(&[5i64], &[1], &cpu_device);
    assert!(matches!(
        cpu_client.index_select(&cpu_in, 0, &cpu_index),
        Err(Error::IndexOutOfBounds { index: 5, size: 3 })
    ));

    with_mlu_backend(|mlu_client, mlu_device| {
        let mlu_in = tensor_from_f64(&data, &[3], DType::F32, &mlu_device);
        let mlu_index = Tensor::from_slice(&[5i64], &[1], &mlu_device);
        assert!(matches!(
            mlu_client.index_select(&mlu_in, 0, &mlu_index),
            Err(Error::IndexOutOfBounds { index: 5, size: 3 })
        ));
    });
}
