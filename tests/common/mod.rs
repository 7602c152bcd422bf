//! Common test utilities
#![allow(dead_code)]

use numlu::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
#[cfg(feature = "mlu")]
use numlu::runtime::mlu::{MluClient, MluDevice, MluRuntime};
use numlu::runtime::Runtime;

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Create an MLU client and device, returning None if no MLU is available
#[cfg(feature = "mlu")]
pub fn create_mlu_client() -> Option<(MluClient, MluDevice)> {
    if !numlu::runtime::mlu::is_mlu_available() {
        return None;
    }
    let init = std::panic::catch_unwind(|| {
        let device = MluDevice::new(0);
        let client = MluRuntime::default_client(&device);
        (client, device)
    });
    init.ok()
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two f32 slices are close within tolerance
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}
