//! Shared helpers for backend parity tests: assertion utilities, backend
//! lock, client creation.

use crate::common::create_mlu_client;
use numlu::runtime::mlu::{MluClient, MluDevice};
use std::sync::{Mutex, OnceLock};

static MLU_BACKEND_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Run `f` with an MLU client, serialized against other MLU tests.
///
/// Device-model state is global per process, so parity tests take a lock
/// rather than racing on the buffer registry.
pub fn with_mlu_backend<F>(mut f: F)
where
    F: FnMut(MluClient, MluDevice),
{
    let _guard = MLU_BACKEND_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let (client, device) =
        create_mlu_client().expect("MLU feature is enabled but no MLU runtime is available");
    f(client, device);
}

/// Assert element-wise closeness between a backend result and the CPU
/// reference, both read back as f64.
///
/// Uses `|a - b| <= atol + rtol * |b|` with the CPU value as `b`.
pub fn assert_parity_f64(mlu: &[f64], cpu: &[f64], rtol: f64, atol: f64, op: &str) {
    assert_eq!(
        mlu.len(),
        cpu.len(),
        "parity[{}]: length mismatch: {} vs {}",
        op,
        mlu.len(),
        cpu.len()
    );

    for (i, (x, y)) in mlu.iter().zip(cpu.iter()).enumerate() {
        // Exact matches include equal infinities; NaN agreement also passes
        if x == y || (x.is_nan() && y.is_nan()) {
            continue;
        }
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();

        if diff > tol {
            panic!(
                "parity[{}] at index {}: mlu={} cpu={} (diff={}, tol={})",
                op, i, x, y, diff, tol
            );
        }
    }
}

/// Assert exact equality, used for integer results and argmax indices.
pub fn assert_parity_i64(mlu: &[i64], cpu: &[i64], op: &str) {
    assert_eq!(
        mlu.len(),
        cpu.len(),
        "parity[{}]: length mismatch: {} vs {}",
        op,
        mlu.len(),
        cpu.len()
    );

    for (i, (x, y)) in mlu.iter().zip(cpu.iter()).enumerate() {
        assert_eq!(x, y, "parity[{}] at index {}: mlu={} cpu={}", op, i, x, y);
    }
}
