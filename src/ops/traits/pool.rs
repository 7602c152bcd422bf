//! 2-D pooling operations

use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Parameters for a 2-D max pooling operation
///
/// Fields follow the usual framework conventions: per-axis (height, width)
/// pairs, stride defaulting to the kernel size, and `ceil_mode` switching
/// the output size formula from floor to ceil.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pool2dParams {
    /// Window size (height, width)
    pub kernel: (usize, usize),
    /// Step between windows; `None` means the kernel size
    pub stride: Option<(usize, usize)>,
    /// Implicit negative-infinity padding on each side (height, width)
    pub padding: (usize, usize),
    /// Spacing between window taps (height, width)
    pub dilation: (usize, usize),
    /// Use ceiling instead of floor when computing the output size
    pub ceil_mode: bool,
}

/// Resolved geometry for one max_pool2d launch.
///
/// All parameters made concrete against a specific NCHW input, so kernels
/// do no further arithmetic on the pooling configuration.
#[derive(Copy, Clone, Debug)]
pub struct Pool2dGeometry {
    /// Batch size
    pub n: usize,
    /// Channels
    pub c: usize,
    /// Input height
    pub h: usize,
    /// Input width
    pub w: usize,
    /// Output height
    pub out_h: usize,
    /// Output width
    pub out_w: usize,
    /// Kernel height
    pub kh: usize,
    /// Kernel width
    pub kw: usize,
    /// Stride along height
    pub sh: usize,
    /// Stride along width
    pub sw: usize,
    /// Padding along height
    pub ph: usize,
    /// Padding along width
    pub pw: usize,
    /// Dilation along height
    pub dh: usize,
    /// Dilation along width
    pub dw: usize,
}

impl Pool2dParams {
    /// Create parameters with the given kernel and defaults for the rest
    pub fn new(kernel: (usize, usize)) -> Self {
        Self {
            kernel,
            stride: None,
            padding: (0, 0),
            dilation: (1, 1),
            ceil_mode: false,
        }
    }

    /// Set the stride
    pub fn with_stride(mut self, stride: (usize, usize)) -> Self {
        self.stride = Some(stride);
        self
    }

    /// Set the padding
    pub fn with_padding(mut self, padding: (usize, usize)) -> Self {
        self.padding = padding;
        self
    }

    /// Set the dilation
    pub fn with_dilation(mut self, dilation: (usize, usize)) -> Self {
        self.dilation = dilation;
        self
    }

    /// Set ceil mode
    pub fn with_ceil_mode(mut self, ceil_mode: bool) -> Self {
        self.ceil_mode = ceil_mode;
        self
    }

    /// Effective stride (defaults to the kernel size)
    pub fn effective_stride(&self) -> (usize, usize) {
        self.stride.unwrap_or(self.kernel)
    }

    /// Validate the parameter combination
    pub fn validate(&self) -> Result<()> {
        let (kh, kw) = self.kernel;
        if kh == 0 || kw == 0 {
            return Err(Error::invalid_argument("kernel", "must be positive"));
        }

        let (sh, sw) = self.effective_stride();
        if sh == 0 || sw == 0 {
            return Err(Error::invalid_argument("stride", "must be positive"));
        }

        let (dh, dw) = self.dilation;
        if dh == 0 || dw == 0 {
            return Err(Error::invalid_argument("dilation", "must be positive"));
        }

        let (ph, pw) = self.padding;
        if ph > kh / 2 || pw > kw / 2 {
            return Err(Error::invalid_argument(
                "padding",
                format!(
                    "padding ({ph}, {pw}) should be at most half of kernel size ({kh}, {kw})"
                ),
            ));
        }

        Ok(())
    }

    /// Resolve geometry against a 4-D NCHW input shape
    pub fn geometry(&self, shape: &[usize]) -> Result<Pool2dGeometry> {
        self.validate()?;

        if shape.len() != 4 {
            return Err(Error::invalid_argument(
                "input",
                format!("expected 4-D NCHW tensor, got {}-D", shape.len()),
            ));
        }

        let (n, c, h, w) = (shape[0], shape[1], shape[2], shape[3]);
        // An empty batch is allowed; empty channel or spatial dims are not
        if c == 0 || h == 0 || w == 0 {
            return Err(Error::invalid_argument(
                "input",
                format!("non-batch dimensions must be non-zero, got [{n}, {c}, {h}, {w}]"),
            ));
        }
        let (kh, kw) = self.kernel;
        let (sh, sw) = self.effective_stride();
        let (ph, pw) = self.padding;
        let (dh, dw) = self.dilation;

        let out_h = pooled_dim(h, kh, sh, ph, dh, self.ceil_mode)?;
        let out_w = pooled_dim(w, kw, sw, pw, dw, self.ceil_mode)?;

        Ok(Pool2dGeometry {
            n,
            c,
            h,
            w,
            out_h,
            out_w,
            kh,
            kw,
            sh,
            sw,
            ph,
            pw,
            dh,
            dw,
        })
    }
}

/// Output extent along one axis.
///
/// `floor_or_ceil((input + 2*pad - dilation*(kernel-1) - 1) / stride) + 1`,
/// with the ceil-mode result clamped so the last window starts inside the
/// padded input (the PyTorch rule).
fn pooled_dim(
    input: usize,
    kernel: usize,
    stride: usize,
    pad: usize,
    dilation: usize,
    ceil_mode: bool,
) -> Result<usize> {
    let effective_kernel = dilation * (kernel - 1) + 1;
    let padded = input + 2 * pad;
    if padded < effective_kernel {
        return Err(Error::invalid_argument(
            "kernel",
            format!(
                "effective kernel size {effective_kernel} exceeds padded input size {padded}"
            ),
        ));
    }

    let span = padded - effective_kernel;
    let mut out = if ceil_mode {
        span.div_ceil(stride) + 1
    } else {
        span / stride + 1
    };

    if ceil_mode && (out - 1) * stride >= input + pad {
        out -= 1;
    }

    Ok(out)
}

/// 2-D max pooling over NCHW tensors
///
/// Float dtypes only; padded positions behave as negative infinity.
pub trait PoolOps<R: Runtime> {
    /// Max-pool `input` and return the pooled values
    fn max_pool2d(&self, input: &Tensor<R>, params: &Pool2dParams) -> Result<Tensor<R>>;

    /// Max-pool `input` and also return the argmax positions.
    ///
    /// The second tensor has dtype I64 and holds, for each output element,
    /// the flat `h * W + w` position of the maximum within its input plane.
    fn max_pool2d_with_indices(
        &self,
        input: &Tensor<R>,
        params: &Pool2dParams,
    ) -> Result<(Tensor<R>, Tensor<R>)>;
}
