// ============================================================================
// KERNEL — square convolution weight grids and their synthesis
// ============================================================================

use std::f64::consts::PI;

/// How close (in cells) a kernel cell must sit to the motion-blur line to be
/// included. Fixed regardless of radius; large radii can produce visibly
/// broken lines, which matches the shipped behavior.
const LINE_EPSILON: f64 = 0.75;

/// A square, odd-edge-length grid of `f64` weights. `(0, 0)` is the top-left
/// cell and the center sits at `(radius, radius)`.
///
/// Weights are signed: the sharpen and edge-detect kernels carry negative and
/// super-unity cells, so normalization is invoked selectively by the
/// constructors rather than universally.
#[derive(Clone, Debug)]
pub struct Kernel {
    radius: u32,
    edge: u32,
    data: Vec<f64>,
}

impl Kernel {
    /// A kernel of the given radius with every cell set to 1.0.
    pub fn new(radius: u32) -> Self {
        let edge = 2 * radius + 1;
        Kernel {
            radius,
            edge,
            data: vec![1.0; (edge * edge) as usize],
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn edge_length(&self) -> u32 {
        self.edge
    }

    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.data[(y * self.edge + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        self.data[(y * self.edge + x) as usize] = value;
    }

    /// Multiply every cell by `scale`.
    pub fn scale(&mut self, scale: f64) {
        for cell in &mut self.data {
            *cell *= scale;
        }
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Divide every cell by the kernel sum so the weights total 1.0.
    ///
    /// A no-op when the sum is ≤ 0 — a degenerate all-negative or all-zero
    /// kernel (e.g. a motion-blur angle whose line missed every cell) must not
    /// turn into a division by zero or a grid of NaNs.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum <= 0.0 {
            return;
        }
        for cell in &mut self.data {
            *cell /= sum;
        }
    }

    // ------------------------------------------------------------------
    //  Synthesis constructors — pure functions of the filter parameters
    // ------------------------------------------------------------------

    /// Gaussian falloff by distance from center, σ = radius, normalized.
    /// Radius 0 is the 1×1 identity kernel.
    pub fn gaussian_blur(radius: u32) -> Kernel {
        let mut kernel = Kernel::new(radius);
        if radius == 0 {
            return kernel;
        }
        let sigma = radius as f64;
        let center = radius as f64;
        for y in 0..kernel.edge {
            for x in 0..kernel.edge {
                let dx = x as f64 - center;
                let dy = y as f64 - center;
                let distance = (dx * dx + dy * dy).sqrt();
                kernel.set(x, y, gaussian(distance, sigma));
            }
        }
        kernel.normalize();
        kernel
    }

    /// A line of 1.0 cells through the center at `angle` (radians),
    /// everything else 0.0, normalized.
    ///
    /// The inclusion test branches on the angle: near the vertical the tangent
    /// blows up, so the line is solved for x instead of y there.
    pub fn motion_blur(radius: u32, angle: f64) -> Kernel {
        let mut kernel = Kernel::new(radius);
        let center = radius as f64;
        for y in 0..kernel.edge {
            for x in 0..kernel.edge {
                let u = x as f64 - center;
                let v = y as f64 - center;
                let on_line = if angle < 0.25 * PI || angle > 0.75 * PI {
                    (v - u * angle.tan()).abs() < LINE_EPSILON
                } else {
                    (u - v / angle.tan()).abs() < LINE_EPSILON
                };
                kernel.set(x, y, if on_line { 1.0 } else { 0.0 });
            }
        }
        kernel.normalize();
        kernel
    }

    /// The classic unsharp-mask kernel: the Gaussian kernel negated with 2.0
    /// added at the center ("original minus blurred, doubled at center").
    /// Deliberately not renormalized — the weights sum past 1.
    pub fn sharpen(radius: u32) -> Kernel {
        let mut kernel = Kernel::gaussian_blur(radius);
        kernel.scale(-1.0);
        let center = kernel.get(radius, radius);
        kernel.set(radius, radius, center + 2.0);
        kernel
    }

    /// Fixed 3×3 Laplacian-style kernel: -1 everywhere, 8 at the center.
    /// Not normalized (the sum is zero by construction).
    pub fn edge_detect() -> Kernel {
        let mut kernel = Kernel::new(1);
        kernel.scale(-1.0);
        let edge = kernel.edge as f64;
        kernel.set(1, 1, edge * edge - 1.0);
        kernel
    }
}

fn gaussian(x: f64, sigma: f64) -> f64 {
    (-(x * x) / (2.0 * sigma * sigma)).exp()
}
