/// Degree-2 polynomial `a*t^2 + b*t + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    pub fn degenerate(c: f64) -> Self {
        Self { a: 0.0, b: 0.0, c }
    }

    pub fn eval(&self, t: f64) -> f64 {
        (self.a * t + self.b) * t + self.c
    }
}

/// Least-squares quadratic through `(t, y)` samples via the normal
/// equations. Returns `None` when the system is singular (fewer than three
/// distinct abscissae).
///
/// The sums run up to `t^4`, so callers must keep abscissae near zero;
/// epoch-scale timestamps have to be shifted to a local origin first or the
/// system degrades to singular.
pub fn quad_fit(samples: &[(f64, f64)]) -> Option<Quadratic> {
    if samples.len() < 3 {
        return None;
    }
    let mut s = [0.0f64; 5]; // sums of t^0 .. t^4
    let mut m = [0.0f64; 3]; // sums of y, t*y, t^2*y
    for &(t, y) in samples {
        let t2 = t * t;
        s[0] += 1.0;
        s[1] += t;
        s[2] += t2;
        s[3] += t2 * t;
        s[4] += t2 * t2;
        m[0] += y;
        m[1] += t * y;
        m[2] += t2 * y;
    }
    // Rows ordered so the solution comes out as (a, b, c).
    let mut mat = [
        [s[4], s[3], s[2], m[2]],
        [s[3], s[2], s[1], m[1]],
        [s[2], s[1], s[0], m[0]],
    ];
    let solution = solve3(&mut mat)?;
    Some(Quadratic {
        a: solution[0],
        b: solution[1],
        c: solution[2],
    })
}

/// Gaussian elimination with partial pivoting on a 3x4 augmented matrix.
fn solve3(mat: &mut [[f64; 4]; 3]) -> Option<[f64; 3]> {
    for col in 0..3 {
        let pivot_row = (col..3)
            .max_by(|&a, &b| {
                mat[a][col]
                    .abs()
                    .partial_cmp(&mat[b][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if mat[pivot_row][col].abs() < 1e-12 {
            return None;
        }
        mat.swap(col, pivot_row);
        for row in 0..3 {
            if row == col {
                continue;
            }
            let factor = mat[row][col] / mat[col][col];
            for k in col..4 {
                mat[row][k] -= factor * mat[col][k];
            }
        }
    }
    Some([mat[0][3] / mat[0][0], mat[1][3] / mat[1][1], mat[2][3] / mat[2][2]])
}
