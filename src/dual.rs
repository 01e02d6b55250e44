use std::ops::{Add, Div, Mul, Neg, Sub};

use ndarray::{Array1, ScalarOperand};
use num_traits::{One, Zero};

/// A forward-mode differentiable scalar: a value paired with the derivative
/// it carries with respect to a single seeded coordinate.
///
/// Arithmetic on `Dual` propagates derivatives exactly (product, quotient
/// and chain rules), so any function built from these operations can be
/// differentiated by [`gradient`] without truncation error.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dual {
    pub value: f64,
    pub derivative: f64,
}

impl Dual {
    pub fn new(value: f64, derivative: f64) -> Self {
        Dual { value, derivative }
    }

    /// Lifts a plain number into the differentiable domain; constants carry
    /// a zero derivative.
    pub fn constant(value: f64) -> Self {
        Dual {
            value,
            derivative: 0.0,
        }
    }

    pub fn sqrt(self) -> Self {
        let root = self.value.sqrt();
        Dual {
            value: root,
            derivative: self.derivative / (2.0 * root),
        }
    }
}

impl Add for Dual {
    type Output = Dual;

    fn add(self, rhs: Dual) -> Dual {
        Dual {
            value: self.value + rhs.value,
            derivative: self.derivative + rhs.derivative,
        }
    }
}

impl Sub for Dual {
    type Output = Dual;

    fn sub(self, rhs: Dual) -> Dual {
        Dual {
            value: self.value - rhs.value,
            derivative: self.derivative - rhs.derivative,
        }
    }
}

impl Mul for Dual {
    type Output = Dual;

    fn mul(self, rhs: Dual) -> Dual {
        Dual {
            value: self.value * rhs.value,
            derivative: self.derivative * rhs.value + self.value * rhs.derivative,
        }
    }
}

impl Div for Dual {
    type Output = Dual;

    fn div(self, rhs: Dual) -> Dual {
        Dual {
            value: self.value / rhs.value,
            derivative: (self.derivative * rhs.value - self.value * rhs.derivative)
                / (rhs.value * rhs.value),
        }
    }
}

impl Neg for Dual {
    type Output = Dual;

    fn neg(self) -> Dual {
        Dual {
            value: -self.value,
            derivative: -self.derivative,
        }
    }
}

impl Add<f64> for Dual {
    type Output = Dual;

    fn add(self, rhs: f64) -> Dual {
        Dual {
            value: self.value + rhs,
            derivative: self.derivative,
        }
    }
}

impl Sub<f64> for Dual {
    type Output = Dual;

    fn sub(self, rhs: f64) -> Dual {
        Dual {
            value: self.value - rhs,
            derivative: self.derivative,
        }
    }
}

impl Mul<f64> for Dual {
    type Output = Dual;

    fn mul(self, rhs: f64) -> Dual {
        Dual {
            value: self.value * rhs,
            derivative: self.derivative * rhs,
        }
    }
}

impl Div<f64> for Dual {
    type Output = Dual;

    fn div(self, rhs: f64) -> Dual {
        Dual {
            value: self.value / rhs,
            derivative: self.derivative / rhs,
        }
    }
}

// Zero and One make Dual a LinalgScalar, so ndarray's `dot` works on
// differentiable vectors and matrices; ScalarOperand enables broadcast
// arithmetic like `array + dual`.
impl Zero for Dual {
    fn zero() -> Self {
        Dual::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.value == 0.0 && self.derivative == 0.0
    }
}

impl One for Dual {
    fn one() -> Self {
        Dual::constant(1.0)
    }
}

impl ScalarOperand for Dual {}

/// Computes the exact gradient of `f` at `at`.
///
/// One forward pass per coordinate: the coordinate's derivative is seeded
/// to 1, everything else stays a constant, and the seeded derivative of
/// the result is that coordinate's partial.
pub fn gradient<F>(f: F, at: &Array1<f64>) -> Array1<f64>
where
    F: Fn(&Array1<Dual>) -> Dual,
{
    let mut point: Array1<Dual> = at.mapv(Dual::constant);
    let mut partials = Array1::zeros(at.len());

    for i in 0..at.len() {
        point[i].derivative = 1.0;
        partials[i] = f(&point).derivative;
        point[i].derivative = 0.0;
    }

    partials
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_product_and_quotient_rules() {
        let x = Dual::new(3.0, 1.0);
        let y = Dual::constant(2.0);

        // d(x * y)/dx = y
        assert_relative_eq!((x * y).derivative, 2.0);

        // d(x / y)/dx = 1 / y
        assert_relative_eq!((x / y).derivative, 0.5);

        // d(x * x)/dx = 2x
        assert_relative_eq!((x * x).derivative, 6.0);
    }

    #[test]
    fn test_sqrt_derivative() {
        let x = Dual::new(4.0, 1.0);
        let root = x.sqrt();

        assert_relative_eq!(root.value, 2.0);
        assert_relative_eq!(root.derivative, 0.25); // 1 / (2 * sqrt(4))
    }

    #[test]
    fn test_constants_carry_no_derivative() {
        let x = Dual::new(5.0, 1.0);
        let c = Dual::constant(7.0);

        assert_relative_eq!((x + c).derivative, 1.0);
        assert_relative_eq!((x * 3.0).derivative, 3.0);
        assert_relative_eq!((-x).derivative, -1.0);
    }

    #[test]
    fn test_gradient_of_known_function() {
        // f(x, y) = x^2 * y + y  =>  df/dx = 2xy, df/dy = x^2 + 1
        let f = |p: &Array1<Dual>| p[0] * p[0] * p[1] + p[1];
        let grad = gradient(f, &array![3.0, 2.0]);

        assert_relative_eq!(grad[0], 12.0);
        assert_relative_eq!(grad[1], 10.0);
    }

    #[test]
    fn test_dual_vectors_support_dot_products() {
        let a = array![Dual::new(1.0, 1.0), Dual::constant(2.0)];
        let b = array![Dual::constant(3.0), Dual::constant(4.0)];

        // d(a . b)/da[0] = b[0]
        let dotted = a.dot(&b);
        assert_relative_eq!(dotted.value, 11.0);
        assert_relative_eq!(dotted.derivative, 3.0);
    }
}
