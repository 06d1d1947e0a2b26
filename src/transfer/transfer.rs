use serde::{Serialize, Deserialize};
use std::fmt;

/// Activation applied at every neuron of a network.
///
/// Stateless; a single value is shared by all neurons of a network. The
/// variant also determines the token written to the `transfer_function:`
/// line of the data format (`"sig"`, `"step"`, `"tanh"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferFunction {
    Sigmoid,
    /// Historical name; behaves as a ramp (max(0, x)), not a hard threshold.
    Step,
    HyperbolicTangent,
}

impl TransferFunction {
    /// Element-wise activation.
    pub fn calculate(&self, x: f64) -> f64 {
        match self {
            TransferFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            TransferFunction::Step => if x < 0.0 { 0.0 } else { x },
            TransferFunction::HyperbolicTangent => x.tanh(),
        }
    }

    /// Derivative of the activation, evaluated at the pre-activation sum.
    ///
    /// `Step` returns a constant 1.0 for every input, including negative
    /// ones. Saved weight files were trained against this slope, so it must
    /// stay as-is.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            TransferFunction::Sigmoid => {
                let expnegx = (-x).exp();
                expnegx / (1.0 + expnegx).powi(2)
            }
            TransferFunction::Step => 1.0,
            TransferFunction::HyperbolicTangent => {
                let t = x.tanh();
                1.0 - t * t
            }
        }
    }

    /// Canonical short name used in the serialized format.
    pub fn name(&self) -> &'static str {
        match self {
            TransferFunction::Sigmoid => "sig",
            TransferFunction::Step => "step",
            TransferFunction::HyperbolicTangent => "tanh",
        }
    }

    /// Inverse of [`name`](Self::name); `None` for unrecognized tokens.
    pub fn from_name(name: &str) -> Option<TransferFunction> {
        match name {
            "sig" => Some(TransferFunction::Sigmoid),
            "step" => Some(TransferFunction::Step),
            "tanh" => Some(TransferFunction::HyperbolicTangent),
            _ => None,
        }
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_values_and_derivative() {
        let sig = TransferFunction::Sigmoid;
        assert!((sig.calculate(0.0) - 0.5).abs() < 1e-12);
        assert!(sig.calculate(10.0) > 0.9999);
        assert!(sig.calculate(-10.0) < 0.0001);
        // derivative at 0 is 1/4
        assert!((sig.derivative(0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn step_is_a_ramp_with_constant_slope() {
        let step = TransferFunction::Step;
        assert_eq!(step.calculate(-3.0), 0.0);
        assert_eq!(step.calculate(0.0), 0.0);
        assert_eq!(step.calculate(2.5), 2.5);
        // The slope is 1.0 everywhere, even below zero.
        assert_eq!(step.derivative(-3.0), 1.0);
        assert_eq!(step.derivative(2.5), 1.0);
    }

    #[test]
    fn tanh_derivative_matches_identity() {
        let tanh = TransferFunction::HyperbolicTangent;
        for &x in &[-2.0, -0.5, 0.0, 0.7, 3.0] {
            let y = tanh.calculate(x);
            assert!((tanh.derivative(x) - (1.0 - y * y)).abs() < 1e-12);
        }
    }

    #[test]
    fn names_round_trip() {
        for tf in [
            TransferFunction::Sigmoid,
            TransferFunction::Step,
            TransferFunction::HyperbolicTangent,
        ] {
            assert_eq!(TransferFunction::from_name(tf.name()), Some(tf));
        }
        assert_eq!(TransferFunction::from_name("gaussian"), None);
    }
}
