// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Diagnostics** - *Non-fatal numerical warnings*
//!
//! The solve dispatcher reports singular and rank deficient systems here instead of
//! failing. A warning is delivered synchronously to the caller's [`WarningSink`]
//! before the solve returns, at most once per call, and is mirrored to the `log`
//! facade under [`LOG_TARGET`].

use core::fmt;

use crate::config::LOG_TARGET;

/// Receiver of human-readable numerical-condition messages.
pub trait WarningSink {
    fn warn(&mut self, message: &str);
}

impl<F: FnMut(&str)> WarningSink for F {
    #[inline]
    fn warn(&mut self, message: &str) {
        self(message)
    }
}

/// Collects every message, in delivery order.
impl WarningSink for Vec<String> {
    #[inline]
    fn warn(&mut self, message: &str) {
        self.push(message.to_owned());
    }
}

/// Numerical degeneracy detected while solving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericalWarning<R> {
    /// Exactly singular pivot, or reciprocal condition below machine epsilon.
    Singular { rcond: R },
    /// Effective rank below `min(m, n)`.
    RankDeficient { rank: i32 },
}

impl<R: fmt::LowerExp> fmt::Display for NumericalWarning<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericalWarning::Singular { rcond } => {
                write!(f, "Matrix is singular to working precision.  RCOND = {:e}", rcond)
            }
            NumericalWarning::RankDeficient { rank } => {
                write!(f, "Matrix is rank deficient to machine precision.  RANK = {}", rank)
            }
        }
    }
}

/// Logs `warning` and hands its message to `sink`.
pub fn emit<R, W>(sink: &mut W, warning: NumericalWarning<R>)
where
    R: fmt::LowerExp,
    W: WarningSink + ?Sized,
{
    let message = warning.to_string();
    log::warn!(target: LOG_TARGET, "{}", message);
    sink.warn(&message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_exact() {
        let w = NumericalWarning::Singular { rcond: 1.5e-18_f64 };
        assert_eq!(
            w.to_string(),
            "Matrix is singular to working precision.  RCOND = 1.5e-18"
        );
        let w = NumericalWarning::<f64>::RankDeficient { rank: 1 };
        assert_eq!(
            w.to_string(),
            "Matrix is rank deficient to machine precision.  RANK = 1"
        );
    }

    #[test]
    fn closure_sink_receives_message() {
        let mut seen = Vec::new();
        let mut sink = |m: &str| seen.push(m.len());
        emit(&mut sink, NumericalWarning::<f32>::RankDeficient { rank: 0 });
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn collector_sink_keeps_order() {
        let mut sink: Vec<String> = Vec::new();
        emit(&mut sink, NumericalWarning::Singular { rcond: 0.0_f64 });
        emit(&mut sink, NumericalWarning::<f64>::RankDeficient { rank: 2 });
        assert_eq!(sink.len(), 2);
        assert!(sink[0].contains("singular"));
        assert!(sink[1].contains("rank deficient"));
    }
}
