// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Contains the dense matrix operators for matching and routing purposes

/// Matrix operators exposed to host callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixOperator {
    /// Matrix product (`lhs * rhs`)
    ///
    /// Requires `lhs.cols == rhs.rows`.
    Multiply,
    /// Left division (`lhs \ rhs`), the solution `X` of `lhs·X = rhs`
    ///
    /// Square `lhs` is solved exactly with equilibration; any other shape
    /// gives the minimum-norm least-squares solution.
    LeftDivide,
    /// Right division (`lhs / rhs`), the solution `X` of `X·rhs = lhs`
    RightDivide,
    /// Transpose (`operand.'`)
    Transpose,
    /// Conjugate transpose (`operand'`)
    ///
    /// Identical to `Transpose` for real operands.
    Hermitian,
}

impl MatrixOperator {
    /// Number of matrix arguments the operator takes.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            MatrixOperator::Multiply | MatrixOperator::LeftDivide | MatrixOperator::RightDivide => 2,
            MatrixOperator::Transpose | MatrixOperator::Hermitian => 1,
        }
    }

    /// Name used in diagnostics and error messages.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            MatrixOperator::Multiply => "multiply",
            MatrixOperator::LeftDivide => "left_divide",
            MatrixOperator::RightDivide => "right_divide",
            MatrixOperator::Transpose => "transpose",
            MatrixOperator::Hermitian => "hermitian",
        }
    }
}
