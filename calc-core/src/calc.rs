//! Operand pair and the input state machine that builds it from key presses.

use crate::error::ArithmeticFault;
use crate::glyph::Glyph;
use crate::keypad::Key;

/// Pending operation between the two operands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    #[default]
    None,
    Add,
    Subtract,
    Multiply,
    Divide,
    /// The last key evaluated the pair; `left` holds the answer.
    Equals,
}

impl Operation {
    /// Symbol shown between the operands, for the four arithmetic operations.
    pub fn glyph(self) -> Option<Glyph> {
        let c = match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
            Operation::None | Operation::Equals => return None,
        };
        Glyph::from_char(c)
    }

    pub fn is_arithmetic(self) -> bool {
        self.glyph().is_some()
    }
}

/// Apply `op` to the operands.
pub fn apply(lhs: f64, op: Operation, rhs: f64) -> Result<f64, ArithmeticFault> {
    match op {
        Operation::Add => Ok(lhs + rhs),
        Operation::Subtract => Ok(lhs - rhs),
        Operation::Multiply => Ok(lhs * rhs),
        Operation::Divide if rhs == 0.0 => Err(ArithmeticFault::DivideByZero),
        Operation::Divide => Ok(lhs / rhs),
        Operation::None | Operation::Equals => Err(ArithmeticFault::UnknownOperator),
    }
}

/// Operand receiving digit keys.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Focus {
    #[default]
    Left,
    Right,
}

const INITIAL_FRACTION_SCALE: u64 = 10;

/// Progress of digit entry after a decimal point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FractionEntry {
    pub active: bool,
    /// Divisor for the next fractional digit. `None` once it no longer fits,
    /// at which point the digits are below what an `f64` resolves anyway.
    pub scale: Option<u64>,
}

impl Default for FractionEntry {
    fn default() -> Self {
        Self {
            active: false,
            scale: Some(INITIAL_FRACTION_SCALE),
        }
    }
}

/// What a key press did to the state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Updated,
    Evaluated,
    Cleared,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalculatorState {
    pub left: f64,
    pub right: f64,
    pub operation: Operation,
    pub focus: Focus,
    pub fraction: FractionEntry,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> f64 {
        match self.focus {
            Focus::Left => self.left,
            Focus::Right => self.right,
        }
    }

    pub fn focused_mut(&mut self) -> &mut f64 {
        match self.focus {
            Focus::Left => &mut self.left,
            Focus::Right => &mut self.right,
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.fraction = FractionEntry::default();
    }

    /// Handle one key. A fault leaves the state as it was before the key.
    pub fn press(&mut self, key: Key) -> Result<Outcome, ArithmeticFault> {
        match key {
            Key::Digit(d) => {
                self.digit(d);
                Ok(Outcome::Updated)
            }
            Key::Operator(op) => self.set_operator(op),
            Key::DecimalPoint => {
                self.decimal_point();
                Ok(Outcome::Updated)
            }
            Key::Equals => self.equals(),
        }
    }

    /// Fold a digit into the focused operand.
    pub fn digit(&mut self, d: u8) {
        if d > 9 {
            return;
        }
        let d = f64::from(d);

        if !self.fraction.active {
            let operand = self.focused_mut();
            *operand = *operand * 10.0 + d;
            return;
        }

        if let Some(scale) = self.fraction.scale {
            *self.focused_mut() += d / scale as f64;
            self.fraction.scale = scale.checked_mul(10);
        }
    }

    /// Record a new operator, first evaluating a pending one if the right
    /// operand is being entered.
    pub fn set_operator(&mut self, op: Operation) -> Result<Outcome, ArithmeticFault> {
        if !op.is_arithmetic() {
            return Err(ArithmeticFault::UnknownOperator);
        }

        let mut outcome = Outcome::Updated;
        if self.operation != Operation::None && self.focus == Focus::Right {
            self.left = apply(self.left, self.operation, self.right)?;
            self.right = 0.0;
            outcome = Outcome::Evaluated;
        }

        self.operation = op;
        self.set_focus(Focus::Right);
        Ok(outcome)
    }

    /// Further digits go after the decimal point.
    pub fn decimal_point(&mut self) {
        self.fraction.active = true;
    }

    /// Evaluate the pair, or clear it when there is nothing to evaluate.
    pub fn equals(&mut self) -> Result<Outcome, ArithmeticFault> {
        let outcome = match self.focus {
            Focus::Right => {
                self.left = apply(self.left, self.operation, self.right)?;
                self.right = 0.0;
                self.operation = Operation::Equals;
                Outcome::Evaluated
            }
            Focus::Left => {
                self.left = 0.0;
                self.right = 0.0;
                self.operation = Operation::None;
                Outcome::Cleared
            }
        };

        self.set_focus(Focus::Left);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_matches_native_arithmetic() {
        let pairs = [
            (4.0, 5.0),
            (292.0, 123.0),
            (-233.0, 343.0),
            (9898.5, -9897.5),
            (-9898.75, -9898.5),
        ];
        for (a, b) in pairs {
            assert_eq!(apply(a, Operation::Add, b), Ok(a + b));
            assert_eq!(apply(a, Operation::Subtract, b), Ok(a - b));
            assert_eq!(apply(a, Operation::Multiply, b), Ok(a * b));
            assert_eq!(apply(a, Operation::Divide, b), Ok(a / b));
        }
    }

    #[test]
    fn divide_by_zero_is_a_fault() {
        assert_eq!(apply(1.0, Operation::Divide, 0.0), Err(ArithmeticFault::DivideByZero));
        assert_eq!(apply(0.0, Operation::Divide, -0.0), Err(ArithmeticFault::DivideByZero));
    }

    #[test]
    fn non_arithmetic_operations_are_unknown() {
        assert_eq!(apply(1.0, Operation::None, 2.0), Err(ArithmeticFault::UnknownOperator));
        assert_eq!(apply(1.0, Operation::Equals, 2.0), Err(ArithmeticFault::UnknownOperator));
    }

    #[test]
    fn digits_accumulate_in_the_focused_operand() {
        let mut state = CalculatorState::new();
        state.digit(1);
        state.digit(2);
        state.digit(3);
        assert_eq!(state.left, 123.0);
        assert_eq!(state.right, 0.0);

        state.focus = Focus::Right;
        state.digit(4);
        assert_eq!(state.left, 123.0);
        assert_eq!(state.right, 4.0);
    }

    #[test]
    fn out_of_range_digit_is_ignored() {
        let mut state = CalculatorState::new();
        state.digit(10);
        assert_eq!(state, CalculatorState::new());
    }

    #[test]
    fn fraction_scale_grows_per_digit() {
        let mut state = CalculatorState::new();
        state.decimal_point();
        assert_eq!(state.fraction.scale, Some(10));
        state.digit(5);
        assert_eq!(state.fraction.scale, Some(100));
        assert_eq!(state.left, 0.5);
    }

    #[test]
    fn fraction_digits_stop_when_scale_overflows() {
        let mut state = CalculatorState::new();
        state.decimal_point();
        for _ in 0..25 {
            state.digit(1);
        }
        assert_eq!(state.fraction.scale, None);
        assert!((state.left - 0.111_111_111_111_111_1).abs() < 1e-15);
    }

    #[test]
    fn operator_moves_focus_and_resets_fraction() {
        let mut state = CalculatorState::new();
        state.digit(2);
        state.decimal_point();
        state.digit(5);
        assert_eq!(state.set_operator(Operation::Multiply), Ok(Outcome::Updated));
        assert_eq!(state.focus, Focus::Right);
        assert_eq!(state.operation, Operation::Multiply);
        assert_eq!(state.fraction, FractionEntry::default());
        assert_eq!(state.left, 2.5);
    }

    #[test]
    fn operator_after_equals_continues_from_the_answer() {
        let mut state = CalculatorState::new();
        state.digit(6);
        state.set_operator(Operation::Add).unwrap();
        state.digit(1);
        state.equals().unwrap();
        assert_eq!(state.operation, Operation::Equals);

        // Focus is back on the left, so nothing is evaluated here.
        assert_eq!(state.set_operator(Operation::Subtract), Ok(Outcome::Updated));
        state.digit(2);
        assert_eq!(state.equals(), Ok(Outcome::Evaluated));
        assert_eq!(state.left, 5.0);
    }

    #[test]
    fn replacing_operator_before_right_digits_evaluates_with_zero() {
        let mut state = CalculatorState::new();
        state.digit(3);
        state.set_operator(Operation::Add).unwrap();
        assert_eq!(state.set_operator(Operation::Multiply), Ok(Outcome::Evaluated));
        assert_eq!(state.left, 3.0);
        assert_eq!(state.operation, Operation::Multiply);
    }

    #[test]
    fn non_arithmetic_operator_is_rejected() {
        let mut state = CalculatorState::new();
        state.digit(3);
        let before = state;
        assert_eq!(state.set_operator(Operation::Equals), Err(ArithmeticFault::UnknownOperator));
        assert_eq!(state.set_operator(Operation::None), Err(ArithmeticFault::UnknownOperator));
        assert_eq!(state, before);
    }

    #[test]
    fn focused_accessors_follow_focus() {
        let mut state = CalculatorState::new();
        *state.focused_mut() = 8.0;
        assert_eq!(state.focused(), 8.0);
        state.focus = Focus::Right;
        assert_eq!(state.focused(), 0.0);
    }
}
