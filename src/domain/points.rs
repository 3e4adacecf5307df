use core::fmt;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Количество очков. Обёртка над i64, чтобы не путать с обычными числами.
/// В отличие от фишек, очки бывают отрицательными (проигрыш раунда).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Points(pub i64);

impl Points {
    pub const ZERO: Points = Points(0);

    pub fn new(amount: i64) -> Self {
        Points(amount)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Ограничить модуль значения сверху (лимит очков за раунд).
    pub fn clamp_abs(self, limit: u64) -> Points {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Points(self.0.clamp(-limit, limit))
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Self::Output {
        Points(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Points) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Points {
    type Output = Points;

    fn sub(self, rhs: Points) -> Self::Output {
        Points(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Points {
    fn sub_assign(&mut self, rhs: Points) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Points {
    type Output = Points;

    fn neg(self) -> Self::Output {
        Points(self.0.saturating_neg())
    }
}

impl Mul<i64> for Points {
    type Output = Points;

    fn mul(self, rhs: i64) -> Self::Output {
        Points(self.0.saturating_mul(rhs))
    }
}

impl std::iter::Sum for Points {
    fn sum<I: Iterator<Item = Points>>(iter: I) -> Self {
        iter.fold(Points::ZERO, |acc, p| acc + p)
    }
}
