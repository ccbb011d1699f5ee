/// Implement a trait (and its `*Assign` sibling) from std::ops for every permutation of two types
/// as owned and as references.
#[macro_export]
macro_rules! impl_op {
  // Implement $Op for each pair in [($Lhs, $Rhs), ($Lhs, &$Rhs), (&$Lhs, $Rhs), (&$Lhs, &$Rhs)]
  (. $Op:ident, $op:ident -> $Result:ty;
    $lhs:ident: $Lhs:ty, $rhs:ident: $Rhs:ty;
    $act:expr) => {
      impl $Op<$Rhs> for $Lhs {
          type Output = $Result;
          #[inline]
          fn $op($lhs, $rhs: $Rhs) -> Self::Output {
              $act
          }
      }
      impl $Op<$Rhs> for &$Lhs {
          type Output = $Result;
          #[inline]
          fn $op($lhs, $rhs: $Rhs) -> Self::Output {
              $act
          }
      }
      impl $Op<&$Rhs> for $Lhs {
          type Output = $Result;
          #[inline]
          fn $op($lhs, $rhs: &$Rhs) -> Self::Output {
              $act
          }
      }
      impl $Op<&$Rhs> for &$Lhs {
          type Output = $Result;
          #[inline]
          fn $op($lhs, $rhs: &$Rhs) -> Self::Output {
              $act
          }
      }
  };
  // Implement $OpAssign for $Lhs over [$Rhs, &$Rhs]
  (= $Assign:ident, $assign:ident;
    $lhs:ident: $Lhs:ty, $rhs:ident: $Rhs:ty;
    $act:expr) => {
      impl $Assign<$Rhs> for $Lhs {
          #[inline]
          fn $assign(&mut $lhs, $rhs: $Rhs) {
              $act
          }
      }
      impl $Assign<&$Rhs> for $Lhs {
          #[inline]
          fn $assign(&mut $lhs, $rhs: &$Rhs) {
              $act
          }
      }
  };
  ($Op:ident, $op:ident -> $Result:ty, $Assign:ident, $assign:ident;
    $lhs:ident: $Lhs:ty, $rhs:ident: $Rhs:ty;
    $op_act:expr;
    $assign_act:expr
    ) => {
      $crate::impl_op!(. $Op, $op -> $Result; $lhs: $Lhs, $rhs: $Rhs; $op_act);
      $crate::impl_op!(= $Assign, $assign; $lhs: $Lhs, $rhs: $Rhs; $assign_act);
  };
  // As above, where the output type is $Lhs.
  ($Op:ident, $op:ident, $Assign:ident, $assign:ident;
    $lhs:ident: $Lhs:ty, $rhs:ident: $Rhs:ty;
    $op_act:expr;
    $assign_act:expr
    ) => {
      $crate::impl_op!{$Op, $op -> $Lhs, $Assign, $assign; $lhs: $Lhs, $rhs: $Rhs; $op_act; $assign_act}
  };
}

#[cfg(test)]
mod tests {
    use std::ops::{BitOr, BitOrAssign};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Mask(u8);

    impl_op! {BitOr, bitor, BitOrAssign, bitor_assign; self: Mask, rhs: Mask;
        Mask(self.0 | rhs.0);
        self.0 |= rhs.0}

    #[test]
    fn owned_and_borrowed() {
        let a = Mask(0b01);
        let b = Mask(0b10);
        assert_eq!(a | b, Mask(0b11));
        assert_eq!(&a | &b, Mask(0b11));
        let mut c = a;
        c |= &b;
        assert_eq!(c, Mask(0b11));
    }
}
