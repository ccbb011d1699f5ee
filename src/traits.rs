use meshfold_common::item_with;

/// Trait for floating-point types, so that other things can be generic over {f32, f64} without
/// having to use [weird macros](meshfold_common::item_with).
///
/// This is only intended to be implemented on floating-point types.
pub trait Float:
    simba::scalar::RealField + nalgebra::SimdPartialOrd + Copy + Send + Sync + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;

    const INFINITY: Self;
    const NEG_INFINITY: Self;
}

// this macro lets us impl Float for both f32 and f64 without having to copy/paste,
// but it feels very goofy
item_with! {Real: f32, f64 => impl Float for Real {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;

    const INFINITY: Self = Self::INFINITY;
    const NEG_INFINITY: Self = Self::NEG_INFINITY;
}}
