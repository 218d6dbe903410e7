//! Age derivation.
//!
//! Source birth dates are shifted for de-identification, so a computed age can
//! be far outside any plausible range. Ages are clamped into the enrollable
//! range instead of being rejected.

pub const AGE_MIN: i32 = 18;
pub const AGE_MAX: i32 = 90;

pub fn clamp_age(raw: i64) -> i32 {
    raw.clamp(i64::from(AGE_MIN), i64::from(AGE_MAX)) as i32
}

/// `|reference_year - birth_year|`, clamped.
pub fn derive_age(reference_year: i32, birth_year: i32) -> i32 {
    clamp_age((i64::from(reference_year) - i64::from(birth_year)).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn shifted_birth_years_are_clamped() {
        assert_eq!(derive_age(2023, 1700), AGE_MAX);
        assert_eq!(derive_age(2023, 2020), AGE_MIN);
        assert_eq!(derive_age(2023, 1960), 63);
    }

    #[test]
    fn future_birth_years_use_absolute_difference() {
        assert_eq!(derive_age(2023, 2075), 52);
    }

    proptest! {
        #[test]
        fn clamped_age_is_always_enrollable(raw in any::<i64>()) {
            let age = clamp_age(raw);
            prop_assert!((AGE_MIN..=AGE_MAX).contains(&age));
        }

        #[test]
        fn derived_age_is_always_enrollable(reference in 1900i32..2100, birth in -5000i32..5000) {
            let age = derive_age(reference, birth);
            prop_assert!((AGE_MIN..=AGE_MAX).contains(&age));
        }
    }
}
