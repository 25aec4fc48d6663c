//! Hashable keys for floating-point attributes.

/// Bit pattern used when an `f64` takes part in a distinct or join key.
///
/// Equal values map to equal keys: `-0.0` and `0.0` share a key, and every
/// NaN maps to the same key. No tolerance is applied.
pub fn float_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

pub fn optional_float_key(value: Option<f64>) -> Option<u64> {
    value.map(float_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_zeros_share_a_key() {
        assert_eq!(float_key(-0.0), float_key(0.0));
    }

    #[test]
    fn distinct_values_never_collide() {
        assert_ne!(float_key(210.5), float_key(210.50000000000003));
        assert_eq!(float_key(210.5), float_key(210.5));
    }

    #[test]
    fn nan_payloads_share_a_key() {
        let other_nan = f64::from_bits(f64::NAN.to_bits() | 1);
        assert!(other_nan.is_nan());
        assert_eq!(float_key(other_nan), float_key(f64::NAN));
    }
}
