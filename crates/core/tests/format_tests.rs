// ═══════════════════════════════════════════════════════════════════
// Format Tests — es-ES currency, percentage and number rendering
// ═══════════════════════════════════════════════════════════════════

use coin_dashboard_core::format::{
    format_currency, format_currency_compact, format_currency_plain, format_decimal,
    format_number, format_percentage, round_to, NOT_AVAILABLE,
};

// ── Currency ────────────────────────────────────────────────────────

mod currency {
    use super::*;

    #[test]
    fn large_values_group_thousands() {
        assert_eq!(format_currency(52387.12), "52.387,12\u{a0}€");
        assert_eq!(format_currency(1234567.5), "1.234.567,50\u{a0}€");
    }

    #[test]
    fn four_digit_values_are_not_grouped() {
        assert_eq!(format_currency(2875.34), "2875,34\u{a0}€");
    }

    #[test]
    fn sub_unit_values_get_more_decimals() {
        assert_eq!(format_currency(0.45), "0,4500\u{a0}€");
        assert_eq!(format_currency(0.01925275), "0,019253\u{a0}€");
    }

    #[test]
    fn negative_values() {
        assert_eq!(format_currency(-1500.0), "-1500,00\u{a0}€");
        assert_eq!(format_currency(-20000.0), "-20.000,00\u{a0}€");
    }

    #[test]
    fn zero() {
        assert_eq!(format_currency(0.0), "0,0000\u{a0}€");
    }

    #[test]
    fn plain_has_no_symbol() {
        assert_eq!(format_currency_plain(145.23), "145,23");
    }

    #[test]
    fn non_finite_is_not_available() {
        assert_eq!(format_currency(f64::NAN), NOT_AVAILABLE);
        assert_eq!(format_currency(f64::INFINITY), NOT_AVAILABLE);
    }
}

// ── Compact currency ────────────────────────────────────────────────

mod compact {
    use super::*;

    #[test]
    fn units() {
        assert_eq!(format_currency_compact(1_028_762_329_827.0), "1,03\u{a0}B\u{a0}€");
        assert_eq!(format_currency_compact(15_762_329_827.0), "15,76\u{a0}mil M\u{a0}€");
        assert_eq!(format_currency_compact(762_329_827.0), "762,33\u{a0}M\u{a0}€");
        assert_eq!(format_currency_compact(1500.0), "1,5\u{a0}mil\u{a0}€");
    }

    #[test]
    fn small_values_have_no_unit() {
        assert_eq!(format_currency_compact(999.0), "999\u{a0}€");
    }

    #[test]
    fn negative_uses_magnitude_for_unit() {
        assert_eq!(format_currency_compact(-462_329_827.0), "-462,33\u{a0}M\u{a0}€");
    }
}

// ── Percentage ──────────────────────────────────────────────────────

mod percentage {
    use super::*;

    #[test]
    fn always_signed() {
        assert_eq!(format_percentage(1.72), "+1,72\u{a0}%");
        assert_eq!(format_percentage(-4.33), "-4,33\u{a0}%");
        assert_eq!(format_percentage(0.0), "+0,00\u{a0}%");
    }

    #[test]
    fn tiny_negative_rounds_to_positive_zero() {
        assert_eq!(format_percentage(-0.001), "+0,00\u{a0}%");
    }

    #[test]
    fn not_available() {
        assert_eq!(format_percentage(f64::NAN), NOT_AVAILABLE);
    }
}

// ── Numbers ─────────────────────────────────────────────────────────

mod numbers {
    use super::*;

    #[test]
    fn whole_numbers() {
        assert_eq!(format_number(19_000_000.0), "19.000.000");
        assert_eq!(format_number(1234.0), "1234");
        assert_eq!(format_number(0.4), "0");
    }

    #[test]
    fn decimal_trims_to_min_fraction() {
        assert_eq!(format_decimal(1.5, 0, 2), "1,5");
        assert_eq!(format_decimal(1.0, 0, 2), "1");
        assert_eq!(format_decimal(1.0, 2, 2), "1,00");
    }

    #[test]
    fn rounding_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(1.23456, 2), 1.23);
    }
}
