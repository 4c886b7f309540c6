use crate::types::ClinicalScale;

/// Inclusive integer band `[lower, upper]` with its severity label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityBand {
    pub lower: i32,
    pub upper: i32,
    pub label: &'static str,
}

const fn band(lower: i32, upper: i32, label: &'static str) -> SeverityBand {
    SeverityBand { lower, upper, label }
}

pub const PHQ9_BANDS: [SeverityBand; 5] = [
    band(0, 4, "Minimal"),
    band(5, 9, "Mild"),
    band(10, 14, "Moderate"),
    band(15, 19, "Moderately severe"),
    band(20, 27, "Severe"),
];

pub const GAD7_BANDS: [SeverityBand; 4] = [
    band(0, 4, "Minimal"),
    band(5, 9, "Mild"),
    band(10, 14, "Moderate"),
    band(15, 21, "Severe"),
];

pub const PSS_BANDS: [SeverityBand; 3] = [
    band(0, 13, "Low stress"),
    band(14, 26, "Moderate stress"),
    band(27, 40, "High perceived stress"),
];

pub const WEMWBS_BANDS: [SeverityBand; 4] = [
    band(14, 31, "Low wellbeing"),
    band(32, 44, "Below average"),
    band(45, 58, "Average"),
    band(59, 70, "High wellbeing"),
];

pub fn bands_for(scale: ClinicalScale) -> &'static [SeverityBand] {
    match scale {
        ClinicalScale::Phq9 => &PHQ9_BANDS,
        ClinicalScale::Gad7 => &GAD7_BANDS,
        ClinicalScale::Pss => &PSS_BANDS,
        ClinicalScale::Wemwbs => &WEMWBS_BANDS,
    }
}

/// Round half away from zero, then clamp into the scale's integer range
pub fn to_scale_points(scale: ClinicalScale, value: f64) -> i32 {
    let (lo, hi) = scale.range();
    let rounded = if value.is_finite() { value.round() } else { lo };
    rounded.clamp(lo, hi) as i32
}

/// Severity label for an integer score. Out-of-range points snap to the
/// nearest edge band.
pub fn severity_label(scale: ClinicalScale, points: i32) -> &'static str {
    let bands = bands_for(scale);
    bands
        .iter()
        .find(|b| points >= b.lower && points <= b.upper)
        .or_else(|| {
            if points < bands[0].lower {
                bands.first()
            } else {
                bands.last()
            }
        })
        .map(|b| b.label)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_are_contiguous_and_cover_range() {
        for scale in ClinicalScale::ALL {
            let bands = bands_for(scale);
            let (lo, hi) = scale.range();
            assert_eq!(bands[0].lower, lo as i32);
            assert_eq!(bands[bands.len() - 1].upper, hi as i32);
            for pair in bands.windows(2) {
                assert_eq!(pair[0].upper + 1, pair[1].lower, "{:?}", scale);
            }
        }
    }

    #[test]
    fn test_phq9_boundaries() {
        assert_eq!(severity_label(ClinicalScale::Phq9, 4), "Minimal");
        assert_eq!(severity_label(ClinicalScale::Phq9, 5), "Mild");
        assert_eq!(severity_label(ClinicalScale::Phq9, 14), "Moderate");
        assert_eq!(severity_label(ClinicalScale::Phq9, 15), "Moderately severe");
        assert_eq!(severity_label(ClinicalScale::Phq9, 27), "Severe");
    }

    #[test]
    fn test_other_scale_boundaries() {
        assert_eq!(severity_label(ClinicalScale::Gad7, 15), "Severe");
        assert_eq!(severity_label(ClinicalScale::Pss, 13), "Low stress");
        assert_eq!(severity_label(ClinicalScale::Pss, 27), "High perceived stress");
        assert_eq!(severity_label(ClinicalScale::Wemwbs, 31), "Low wellbeing");
        assert_eq!(severity_label(ClinicalScale::Wemwbs, 45), "Average");
        assert_eq!(severity_label(ClinicalScale::Wemwbs, 59), "High wellbeing");
    }

    #[test]
    fn test_out_of_range_points_snap_to_edges() {
        assert_eq!(severity_label(ClinicalScale::Wemwbs, 3), "Low wellbeing");
        assert_eq!(severity_label(ClinicalScale::Gad7, 99), "Severe");
    }

    #[test]
    fn test_rounding_tie_break() {
        assert_eq!(to_scale_points(ClinicalScale::Phq9, 4.49), 4);
        assert_eq!(to_scale_points(ClinicalScale::Phq9, 4.5), 5);
        assert_eq!(to_scale_points(ClinicalScale::Phq9, 30.0), 27);
        assert_eq!(to_scale_points(ClinicalScale::Wemwbs, 2.0), 14);
        assert_eq!(to_scale_points(ClinicalScale::Pss, f64::NAN), 0);
    }
}
