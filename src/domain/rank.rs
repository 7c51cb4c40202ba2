/// One belt on the grading ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    /// Inventory column name, also the marker used in `S`/`M` cells.
    pub code: &'static str,
    /// File name stem.
    pub slug: &'static str,
    pub title: &'static str,
    /// CSS class on the supplemental sheet.
    pub style: &'static str,
    /// Shaded column in the skills matrix.
    pub tier_start: bool,
}

pub const RANKS: [Rank; 11] = [
    Rank { code: "Y", slug: "yellow", title: "8th Kup / Yellow Belt", style: "yellow", tier_start: false },
    Rank { code: "O", slug: "orange", title: "7th Kup / Orange Belt", style: "orange", tier_start: false },
    Rank { code: "G", slug: "green", title: "6th Kup / Green Belt", style: "green", tier_start: false },
    Rank { code: "P", slug: "purple", title: "5th Kup / Purple Belt", style: "purple", tier_start: false },
    Rank { code: "b", slug: "blue", title: "4th Kup / Blue Belt", style: "blue", tier_start: true },
    Rank { code: "B", slug: "brown", title: "3rd Kup / Brown Belt", style: "brown", tier_start: false },
    Rank { code: "R", slug: "red", title: "2nd Kup / Red Belt", style: "red", tier_start: false },
    Rank { code: "T", slug: "temp", title: "1st Kup / Temp Belt", style: "temp", tier_start: false },
    Rank { code: "1", slug: "1stdan", title: "1st Dan Black Belt", style: "black", tier_start: true },
    Rank { code: "2", slug: "2nddan", title: "2nd Dan Black Belt", style: "black", tier_start: false },
    Rank { code: "3", slug: "3rddan", title: "3rd Dan Black Belt", style: "black", tier_start: false },
];

/// Column holding the rank each supplemental item belongs to.
pub const SUPPLEMENTAL_COLUMN: &str = "S";
/// Column holding the rank at which each matrix item is first earned.
pub const MATRIX_COLUMN: &str = "M";

pub fn find_rank(code: &str) -> Option<&'static Rank> {
    RANKS.iter().find(|r| r.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_codes_are_case_sensitive() {
        assert_eq!(find_rank("b").map(|r| r.slug), Some("blue"));
        assert_eq!(find_rank("B").map(|r| r.slug), Some("brown"));
        assert!(find_rank("x").is_none());
    }

    #[test]
    fn test_tier_boundaries() {
        let shaded: Vec<&str> = RANKS.iter().filter(|r| r.tier_start).map(|r| r.code).collect();
        assert_eq!(shaded, vec!["b", "1"]);
    }
}
