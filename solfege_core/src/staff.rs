//! Five-line staff geometry. Position 0 is the bottom line and each step is
//! half a line spacing, so even positions sit on lines and 8 is the top line.

pub const BOTTOM_LINE: i32 = 0;
pub const MIDDLE_LINE: i32 = 4;
pub const TOP_LINE: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stem {
    Up,
    Down,
}

pub fn is_line(position: i32) -> bool {
    position % 2 == 0
}

pub fn is_on_staff_line(position: i32) -> bool {
    is_line(position) && (BOTTOM_LINE..=TOP_LINE).contains(&position)
}

/// Ledger lines needed to reach `position`, nearest the staff first.
pub fn ledger_lines(position: i32) -> Vec<i32> {
    if position <= BOTTOM_LINE - 2 {
        (position..=BOTTOM_LINE - 2)
            .rev()
            .filter(|p| is_line(*p))
            .collect()
    } else if position >= TOP_LINE + 2 {
        (TOP_LINE + 2..=position).filter(|p| is_line(*p)).collect()
    } else {
        Vec::new()
    }
}

/// Stems point up below the middle line and down from it upwards.
pub fn stem(position: i32) -> Stem {
    if position < MIDDLE_LINE {
        Stem::Up
    } else {
        Stem::Down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_ledgers_inside_or_just_outside_staff() {
        for p in -1..=9 {
            assert!(ledger_lines(p).is_empty(), "position {p}");
        }
    }

    #[test]
    fn ledgers_below_and_above() {
        assert_eq!(ledger_lines(-2), vec![-2]);
        assert_eq!(ledger_lines(-5), vec![-2, -4]);
        assert_eq!(ledger_lines(10), vec![10]);
        assert_eq!(ledger_lines(13), vec![10, 12]);
    }

    #[test]
    fn stem_direction_flips_at_middle_line() {
        assert_eq!(stem(3), Stem::Up);
        assert_eq!(stem(4), Stem::Down);
        assert_eq!(stem(-2), Stem::Up);
    }
}
