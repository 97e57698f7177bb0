//! Screen templates
//!
//! Static text for each machine state. Live values are written over these
//! at the positions given by the column constants below.

use crate::screen::SCREEN_ROWS;

/// A full-panel template
pub type Template = [&'static str; SCREEN_ROWS];

/// Boot watermark, typed out one character at a time
pub const WATERMARK: Template = [
    "        KARA        ",
    "      ELEKTRONIK    ",
    "    SES SISTEMLERI  ",
    "      v20/06/19     ",
];

/// Shown while the carriage searches for the home sensor
pub const HOMING: Template = [
    "                    ",
    "  SIFIRLANIYOR...   ",
    "                    ",
    "                    ",
];

/// Parameter entry
pub const IDLE: Template = [
    "SPIR:    0000       ",
    "TEL CAP: 0.00mm     ",
    "#: MOD:  MANUEL     ",
    "          ENT: BASLA",
];

/// Carriage positioning between the two markers
pub const OFFSET: Template = [
    "GENISLIK: -         ",
    "                    ",
    "                    ",
    "          ENT: BASLA",
];

/// Winding in progress
pub const RUNNING: Template = [
    "    ----HAZIR----   ",
    "TUR:  0 / 0         ",
    "HIZ:  0 rpm         ",
    "          ESC: IPTAL",
];

/// Target turn count reached
pub const FINISHED: Template = [
    "    ----BITTI----   ",
    "TUR:  0 / 0         ",
    "                    ",
    "          ENT: TAMAM",
];

/// Row 0 banner while Running
pub const BANNER_RUNNING: &str = "    ----HAZIR----   ";

/// Row 0 banner while Paused
pub const BANNER_PAUSED: &str = "    ----DURDU----   ";

/// Column where the Idle fields start
pub const FIELD_COL: usize = 9;

/// Idle row holding the turn count
pub const TURNS_FIELD_ROW: usize = 0;

/// Idle row holding the wire diameter
pub const DIAMETER_FIELD_ROW: usize = 1;

/// Offset row showing the measured width
pub const WIDTH_ROW: usize = 0;

/// Column where the width value starts
pub const WIDTH_COL: usize = 10;

/// Running row showing `current / total`
pub const PROGRESS_ROW: usize = 1;

/// Running row showing the speed
pub const SPEED_ROW: usize = 2;

/// Column where live Running values start
pub const VALUE_COL: usize = 6;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::SCREEN_COLS;

    #[test]
    fn test_templates_fill_the_panel() {
        for template in [WATERMARK, HOMING, IDLE, OFFSET, RUNNING, FINISHED] {
            for row in template {
                assert_eq!(row.len(), SCREEN_COLS, "{row:?}");
                assert!(row.is_ascii());
            }
        }
        assert_eq!(BANNER_RUNNING.len(), SCREEN_COLS);
        assert_eq!(BANNER_PAUSED.len(), SCREEN_COLS);
    }

    #[test]
    fn test_field_positions_match_templates() {
        assert_eq!(&IDLE[TURNS_FIELD_ROW][FIELD_COL..FIELD_COL + 4], "0000");
        assert_eq!(&IDLE[DIAMETER_FIELD_ROW][FIELD_COL..FIELD_COL + 4], "0.00");
        assert_eq!(&OFFSET[WIDTH_ROW][WIDTH_COL..WIDTH_COL + 1], "-");
        assert_eq!(&RUNNING[PROGRESS_ROW][VALUE_COL..VALUE_COL + 5], "0 / 0");
        assert_eq!(&RUNNING[SPEED_ROW][VALUE_COL..VALUE_COL + 5], "0 rpm");
    }
}
