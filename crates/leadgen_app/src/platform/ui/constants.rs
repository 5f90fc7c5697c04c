pub const TITLE: &str = "Lead-gen console";
pub const RULE_WIDTH: usize = 72;
pub const BAR_WIDTH: usize = 30;
pub const LOG_TAIL_LINES: usize = 8;
pub const KEYWORDS_SHOWN: usize = 4;
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const DAYS_SHOWN: usize = 7;
pub const DAY_FORMAT: &str = "%m-%d";
