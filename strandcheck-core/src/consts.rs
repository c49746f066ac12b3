/// Column holding the forward strand count (0-based).
pub const FORWARD_COLUMN: usize = 1;
/// Column holding the reverse strand count (0-based).
pub const REVERSE_COLUMN: usize = 2;

/// Path understood as standard input.
pub const STDIN_PATH: &str = "-";
