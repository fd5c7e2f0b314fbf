use std::fmt;

/// Placement progress rendered as a block bar followed by `done/total`
pub struct ProgressBar {
    width: usize,
    total: usize,
    filled_char: char,
    empty_char: char,
}

impl ProgressBar {
    pub fn new(width: usize, total: usize) -> Self {
        Self {
            width,
            total,
            filled_char: '█',
            empty_char: '░',
        }
    }

    pub fn render(&self, done: usize) -> String {
        let done = done.min(self.total);
        let filled_count = if self.total == 0 {
            self.width
        } else {
            ((done as f64 / self.total as f64) * self.width as f64).round() as usize
        };
        let empty_count = self.width.saturating_sub(filled_count);

        format!(
            "{}{} {done}/{}",
            self.filled_char.to_string().repeat(filled_count),
            self.empty_char.to_string().repeat(empty_count),
            self.total
        )
    }
}

impl fmt::Display for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(0))
    }
}
