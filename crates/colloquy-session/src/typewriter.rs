use std::time::Duration;

/// Default reveal cadence: one character every 15 ms, matching the feel of
/// token-by-token output.
pub const DEFAULT_CHARS_PER_TICK: usize = 1;
pub const DEFAULT_TICK: Duration = Duration::from_millis(15);

/// Incremental reveal of an already-complete message.
///
/// This is not network streaming: the full text is known up front and the
/// generator only walks forward over it. One instance serves one message;
/// restarting means constructing a new one; a finished instance yields
/// nothing more and never mutates what it already revealed.
#[derive(Debug)]
pub struct Typewriter {
    text: String,
    chars_per_tick: usize,
    cursor: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, chars_per_tick: usize) -> Self {
        Self {
            text: text.into(),
            chars_per_tick: chars_per_tick.max(1),
            cursor: 0,
        }
    }

    /// Advance by one tick and return the revealed prefix, or `None` once
    /// the full text has been revealed. Advancement is by characters, so
    /// multi-byte text is never split.
    pub fn tick(&mut self) -> Option<&str> {
        if self.cursor >= self.text.len() {
            return None;
        }
        let remaining = &self.text[self.cursor..];
        let advance = remaining
            .char_indices()
            .nth(self.chars_per_tick)
            .map(|(offset, _)| offset)
            .unwrap_or(remaining.len());
        self.cursor += advance;
        Some(&self.text[..self.cursor])
    }

    pub fn revealed(&self) -> &str {
        &self.text[..self.cursor]
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.text.len()
    }
}

/// Drive a [`Typewriter`] on a fixed tick, invoking `on_prefix` with each
/// revealed prefix. The future resolves once the full text has been shown;
/// awaiting it is the completion signal.
pub async fn reveal<F>(text: &str, chars_per_tick: usize, tick: Duration, mut on_prefix: F)
where
    F: FnMut(&str),
{
    let mut typewriter = Typewriter::new(text, chars_per_tick);
    while let Some(prefix) = typewriter.tick() {
        on_prefix(prefix);
        if !typewriter.is_complete() {
            tokio::time::sleep(tick).await;
        }
    }
}
