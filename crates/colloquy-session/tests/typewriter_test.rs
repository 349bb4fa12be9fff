use std::time::Duration;

use colloquy_session::{reveal, Typewriter};

#[test]
fn reveals_one_character_per_tick() {
    let mut typewriter = Typewriter::new("Hi!", 1);

    assert_eq!(typewriter.tick(), Some("H"));
    assert_eq!(typewriter.tick(), Some("Hi"));
    assert_eq!(typewriter.tick(), Some("Hi!"));
    assert!(typewriter.is_complete());
}

#[test]
fn finished_typewriter_yields_nothing_more() {
    let mut typewriter = Typewriter::new("ab", 1);
    while typewriter.tick().is_some() {}

    assert_eq!(typewriter.tick(), None);
    assert_eq!(typewriter.tick(), None);
    assert_eq!(typewriter.revealed(), "ab");
}

#[test]
fn chunked_reveal_groups_characters() {
    let mut typewriter = Typewriter::new("abcdefg", 3);

    assert_eq!(typewriter.tick(), Some("abc"));
    assert_eq!(typewriter.tick(), Some("abcdef"));
    // The final tick reveals whatever remains, short chunk included
    assert_eq!(typewriter.tick(), Some("abcdefg"));
    assert_eq!(typewriter.tick(), None);
}

#[test]
fn multibyte_text_is_never_split() {
    let mut typewriter = Typewriter::new("héllo 🌊", 1);
    let mut last = String::new();
    while let Some(prefix) = typewriter.tick() {
        // Every prefix is valid UTF-8 by construction; verify it grows by
        // whole characters
        assert!(prefix.starts_with(&last));
        last = prefix.to_string();
    }
    assert_eq!(last, "héllo 🌊");
}

#[test]
fn zero_chars_per_tick_is_clamped() {
    let mut typewriter = Typewriter::new("ab", 0);
    assert_eq!(typewriter.tick(), Some("a"));
}

#[test]
fn empty_text_completes_immediately() {
    let mut typewriter = Typewriter::new("", 1);
    assert!(typewriter.is_complete());
    assert_eq!(typewriter.tick(), None);
}

#[test]
fn restart_means_a_fresh_instance() {
    let mut first = Typewriter::new("same text", 4);
    while first.tick().is_some() {}

    // A completed stream is never revisited; the message replays through a
    // new generator
    let mut second = Typewriter::new("same text", 4);
    assert_eq!(second.tick(), Some("same"));
}

#[tokio::test]
async fn reveal_drives_prefixes_to_completion() {
    let mut seen = Vec::new();
    reveal("abcd", 2, Duration::ZERO, |prefix| {
        seen.push(prefix.to_string());
    })
    .await;

    assert_eq!(seen, vec!["ab".to_string(), "abcd".to_string()]);
}
