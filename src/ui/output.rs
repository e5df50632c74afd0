use crate::chapter::Chapter;
use crate::choice::Choice;
use crate::media::{Media, MediaRole};
use crate::story::Story;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

/// Longest chapter text excerpt shown on one line
const EXCERPT_CHARS: usize = 60;

pub fn header(text: &str) {
    println!("{} {}", Icons::BOOK, text.style(theme().header.clone()));
}

pub fn status(icon: &str, label: &str, value: &str) {
    println!("{} {}: {}", icon, label.style(theme().dim.clone()), value);
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn muted(text: &str) -> String {
    text.style(theme().muted.clone()).to_string()
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// One chapter heading inside `show`
pub fn chapter_line(story: &Story, chapter: &Chapter) {
    let icon = if story.first_chapter_id.as_ref() == Some(&chapter.id) {
        Icons::ENTRY
    } else if chapter.is_ending() {
        Icons::ENDING
    } else {
        Icons::PAGE
    };
    println!(
        "{} {} {}",
        icon,
        excerpt(&chapter.text).style(theme().title.clone()),
        muted(chapter.id.as_str())
    );
}

pub fn choice_line(story: &Story, choice: &Choice) {
    let target = match story.follow(choice) {
        Some(_) if choice.is_self_loop() => format!("{} itself", Icons::LOOP),
        Some(next) => excerpt(&next.text),
        None => format!("{} {}", Icons::BROKEN, muted(choice.chapter_to.as_str())),
    };
    println!(
        "    {} {} {}",
        Icons::RIGHT,
        choice.text.style(theme().choice.clone()),
        dim(&format!("→ {}", target))
    );
}

pub fn media_line(media: &Media) {
    let icon = match media.role {
        MediaRole::Illustration => Icons::PALETTE,
        MediaRole::Photo => Icons::CAMERA,
    };
    println!("    {} {}", icon, muted(&media.path));
}

fn excerpt(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() > EXCERPT_CHARS {
        let cut: String = first_line.chars().take(EXCERPT_CHARS).collect();
        format!("{}…", cut)
    } else {
        first_line.to_string()
    }
}
