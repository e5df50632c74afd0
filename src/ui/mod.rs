pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    chapter_line, choice_line, dim, error, header, media_line, muted, section, status,
    success, summary_row, warn,
};
pub use table::{stats_table, stories_table, TableBuilder};
pub use theme::{theme, Theme};
