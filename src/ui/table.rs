use crate::registry::DbStats;
use crate::story::Story;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
pub struct StoryRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Author")]
    pub author: String,
    #[tabled(rename = "Owner")]
    pub owner: String,
}

impl From<&Story> for StoryRow {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id.to_string(),
            title: story.title.clone(),
            author: story.author.clone().unwrap_or_else(|| "-".to_string()),
            owner: story.owner.clone(),
        }
    }
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &DbStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Stories", &stats.stories.to_string());
    builder.add_row("Chapters", &stats.chapters.to_string());
    builder.add_row("Choices", &stats.choices.to_string());
    builder.add_row("Media", &stats.media.to_string());
    builder.build()
}

pub fn stories_table(stories: &[Story]) -> String {
    if stories.is_empty() {
        return String::new();
    }
    let rows: Vec<StoryRow> = stories.iter().map(StoryRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tables_render_nothing() {
        assert!(TableBuilder::new().build().is_empty());
        assert!(stories_table(&[]).is_empty());
    }

    #[test]
    fn test_stories_table_lists_titles() {
        let stories = vec![
            Story::new("My Cow", "me").with_author("Dr. Poe"),
            Story::new("My Hen", "them"),
        ];
        let rendered = stories_table(&stories);
        assert!(rendered.contains("My Cow"));
        assert!(rendered.contains("Dr. Poe"));
        assert!(rendered.contains("My Hen"));
    }

    #[test]
    fn test_stats_table_rows() {
        let stats = DbStats { stories: 2, chapters: 5, choices: 7, media: 1 };
        let rendered = stats_table(&stats);
        assert!(rendered.contains("Chapters"));
        assert!(rendered.contains('7'));
    }
}
