//! Database schema definitions
//!
//! One table per entity kind. Every column is TEXT; identities are stored
//! as their string form. The column constants are shared by the record
//! mappings and the filters so both always agree on names and order.

/// Story table layout
pub mod stories {
    pub const TABLE: &str = "stories";
    pub const ID: &str = "story_id";
    pub const TITLE: &str = "title";
    pub const AUTHOR: &str = "author";
    pub const DESCRIPTION: &str = "description";
    pub const OWNER: &str = "owner";
    pub const COVER_IMAGE: &str = "cover_image";
    pub const FIRST_CHAPTER: &str = "first_chapter_id";

    /// All columns, identity first
    pub const COLUMNS: &[&str] = &[ID, TITLE, AUTHOR, DESCRIPTION, OWNER, COVER_IMAGE, FIRST_CHAPTER];
}

/// Chapter table layout
pub mod chapters {
    pub const TABLE: &str = "chapters";
    pub const ID: &str = "chapter_id";
    pub const STORY_ID: &str = "story_id";
    pub const TEXT: &str = "text";

    pub const COLUMNS: &[&str] = &[ID, STORY_ID, TEXT];
}

/// Choice table layout
pub mod choices {
    pub const TABLE: &str = "choices";
    pub const ID: &str = "choice_id";
    pub const CHAPTER_FROM: &str = "chapter_from";
    pub const CHAPTER_TO: &str = "chapter_to";
    pub const TEXT: &str = "text";

    pub const COLUMNS: &[&str] = &[ID, CHAPTER_FROM, CHAPTER_TO, TEXT];
}

/// Media table layout
pub mod media {
    pub const TABLE: &str = "media";
    pub const ID: &str = "media_id";
    pub const CHAPTER_ID: &str = "chapter_id";
    pub const PATH: &str = "path";
    pub const ROLE: &str = "role";

    pub const COLUMNS: &[&str] = &[ID, CHAPTER_ID, PATH, ROLE];
}

/// SQL to create the stories table
pub const CREATE_STORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS stories (
    story_id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    author TEXT,
    description TEXT,
    owner TEXT NOT NULL,
    cover_image TEXT,
    first_chapter_id TEXT
)
"#;

/// SQL to create the chapters table
pub const CREATE_CHAPTERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS chapters (
    chapter_id TEXT PRIMARY KEY,
    story_id TEXT NOT NULL,
    text TEXT NOT NULL
)
"#;

/// SQL to create the choices table
/// Destinations are not foreign keys: dangling choices are allowed
pub const CREATE_CHOICES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS choices (
    choice_id TEXT PRIMARY KEY,
    chapter_from TEXT NOT NULL,
    chapter_to TEXT NOT NULL,
    text TEXT NOT NULL
)
"#;

/// SQL to create the media table
pub const CREATE_MEDIA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS media (
    media_id TEXT PRIMARY KEY,
    chapter_id TEXT NOT NULL,
    path TEXT NOT NULL,
    role TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_stories_owner ON stories(owner)",
    "CREATE INDEX IF NOT EXISTS idx_chapters_story ON chapters(story_id)",
    "CREATE INDEX IF NOT EXISTS idx_choices_from ON choices(chapter_from)",
    "CREATE INDEX IF NOT EXISTS idx_media_chapter ON media(chapter_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_STORIES_TABLE,
        CREATE_CHAPTERS_TABLE,
        CREATE_CHOICES_TABLE,
        CREATE_MEDIA_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
