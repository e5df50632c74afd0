pub struct Icons;

impl Icons {
    pub const BOOK: &str = "📖";
    pub const PAGE: &str = "📄";
    pub const ENTRY: &str = "🚪";
    pub const ENDING: &str = "🏁";
    pub const RIGHT: &str = "➡️";
    pub const LOOP: &str = "🔁";
    pub const BROKEN: &str = "⛓️";
    pub const PALETTE: &str = "🎨";
    pub const CAMERA: &str = "📷";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
    pub const PERSON: &str = "👤";
}
