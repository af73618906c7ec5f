pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const HOURGLASS: &str = "⏳";
    pub const GLOBE: &str = "🌍";
}
