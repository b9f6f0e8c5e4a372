pub mod text;

/// Console decoration style.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Emoji,
    Plain,
}

impl Theme {
    pub fn from_plain(plain: bool) -> Self {
        if plain {
            Theme::Plain
        } else {
            Theme::Emoji
        }
    }

    /// Line prefix for `icon`, including its trailing spacing.
    pub fn prefix(self, icon: Icon) -> &'static str {
        match self {
            Theme::Emoji => icon.emoji(),
            Theme::Plain => icon.plain(),
        }
    }
}

/// Every decoration the renderer can put in front of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Vault,
    Info,
    Fossil,
    Sprout,
    Excavation,
    Modified,
    Untracked,
    Staged,
    Uplift,
    Link,
    Unearth,
    Shift,
    Map,
    CurrentStratum,
    Stratum,
    Fuse,
    MergeCommit,
    Preserve,
    Erode,
    RemoteErode,
    Failure,
}

impl Icon {
    /// Emoji icons carrying a variation selector render one column narrow,
    /// so they get an extra space.
    pub fn emoji(self) -> &'static str {
        match self {
            Icon::Vault => "🏛️  ",
            Icon::Info => "ℹ️  ",
            Icon::Fossil => "📦 ",
            Icon::Sprout => "🌿 ",
            Icon::Excavation => "📊 ",
            Icon::Modified => "📝 ",
            Icon::Untracked => "❓ ",
            Icon::Staged => "✅ ",
            Icon::Uplift => "🚀 ",
            Icon::Link => "🔗 ",
            Icon::Unearth => "🏺 ",
            Icon::Shift => "🔄 ",
            Icon::Map => "🗺️  ",
            Icon::CurrentStratum => "✨ ",
            Icon::Stratum => "📍 ",
            Icon::Fuse => "🔥 ",
            Icon::MergeCommit => "🪢 ",
            Icon::Preserve => "🧊 ",
            Icon::Erode => "🪨 ",
            Icon::RemoteErode => "🌊 ",
            Icon::Failure => "❌ ",
        }
    }

    /// ASCII markers for terminals and logs that mangle emoji.
    pub fn plain(self) -> &'static str {
        match self {
            Icon::Info => "info: ",
            Icon::Failure => "error: ",
            Icon::Excavation | Icon::Map => "",
            Icon::Modified => "M ",
            Icon::Untracked => "? ",
            Icon::Staged => "A ",
            Icon::CurrentStratum => "* ",
            Icon::Stratum => "  ",
            Icon::MergeCommit => "- ",
            Icon::Vault
            | Icon::Fossil
            | Icon::Sprout
            | Icon::Uplift
            | Icon::Link
            | Icon::Unearth
            | Icon::Shift
            | Icon::Fuse
            | Icon::Preserve
            | Icon::Erode
            | Icon::RemoteErode => "ok: ",
        }
    }
}
