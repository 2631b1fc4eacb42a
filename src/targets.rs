//! Fixed vocabularies of sites and applications the assistant can act on.
//!
//! Aliases are written in normalized form. Lookups go through
//! [`crate::normalize::compact`] so spacing and apostrophes do not matter
//! ("you tube", "youtube", "chat gpt").

use crate::normalize::compact;

/// A site the assistant can open in the browser or close as a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteTarget {
    YouTube,
    Google,
    GitHub,
    ChatGpt,
    Gmail,
}

impl SiteTarget {
    /// All known sites, in lookup order.
    pub const ALL: [SiteTarget; 5] = [
        SiteTarget::YouTube,
        SiteTarget::Google,
        SiteTarget::GitHub,
        SiteTarget::ChatGpt,
        SiteTarget::Gmail,
    ];

    /// Spoken display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Google => "Google",
            Self::GitHub => "GitHub",
            Self::ChatGpt => "ChatGPT",
            Self::Gmail => "Gmail",
        }
    }

    /// Address opened in the browser.
    pub fn url(self) -> &'static str {
        match self {
            Self::YouTube => "https://www.youtube.com",
            Self::Google => "https://www.google.com",
            Self::GitHub => "https://github.com",
            Self::ChatGpt => "https://chatgpt.com",
            Self::Gmail => "https://mail.google.com",
        }
    }

    /// Names a user may say for this site, including common mis-hearings.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::YouTube => &["youtube", "you tube", "u tube"],
            Self::Google => &["google", "google search"],
            Self::GitHub => &["github", "git hub", "get hub", "repo", "repository"],
            Self::ChatGpt => &["chatgpt", "chat gpt", "chat gbt", "chat g p t", "chat"],
            Self::Gmail => &["gmail", "g mail", "email", "mail"],
        }
    }

    /// Tokens that suggest this site when no alias matches exactly.
    pub fn hints(self) -> &'static [&'static str] {
        match self {
            Self::YouTube => &["youtube", "tube"],
            Self::Google => &["google"],
            Self::GitHub => &["github", "hub", "repo"],
            Self::ChatGpt => &["chatgpt", "gpt", "chat"],
            Self::Gmail => &["gmail", "mail", "inbox"],
        }
    }

    /// Resolve a spoken target name.
    pub fn resolve(name: &str) -> Option<Self> {
        let key = compact(name);
        if key.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|site| site.aliases().iter().any(|a| compact(a) == key))
    }

    /// Find the site whose display URL is `url`.
    pub fn from_url(url: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|site| site.url() == url)
    }
}

/// An application the assistant can close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTarget {
    VsCode,
    Chrome,
    Firefox,
    Edge,
    Notepad,
    FileExplorer,
    Spotify,
}

impl AppTarget {
    /// All known applications, in lookup order.
    pub const ALL: [AppTarget; 7] = [
        AppTarget::VsCode,
        AppTarget::Chrome,
        AppTarget::Firefox,
        AppTarget::Edge,
        AppTarget::Notepad,
        AppTarget::FileExplorer,
        AppTarget::Spotify,
    ];

    /// Spoken display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::VsCode => "VS Code",
            Self::Chrome => "Chrome",
            Self::Firefox => "Firefox",
            Self::Edge => "Edge",
            Self::Notepad => "Notepad",
            Self::FileExplorer => "File Explorer",
            Self::Spotify => "Spotify",
        }
    }

    /// Names a user may say for this application.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::VsCode => &[
                "vs code",
                "vscode",
                "visual studio code",
                "code",
                "this code",
                "base code",
                "best code",
                "editor",
            ],
            Self::Chrome => &["chrome", "google chrome", "browser"],
            Self::Firefox => &["firefox", "fire fox"],
            Self::Edge => &["edge", "microsoft edge"],
            Self::Notepad => &["notepad", "note pad"],
            Self::FileExplorer => &["file explorer", "explorer", "files", "file manager"],
            Self::Spotify => &["spotify", "music"],
        }
    }

    /// Process name handed to the host when closing.
    pub fn process_name(self) -> &'static str {
        match self {
            Self::VsCode => "code",
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Edge => "msedge",
            Self::Notepad => "notepad",
            Self::FileExplorer => "explorer",
            Self::Spotify => "spotify",
        }
    }

    /// Resolve a spoken target name.
    pub fn resolve(name: &str) -> Option<Self> {
        let key = compact(name);
        if key.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|app| app.aliases().iter().any(|a| compact(a) == key))
    }

    /// Find the application closed through `process`.
    pub fn from_process(process: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|app| app.process_name() == process)
    }
}
