//! The CMS content sections and their routing slugs.
//!
//! Every section shares one record shape (title, body, optional image
//! path), so the section itself is just a name that picks the table and
//! the admin page headings.

use std::str::FromStr;
use thiserror::Error;

/// A managed content section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentSection {
    /// Buying and care guides.
    Guides,
    /// About-us entries.
    About,
    /// Team member profiles.
    Team,
    /// Mission statements.
    Missions,
    /// Terms and conditions entries.
    Terms,
    /// Vision statements.
    Visions,
    /// Awards received.
    Awards,
    /// Business achievements.
    Achievements,
    /// Customer-facing notices.
    Notifications,
}

impl ContentSection {
    /// All sections, in admin navigation order.
    pub const ALL: [Self; 9] = [
        Self::Guides,
        Self::About,
        Self::Team,
        Self::Missions,
        Self::Terms,
        Self::Visions,
        Self::Awards,
        Self::Achievements,
        Self::Notifications,
    ];

    /// The slug used in route paths and as the table name.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Guides => "guides",
            Self::About => "about",
            Self::Team => "team",
            Self::Missions => "missions",
            Self::Terms => "terms",
            Self::Visions => "visions",
            Self::Awards => "awards",
            Self::Achievements => "achievements",
            Self::Notifications => "notifications",
        }
    }

    /// The singular noun used in not-found and flash messages.
    #[must_use]
    pub const fn singular(&self) -> &'static str {
        match self {
            Self::Guides => "Guide",
            Self::About => "About entry",
            Self::Team => "Team member",
            Self::Missions => "Mission",
            Self::Terms => "Terms entry",
            Self::Visions => "Vision",
            Self::Awards => "Award",
            Self::Achievements => "Achievement",
            Self::Notifications => "Notification",
        }
    }

    /// The heading shown on admin list pages.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Guides => "Guides",
            Self::About => "About Us",
            Self::Team => "Team",
            Self::Missions => "Missions",
            Self::Terms => "Terms & Conditions",
            Self::Visions => "Visions",
            Self::Awards => "Awards",
            Self::Achievements => "Achievements",
            Self::Notifications => "Notifications",
        }
    }
}

impl std::fmt::Display for ContentSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when a path slug names no section.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown content section: {0}")]
pub struct ParseSectionError(String);

impl FromStr for ContentSection {
    type Err = ParseSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.slug() == s)
            .ok_or_else(|| ParseSectionError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_slug_round_trips() {
        for section in ContentSection::ALL {
            assert_eq!(section.slug().parse::<ContentSection>(), Ok(section));
        }
    }

    #[test]
    fn unknown_slugs_are_rejected() {
        assert!("gold-rates".parse::<ContentSection>().is_err());
        assert!("Guides".parse::<ContentSection>().is_err());
        assert!("".parse::<ContentSection>().is_err());
    }

    #[test]
    fn slugs_are_unique() {
        let mut slugs: Vec<_> = ContentSection::ALL.iter().map(ContentSection::slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), ContentSection::ALL.len());
    }
}
