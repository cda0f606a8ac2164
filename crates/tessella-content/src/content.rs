//! The portfolio document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Everything shown on the portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioContent {
    pub artist_name: String,
    pub artist_tagline: String,
    pub profile_image: String,
    pub about_paragraph1: String,
    pub about_paragraph2: String,
    pub social_links: Vec<SocialLink>,
    pub gallery_items: Vec<GalleryItem>,
    pub commission_status: CommissionStatus,
    pub commission_message: String,
}

/// A link in the social bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub icon: String,
    pub text: String,
    pub url: String,
}

/// One gallery piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub image: String,
    pub title: String,
    pub category: String,
}

/// Whether new commissions are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionStatus {
    #[default]
    Open,
    Closed,
    Waitlist,
    /// Any value this version does not recognise.
    #[serde(other)]
    Unknown,
}

impl CommissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CommissionStatus::Open => "Open",
            CommissionStatus::Closed => "Closed",
            CommissionStatus::Waitlist => "Waitlist",
            CommissionStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl SocialLink {
    fn new(icon: &str, text: &str) -> Self {
        Self {
            icon: icon.to_string(),
            text: text.to_string(),
            url: "#".to_string(),
        }
    }
}

impl GalleryItem {
    fn new(image: &str, title: &str, category: &str) -> Self {
        Self {
            image: image.to_string(),
            title: title.to_string(),
            category: category.to_string(),
        }
    }
}

impl Default for PortfolioContent {
    fn default() -> Self {
        Self {
            artist_name: "Artist Name".to_string(),
            artist_tagline: "Visual & Digital Artist".to_string(),
            profile_image: "images/profile.jpg".to_string(),
            about_paragraph1: "Welcome to my creative space! I'm a passionate visual and digital \
                artist dedicated to bringing imagination to life through colors, shapes, and \
                emotions. My work explores the intersection of traditional art and digital media, \
                creating pieces that tell stories and evoke feelings."
                .to_string(),
            about_paragraph2: "With years of experience in various mediums, I specialize in \
                digital illustration, character design, and conceptual art. Each piece is crafted \
                with attention to detail and a commitment to artistic excellence."
                .to_string(),
            social_links: vec![
                SocialLink::new("🎨", "ArtStation"),
                SocialLink::new("📷", "Instagram"),
                SocialLink::new("🐦", "Twitter"),
                SocialLink::new("💼", "LinkedIn"),
                SocialLink::new("✉️", "Email"),
            ],
            gallery_items: vec![
                GalleryItem::new("images/art1.jpg", "Piece Title 1", "Digital Illustration"),
                GalleryItem::new("images/art2.jpg", "Piece Title 2", "Character Design"),
                GalleryItem::new("images/art3.jpg", "Piece Title 3", "Concept Art"),
                GalleryItem::new("images/art4.jpg", "Piece Title 4", "Digital Painting"),
                GalleryItem::new("images/art5.jpg", "Piece Title 5", "Mixed Media"),
                GalleryItem::new("images/art6.jpg", "Piece Title 6", "Illustration"),
            ],
            commission_status: CommissionStatus::Open,
            commission_message: "Currently accepting new commission requests".to_string(),
        }
    }
}

impl PortfolioContent {
    /// Image references of the gallery, in display order.
    pub fn gallery_images(&self) -> Vec<&str> {
        self.gallery_items
            .iter()
            .map(|item| item.image.as_str())
            .collect()
    }
}
