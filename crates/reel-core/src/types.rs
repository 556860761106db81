use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

crate::impl_string_newtype!(ItemId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

/// One entry of the rotating list. Only `title` is shown on the cards; `id` and
/// `description` feed the detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub title: Label,
    #[serde(default)]
    pub description: String,
}

impl ContentItem {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: ItemId::from(id),
            title: Label::from(title),
            description: description.to_owned(),
        }
    }
}

pub fn card_labels(items: &[ContentItem]) -> Vec<String> {
    items.iter().map(|item| item.title.to_string()).collect()
}

pub fn default_items() -> Vec<ContentItem> {
    vec![
        ContentItem::new(
            "01",
            "Design & Engineering Services",
            "We engineer tailored fire protection solutions with accuracy, innovation, and performance at the core.",
        ),
        ContentItem::new(
            "02",
            "Drawings & Documentation",
            "Clear, code-compliant drawings and fabrication docs that bring precision to every stage of your build.",
        ),
        ContentItem::new(
            "03",
            "Analysis & Consulting",
            "Expert fire protection analysis that simplifies code, reduces risk, and guides your project with clarity.",
        ),
        ContentItem::new(
            "04",
            "Surveying & Testing",
            "We deliver site surveys and certified testing to ensure infrastructure readiness and system performance.",
        ),
        ContentItem::new(
            "05",
            "Regulatory & Compliance Support",
            "We help you stay ahead of codes and AHJ rules, minimizing risk, avoiding delays, and ensuring full compliance.",
        ),
        ContentItem::new(
            "06",
            "Consulting & Risk Assessment",
            "We oversee field reviews, submittals, and contractors to ensure fire systems are installed exactly as designed.",
        ),
    ]
}
