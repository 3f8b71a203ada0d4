//! Memory cards on the wishes page

use serde::{Deserialize, Serialize};

/// One card: a photo, when it was taken, a caption and a clip played on click
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub image: String,
    pub date: String,
    pub text: String,
    pub clip_url: String,
}

impl Memory {
    pub fn new(
        image: impl Into<String>,
        date: impl Into<String>,
        text: impl Into<String>,
        clip_url: impl Into<String>,
    ) -> Self {
        Self {
            image: image.into(),
            date: date.into(),
            text: text.into(),
            clip_url: clip_url.into(),
        }
    }
}

/// Cards shown when the page config supplies none
pub fn default_memories() -> Vec<Memory> {
    vec![
        Memory::new(
            "assets/first-meeting.jpeg",
            "25 February 2025",
            "The day we first met. Your smile stole my heart right then.",
            "assets/memory-1.mp3",
        ),
        Memory::new(
            "assets/together.jpeg",
            "15 March 2025",
            "A precious moment together. I still catch myself smiling at your jokes.",
            "assets/memory-2.mp3",
        ),
        Memory::new(
            "assets/birthday.jpeg",
            "16 March 2025",
            "Your birthday, and how much you mean to me.",
            "assets/memory-1.mp3",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cards() {
        let cards = default_memories();
        assert_eq!(cards.len(), 3);
        assert!(cards.iter().all(|m| !m.clip_url.is_empty()));
        // Two cards share a clip
        assert_eq!(cards[0].clip_url, cards[2].clip_url);
    }

    #[test]
    fn test_card_from_json() {
        let card: Memory = serde_json::from_str(
            r#"{"image": "a.jpg", "date": "1 May", "text": "hi", "clip_url": "a.mp3"}"#,
        )
        .expect("valid card");
        assert_eq!(card, Memory::new("a.jpg", "1 May", "hi", "a.mp3"));
    }
}
