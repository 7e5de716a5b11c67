//! Keyword-driven media attachments

use crate::models::Attachments;
use crate::models::MediaRule;

fn matches(rule: &MediaRule, question: &str) -> bool {
    rule.keywords
        .iter()
        .filter(|keyword| !keyword.trim().is_empty())
        .any(|keyword| question.contains(&keyword.to_lowercase()))
}

/// Attachments for a question; the first matching rule providing a kind wins
#[must_use]
pub fn select_attachments(rules: &[MediaRule], question: &str) -> Attachments {
    let question = question.to_lowercase();
    let mut attachments = Attachments::default();

    for rule in rules.iter().filter(|rule| matches(rule, &question)) {
        if attachments.image.is_none() {
            attachments.image.clone_from(&rule.image);
        }
        if attachments.carousel.is_none() {
            attachments.carousel.clone_from(&rule.carousel);
        }
        if attachments.timeline.is_none() {
            attachments.timeline.clone_from(&rule.timeline);
        }
    }

    attachments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageAttachment;
    use crate::models::TimelineEntry;

    fn image(src: &str) -> ImageAttachment {
        ImageAttachment {
            src: src.to_string(),
            alt: "alt".to_string(),
            caption: None,
        }
    }

    fn rules() -> Vec<MediaRule> {
        vec![
            MediaRule {
                keywords: vec!["Team".to_string()],
                image: Some(image("/team.jpg")),
                ..MediaRule::default()
            },
            MediaRule {
                keywords: vec!["career".to_string(), "team".to_string()],
                image: Some(image("/other.jpg")),
                timeline: Some(vec![TimelineEntry {
                    year: "2019".to_string(),
                    title: "VP R&D".to_string(),
                    company: None,
                    description: None,
                }]),
                ..MediaRule::default()
            },
        ]
    }

    #[test]
    fn test_first_rule_wins_per_kind() {
        let attachments = select_attachments(&rules(), "How big was your TEAM?");
        assert_eq!(attachments.image.unwrap().src, "/team.jpg");
        assert_eq!(attachments.timeline.unwrap().len(), 1);
        assert!(attachments.carousel.is_none());
    }

    #[test]
    fn test_no_match() {
        assert!(select_attachments(&rules(), "What do you cook?").is_empty());
    }

    #[test]
    fn test_no_rules() {
        assert!(select_attachments(&[], "team").is_empty());
    }
}
