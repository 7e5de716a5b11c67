//! Follow-up question suggestions for the chat UI

use std::collections::HashSet;

const PER_CATEGORY: usize = 3;

pub const LEADERSHIP_QUESTIONS: &[&str] = &[
    "How do you build teams that ship — even in chaos?",
    "What makes your leadership style different?",
    "How do you drive innovation when everything's on fire?",
    "What's your favorite failure — and why?",
    "How do you turn conflict into culture?",
    "What's your approach to remote team management?",
    "How do you measure team success?",
    "What's your secret to high team retention?",
    "What's your approach to risk-taking?",
    "How do you create a culture of learning?",
    "What's the best advice you've ever received?",
    "How do you help teams recover from setbacks?",
    "What's your philosophy on experimentation?",
    "How do you balance innovation with stability?",
    "How do you encourage creativity in your teams?",
    "What's your process for evaluating new ideas?",
    "How do you balance innovation with delivery?",
    "What's the most innovative project you've led?",
    "How do you handle resistance to change?",
    "What's your innovation budget strategy?",
    "Tell me more about your management philosophy",
    "What's your biggest professional achievement?",
    "How do you handle stress and pressure?",
    "What's your communication style?",
    "How do you make difficult decisions?",
    "What drives you as a leader?",
];

pub const TECHNICAL_QUESTIONS: &[&str] = &[
    "What's the smartest way you've used GenAI in production?",
    "How do you stay technical without becoming the bottleneck?",
    "How do you stay current with AI trends?",
    "What's your take on AI replacing developers?",
    "How do you evaluate new AI tools for the team?",
    "What's the biggest AI mistake you've seen?",
    "How do you build AI literacy in your teams?",
    "What's your AI strategy for the next 2 years?",
    "How do you stay current with technology?",
    "What's your code review philosophy?",
    "How do you handle technical debt?",
    "What's your approach to architecture decisions?",
    "How do you balance speed with quality?",
    "What's your testing strategy?",
];

const ENGINEERING_PRACTICE: [&str; 6] = [
    "How do you stay current with technology?",
    "What's your code review philosophy?",
    "How do you handle technical debt?",
    "What's your approach to architecture decisions?",
    "How do you balance speed with quality?",
    "What's your testing strategy?",
];

/// Conversation topic detected in the last assistant reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Leadership,
    GenAi,
    Failure,
    Innovation,
    Technical,
}

impl Topic {
    /// First topic whose keywords appear in `reply`
    #[must_use]
    pub fn detect(reply: &str) -> Option<Self> {
        let content = reply.to_lowercase();
        let has = |keyword: &str| content.contains(keyword);
        let has_word = |word: &str| {
            content
                .split(|c: char| !c.is_alphanumeric())
                .any(|w| w == word)
        };

        if has("leadership") || has("team") {
            Some(Self::Leadership)
        } else if has("genai") || has_word("ai") || has("artificial intelligence") {
            Some(Self::GenAi)
        } else if has("failure") || has("mistake") || has("learn") {
            Some(Self::Failure)
        } else if has("innovation") || has("creative") || has("new") {
            Some(Self::Innovation)
        } else if has("technical") || has("code") || has("development") {
            Some(Self::Technical)
        } else {
            None
        }
    }

    /// Leadership and technical follow-ups for the topic
    #[must_use]
    pub const fn questions(self) -> ([&'static str; 6], [&'static str; 6]) {
        match self {
            Self::Leadership => (
                [
                    "How do you handle difficult team members?",
                    "What's your approach to remote team management?",
                    "How do you measure team success?",
                    "Tell me about a time you had to let someone go",
                    "How do you balance technical and people leadership?",
                    "What's your secret to high team retention?",
                ],
                ENGINEERING_PRACTICE,
            ),
            Self::GenAi => (
                [
                    "How do you create a culture of learning?",
                    "What's your philosophy on experimentation?",
                    "How do you balance innovation with stability?",
                    "How do you encourage creativity in your teams?",
                    "What's your process for evaluating new ideas?",
                    "How do you handle resistance to change?",
                ],
                [
                    "How do you stay current with AI trends?",
                    "What's your take on AI replacing developers?",
                    "How do you evaluate new AI tools for the team?",
                    "What's the biggest AI mistake you've seen?",
                    "How do you build AI literacy in your teams?",
                    "What's your AI strategy for the next 2 years?",
                ],
            ),
            Self::Failure => (
                [
                    "What's your approach to risk-taking?",
                    "How do you create a culture of learning?",
                    "What's the best advice you've ever received?",
                    "How do you help teams recover from setbacks?",
                    "What's your philosophy on experimentation?",
                    "How do you balance innovation with stability?",
                ],
                [
                    "How do you handle technical debt?",
                    "What's your approach to architecture decisions?",
                    "How do you balance speed with quality?",
                    "What's your testing strategy?",
                    "How do you stay current with technology?",
                    "What's your code review philosophy?",
                ],
            ),
            Self::Innovation => (
                [
                    "How do you encourage creativity in your teams?",
                    "What's your process for evaluating new ideas?",
                    "How do you balance innovation with delivery?",
                    "What's the most innovative project you've led?",
                    "How do you handle resistance to change?",
                    "What's your innovation budget strategy?",
                ],
                ENGINEERING_PRACTICE,
            ),
            Self::Technical => (
                [
                    "How do you balance technical and people leadership?",
                    "What's your approach to remote team management?",
                    "How do you measure team success?",
                    "How do you handle difficult team members?",
                    "What's your secret to high team retention?",
                    "Tell me about a time you had to let someone go",
                ],
                ENGINEERING_PRACTICE,
            ),
        }
    }
}

/// First `PER_CATEGORY` unasked questions, restarting an exhausted category
fn pick_unasked(bank: &[&'static str], asked: &HashSet<&str>) -> Vec<&'static str> {
    let unasked: Vec<&'static str> = bank
        .iter()
        .copied()
        .filter(|q| !asked.contains(q))
        .take(PER_CATEGORY)
        .collect();
    if unasked.is_empty() {
        bank.iter().copied().take(PER_CATEGORY).collect()
    } else {
        unasked
    }
}

/// Three leadership questions then three technical ones
#[must_use]
pub fn balanced(asked: &[String]) -> Vec<String> {
    let asked: HashSet<&str> = asked.iter().map(String::as_str).collect();
    pick_unasked(LEADERSHIP_QUESTIONS, &asked)
        .into_iter()
        .chain(pick_unasked(TECHNICAL_QUESTIONS, &asked))
        .map(str::to_string)
        .collect()
}

/// Follow-ups tailored to the last reply, topped up from [`balanced`]
#[must_use]
pub fn contextual(last_reply: Option<&str>, asked: &[String]) -> Vec<String> {
    let Some(topic) = last_reply.and_then(Topic::detect) else {
        return balanced(asked);
    };

    let asked_set: HashSet<&str> = asked.iter().map(String::as_str).collect();
    let (leadership, technical) = topic.questions();
    let select = |candidates: &[&'static str]| -> Vec<String> {
        candidates
            .iter()
            .filter(|q| !asked_set.contains(*q))
            .take(PER_CATEGORY)
            .map(|q| (*q).to_string())
            .collect()
    };
    let mut leadership_selected = select(&leadership[..]);
    let mut technical_selected = select(&technical[..]);

    if leadership_selected.len() < PER_CATEGORY || technical_selected.len() < PER_CATEGORY {
        let fallback = balanced(asked);
        let top_up = |selected: &mut Vec<String>, bank: &[&str]| {
            let needed = PER_CATEGORY.saturating_sub(selected.len());
            let extra: Vec<String> = fallback
                .iter()
                .filter(|q| bank.contains(&q.as_str()) && !selected.contains(q))
                .take(needed)
                .cloned()
                .collect();
            selected.extend(extra);
        };
        top_up(&mut leadership_selected, LEADERSHIP_QUESTIONS);
        top_up(&mut technical_selected, TECHNICAL_QUESTIONS);
    }

    leadership_selected.extend(technical_selected);
    leadership_selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_balanced_fresh() {
        let questions = balanced(&[]);
        assert_eq!(questions.len(), 6);
        assert_eq!(&questions[..3], &strings(&LEADERSHIP_QUESTIONS[..3])[..]);
        assert_eq!(&questions[3..], &strings(&TECHNICAL_QUESTIONS[..3])[..]);
    }

    #[test]
    fn test_balanced_skips_asked() {
        let asked = strings(&[LEADERSHIP_QUESTIONS[0], TECHNICAL_QUESTIONS[1]]);
        let questions = balanced(&asked);
        assert_eq!(questions[0], LEADERSHIP_QUESTIONS[1]);
        assert_eq!(questions[3], TECHNICAL_QUESTIONS[0]);
        assert_eq!(questions[4], TECHNICAL_QUESTIONS[2]);
    }

    #[test]
    fn test_balanced_restarts_exhausted_category() {
        let asked = strings(TECHNICAL_QUESTIONS);
        let questions = balanced(&asked);
        assert_eq!(&questions[3..], &strings(&TECHNICAL_QUESTIONS[..3])[..]);
    }

    #[test]
    fn test_topic_detection_order() {
        assert_eq!(Topic::detect("My TEAM and I"), Some(Topic::Leadership));
        assert_eq!(Topic::detect("We shipped AI features"), Some(Topic::GenAi));
        assert_eq!(Topic::detect("I said it plainly"), None);
        assert_eq!(Topic::detect("A mistake I made"), Some(Topic::Failure));
        assert_eq!(Topic::detect("Something new"), Some(Topic::Innovation));
        assert_eq!(Topic::detect("Code quality"), Some(Topic::Technical));
        assert_eq!(Topic::detect("Hello there"), None);
    }

    #[test]
    fn test_contextual_uses_topic_lists() {
        let questions = contextual(Some("We used GenAI to speed up support."), &[]);
        assert_eq!(questions.len(), 6);
        assert_eq!(questions[0], "How do you create a culture of learning?");
        assert_eq!(questions[3], "How do you stay current with AI trends?");
    }

    #[test]
    fn test_contextual_tops_up_from_balanced() {
        let asked = strings(&[
            "How do you handle difficult team members?",
            "What's your approach to remote team management?",
            "How do you measure team success?",
            "Tell me about a time you had to let someone go",
            "How do you balance technical and people leadership?",
        ]);
        let questions = contextual(Some("Leadership is a team sport."), &asked);

        assert_eq!(questions.len(), 6);
        assert_eq!(questions[0], "What's your secret to high team retention?");
        assert_eq!(questions[1], LEADERSHIP_QUESTIONS[0]);
        assert_eq!(questions[2], LEADERSHIP_QUESTIONS[1]);
        assert_eq!(questions[3], "How do you stay current with technology?");
    }

    #[test]
    fn test_contextual_without_reply_is_balanced() {
        assert_eq!(contextual(None, &[]), balanced(&[]));
        assert_eq!(contextual(Some("Hello there"), &[]), balanced(&[]));
    }
}
