use crate::error::PlayerError;
use crate::library::{Locator, validate_cover_url};

/// What the text prompt is collecting.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptKind {
    /// Step one of "add URL": the track locator.
    TrackUrl,
    /// Step two of "add URL": an optional cover for the validated locator.
    NewTrackCover(Locator),
    /// Cover for the active track.
    CurrentCover,
}

/// A single-line modal input.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    kind: PromptKind,
    input: String,
}

/// Result of submitting a prompt.
#[derive(Debug, PartialEq)]
pub enum PromptOutcome {
    /// Continue with another prompt.
    Next(Prompt),
    AddTrack {
        locator: Locator,
        cover_url: Option<String>,
    },
    SetCover(String),
    /// Nothing entered where input is optional.
    Dismissed,
}

impl Prompt {
    pub fn track_url() -> Self {
        Self {
            kind: PromptKind::TrackUrl,
            input: String::new(),
        }
    }

    pub fn current_cover() -> Self {
        Self {
            kind: PromptKind::CurrentCover,
            input: String::new(),
        }
    }

    pub fn kind(&self) -> &PromptKind {
        &self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::TrackUrl => " track URL or path ",
            PromptKind::NewTrackCover(_) => " cover image URL (optional) ",
            PromptKind::CurrentCover => " cover image URL ",
        }
    }

    pub fn push(&mut self, c: char) {
        if !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    /// Validate the input. On error the prompt stays usable so the user
    /// can correct it.
    pub fn submit(&self) -> Result<PromptOutcome, PlayerError> {
        let text = self.input.trim();
        match &self.kind {
            PromptKind::TrackUrl => {
                let locator = Locator::parse(text)?;
                Ok(PromptOutcome::Next(Prompt {
                    kind: PromptKind::NewTrackCover(locator),
                    input: String::new(),
                }))
            }
            PromptKind::NewTrackCover(locator) => {
                let cover_url = if text.is_empty() {
                    None
                } else {
                    Some(validate_cover_url(text)?)
                };
                Ok(PromptOutcome::AddTrack {
                    locator: locator.clone(),
                    cover_url,
                })
            }
            PromptKind::CurrentCover if text.is_empty() => Ok(PromptOutcome::Dismissed),
            PromptKind::CurrentCover => Ok(PromptOutcome::SetCover(validate_cover_url(text)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(mut prompt: Prompt, text: &str) -> Prompt {
        text.chars().for_each(|c| prompt.push(c));
        prompt
    }

    #[test]
    fn url_then_cover_adds_a_track() {
        let first = typed(Prompt::track_url(), "https://example.com/book/part1.mp3");
        let PromptOutcome::Next(second) = first.submit().unwrap() else {
            panic!("expected a cover prompt");
        };
        assert!(matches!(second.kind(), PromptKind::NewTrackCover(_)));

        let second = typed(second, "https://example.com/cover.png");
        match second.submit().unwrap() {
            PromptOutcome::AddTrack { locator, cover_url } => {
                assert_eq!(locator.as_str(), "https://example.com/book/part1.mp3");
                assert_eq!(cover_url.as_deref(), Some("https://example.com/cover.png"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cover_step_is_optional() {
        let first = typed(Prompt::track_url(), "/books/a.mp3");
        let PromptOutcome::Next(second) = first.submit().unwrap() else {
            panic!("expected a cover prompt");
        };
        assert!(matches!(
            second.submit().unwrap(),
            PromptOutcome::AddTrack { cover_url: None, .. }
        ));
    }

    #[test]
    fn invalid_url_keeps_the_prompt_open() {
        let mut prompt = typed(Prompt::track_url(), "nope");
        assert!(matches!(
            prompt.submit(),
            Err(PlayerError::InvalidLocator { .. })
        ));
        assert_eq!(prompt.input(), "nope");

        prompt.pop();
        assert_eq!(prompt.input(), "nop");
        assert!(Prompt::track_url().submit().is_err());
    }

    #[test]
    fn empty_cover_for_current_track_is_dismissed() {
        assert_eq!(
            Prompt::current_cover().submit().unwrap(),
            PromptOutcome::Dismissed
        );
        let prompt = typed(Prompt::current_cover(), "https://example.com/c.jpg");
        assert_eq!(
            prompt.submit().unwrap(),
            PromptOutcome::SetCover("https://example.com/c.jpg".into())
        );
    }
}
