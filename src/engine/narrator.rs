use serde_json::Value;
use thiserror::Error;

use crate::model::message::ChatMessage;

/// Required number of follow-up options in every narrator reply.
pub const OPTION_COUNT: usize = 4;

/// The external narrative generator. Takes the whole session transcript,
/// returns one more beat of the story. Implementations may block; the
/// controller treats every failure the same way.
pub trait Narrator {
    fn narrate(&self, history: &[ChatMessage]) -> Result<NarrativeReply, NarratorError>;
}

impl<N: Narrator + ?Sized> Narrator for &N {
    fn narrate(&self, history: &[ChatMessage]) -> Result<NarrativeReply, NarratorError> {
        (**self).narrate(history)
    }
}

/// A decoded narrator reply. `raw` is the unmodified assistant text,
/// kept so the transcript replays exactly what the model said.
#[derive(Debug, Clone)]
pub struct NarrativeReply {
    pub story: String,
    pub options: Vec<String>,
    pub raw: String,
}

#[derive(Debug, Error)]
pub enum NarratorError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("narrator reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("narrator reply is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("narrator reply offered {0} options, expected {OPTION_COUNT}")]
    BadOptionCount(usize),

    #[error("chat completion contained no choices")]
    EmptyCompletion,
}

/// Decode the raw assistant text into a reply, enforcing the output
/// contract: a JSON object with a `story` string and exactly four
/// string options. Markdown code fences around the object are stripped
/// first, since models wrap JSON that way often enough.
pub fn decode_reply(raw: &str) -> Result<NarrativeReply, NarratorError> {
    let cleaned = strip_code_fence(raw);
    let value: Value = serde_json::from_str(cleaned)?;

    let story = value
        .get("story")
        .and_then(Value::as_str)
        .ok_or(NarratorError::MissingField("story"))?
        .to_string();

    let options_value = value
        .get("options")
        .and_then(Value::as_array)
        .ok_or(NarratorError::MissingField("options"))?;

    let options: Vec<String> = options_value
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    if options.len() != OPTION_COUNT || options_value.len() != OPTION_COUNT {
        return Err(NarratorError::BadOptionCount(options_value.len()));
    }

    Ok(NarrativeReply {
        story,
        options,
        raw: raw.to_string(),
    })
}

fn strip_code_fence(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_json(option_count: usize) -> String {
        let options: Vec<String> = (0..option_count).map(|i| format!("\"Opt {i}\"")).collect();
        format!(
            "{{\"story\": \"A door creaks open.\", \"options\": [{}]}}",
            options.join(", ")
        )
    }

    #[test]
    fn well_formed_reply_decodes() {
        let reply = decode_reply(&reply_json(4)).unwrap();
        assert_eq!(reply.story, "A door creaks open.");
        assert_eq!(reply.options.len(), 4);
        assert_eq!(reply.options[2], "Opt 2");
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let fenced = format!("```json\n{}\n```", reply_json(4));
        let reply = decode_reply(&fenced).unwrap();
        assert_eq!(reply.story, "A door creaks open.");
        // the transcript keeps the fence, the decode does not
        assert_eq!(reply.raw, fenced);
    }

    #[test]
    fn bare_fence_is_unwrapped_too() {
        let fenced = format!("```\n{}\n```", reply_json(4));
        assert!(decode_reply(&fenced).is_ok());
    }

    #[test]
    fn missing_story_is_an_error() {
        let err = decode_reply("{\"options\": [\"a\", \"b\", \"c\", \"d\"]}").unwrap_err();
        assert!(matches!(err, NarratorError::MissingField("story")));
    }

    #[test]
    fn missing_options_is_an_error() {
        let err = decode_reply("{\"story\": \"hm\"}").unwrap_err();
        assert!(matches!(err, NarratorError::MissingField("options")));
    }

    #[test]
    fn wrong_option_count_is_an_error() {
        let err = decode_reply(&reply_json(3)).unwrap_err();
        assert!(matches!(err, NarratorError::BadOptionCount(3)));
    }

    #[test]
    fn non_string_options_are_an_error() {
        let err =
            decode_reply("{\"story\": \"hm\", \"options\": [\"a\", 2, \"c\", \"d\"]}").unwrap_err();
        assert!(matches!(err, NarratorError::BadOptionCount(4)));
    }

    #[test]
    fn plain_prose_is_an_error() {
        assert!(decode_reply("The cave is dark.").is_err());
    }
}
